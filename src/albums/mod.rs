/// Album content source
///
/// Albums are Markdown files with front-matter metadata and one image
/// link per line. This module turns a folder of them into the data model:
/// - Parsing one file (parser.rs)
/// - Scanning, lookup and search over a folder (store.rs)

pub mod parser;
pub mod store;
