/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Incremental grid pagination (loader.rs)
/// - Lightbox viewer state (viewer.rs)

pub mod data;
pub mod loader;
pub mod viewer;
