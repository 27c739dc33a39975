/// View helpers
///
/// Each submodule builds one screen or overlay as an `Element<Message>`:
/// - Album cover cards and search (album_list.rs)
/// - The incremental image grid (grid.rs)
/// - The lightbox overlay (lightbox.rs)

pub mod album_list;
pub mod grid;
pub mod lightbox;
