/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the album source and the UI layer.

/// A single image inside an album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageItem {
    /// Caption shown over the image (may be empty)
    pub title: String,
    /// Where the bytes live: an http(s) URL or a local path
    pub url: String,
}

/// A named, dated collection of images parsed from one Markdown file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// Identifier derived from the file name (e.g. "2024-summer")
    pub id: String,
    /// Display name from the front matter (empty if absent)
    pub name: String,
    /// ISO date (YYYY-MM-DD) from the front matter, or empty
    pub date: String,
    /// Free-form description from the front matter (empty if absent)
    pub description: String,
    /// Cover image URL from the front matter (empty if absent)
    pub cover_image: String,
    /// Images in display order; pagination and the lightbox index into this
    pub images: Vec<ImageItem>,
}
