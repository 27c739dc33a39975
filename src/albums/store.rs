/// Album store
///
/// Scans a folder of `.md` album files into memory and answers the
/// lookups the UI needs: everything, one by id, or a search filter.

use std::path::{Path, PathBuf};

use tokio::task;
use walkdir::WalkDir;

use crate::albums::parser::parse_album;
use crate::state::data::Album;

/// Errors from scanning the albums folder
///
/// Individual album files that fail to read are skipped, not errors;
/// only problems with the folder itself surface here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("albums folder does not exist: {0}")]
    MissingFolder(PathBuf),
    #[error("failed to read albums folder: {0}")]
    Io(#[from] std::io::Error),
}

/// All albums from one folder, in display order
#[derive(Debug, Clone, Default)]
pub struct AlbumStore {
    albums: Vec<Album>,
}

impl AlbumStore {
    /// Scan `dir` recursively for `.md` files and parse each into an album
    ///
    /// Unreadable files are skipped with a warning. Albums are ordered by
    /// date descending, then by name, so listings are deterministic.
    pub fn scan(dir: &Path) -> Result<Self, StoreError> {
        if !dir.is_dir() {
            return Err(StoreError::MissingFolder(dir.to_path_buf()));
        }

        let mut albums = Vec::new();

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "md") {
                continue;
            }

            let id = path
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();

            match std::fs::read_to_string(path) {
                Ok(contents) => albums.push(parse_album(&id, &contents)),
                Err(e) => {
                    eprintln!("⚠️  Skipping unreadable album {}: {}", path.display(), e);
                }
            }
        }

        albums.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.name.cmp(&b.name)));

        println!("📚 Loaded {} albums from {}", albums.len(), dir.display());

        Ok(AlbumStore { albums })
    }

    /// Async wrapper around `scan` for use with `Task::perform`
    ///
    /// Runs on a blocking thread since the scan walks the filesystem.
    pub async fn scan_async(dir: PathBuf) -> Result<AlbumStore, String> {
        task::spawn_blocking(move || AlbumStore::scan(&dir).map_err(|e| e.to_string()))
            .await
            .map_err(|e| format!("Task join error: {}", e))?
    }

    pub fn all(&self) -> &[Album] {
        &self.albums
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// Look an album up by its identifier (the file stem)
    pub fn album_by_id(&self, id: &str) -> Option<&Album> {
        self.albums.iter().find(|album| album.id == id)
    }

    /// Case-insensitive substring filter over name and description
    ///
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Album> {
        let query = query.to_lowercase();
        self.albums
            .iter()
            .filter(|album| {
                album.name.to_lowercase().contains(&query)
                    || album.description.to_lowercase().contains(&query)
            })
            .collect()
    }
}
