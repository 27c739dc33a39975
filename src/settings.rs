/// Persisted application settings
///
/// A small JSON file in the platform config directory. Currently it only
/// remembers the albums folder so the gallery reopens where it left off.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Folder the album Markdown files live in
    pub albums_dir: Option<PathBuf>,
}

impl Settings {
    /// Where the settings file lives
    ///
    /// - Linux: ~/.config/album-gallery/settings.json
    /// - macOS: ~/Library/Application Support/album-gallery/settings.json
    /// - Windows: %APPDATA%\album-gallery\settings.json
    fn path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("album-gallery");
        path.push("settings.json");
        Some(path)
    }

    /// Load saved settings, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Settings::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => Settings::from_json(&json).unwrap_or_default(),
            Err(_) => Settings::default(),
        }
    }

    /// Persist the settings; failures are warnings, never fatal
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("⚠️  Could not create config directory: {}", e);
                return;
            }
        }

        match self.to_json() {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    eprintln!("⚠️  Could not save settings: {}", e);
                }
            }
            Err(e) => eprintln!("⚠️  Could not serialize settings: {}", e),
        }
    }

    /// Convert to JSON for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from stored JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            albums_dir: Some(PathBuf::from("/home/me/Pictures/albums")),
        };

        let json = settings.to_json().unwrap();
        let restored = Settings::from_json(&json).unwrap();

        assert_eq!(settings, restored);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{albums_dir").is_err());
    }
}
