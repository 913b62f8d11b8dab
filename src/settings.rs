/// Persisted shell preferences
///
/// The gallery library never reads these; the shell loads them, passes a
/// folder in, and writes the folder back after a successful change.
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to write settings: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize settings: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Folder shown by the previous session
    #[serde(default)]
    pub last_folder: Option<PathBuf>,
}

impl Settings {
    /// Get the path where settings are stored
    /// e.g. ~/.config/kra-gallery/settings.json on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kra-gallery").join(SETTINGS_FILE))
    }

    /// Load settings; a missing or unreadable file gives the defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!("Cannot read settings {}: {}", path.display(), e);
                }
                return Self::default();
            }
        };

        serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed settings {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Folder to show on startup: the last one if it still exists,
    /// otherwise the user's Pictures folder
    pub fn start_folder(&self) -> PathBuf {
        match &self.last_folder {
            Some(folder) if folder.is_dir() => folder.clone(),
            _ => default_folder(),
        }
    }
}

/// The platform Pictures folder, falling back to ~/Pictures
pub fn default_folder() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("Pictures"))
}
