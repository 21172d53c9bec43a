//! Application settings persistence
//!
//! Handles saving and loading user preferences.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Lyric sync tuning
    #[serde(default)]
    pub sync: SyncSettings,
}

/// Lyric sync settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Offset subtracted from playback progress (ms). Negative shows lines early.
    #[serde(default = "default_sync_offset_ms")]
    pub sync_offset_ms: i64,
    /// Engine tick period (ms)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Drift in pixels that starts an eased scroll jump
    #[serde(default = "default_scroll_px")]
    pub scroll_threshold_px: f64,
    /// Drift in pixels from a running jump's target that restarts it
    #[serde(default = "default_scroll_px")]
    pub scroll_hysteresis_px: f64,
    /// Scroll jump rate relative to the highlight's edge rate
    #[serde(default = "default_jump_speed")]
    pub jump_speed: f64,
}

fn default_sync_offset_ms() -> i64 {
    -50
}

fn default_tick_interval_ms() -> u64 {
    15
}

fn default_scroll_px() -> f64 {
    3.0
}

fn default_jump_speed() -> f64 {
    2.0
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            sync_offset_ms: default_sync_offset_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            scroll_threshold_px: default_scroll_px(),
            scroll_hysteresis_px: default_scroll_px(),
            jump_speed: default_jump_speed(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lyrisync", "Lyrisync")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };
        match Self::load_from_file(&path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(path) = Self::file_path() {
            self.save_to_file(&path)
        } else {
            Err(SettingsError::Io(
                "Could not determine config directory".to_string(),
            ))
        }
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.sync.sync_offset_ms = 120;
        settings.sync.jump_speed = 3.5;
        settings.save_to_file(&path).unwrap();

        assert_eq!(Settings::load_from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "sync": { "sync_offset_ms": 0 } }"#).unwrap();

        let settings = Settings::load_from_file(&path).unwrap();
        assert_eq!(settings.sync.sync_offset_ms, 0);
        assert_eq!(settings.sync.tick_interval_ms, 15);
        assert_eq!(settings.sync.scroll_threshold_px, 3.0);

        std::fs::write(&path, "{}").unwrap();
        assert_eq!(Settings::load_from_file(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert!(matches!(
            Settings::load_from_file(&path),
            Err(SettingsError::Io(_))
        ));

        std::fs::write(&path, "not json").unwrap();
        let err = Settings::load_from_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error:"));
    }
}
