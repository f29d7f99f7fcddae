use crate::error::ConfigError;
use crate::settings::{GameSettings, Theme, ViewMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_VERSION: u32 = 1;

/// Application settings saved between runs. Cell contents are never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Grid dimensions and tick interval
    pub settings: GameSettings,
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// Fill the first grid randomly instead of starting empty
    #[serde(default)]
    pub randomize_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            settings: GameSettings::default(),
            theme: Theme::default(),
            view_mode: ViewMode::default(),
            randomize_on_start: false,
        }
    }
}

impl AppConfig {
    /// `<config dir>/life-simulator/config.json`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join("life-simulator").join("config.json"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Export config to a JSON file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("saved config to {}", path.display());
        Ok(())
    }

    /// Import config from a JSON file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.settings.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig {
            version: 1,
            settings: GameSettings {
                rows: 40,
                cols: 60,
                interval_ms: 250,
            },
            theme: Theme::Dark,
            view_mode: ViewMode::Braille,
            randomize_on_start: true,
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
        assert!(json.contains("\"theme\": \"dark\""));
    }

    #[test]
    fn test_config_file_save_and_load() {
        let config = AppConfig::default();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        AppConfig::default().save_to_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_randomize_defaults_to_false() {
        let json = r#"{
            "version": 1,
            "settings": { "rows": 10, "cols": 12, "interval_ms": 500 },
            "theme": "light",
            "view_mode": "blocks"
        }"#;
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), json).unwrap();

        let loaded = AppConfig::load_from_file(temp_file.path()).unwrap();
        assert!(!loaded.randomize_on_start);
        assert_eq!(loaded.settings.cols, 12);
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not valid json").unwrap();

        let result = AppConfig::load_from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_out_of_range_config_is_rejected() {
        let mut config = AppConfig::default();
        config.settings.rows = 0;
        let temp_file = NamedTempFile::new().unwrap();
        config.save_to_file(temp_file.path()).unwrap();

        let result = AppConfig::load_from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let result = AppConfig::load_from_file(Path::new("/nonexistent/path/config.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
