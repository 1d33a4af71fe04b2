//! Configuration module for gallerist
//!
//! Manages gallery settings: page size, recency window, coalescing window,
//! the persisted filter key, the default data file and viewer keybinds.
//! Configuration is stored in the user's config directory.

use crate::collection::{CollectionSettings, DEFAULT_PREFERENCE_KEY, FilterMode, RecencyWindow};
use crate::keybinds::KeybindConfig;
use crate::pagination::{DEFAULT_COALESCE_WINDOW, DEFAULT_PAGE_SIZE};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Items revealed per page
    pub page_size: usize,

    /// How far back `filter-new` looks
    pub recency_window: RecencyWindow,

    /// Quiet period before a burst of scroll signals is acted on (ms)
    pub coalesce_window_ms: u64,

    /// Preference key holding the active filter
    pub preference_key: String,

    /// Filter used when nothing is persisted yet
    pub default_filter: FilterMode,

    /// Collection file opened when `--data` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    /// Overlay keybinds, action name to key(s)
    pub keybinds: KeybindConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            recency_window: RecencyWindow::default(),
            coalesce_window_ms: DEFAULT_COALESCE_WINDOW,
            preference_key: DEFAULT_PREFERENCE_KEY.to_string(),
            default_filter: FilterMode::default(),
            data_path: None,
            keybinds: KeybindConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("gallerist").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path()?)
    }

    /// Load configuration from `path`, writing the defaults there if it doesn't exist
    ///
    /// Keys missing from the file keep their default values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Creating default configuration at {}", path.display());
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Settings for the collection controller
    #[must_use]
    pub fn collection_settings(&self) -> CollectionSettings {
        CollectionSettings {
            recency_window: self.recency_window,
            preference_key: self.preference_key.clone(),
            default_filter: self.default_filter.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GalleryConfig::default();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.coalesce_window_ms, 100);
        assert_eq!(config.recency_window, RecencyWindow::Months(3));
        assert_eq!(config.default_filter, FilterMode::MostLiked);
        assert_eq!(config.preference_key, "filter");
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = GalleryConfig::load_from(&path).unwrap();
        assert_eq!(config, GalleryConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = GalleryConfig {
            page_size: 24,
            recency_window: RecencyWindow::Days(30),
            default_filter: FilterMode::MostDiscussed,
            data_path: Some(PathBuf::from("/srv/media.json")),
            ..GalleryConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = GalleryConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 6\ndefault_filter = \"new\"\n").unwrap();

        let config = GalleryConfig::load_from(&path).unwrap();
        assert_eq!(config.page_size, 6);
        assert_eq!(config.default_filter, FilterMode::MostRecent);
        assert_eq!(config.coalesce_window_ms, 100);
        assert_eq!(config.keybinds, KeybindConfig::default());
    }

    #[test]
    fn test_collection_settings() {
        let config = GalleryConfig {
            preference_key: "gallery.filter".into(),
            ..GalleryConfig::default()
        };
        let settings = config.collection_settings();
        assert_eq!(settings.preference_key, "gallery.filter");
        assert_eq!(settings.recency_window, RecencyWindow::Months(3));
    }
}
