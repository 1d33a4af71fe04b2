//! Durable string key/value preferences
//!
//! The gallery stores a single key (the active filter mode) here. Two stores
//! are provided:
//!
//! - **`MemoryPreferences`**: process-local, for tests and embedding
//! - **`FilePreferences`**: JSON file in the user's data directory
//!   (`~/.local/share/gallerist/preferences.json` on Linux)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PREFERENCES_FILENAME: &str = "preferences.json";

/// Errors raised while persisting preferences
#[derive(Debug, Error)]
pub enum PrefsError {
    /// The preference file could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The preferences could not be serialized
    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No data directory is available on this system
    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Key/value persistence used by the collection controller
pub trait PreferenceStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// In-memory preference store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry
    #[must_use]
    pub fn with(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = BTreeMap::new();
        values.insert(key.into(), value.into());
        Self { values }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Preference store persisted as a JSON file
///
/// Reads the file once on open; every `set` rewrites it. A missing or
/// corrupted file starts out empty.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    file: PreferenceFile,
}

impl FilePreferences {
    /// Open the store at `path`
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file = match fs::read(&path) {
            Ok(data) => serde_json::from_slice(&data).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupted preferences at {}: {e}", path.display());
                PreferenceFile::default()
            }),
            Err(_) => PreferenceFile::default(),
        };

        Self { path, file }
    }

    /// Open the store at its default location
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::NoDataDir` if the system data directory cannot be determined.
    pub fn open_default() -> Result<Self, PrefsError> {
        Ok(Self::open(Self::default_path()?))
    }

    /// Default location of the preference file
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::NoDataDir` if the system data directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, PrefsError> {
        dirs::data_dir()
            .map(|d| d.join("gallerist").join(PREFERENCES_FILENAME))
            .ok_or(PrefsError::NoDataDir)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(&self.file)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.file.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.file.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for Box<P> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        (**self).set(key, value)
    }
}
