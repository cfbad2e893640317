//! Persisted output folder.
//!
//! The record is a single JSON object, `{"output_folder": "/abs/path"}`,
//! rewritten in full on every change. Reading never fails: anything wrong with
//! the file falls back to the current working directory.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// File name used when no explicit config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Errors from persisting the output folder.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be written.
    #[error("Failed to write config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The record could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_folder: Option<PathBuf>,
}

/// Reads and writes the output-folder record.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved output folder, or the current working directory.
    pub fn load(&self) -> PathBuf {
        match self.read_folder() {
            Some(folder) => folder,
            None => current_dir(),
        }
    }

    fn read_folder(&self) -> Option<PathBuf> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}, using working directory", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Could not read config {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<ConfigRecord>(&contents) {
            Ok(record) => record.output_folder,
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Persist `folder` as the output folder, replacing the whole record.
    pub fn save(&self, folder: &Path) -> Result<(), ConfigError> {
        let record = ConfigRecord {
            output_folder: Some(folder.to_path_buf()),
        };
        let json = serde_json::to_string(&record)?;

        std::fs::write(&self.path, json).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved output folder {} to {}", folder.display(), self.path.display());
        Ok(())
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        warn!("Cannot resolve working directory: {}", e);
        PathBuf::from(".")
    })
}

/// The output folder in effect for this process.
///
/// Initialised from the store; changed only through [`OutputLocation::select`].
#[derive(Debug, Clone)]
pub struct OutputLocation {
    folder: PathBuf,
    store: ConfigStore,
}

impl OutputLocation {
    /// Load the current folder from `store`.
    pub fn load(store: ConfigStore) -> Self {
        let folder = store.load();
        Self { folder, store }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Switch to `folder` and persist it.
    ///
    /// The new folder is in effect even when persisting fails; the error only
    /// means the choice will not survive a restart.
    pub fn select(&mut self, folder: impl Into<PathBuf>) -> Result<(), ConfigError> {
        self.folder = folder.into();
        self.store.save(&self.folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        store.save(Path::new("/tmp/out")).unwrap();

        // A second store stands in for a fresh process
        let fresh = ConfigStore::new(dir.path().join("config.json"));
        assert_eq!(fresh.load(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_record_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        store.save(Path::new("/data/resized")).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({ "output_folder": "/data/resized" }));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        store.save(Path::new("/first")).unwrap();
        store.save(Path::new("/second")).unwrap();

        assert_eq!(store.load(), PathBuf::from("/second"));
    }

    #[test]
    fn test_missing_file_uses_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("absent.json"));

        assert_eq!(store.load(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_missing_field_uses_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        assert_eq!(ConfigStore::new(path).load(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_malformed_file_uses_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(ConfigStore::new(path).load(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"output_folder": "/keep", "extra": 1}"#).unwrap();

        assert_eq!(ConfigStore::new(path).load(), PathBuf::from("/keep"));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("missing_dir").join("config.json"));

        let err = store.save(Path::new("/tmp/out")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_output_location_select_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        let mut location = OutputLocation::load(ConfigStore::new(&config));

        location.select("/srv/images").unwrap();

        assert_eq!(location.folder(), Path::new("/srv/images"));
        assert_eq!(ConfigStore::new(&config).load(), PathBuf::from("/srv/images"));
    }

    #[test]
    fn test_output_location_keeps_selection_when_save_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nope").join("config.json"));
        let mut location = OutputLocation::load(store);

        assert!(location.select("/srv/images").is_err());
        assert_eq!(location.folder(), Path::new("/srv/images"));
    }
}
