//! Key-value persistence for application state
//!
//! State is stored under two keys: [`HISTORY_KEY`] holds the history as a
//! JSON array and [`THEME_KEY`] holds `"light"` or `"dark"`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unitsnap_core::SnapError;

pub const HISTORY_KEY: &str = "unitmaster-history";
pub const THEME_KEY: &str = "unitmaster-theme";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("I/O failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<StorageError> for SnapError {
    fn from(e: StorageError) -> Self {
        SnapError::storage(e.to_string())
    }
}

/// String key-value store
pub trait Storage {
    /// Stored value, or `None` when the key was never written
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile storage, for tests and one-shot use
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under a root directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// The directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        // Keys name files directly, so nothing that could leave the root
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io { path: path.to_path_buf(), source }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;

        let temp = path.with_extension("json.tmp");
        fs::write(&temp, value).map_err(io_error(&temp))?;
        fs::rename(&temp, &path).map_err(io_error(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load(THEME_KEY).unwrap(), None);
        storage.save(THEME_KEY, "dark").unwrap();
        assert_eq!(storage.load(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().join("state"));

        assert_eq!(storage.load(HISTORY_KEY).unwrap(), None);
        storage.save(HISTORY_KEY, "[]").unwrap();
        storage.save(HISTORY_KEY, "[1]").unwrap();
        assert_eq!(storage.load(HISTORY_KEY).unwrap().as_deref(), Some("[1]"));

        assert!(temp.path().join("state").join("unitmaster-history.json").exists());
        assert!(!temp.path().join("state").join("unitmaster-history.json.tmp").exists());
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path());
        for key in ["", "../escape", "a/b", "a.b"] {
            assert!(matches!(storage.save(key, "x"), Err(StorageError::InvalidKey(_))), "key {:?}", key);
        }
    }

    #[test]
    fn test_storage_error_to_snap_error() {
        let err: SnapError = StorageError::InvalidKey("x/y".into()).into();
        assert_eq!(err.code, "STORAGE_ERROR");
    }
}
