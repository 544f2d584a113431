//! Durable client-side key-value storage for the last used identifier.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path} is not a JSON object of strings: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value store.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a flat JSON object in a single file.
///
/// A missing file reads as empty; parent directories are created on write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StorageError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_string_pretty(&entries).map_err(|e| StorageError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })?;
        std::fs::write(&self.path, body).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), key, "storage updated");
        Ok(())
    }
}
