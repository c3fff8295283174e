//! Local key/value storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stands in for the browser's `localStorage`: a flat map of string keys to
//! string values. A store is either memory-only or backed by a JSON object
//! file that is rewritten on every change.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const DEFAULT_STORE_PATH: &str = ".omniconnect/local-storage.json";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
}

impl crate::error::ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "E_STORAGE_IO",
            Self::Json(_) => "E_STORAGE_JSON",
        }
    }
}

#[derive(Debug, Default)]
pub struct LocalStore {
    path: Option<PathBuf>,
    items: BTreeMap<String, String>,
}

impl LocalStore {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed store. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not a JSON object
    /// of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        debug!(path = %path.display(), keys = items.len(), "storage: opened");
        Ok(Self { path: Some(path), items })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// # Errors
    ///
    /// Fails if the backing file cannot be written.
    pub fn set_item(&mut self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value.into());
        self.flush()
    }

    /// # Errors
    ///
    /// Fails if the backing file cannot be written.
    pub fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    /// Decode the JSON value stored under `key`. Missing or undecodable
    /// values read as `None`.
    #[must_use]
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_item(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%key, error = %e, "storage: ignoring undecodable value");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Fails if the value cannot be encoded or the file cannot be written.
    pub fn save_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, raw)
    }

    fn flush(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| StorageError::Io { path: path.clone(), source };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(&self.items)?;
        fs::write(path, raw).map_err(io_err)
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
