//! Key/value record storage
//!
//! A minimal local store holding raw text records under string keys,
//! with a file backend for the binary and an in-memory backend for tests
//! and embedding.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::errors::{FieldError, Result};

use super::json::write_atomic;
use super::paths::get_record_path;

/// Interface a storage backend must implement
pub trait KeyValueStorage {
    /// Read the record under `key`, or None when nothing is stored
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous record
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete the record under `key`; deleting a missing key is not an error
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = get_record_path(&self.dir, key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FieldError::Storage(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = get_record_path(&self.dir, key);
        write_atomic(&path, value).map_err(|e| FieldError::wrap(e, format!("writing {}", key)))
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = get_record_path(&self.dir, key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FieldError::Storage(format!(
                "cannot remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// HashMap-backed storage; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one record
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.records.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.records.remove(key);
        Ok(())
    }
}
