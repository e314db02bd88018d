//! String-keyed storage backends
//!
//! The persistence layer only needs "get / set / remove a string under a
//! key". `FileStore` keeps one JSON file per key on disk; `MemoryStore`
//! keeps everything in a map and is used by tests and previews.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::AllowanceError;

use super::file_io::{read_optional, remove_if_exists, write_atomic};

/// A string-keyed store of serialized values
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, AllowanceError>;

    /// Store `value` under `key`, replacing what was there
    fn set(&mut self, key: &str, value: &str) -> Result<(), AllowanceError>;

    /// Delete `key`; missing keys are not an error
    fn remove(&mut self, key: &str) -> Result<(), AllowanceError>;
}

/// One `<key>.json` file per slot inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, AllowanceError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AllowanceError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AllowanceError> {
        read_optional(self.path_for(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AllowanceError> {
        write_atomic(self.path_for(key)?, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), AllowanceError> {
        remove_if_exists(self.path_for(key)?)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AllowanceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AllowanceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AllowanceError> {
        self.entries.remove(key);
        Ok(())
    }
}
