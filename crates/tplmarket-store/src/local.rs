use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tplmarket_types::SavedSet;

use crate::{Error, Result};

/// Cache key under which the saved-template id array lives.
pub const SAVED_TEMPLATES_KEY: &str = "saved_templates";

/// Persisted string key-value store scoped to one installation.
///
/// The browser-localStorage analog: reads are in-memory, every `put` is
/// written through to disk synchronously so a process exit never loses a
/// same-session mutation. A missing or unreadable backing file is treated as
/// an empty cache, never an error.
#[derive(Debug)]
pub struct LocalCache {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl LocalCache {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores `value` and writes the cache file before returning.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.into(), value.into());
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    /// Saved set currently cached, empty if absent or unparseable.
    pub fn saved_set(&self) -> SavedSet {
        self.get(SAVED_TEMPLATES_KEY)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    /// Persists the saved set synchronously.
    pub fn write_saved_set(&mut self, set: &SavedSet) -> Result<()> {
        let raw = serde_json::to_string(set)?;
        self.put(SAVED_TEMPLATES_KEY, raw)
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content).map_err(Error::Io)
    }
}
