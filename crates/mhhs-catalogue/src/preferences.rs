//! Key/value storage for user preferences.
//!
//! The browser persists a single preference (the favorite interface ids) but
//! does not decide where it lives. Callers pick a [`PreferenceStore`]: a
//! directory of JSON files for the CLI, or memory for tests and embedders.
//!
//! # Storage Format
//!
//! [`FilePreferenceStore`] writes each key to `{base_dir}/{key}.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CatalogueError;

/// Key under which favorite interface ids are stored.
pub const FAVORITES_KEY: &str = "mhhs_favorites";

/// Storage medium for preferences.
pub trait PreferenceStore {
    /// Read the raw value for a key, `None` when never written.
    fn read(&self, key: &str) -> Result<Option<String>, CatalogueError>;

    /// Replace the raw value for a key.
    fn write(&mut self, key: &str, value: &str) -> Result<(), CatalogueError>;

    /// Read and decode a JSON value.
    fn read_json<T>(&self, key: &str) -> Result<Option<T>, CatalogueError>
    where
        Self: Sized,
        T: DeserializeOwned,
    {
        let Some(raw) = self.read(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| CatalogueError::Decode {
                key: key.to_string(),
                source,
            })
    }

    /// Encode and write a JSON value.
    fn write_json<T>(&mut self, key: &str, value: &T) -> Result<(), CatalogueError>
    where
        Self: Sized,
        T: Serialize,
    {
        let raw = serde_json::to_string(value).map_err(|source| CatalogueError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.write(key, &raw)
    }
}

/// Directory-backed preference store.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    base_dir: PathBuf,
}

impl FilePreferenceStore {
    /// Create a store rooted at `base_dir`. The directory is created on first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", normalize_key(key)))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, CatalogueError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| CatalogueError::io(path, e))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), CatalogueError> {
        fs::create_dir_all(&self.base_dir).map_err(|e| CatalogueError::io(&self.base_dir, e))?;
        let path = self.key_path(key);
        fs::write(&path, value).map_err(|e| CatalogueError::io(path, e))
    }
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, CatalogueError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), CatalogueError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Normalize a key for use in filenames.
fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
