//! Settings for the catalogue browser, persisted as TOML.
//!
//! ```toml
//! catalogue_path = "data/interfaceData.json"
//!
//! [search]
//! search_threshold = 0.3
//! suggestion_limit = 5
//!
//! [export]
//! schema_version = "1.0"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::CatalogueError;

/// Settings file looked up in the working directory when none is given.
pub const SETTINGS_FILE: &str = "mhhs.toml";

/// Browser settings. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catalogue document path (overridden by flag or `MHHS_CATALOGUE`).
    pub catalogue_path: Option<PathBuf>,
    /// Directory holding persisted preferences such as favorites.
    pub preferences_dir: Option<PathBuf>,
    pub search: SearchSettings,
    pub export: ExportSettings,
}

/// Search and ranking tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Per-term recall threshold used when filtering interfaces.
    pub search_threshold: f64,
    /// Threshold used by suggestions and single-string matching.
    pub match_threshold: f64,
    /// Maximum number of query completions.
    pub suggestion_limit: usize,
    /// Input inactivity before a search is recomputed.
    pub debounce_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            search_threshold: 0.3,
            match_threshold: 0.6,
            suggestion_limit: 5,
            debounce_ms: 200,
        }
    }
}

/// Form export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Value written to the auto-populated schema version field.
    pub schema_version: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            schema_version: "1.0".to_string(),
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist and parse. Without one, `mhhs.toml` in the
    /// working directory is used when present; a missing or unreadable
    /// implicit file falls back to defaults with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CatalogueError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let path = PathBuf::from(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        match Self::load_from(&path) {
            Ok(settings) => Ok(settings),
            Err(error) => {
                warn!(%error, "ignoring settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load settings from a specific TOML file.
    pub fn load_from(path: &Path) -> Result<Self, CatalogueError> {
        let contents = fs::read_to_string(path).map_err(|e| CatalogueError::io(path, e))?;
        let settings = toml::from_str(&contents).map_err(|source| CatalogueError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}
