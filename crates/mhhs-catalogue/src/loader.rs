use std::path::Path;

use mhhs_model::Catalogue;
use tracing::{debug, info};

use crate::error::CatalogueError;
use crate::paths::catalogue_path;
use crate::settings::Settings;

/// Load the catalogue from the default location (see [`catalogue_path`]).
pub fn load_default_catalogue() -> Result<Catalogue, CatalogueError> {
    let settings = Settings::default();
    load_catalogue(&catalogue_path(None, &settings))
}

/// Load and parse a catalogue document from disk.
pub fn load_catalogue(path: &Path) -> Result<Catalogue, CatalogueError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogueError::io(path, e))?;
    let catalogue = parse_document(&contents).map_err(|source| CatalogueError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let catalogue = catalogue.ok_or_else(|| CatalogueError::Unavailable {
        message: format!("{} contains no catalogue", path.display()),
    })?;
    info!(
        path = %path.display(),
        interfaces = catalogue.interfaces.len(),
        data_blocks = catalogue.data_blocks.len(),
        data_items = catalogue.data_items.len(),
        rejection_codes = catalogue.rejection_codes.len(),
        "loaded interface catalogue"
    );
    Ok(catalogue)
}

/// Parse a catalogue document held in memory.
///
/// A `null` document is reported as [`CatalogueError::Unavailable`].
pub fn parse_catalogue(contents: &str) -> Result<Catalogue, CatalogueError> {
    match parse_document(contents) {
        Ok(Some(catalogue)) => Ok(catalogue),
        Ok(None) => Err(CatalogueError::Unavailable {
            message: "document is null".to_string(),
        }),
        Err(error) => {
            debug!(%error, "catalogue document rejected");
            Err(CatalogueError::Unavailable {
                message: error.to_string(),
            })
        }
    }
}

fn parse_document(contents: &str) -> Result<Option<Catalogue>, serde_json::Error> {
    serde_json::from_str(contents.trim_start_matches('\u{feff}'))
}
