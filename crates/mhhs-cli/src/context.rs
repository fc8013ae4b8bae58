//! Opening a browsing session from command line options.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mhhs_catalogue::paths::{catalogue_path, preferences_dir};
use mhhs_catalogue::{FilePreferenceStore, Settings, load_catalogue};
use mhhs_core::{Session, SessionParams};
use mhhs_form::FormValues;
use tracing::{debug, error};

/// Locations given on the command line. Unset entries fall back to the
/// environment, then the settings file, then defaults.
#[derive(Debug, Clone, Default)]
pub struct Locations {
    pub catalogue: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub preferences: Option<PathBuf>,
}

/// A session plus the store its favorites are persisted to.
#[derive(Debug)]
pub struct AppContext {
    pub session: Session,
    pub store: FilePreferenceStore,
    pub catalogue_path: PathBuf,
}

/// Load settings and the catalogue, then start a session with saved favorites.
///
/// A catalogue that cannot be read or parsed is logged and reported as
/// unavailable.
pub fn open_session(locations: &Locations, params: SessionParams) -> Result<AppContext> {
    let settings = Settings::load(locations.config.as_deref()).context("load settings")?;
    let catalogue_path = catalogue_path(locations.catalogue.as_deref(), &settings);
    let store = FilePreferenceStore::new(preferences_dir(
        locations.preferences.as_deref(),
        &settings,
    ));

    let catalogue = match load_catalogue(&catalogue_path) {
        Ok(catalogue) => Some(catalogue),
        Err(error) => {
            error!(path = %catalogue_path.display(), %error, "could not load catalogue");
            None
        }
    };

    let mut session = Session::with_params(catalogue, settings, params)
        .with_context(|| format!("open catalogue {}", catalogue_path.display()))?;
    session.load_favorites(&store);
    debug!(
        favorites = session.favorites().len(),
        preferences = %store.base_dir().display(),
        "session ready"
    );

    Ok(AppContext {
        session,
        store,
        catalogue_path,
    })
}

/// Read form values from inline JSON or from a JSON file.
///
/// The argument is treated as inline JSON when it starts with `{`.
/// Values may be given as a full [`FormValues`] object or as a flat map of
/// item id to value.
pub fn read_values(arg: &str) -> Result<FormValues> {
    let trimmed = arg.trim_start();
    let contents = if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        let path = Path::new(arg);
        fs::read_to_string(path).with_context(|| format!("read values {}", path.display()))?
    };
    parse_values(&contents)
}

fn parse_values(contents: &str) -> Result<FormValues> {
    let value: serde_json::Value = serde_json::from_str(contents).context("parse values")?;
    let is_structured = value.as_object().is_some_and(|object| {
        ["fields", "senderContact", "receiverContact"]
            .iter()
            .any(|key| object.contains_key(*key))
    });
    if is_structured {
        return serde_json::from_value(value).context("parse values");
    }

    let object = value
        .as_object()
        .context("values must be a JSON object")?;
    let mut values = FormValues::default();
    for (item_id, value) in object {
        let text = match value {
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Null => continue,
            other => other.to_string(),
        };
        values.set(item_id.clone(), text);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_map_values() {
        let values = read_values(r#"{"DI-MPAN": "1200000000001", "DI-QTY": 4, "DI-X": null}"#)
            .unwrap();
        assert_eq!(values.value("DI-MPAN"), Some("1200000000001"));
        assert_eq!(values.value("DI-QTY"), Some("4"));
        assert_eq!(values.value("DI-X"), None);
    }

    #[test]
    fn structured_values() {
        let values = read_values(
            r#"{"senderContact": "ops@example.com", "fields": {"DI-MPAN": "12"}}"#,
        )
        .unwrap();
        assert_eq!(values.sender_contact.as_deref(), Some("ops@example.com"));
        assert_eq!(values.value("DI-MPAN"), Some("12"));
    }

    #[test]
    fn array_is_rejected() {
        assert!(parse_values("[1, 2]").is_err());
    }
}
