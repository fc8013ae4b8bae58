//! Catalogue and preference path resolution.

use std::path::{Path, PathBuf};

use crate::settings::Settings;

/// Environment variable for overriding the catalogue document path.
pub const CATALOGUE_ENV_VAR: &str = "MHHS_CATALOGUE";

/// Environment variable for overriding the preferences directory.
pub const PREFERENCES_ENV_VAR: &str = "MHHS_PREFERENCES_DIR";

/// Catalogue document name used when nothing else is configured.
pub const DEFAULT_CATALOGUE_FILE: &str = "interfaceData.json";

/// Preferences directory used when nothing else is configured.
pub const DEFAULT_PREFERENCES_DIR: &str = ".mhhs";

/// Get the catalogue document path.
///
/// Resolution order:
/// 1. `explicit` (command-line flag)
/// 2. `MHHS_CATALOGUE` environment variable
/// 3. `catalogue_path` from the settings file
/// 4. `interfaceData.json` in the working directory
pub fn catalogue_path(explicit: Option<&Path>, settings: &Settings) -> PathBuf {
    resolve(
        explicit,
        CATALOGUE_ENV_VAR,
        settings.catalogue_path.as_deref(),
        DEFAULT_CATALOGUE_FILE,
    )
}

/// Get the preferences directory, using the same precedence as [`catalogue_path`].
pub fn preferences_dir(explicit: Option<&Path>, settings: &Settings) -> PathBuf {
    resolve(
        explicit,
        PREFERENCES_ENV_VAR,
        settings.preferences_dir.as_deref(),
        DEFAULT_PREFERENCES_DIR,
    )
}

fn resolve(
    explicit: Option<&Path>,
    env_var: &str,
    configured: Option<&Path>,
    fallback: &str,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(value) = std::env::var(env_var)
        && !value.trim().is_empty()
    {
        return PathBuf::from(value);
    }
    configured
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let settings = Settings {
            catalogue_path: Some(PathBuf::from("configured.json")),
            ..Settings::default()
        };
        let path = catalogue_path(Some(Path::new("flag.json")), &settings);
        assert_eq!(path, PathBuf::from("flag.json"));
    }

    #[test]
    fn unset_env_var_falls_through_to_settings() {
        let settings = Settings {
            catalogue_path: Some(PathBuf::from("configured.json")),
            ..Settings::default()
        };
        let path = resolve(
            None,
            "MHHS_TEST_UNSET_VARIABLE",
            settings.catalogue_path.as_deref(),
            DEFAULT_CATALOGUE_FILE,
        );
        assert_eq!(path, PathBuf::from("configured.json"));
    }

    #[test]
    fn fallback_used_when_nothing_configured() {
        let path = resolve(None, "MHHS_TEST_UNSET_VARIABLE", None, DEFAULT_PREFERENCES_DIR);
        assert_eq!(path, PathBuf::from(".mhhs"));
    }
}
