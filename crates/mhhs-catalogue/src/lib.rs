#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod paths;
pub mod preferences;
pub mod settings;

pub use crate::error::CatalogueError;
pub use crate::loader::{load_catalogue, load_default_catalogue, parse_catalogue};
pub use crate::preferences::{
    FAVORITES_KEY, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
};
pub use crate::settings::Settings;
