#![deny(unsafe_code)]

pub mod debounce;
pub mod error;
pub mod favorites;
pub mod params;
pub mod session;

pub use debounce::Debouncer;
pub use error::{Result, SessionError};
pub use favorites::Favorites;
pub use params::{FILTER_PARAM, SEARCH_PARAM, SELECTED_PARAM, SessionParams};
pub use session::Session;
