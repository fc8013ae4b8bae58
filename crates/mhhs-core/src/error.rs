use mhhs_catalogue::CatalogueError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no interface catalogue available")]
    CatalogueUnavailable,

    #[error("unknown interface: {id}")]
    UnknownInterface { id: String },

    #[error("no interface selected")]
    NothingSelected,

    #[error("preference storage failed: {0}")]
    Preferences(#[from] CatalogueError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
