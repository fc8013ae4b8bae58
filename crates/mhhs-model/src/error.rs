use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown supplier type: {0}")]
    UnknownSupplierType(String),
    #[error("unknown CMO designation: {0}")]
    UnknownCmo(String),
    #[error("unknown category filter: {0}")]
    UnknownFilter(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
