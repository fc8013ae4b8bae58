#![deny(unsafe_code)]

pub mod catalogue;
pub mod composition;
pub mod enums;
pub mod error;
pub(crate) mod lenient;

pub use catalogue::{Catalogue, DataBlock, DataItem, Interface, PopulationNotes, RejectionCode};
pub use composition::CompositionNode;
pub use enums::{CategoryFilter, Cmo, SupplierType};
pub use error::{ModelError, Result};
