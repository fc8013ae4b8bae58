#![deny(unsafe_code)]

pub mod error;
pub mod export;
pub mod form;
pub mod infer;
pub mod notes;

pub use error::{FormError, Result};
pub use export::{
    ExportedPayload, FormValues, MissingField, ValidationReport, export, normalize_datetime,
    payload_file_name, validate,
};
pub use form::{
    AutoField, Form, FormBlock, FormField, FormHeader, PayloadTarget, STANDALONE_BLOCK,
};
pub use infer::{InputKind, infer_for, infer_input_kind};
pub use notes::{EnumerationOption, parse_notes_text, parse_population_notes};
