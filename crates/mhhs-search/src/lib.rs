#![deny(unsafe_code)]

pub mod filter;
pub mod index;
pub mod rejection;
pub mod resolver;
pub mod similarity;
pub mod suggest;
pub mod utils;

pub use filter::{apply, matches_category};
pub use index::{SearchIndex, build_searchable_content};
pub use rejection::{codes_for, search_rejection_codes};
pub use resolver::{
    BlockContext, MissingReference, ResolvedComposition, ResolvedItem, ResolvedRow, resolve,
    resolve_in,
};
pub use similarity::{
    DEFAULT_MATCH_THRESHOLD, FuzzyMatch, SEARCH_RECALL_THRESHOLD, distance, fuzzy_match,
    similarity,
};
pub use suggest::suggest;
