#![deny(unsafe_code)]

//! Suggests which CSV headers hold first names, last names and tables.
//!
//! Uploaders pick the mapping interactively; this crate provides the
//! preselected guess.

pub mod score;
pub mod synonyms;

pub use score::{
    DEFAULT_MIN_CONFIDENCE, FieldCandidate, MappingSuggestion, score_header, suggest_mapping,
};
