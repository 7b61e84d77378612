#![deny(unsafe_code)]

//! Guest lookup by partial or misspelled name.
//!
//! The engine is stateless: every call ranks the registry it is given and
//! returns at most `limit` guests. It never fails; a query that is too short
//! or matches nobody yields an empty result.

pub mod engine;
pub mod similarity;

pub use engine::{
    DEFAULT_LIMIT, DEFAULT_THRESHOLD, GuestMatch, LookupOptions, MIN_QUERY_CHARS, MatchMode,
    find_matches, rank,
};
pub use similarity::similarity;
