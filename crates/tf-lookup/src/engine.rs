//! Ranking of guests against a name query.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tf_ingest::Registry;
use tf_model::{GuestRecord, NameField};

use crate::similarity::similarity;

/// Queries shorter than this (in characters, untrimmed) return nothing.
pub const MIN_QUERY_CHARS: usize = 2;
pub const DEFAULT_THRESHOLD: f64 = 0.6;
pub const DEFAULT_LIMIT: usize = 5;

/// How a query is compared with a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Similarity ratio with a threshold; tolerates typos.
    #[default]
    Fuzzy,
    /// Case-insensitive containment; every hit scores 1.0.
    Substring,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookupOptions {
    pub field: NameField,
    /// Minimum score in `[0.0, 1.0]`; ignored in substring mode.
    pub threshold: f64,
    /// Maximum number of results; values below 1 are treated as 1.
    pub limit: usize,
    pub mode: MatchMode,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            field: NameField::default(),
            threshold: DEFAULT_THRESHOLD,
            limit: DEFAULT_LIMIT,
            mode: MatchMode::default(),
        }
    }
}

impl LookupOptions {
    #[must_use]
    pub fn with_field(mut self, field: NameField) -> Self {
        self.field = field;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A guest together with the score that ranked it.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestMatch<'a> {
    pub record: &'a GuestRecord,
    pub score: f64,
}

/// Ranks `registry` against `query`.
///
/// Results are ordered by descending score; equal scores keep registry order.
pub fn rank<'a>(registry: &'a Registry, query: &str, options: &LookupOptions) -> Vec<GuestMatch<'a>> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let limit = options.limit.max(1);

    let mut matches: Vec<GuestMatch<'a>> = match options.mode {
        MatchMode::Fuzzy => registry
            .iter()
            .map(|record| GuestMatch {
                record,
                score: similarity(query, record.name(options.field)),
            })
            .filter(|m| m.score >= options.threshold)
            .collect(),
        MatchMode::Substring => {
            let needle = query.to_lowercase();
            registry
                .iter()
                .filter(|record| {
                    record
                        .name(options.field)
                        .to_lowercase()
                        .contains(&needle)
                })
                .map(|record| GuestMatch { record, score: 1.0 })
                .collect()
        }
    };

    // Vec::sort_by is stable, which keeps registry order among equal scores.
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    matches.truncate(limit);

    tracing::debug!(
        field = %options.field,
        mode = ?options.mode,
        guests = registry.len(),
        matches = matches.len(),
        "guest lookup"
    );
    matches
}

/// Returns the guests matching `query` by `field`, best first.
pub fn find_matches<'a>(
    registry: &'a Registry,
    query: &str,
    field: NameField,
    threshold: f64,
    limit: usize,
) -> Vec<&'a GuestRecord> {
    let options = LookupOptions::default()
        .with_field(field)
        .with_threshold(threshold)
        .with_limit(limit);
    rank(registry, query, &options)
        .into_iter()
        .map(|m| m.record)
        .collect()
}
