//! Header scoring and greedy mapping assignment.
//!
//! Uses Jaro-Winkler similarity between the normalized header and every known
//! synonym of a field; the best synonym wins.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rapidfuzz::distance::jaro_winkler;
use serde::{Deserialize, Serialize};
use tf_model::{CanonicalField, ColumnMapping};

use crate::synonyms::{normalize, synonyms};

/// Minimum score for a header to be proposed for a field.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.8;

/// One header proposed for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCandidate {
    pub field: CanonicalField,
    pub column: String,
    /// Similarity in `[0.0, 1.0]`.
    pub score: f32,
}

/// Result of [`suggest_mapping`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSuggestion {
    /// Present only when every field was assigned a distinct header.
    pub mapping: Option<ColumnMapping>,
    /// Assigned candidates in canonical field order.
    pub candidates: Vec<FieldCandidate>,
}

impl MappingSuggestion {
    pub fn candidate(&self, field: CanonicalField) -> Option<&FieldCandidate> {
        self.candidates.iter().find(|c| c.field == field)
    }

    /// Fields that could not be assigned.
    pub fn missing_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| self.candidate(*field).is_none())
            .collect()
    }
}

/// Scores how well `header` names `field`.
pub fn score_header(header: &str, field: CanonicalField) -> f32 {
    let normalized = normalize(header);
    if normalized.is_empty() {
        return 0.0;
    }
    synonyms(field)
        .iter()
        .map(|synonym| jaro_winkler::similarity(normalized.chars(), synonym.chars()) as f32)
        .fold(0.0, f32::max)
}

/// Proposes a column mapping for `headers`.
///
/// All header/field pairs at or above `min_confidence` are ranked by score and
/// assigned greedily, one header per field. Ties keep field order, then
/// header order.
pub fn suggest_mapping(headers: &[String], min_confidence: f32) -> MappingSuggestion {
    let mut pairs: Vec<FieldCandidate> = Vec::new();
    for field in CanonicalField::ALL {
        for header in headers {
            let score = score_header(header, field);
            if score >= min_confidence {
                pairs.push(FieldCandidate {
                    field,
                    column: header.clone(),
                    score,
                });
            }
        }
    }

    pairs.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut used_columns: BTreeSet<String> = BTreeSet::new();
    let mut used_fields: BTreeSet<CanonicalField> = BTreeSet::new();
    let mut candidates = Vec::new();
    for pair in pairs {
        if used_fields.contains(&pair.field) || used_columns.contains(&pair.column) {
            continue;
        }
        used_fields.insert(pair.field);
        used_columns.insert(pair.column.clone());
        candidates.push(pair);
    }
    candidates.sort_by_key(|c| c.field);

    let column_for = |field: CanonicalField| {
        candidates
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.column.clone())
    };
    let mapping = match (
        column_for(CanonicalField::FirstName),
        column_for(CanonicalField::LastName),
        column_for(CanonicalField::Table),
    ) {
        (Some(first), Some(last), Some(table)) => Some(ColumnMapping::new(first, last, table)),
        _ => None,
    };

    tracing::debug!(
        headers = headers.len(),
        assigned = candidates.len(),
        complete = mapping.is_some(),
        "suggested column mapping"
    );

    MappingSuggestion {
        mapping,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_exact_synonym_scores_one() {
        assert!((score_header("Surname", CanonicalField::LastName) - 1.0).abs() < 1e-6);
        assert!((score_header("TABLE_NUMBER", CanonicalField::Table) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_blank_header_scores_zero() {
        assert_eq!(score_header("  ", CanonicalField::FirstName), 0.0);
    }

    #[test]
    fn test_typo_still_scores_high() {
        let score = score_header("Frist Name", CanonicalField::FirstName);
        assert!(score > 0.9, "typo should score > 0.9, got {score}");
    }

    #[test]
    fn test_suggests_identity_for_canonical_headers() {
        let suggestion =
            suggest_mapping(&headers(&["first_name", "last_name", "table"]), 0.8);
        assert_eq!(suggestion.mapping, Some(ColumnMapping::default()));
    }

    #[test]
    fn test_suggests_custom_headers() {
        let suggestion = suggest_mapping(
            &headers(&["Email", "Name", "Surname", "Seat"]),
            DEFAULT_MIN_CONFIDENCE,
        );
        assert_eq!(
            suggestion.mapping,
            Some(ColumnMapping::new("Name", "Surname", "Seat"))
        );
        assert!(suggestion.missing_fields().is_empty());
    }

    #[test]
    fn test_incomplete_headers_have_no_mapping() {
        let suggestion = suggest_mapping(&headers(&["Email", "Surname"]), 0.8);
        assert!(suggestion.mapping.is_none());
        assert!(
            suggestion
                .missing_fields()
                .contains(&CanonicalField::Table)
        );
        assert_eq!(
            suggestion
                .candidate(CanonicalField::LastName)
                .map(|c| c.column.as_str()),
            Some("Surname")
        );
    }

    #[test]
    fn test_header_used_at_most_once() {
        let suggestion = suggest_mapping(&headers(&["First Name", "Last Name", "Table"]), 0.5);
        let columns: BTreeSet<&str> = suggestion
            .candidates
            .iter()
            .map(|c| c.column.as_str())
            .collect();
        assert_eq!(columns.len(), suggestion.candidates.len());
        assert_eq!(
            suggestion.mapping,
            Some(ColumnMapping::new("First Name", "Last Name", "Table"))
        );
    }
}
