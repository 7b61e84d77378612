//! Event metadata and the admin recovery file.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{AdminToken, EventId};
use crate::mapping::ColumnMapping;

pub const DEFAULT_TITLE: &str = "Untitled Event";
pub const DEFAULT_TABLE_PREFIX: &str = "Table";

/// Date format of the `delete_after` field.
pub const DELETE_AFTER_FORMAT: &str = "%Y-%m-%d";

/// Parses a `delete_after` value, ignoring surrounding whitespace.
pub fn parse_delete_after(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DELETE_AFTER_FORMAT)
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_table_prefix() -> String {
    DEFAULT_TABLE_PREFIX.to_string()
}

/// Metadata stored next to an event's guest list as `meta.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMeta {
    #[serde(default = "default_title")]
    pub title: String,
    /// RFC 3339 on write; older metadata stored epoch seconds.
    #[serde(deserialize_with = "deserialize_created")]
    pub created: DateTime<Utc>,
    pub creator_token: AdminToken,
    /// Missing in metadata written before mappings existed; identity then.
    #[serde(default)]
    pub column_mapping: ColumnMapping,
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
    /// Expiry date as `YYYY-MM-DD`. Kept verbatim so that a malformed value
    /// survives a round-trip and can be reported by the cleanup sweep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_after: Option<String>,
}

impl EventMeta {
    pub fn new(
        title: &str,
        creator_token: AdminToken,
        column_mapping: ColumnMapping,
        table_prefix: &str,
    ) -> Self {
        let mut meta = Self {
            title: default_title(),
            created: Utc::now(),
            creator_token,
            column_mapping,
            table_prefix: default_table_prefix(),
            delete_after: None,
        };
        meta.set_title(title);
        meta.set_table_prefix(table_prefix);
        meta
    }

    /// Sets the title; blank input falls back to [`DEFAULT_TITLE`].
    pub fn set_title(&mut self, title: &str) {
        let trimmed = title.trim();
        self.title = if trimmed.is_empty() {
            default_title()
        } else {
            trimmed.to_string()
        };
    }

    /// Sets the display prefix; blank input falls back to [`DEFAULT_TABLE_PREFIX`].
    pub fn set_table_prefix(&mut self, prefix: &str) {
        let trimmed = prefix.trim();
        self.table_prefix = if trimmed.is_empty() {
            default_table_prefix()
        } else {
            trimmed.to_string()
        };
    }

    /// True when `token` was presented and equals the creator token.
    pub fn is_creator(&self, token: Option<&str>) -> bool {
        token.is_some_and(|candidate| self.creator_token.matches(candidate))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedRepr {
    EpochSeconds(f64),
    Rfc3339(String),
}

fn deserialize_created<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match CreatedRepr::deserialize(deserializer)? {
        CreatedRepr::Rfc3339(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid created timestamp {raw:?}: {e}"))),
        CreatedRepr::EpochSeconds(secs) => epoch_to_datetime(secs)
            .ok_or_else(|| D::Error::custom(format!("created timestamp out of range: {secs}"))),
    }
}

fn epoch_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Downloadable JSON that lets an organizer recover admin access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRecoveryFile {
    pub event_id: String,
    pub creator_token: String,
    pub title: String,
    pub table_prefix: String,
}

impl AdminRecoveryFile {
    pub fn from_meta(event_id: &EventId, meta: &EventMeta) -> Self {
        Self {
            event_id: event_id.to_string(),
            creator_token: meta.creator_token.as_str().to_string(),
            title: meta.title.clone(),
            table_prefix: meta.table_prefix.clone(),
        }
    }
}
