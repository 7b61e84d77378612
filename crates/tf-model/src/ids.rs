#![deny(unsafe_code)]

use std::fmt;

use uuid::Uuid;

use crate::ModelError;

const EVENT_ID_LEN: usize = 6;
const TOKEN_LEN: usize = 8;

fn random_hex(len: usize) -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(len);
    hex
}

/// Short identifier addressing one event in the object store.
///
/// Only ASCII alphanumerics, `-` and `_` are accepted so that an id can be
/// embedded in a storage key without escaping.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct EventId(String);

impl EventId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if !valid {
            return Err(ModelError::InvalidEventId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Generates a fresh random id (6 lowercase hex characters).
    pub fn generate() -> Self {
        Self(random_hex(EVENT_ID_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EventId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventId> for String {
    fn from(value: EventId) -> Self {
        value.0
    }
}

/// Capability secret granting edit and delete access to an event.
///
/// This is not authentication: whoever holds the token is the admin.
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdminToken(String);

impl AdminToken {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidToken(value));
        }
        Ok(Self(value))
    }

    /// Generates a fresh random token (8 lowercase hex characters).
    pub fn generate() -> Self {
        Self(random_hex(TOKEN_LEN))
    }

    /// Exact string comparison against a presented token.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the secret out of debug logs.
impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminToken(..)")
    }
}

impl TryFrom<String> for AdminToken {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AdminToken> for String {
    fn from(value: AdminToken) -> Self {
        value.0
    }
}
