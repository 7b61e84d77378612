use std::fmt;

use serde::{Deserialize, Serialize};

/// One guest, after column mapping has been applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub first_name: String,
    pub last_name: String,
    /// Raw table assignment, always kept as text.
    pub table: String,
}

impl GuestRecord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            table: table.into(),
        }
    }

    /// Returns the name component guests search by.
    pub fn name(&self, field: NameField) -> &str {
        match field {
            NameField::First => &self.first_name,
            NameField::Last => &self.last_name,
        }
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, _) => self.last_name.clone(),
        }
    }
}

/// Which name a lookup query is compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    First,
    #[default]
    Last,
}

impl NameField {
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "first name",
            Self::Last => "last name",
        }
    }
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
