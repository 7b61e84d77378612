use std::fmt;

use serde::{Deserialize, Serialize};

/// The three fields a guest registry is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    FirstName,
    LastName,
    Table,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 3] = [Self::FirstName, Self::LastName, Self::Table];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared correspondence between canonical fields and source CSV headers.
///
/// Stored in event metadata so a replacement upload can reuse it. The default
/// is the identity mapping onto `first_name`, `last_name` and `table`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub first_name: String,
    pub last_name: String,
    pub table: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            first_name: CanonicalField::FirstName.as_str().to_string(),
            last_name: CanonicalField::LastName.as_str().to_string(),
            table: CanonicalField::Table.as_str().to_string(),
        }
    }
}

impl ColumnMapping {
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

    /// Source column mapped to `field`.
    pub fn column(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::FirstName => &self.first_name,
            CanonicalField::LastName => &self.last_name,
            CanonicalField::Table => &self.table,
        }
    }

    /// `(field, source column)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        CanonicalField::ALL
            .into_iter()
            .map(move |field| (field, self.column(field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        let mapping = ColumnMapping::default();
        for (field, column) in mapping.iter() {
            assert_eq!(field.as_str(), column);
        }
    }

    #[test]
    fn column_lookup_by_field() {
        let mapping = ColumnMapping::new("Name", "Surname", "Seat");
        assert_eq!(mapping.column(CanonicalField::FirstName), "Name");
        assert_eq!(mapping.column(CanonicalField::LastName), "Surname");
        assert_eq!(mapping.column(CanonicalField::Table), "Seat");
    }
}
