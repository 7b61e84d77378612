//! Column-mapped guest registry.

use tf_model::{CanonicalField, ColumnMapping, GuestRecord, SchemaError};

use crate::csv_table::CsvTable;

/// Guest records in CSV row order.
///
/// Read-only once built; a new upload builds a new registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    records: Vec<GuestRecord>,
}

impl Registry {
    pub fn new(records: Vec<GuestRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[GuestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GuestRecord> {
        self.records.iter()
    }
}

impl FromIterator<GuestRecord> for Registry {
    fn from_iter<I: IntoIterator<Item = GuestRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a GuestRecord;
    type IntoIter = std::slice::Iter<'a, GuestRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parses raw CSV bytes and applies `mapping`.
pub fn build_registry(raw_csv: &[u8], mapping: &ColumnMapping) -> Result<Registry, SchemaError> {
    let table = CsvTable::from_bytes(raw_csv)?;
    build_registry_from_table(&table, mapping)
}

/// Applies `mapping` to an already parsed table.
///
/// Every mapped column must exist in the header; unmapped columns are
/// dropped. Table values are kept as text exactly as written.
pub fn build_registry_from_table(
    table: &CsvTable,
    mapping: &ColumnMapping,
) -> Result<Registry, SchemaError> {
    let resolve = |field: CanonicalField| {
        let column = mapping.column(field);
        table
            .column_index(column)
            .ok_or_else(|| SchemaError::MissingColumn {
                field,
                column: column.to_string(),
            })
    };
    let first_idx = resolve(CanonicalField::FirstName)?;
    let last_idx = resolve(CanonicalField::LastName)?;
    let table_idx = resolve(CanonicalField::Table)?;

    let cell = |row: &[String], idx: usize| row.get(idx).cloned().unwrap_or_default();
    let registry: Registry = table
        .rows
        .iter()
        .map(|row| GuestRecord {
            first_name: cell(row, first_idx),
            last_name: cell(row, last_idx),
            table: cell(row, table_idx),
        })
        .collect();

    tracing::debug!(guests = registry.len(), "built guest registry");
    Ok(registry)
}
