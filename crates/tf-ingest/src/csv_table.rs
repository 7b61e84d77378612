use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tf_model::SchemaError;

use crate::error::{IngestError, Result};

/// A guest list as uploaded: every column, every row, all values as text.
///
/// Columns outside the mapping are kept here so admin edits round-trip the
/// full file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

impl CsvTable {
    /// Parses comma-delimited bytes whose first non-blank line is the header.
    ///
    /// Short rows are padded with empty cells and long rows truncated to the
    /// header width. Fully blank lines are skipped.
    pub fn from_bytes(raw: &[u8]) -> std::result::Result<Self, SchemaError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(raw);
        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(|e| SchemaError::Csv {
                message: format!("record {}: {e}", idx + 1),
            })?;
            if record.iter().all(|value| value.trim().is_empty()) {
                continue;
            }
            match &headers {
                None => headers = Some(record.iter().map(normalize_header).collect()),
                Some(header_row) => {
                    let row = (0..header_row.len())
                        .map(|col| record.get(col).map(normalize_cell).unwrap_or_default())
                        .collect();
                    rows.push(row);
                }
            }
        }
        Ok(Self {
            headers: headers.unwrap_or_default(),
            rows,
        })
    }

    /// Index of the first header equal to `name` (surrounding whitespace ignored).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.headers.iter().position(|header| *header == wanted)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Value at `row` in column `column`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn set_cell(&mut self, row: usize, column: &str, value: &str) -> Result<()> {
        let col = self
            .column_index(column)
            .ok_or_else(|| IngestError::UnknownColumn {
                column: column.to_string(),
            })?;
        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(IngestError::RowOutOfRange { row, len })?;
        target[col] = normalize_cell(value);
        Ok(())
    }

    /// Appends a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, values: &[String]) {
        let mut row: Vec<String> = values.iter().map(|value| normalize_cell(value)).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn remove_row(&mut self, row: usize) -> Result<Vec<String>> {
        let len = self.rows.len();
        if row >= len {
            return Err(IngestError::RowOutOfRange { row, len });
        }
        Ok(self.rows.remove(row))
    }

    /// Serializes the table back to CSV with a header row.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        let write_err = |e: csv::Error| IngestError::CsvWrite {
            message: e.to_string(),
        };
        writer.write_record(&self.headers).map_err(write_err)?;
        for row in &self.rows {
            writer.write_record(row).map_err(write_err)?;
        }
        writer.into_inner().map_err(|e| IngestError::CsvWrite {
            message: e.to_string(),
        })
    }
}

/// Reads a guest list CSV from disk.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let raw = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = CsvTable::from_bytes(&raw)?;
    tracing::debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read guest csv"
    );
    Ok(table)
}
