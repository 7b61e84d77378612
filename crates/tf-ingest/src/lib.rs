//! Guest registry construction.
//!
//! Raw CSV bytes become a [`CsvTable`]; a [`ColumnMapping`](tf_model::ColumnMapping)
//! then selects the three canonical columns to produce a [`Registry`].

pub mod csv_table;
pub mod error;
pub mod label;
pub mod registry;

pub use csv_table::{CsvTable, read_csv_table};
pub use error::{IngestError, Result};
pub use label::format_table_label;
pub use registry::{Registry, build_registry, build_registry_from_table};
