//! CLI library components for TableFinder.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
pub mod summary;
