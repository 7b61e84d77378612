//! CLI argument definitions for TableFinder.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tf_model::DELETE_AFTER_FORMAT;

#[derive(Parser)]
#[command(
    name = "tablefinder",
    version,
    about = "TableFinder - help event guests find their table",
    long_about = "Upload a guest list, share the lookup link, and let guests find\n\
                  their table by typing their name. Typos and partial names are fine."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow guest names and queries to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding event objects (overrides settings).
    #[arg(long = "store", value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Base URL used for guest and admin links (overrides settings).
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an event from a guest list CSV.
    Create(CreateArgs),

    /// Show a CSV's headers and the suggested column mapping.
    Columns(ColumnsArgs),

    /// Look up a guest's table by name.
    Lookup(LookupArgs),

    /// Show an event (with the guest list when the admin token is given).
    Show(ShowArgs),

    /// Change an event's title, table prefix, or expiry date.
    Edit(EditArgs),

    /// Replace the guest list with a new CSV.
    Replace(ReplaceArgs),

    /// Add a guest to the list.
    AddGuest(AddGuestArgs),

    /// Change fields of one guest.
    UpdateGuest(UpdateGuestArgs),

    /// Remove one guest from the list.
    RemoveGuest(RemoveGuestArgs),

    /// Write the guest list CSV to a file.
    Export(ExportArgs),

    /// Write the admin recovery file.
    Recovery(ExportArgs),

    /// Permanently delete an event.
    Delete(DeleteArgs),

    /// Delete every event whose expiry date has passed.
    Cleanup(CleanupArgs),
}

/// Source columns for the three guest fields.
#[derive(Args, Clone, Default)]
pub struct MappingArgs {
    /// Column holding first names.
    #[arg(long = "first-name-column", value_name = "COLUMN")]
    pub first_name: Option<String>,

    /// Column holding last names.
    #[arg(long = "last-name-column", value_name = "COLUMN")]
    pub last_name: Option<String>,

    /// Column holding table assignments.
    #[arg(long = "table-column", value_name = "COLUMN")]
    pub table: Option<String>,
}

impl MappingArgs {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.table.is_none()
    }
}

/// Event id plus admin token.
#[derive(Args, Clone)]
pub struct AdminArgs {
    /// Event identifier.
    #[arg(value_name = "EVENT")]
    pub event: String,

    /// Admin token from the admin link.
    #[arg(long = "token", value_name = "TOKEN")]
    pub token: String,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Event title (default: "Untitled Event").
    #[arg(long = "title", default_value = "")]
    pub title: String,

    /// Guest list CSV with a header row.
    #[arg(long = "csv", value_name = "FILE")]
    pub csv: PathBuf,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Prefix shown before numeric table values (default from settings).
    #[arg(long = "prefix")]
    pub prefix: Option<String>,

    /// Delete the event on or after this date (YYYY-MM-DD).
    #[arg(long = "delete-after", value_name = "DATE", value_parser = parse_date)]
    pub delete_after: Option<NaiveDate>,
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Guest list CSV with a header row.
    #[arg(long = "csv", value_name = "FILE")]
    pub csv: PathBuf,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Event identifier.
    #[arg(value_name = "EVENT")]
    pub event: String,

    /// Name, or part of a name, to search for.
    #[arg(value_name = "NAME")]
    pub query: String,

    /// Search by first name instead of last name.
    #[arg(long = "first")]
    pub first: bool,

    /// Minimum similarity from 0.0 to 1.0 (default from settings).
    #[arg(long = "threshold", value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Maximum number of matches (default from settings).
    #[arg(long = "limit")]
    pub limit: Option<usize>,

    /// Plain case-insensitive substring search instead of fuzzy matching.
    #[arg(long = "substring")]
    pub substring: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Event identifier.
    #[arg(value_name = "EVENT")]
    pub event: String,

    /// Admin token; a wrong token shows the guest view.
    #[arg(long = "token", value_name = "TOKEN")]
    pub token: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub admin: AdminArgs,

    /// New event title.
    #[arg(long = "title")]
    pub title: Option<String>,

    /// New table prefix.
    #[arg(long = "prefix")]
    pub prefix: Option<String>,

    /// New expiry date (YYYY-MM-DD).
    #[arg(long = "delete-after", value_name = "DATE", value_parser = parse_date)]
    pub delete_after: Option<NaiveDate>,

    /// Remove the expiry date.
    #[arg(long = "keep-forever", conflicts_with = "delete_after")]
    pub keep_forever: bool,
}

#[derive(Args)]
pub struct ReplaceArgs {
    #[command(flatten)]
    pub admin: AdminArgs,

    /// New guest list CSV.
    #[arg(long = "csv", value_name = "FILE")]
    pub csv: PathBuf,

    /// Columns for the new file; omitted ones keep the stored mapping.
    #[command(flatten)]
    pub mapping: MappingArgs,
}

#[derive(Args)]
pub struct AddGuestArgs {
    #[command(flatten)]
    pub admin: AdminArgs,

    #[arg(long = "first-name", default_value = "")]
    pub first_name: String,

    #[arg(long = "last-name", default_value = "")]
    pub last_name: String,

    #[arg(long = "table", default_value = "")]
    pub table: String,
}

#[derive(Args)]
pub struct UpdateGuestArgs {
    #[command(flatten)]
    pub admin: AdminArgs,

    /// Guest row number as shown by `show` (starting at 1).
    #[arg(long = "row")]
    pub row: usize,

    #[arg(long = "first-name")]
    pub first_name: Option<String>,

    #[arg(long = "last-name")]
    pub last_name: Option<String>,

    #[arg(long = "table")]
    pub table: Option<String>,
}

#[derive(Args)]
pub struct RemoveGuestArgs {
    #[command(flatten)]
    pub admin: AdminArgs,

    /// Guest row number as shown by `show` (starting at 1).
    #[arg(long = "row")]
    pub row: usize,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub admin: AdminArgs,

    /// Output file.
    #[arg(long = "out", value_name = "FILE")]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub admin: AdminArgs,

    /// Confirm permanent deletion.
    #[arg(long = "yes")]
    pub yes: bool,
}

#[derive(Args)]
pub struct CleanupArgs {
    /// Date to compare against (default: today, local time).
    #[arg(long = "today", value_name = "DATE", value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Report expired events without deleting them.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DELETE_AFTER_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err("threshold must be between 0.0 and 1.0".to_string())
    }
}
