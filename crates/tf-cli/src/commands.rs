//! Subcommand implementations.
//!
//! Each `run_*` function loads what it needs from the store, performs one
//! operation and returns a result value for [`crate::summary`] to print.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use chrono::{Local, NaiveDate};
use tf_ingest::{CsvTable, format_table_label, read_csv_table};
use tf_lookup::{LookupOptions, MatchMode, rank};
use tf_map::{DEFAULT_MIN_CONFIDENCE, MappingSuggestion, suggest_mapping};
use tf_model::{
    AdminRecoveryFile, CanonicalField, ColumnMapping, DELETE_AFTER_FORMAT, EventId, EventMeta,
    NameField,
};
use tf_store::{
    Access, CleanupOptions, CleanupReport, EventRepository, FsObjectStore, LoadedEvent, NewEvent,
    admin_url, guest_url, resolve_access, run_cleanup as sweep_expired,
};
use tracing::{debug, info, info_span};

use crate::cli::{
    AddGuestArgs, AdminArgs, CleanupArgs, ColumnsArgs, CreateArgs, DeleteArgs, EditArgs,
    ExportArgs, LookupArgs, MappingArgs, RemoveGuestArgs, ReplaceArgs, ShowArgs, UpdateGuestArgs,
};
use crate::logging::redact_value;
use crate::settings::Settings;

/// Resolved settings plus the opened event store.
pub struct AppContext {
    pub settings: Settings,
    pub base_url: String,
    pub repository: EventRepository<FsObjectStore>,
}

impl AppContext {
    /// Opens the store, letting `store_root` and `base_url` override settings.
    pub fn open(
        settings: Settings,
        store_root: Option<PathBuf>,
        base_url: Option<String>,
    ) -> Result<Self> {
        let root = store_root.unwrap_or_else(|| settings.store.root.clone());
        let store = FsObjectStore::new(&root)
            .with_context(|| format!("open event store {}", root.display()))?;
        let base_url = base_url.unwrap_or_else(|| settings.links.base_url.clone());
        debug!(root = %root.display(), base_url = %base_url, "opened event store");
        Ok(Self {
            settings,
            base_url,
            repository: EventRepository::new(store),
        })
    }

    fn load(&self, event: &str) -> Result<LoadedEvent> {
        let event_id = parse_event_id(event)?;
        Ok(self.repository.load_event(&event_id)?)
    }

    /// Loads an event and fails unless `admin.token` is its creator token.
    fn load_as_admin(&self, admin: &AdminArgs) -> Result<LoadedEvent> {
        let event = self.load(&admin.event)?;
        ensure!(
            event.meta.is_creator(Some(admin.token.as_str())),
            "admin token does not match"
        );
        Ok(event)
    }
}

fn parse_event_id(raw: &str) -> Result<EventId> {
    EventId::new(raw.trim()).with_context(|| format!("invalid event id {raw:?}"))
}

#[derive(Debug)]
pub struct CreateResult {
    pub event_id: EventId,
    pub meta: EventMeta,
    pub guest_count: usize,
    pub guest_url: String,
    pub admin_url: String,
}

pub fn run_create(ctx: &AppContext, args: &CreateArgs) -> Result<CreateResult> {
    let span = info_span!("create", csv = %args.csv.display());
    let _guard = span.enter();

    let raw = read_file(&args.csv)?;
    let table = CsvTable::from_bytes(&raw)
        .with_context(|| format!("parse {}", args.csv.display()))?;
    let mapping = resolve_mapping(&args.mapping, &table.headers)?;
    let prefix = args
        .prefix
        .as_deref()
        .unwrap_or(&ctx.settings.events.default_table_prefix);

    let created = ctx
        .repository
        .create_event(&NewEvent {
            title: &args.title,
            guests_csv: &raw,
            mapping,
            table_prefix: prefix,
            delete_after: args.delete_after,
        })
        .context("create event")?;

    Ok(CreateResult {
        guest_url: guest_url(&ctx.base_url, &created.event_id),
        admin_url: admin_url(&ctx.base_url, &created.event_id, &created.meta.creator_token),
        event_id: created.event_id,
        meta: created.meta,
        guest_count: created.guest_count,
    })
}

/// Builds the mapping for a new guest list.
///
/// Columns given on the command line win; the rest come from the suggestion.
fn resolve_mapping(args: &MappingArgs, headers: &[String]) -> Result<ColumnMapping> {
    let suggestion = suggest_mapping(headers, DEFAULT_MIN_CONFIDENCE);
    let pick = |flag: &Option<String>, field: CanonicalField, name: &str| -> Result<String> {
        if let Some(column) = flag {
            return Ok(column.clone());
        }
        match suggestion.candidate(field) {
            Some(candidate) => Ok(candidate.column.clone()),
            None => bail!(
                "no column recognized for {field}; pass --{name}-column (see `tablefinder columns`)"
            ),
        }
    };
    let mapping = ColumnMapping::new(
        pick(&args.first_name, CanonicalField::FirstName, "first-name")?,
        pick(&args.last_name, CanonicalField::LastName, "last-name")?,
        pick(&args.table, CanonicalField::Table, "table")?,
    );
    debug!(?mapping, "resolved column mapping");
    Ok(mapping)
}

/// Fills flags missing from `args` with the stored mapping.
fn merge_mapping(args: &MappingArgs, stored: &ColumnMapping) -> Option<ColumnMapping> {
    if args.is_empty() {
        return None;
    }
    Some(ColumnMapping::new(
        args.first_name.as_deref().unwrap_or(&stored.first_name),
        args.last_name.as_deref().unwrap_or(&stored.last_name),
        args.table.as_deref().unwrap_or(&stored.table),
    ))
}

#[derive(Debug)]
pub struct ColumnsResult {
    pub headers: Vec<String>,
    pub rows: usize,
    pub suggestion: MappingSuggestion,
}

pub fn run_columns(args: &ColumnsArgs) -> Result<ColumnsResult> {
    let table = read_csv_table(&args.csv)?;
    let suggestion = suggest_mapping(&table.headers, DEFAULT_MIN_CONFIDENCE);
    Ok(ColumnsResult {
        rows: table.row_count(),
        headers: table.headers,
        suggestion,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub first_name: String,
    pub last_name: String,
    pub table: String,
    pub score: f64,
}

#[derive(Debug)]
pub struct LookupResult {
    pub title: String,
    pub field: NameField,
    pub matches: Vec<MatchRow>,
}

pub fn run_lookup(ctx: &AppContext, args: &LookupArgs) -> Result<LookupResult> {
    let event = ctx.load(&args.event)?;
    let registry = event.registry().context("build guest registry")?;

    let field = if args.first {
        NameField::First
    } else {
        NameField::Last
    };
    let options = LookupOptions::default()
        .with_field(field)
        .with_threshold(args.threshold.unwrap_or(ctx.settings.lookup.threshold))
        .with_limit(args.limit.unwrap_or(ctx.settings.lookup.limit))
        .with_mode(if args.substring {
            MatchMode::Substring
        } else {
            MatchMode::Fuzzy
        });

    let prefix = &event.meta.table_prefix;
    let matches: Vec<MatchRow> = rank(&registry, &args.query, &options)
        .into_iter()
        .map(|m| MatchRow {
            first_name: m.record.first_name.clone(),
            last_name: m.record.last_name.clone(),
            table: format_table_label(&m.record.table, prefix),
            score: m.score,
        })
        .collect();

    info!(
        event_id = %event.event_id,
        query = redact_value(&args.query),
        matches = matches.len(),
        "lookup"
    );
    Ok(LookupResult {
        title: event.meta.title,
        field,
        matches,
    })
}

#[derive(Debug)]
pub struct ShowResult {
    pub event_id: EventId,
    pub meta: EventMeta,
    pub access: Access,
    pub guest_url: String,
    pub guest_count: usize,
    /// Full guest sheet, only for the admin view.
    pub guests: Option<CsvTable>,
}

pub fn run_show(ctx: &AppContext, args: &ShowArgs) -> Result<ShowResult> {
    let event = ctx.load(&args.event)?;
    let access = resolve_access(&event.meta, args.token.as_deref());
    Ok(ShowResult {
        guest_url: guest_url(&ctx.base_url, &event.event_id),
        guest_count: event.guests.row_count(),
        guests: access.is_admin().then_some(event.guests),
        event_id: event.event_id,
        meta: event.meta,
        access,
    })
}

pub fn run_edit(ctx: &AppContext, args: &EditArgs) -> Result<EventMeta> {
    let mut event = ctx.load_as_admin(&args.admin)?;
    let meta = &mut event.meta;
    if let Some(title) = &args.title {
        meta.set_title(title);
    }
    if let Some(prefix) = &args.prefix {
        meta.set_table_prefix(prefix);
    }
    if args.keep_forever {
        meta.delete_after = None;
    } else if let Some(date) = args.delete_after {
        meta.delete_after = Some(date.format(DELETE_AFTER_FORMAT).to_string());
    }
    ctx.repository.save_meta(&event.event_id, meta)?;
    info!(event_id = %event.event_id, "updated event settings");
    Ok(event.meta)
}

#[derive(Debug)]
pub struct GuestListResult {
    pub event_id: EventId,
    pub guest_count: usize,
    pub mapping: ColumnMapping,
}

impl GuestListResult {
    fn from_event(event: LoadedEvent) -> Self {
        Self {
            guest_count: event.guests.row_count(),
            event_id: event.event_id,
            mapping: event.meta.column_mapping,
        }
    }
}

pub fn run_replace(ctx: &AppContext, args: &ReplaceArgs) -> Result<GuestListResult> {
    let event = ctx.load_as_admin(&args.admin)?;
    let raw = read_file(&args.csv)?;
    let mapping = merge_mapping(&args.mapping, &event.meta.column_mapping);
    let event = ctx
        .repository
        .replace_guests(&event.event_id, &raw, mapping)
        .context("replace guest list")?;
    Ok(GuestListResult::from_event(event))
}

pub fn run_add_guest(ctx: &AppContext, args: &AddGuestArgs) -> Result<GuestListResult> {
    let mut event = ctx.load_as_admin(&args.admin)?;
    let mapping = event.meta.column_mapping.clone();
    let guests = &mut event.guests;

    let width = guests.headers.len();
    guests.push_row(&vec![String::new(); width]);
    let row = guests.row_count() - 1;
    // One column may back several fields; the first non-empty value wins.
    let values = [
        (&mapping.first_name, &args.first_name),
        (&mapping.last_name, &args.last_name),
        (&mapping.table, &args.table),
    ];
    for (column, value) in values {
        if value.is_empty() || guests.cell(row, column).is_some_and(|v| !v.is_empty()) {
            continue;
        }
        guests.set_cell(row, column, value)?;
    }

    ctx.repository
        .save_guests(&event.event_id, &event.meta, &event.guests)?;
    Ok(GuestListResult::from_event(event))
}

pub fn run_update_guest(ctx: &AppContext, args: &UpdateGuestArgs) -> Result<GuestListResult> {
    let mut event = ctx.load_as_admin(&args.admin)?;
    let row = row_index(args.row)?;
    let mapping = &event.meta.column_mapping;
    let updates = [
        (&mapping.first_name, &args.first_name),
        (&mapping.last_name, &args.last_name),
        (&mapping.table, &args.table),
    ];
    for (column, value) in updates {
        if let Some(value) = value {
            event.guests.set_cell(row, column, value)?;
        }
    }
    ctx.repository
        .save_guests(&event.event_id, &event.meta, &event.guests)?;
    Ok(GuestListResult::from_event(event))
}

pub fn run_remove_guest(ctx: &AppContext, args: &RemoveGuestArgs) -> Result<GuestListResult> {
    let mut event = ctx.load_as_admin(&args.admin)?;
    event.guests.remove_row(row_index(args.row)?)?;
    ctx.repository
        .save_guests(&event.event_id, &event.meta, &event.guests)?;
    Ok(GuestListResult::from_event(event))
}

/// Converts a 1-based row number from the command line.
fn row_index(row: usize) -> Result<usize> {
    ensure!(row >= 1, "row numbers start at 1");
    Ok(row - 1)
}

pub fn run_export(ctx: &AppContext, args: &ExportArgs) -> Result<PathBuf> {
    let event = ctx.load_as_admin(&args.admin)?;
    write_file(&args.out, &event.guests.to_csv_bytes()?)?;
    Ok(args.out.clone())
}

pub fn run_recovery(ctx: &AppContext, args: &ExportArgs) -> Result<PathBuf> {
    let event = ctx.load_as_admin(&args.admin)?;
    let recovery = AdminRecoveryFile::from_meta(&event.event_id, &event.meta);
    let json = serde_json::to_vec_pretty(&recovery).context("serialize recovery file")?;
    write_file(&args.out, &json)?;
    Ok(args.out.clone())
}

pub fn run_delete(ctx: &AppContext, args: &DeleteArgs) -> Result<usize> {
    let event = ctx.load_as_admin(&args.admin)?;
    ensure!(args.yes, "deleting an event is permanent; pass --yes to confirm");
    Ok(ctx.repository.delete_event(&event.event_id)?)
}

pub fn run_cleanup(ctx: &AppContext, args: &CleanupArgs) -> Result<(NaiveDate, CleanupReport)> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let options = CleanupOptions::new(today).with_dry_run(args.dry_run);
    let report = sweep_expired(ctx.repository.store(), &options).context("cleanup sweep")?;
    Ok((today, report))
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}
