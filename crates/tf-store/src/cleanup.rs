//! Expiry sweep over all stored events.
//!
//! Every `meta.json` under `events/` is checked for a `delete_after` date
//! (`YYYY-MM-DD`). Events due on or before `today` lose every object under
//! their prefix. A single unreadable or malformed event is logged and skipped;
//! it never aborts the sweep.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{info, info_span, warn};

use crate::error::Result;
use crate::object::{EVENTS_PREFIX, META_FILE, ObjectStore};
use tf_model::parse_delete_after;

#[derive(Debug, Clone, Copy)]
pub struct CleanupOptions {
    pub today: NaiveDate,
    /// Report what would be deleted without deleting it.
    pub dry_run: bool,
}

impl CleanupOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Deleted { objects: usize },
    WouldDelete { objects: usize },
    NoExpiry,
    NotDue { delete_after: NaiveDate },
    InvalidDate { raw: String },
    Unreadable { reason: String },
    DeleteFailed { reason: String },
}

impl CleanupOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deleted { .. } => "deleted",
            Self::WouldDelete { .. } => "would delete",
            Self::NoExpiry => "no expiry",
            Self::NotDue { .. } => "not due",
            Self::InvalidDate { .. } => "invalid date",
            Self::Unreadable { .. } => "unreadable",
            Self::DeleteFailed { .. } => "delete failed",
        }
    }

    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate { .. } | Self::Unreadable { .. } | Self::DeleteFailed { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupEntry {
    pub meta_key: String,
    /// Event prefix, e.g. `events/abc123/`.
    pub prefix: String,
    pub outcome: CleanupOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub entries: Vec<CleanupEntry>,
}

impl CleanupReport {
    /// Number of events deleted (or that would be, in a dry run).
    pub fn expired_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    CleanupOutcome::Deleted { .. } | CleanupOutcome::WouldDelete { .. }
                )
            })
            .count()
    }

    pub fn problem_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_problem()).count()
    }
}

/// Runs the sweep. Only a failure to list the store is fatal.
pub fn run_cleanup<S: ObjectStore>(store: &S, options: &CleanupOptions) -> Result<CleanupReport> {
    let span = info_span!("cleanup", today = %options.today, dry_run = options.dry_run);
    let _guard = span.enter();

    let meta_keys: Vec<String> = store
        .list(EVENTS_PREFIX)?
        .into_iter()
        .filter(|key| key.ends_with(META_FILE))
        .collect();

    let mut report = CleanupReport::default();
    for meta_key in meta_keys {
        let prefix = match meta_key.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/"),
            None => continue,
        };
        let outcome = check_event(store, &meta_key, &prefix, options);
        report.entries.push(CleanupEntry {
            meta_key,
            prefix,
            outcome,
        });
    }

    info!(
        checked = report.entries.len(),
        expired = report.expired_count(),
        problems = report.problem_count(),
        "cleanup finished"
    );
    Ok(report)
}

fn check_event<S: ObjectStore>(
    store: &S,
    meta_key: &str,
    prefix: &str,
    options: &CleanupOptions,
) -> CleanupOutcome {
    let meta = match read_meta(store, meta_key) {
        Ok(meta) => meta,
        Err(reason) => {
            warn!(meta_key, %reason, "failed to read event metadata");
            return CleanupOutcome::Unreadable { reason };
        }
    };

    let raw = match meta.get("delete_after") {
        None | Some(Value::Null) => return CleanupOutcome::NoExpiry,
        Some(Value::String(raw)) if raw.trim().is_empty() => return CleanupOutcome::NoExpiry,
        Some(Value::String(raw)) => raw.clone(),
        Some(other) => other.to_string(),
    };

    let delete_after = match parse_delete_after(&raw) {
        Ok(date) => date,
        Err(_) => {
            warn!(meta_key, delete_after = %raw, "invalid delete_after format");
            return CleanupOutcome::InvalidDate { raw };
        }
    };

    if delete_after > options.today {
        return CleanupOutcome::NotDue { delete_after };
    }

    let keys = match store.list(prefix) {
        Ok(keys) => keys,
        Err(e) => {
            warn!(prefix, error = %e, "failed to list event objects");
            return CleanupOutcome::DeleteFailed {
                reason: e.to_string(),
            };
        }
    };

    if options.dry_run {
        info!(prefix, objects = keys.len(), "event expired (dry run)");
        return CleanupOutcome::WouldDelete {
            objects: keys.len(),
        };
    }

    let mut deleted = 0;
    for key in &keys {
        match store.delete(key) {
            Ok(true) => deleted += 1,
            Ok(false) => {}
            Err(e) => {
                warn!(key = %key, error = %e, "failed to delete object");
                return CleanupOutcome::DeleteFailed {
                    reason: e.to_string(),
                };
            }
        }
    }
    info!(prefix, objects = deleted, %delete_after, "deleted expired event");
    CleanupOutcome::Deleted { objects: deleted }
}

fn read_meta<S: ObjectStore>(store: &S, key: &str) -> std::result::Result<Value, String> {
    let bytes = store
        .get(key)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "metadata disappeared during sweep".to_string())?;
    serde_json::from_slice(&bytes).map_err(|e| e.to_string())
}
