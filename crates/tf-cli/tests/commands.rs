use std::path::Path;

use chrono::NaiveDate;
use tempfile::{TempDir, tempdir};
use tf_cli::cli::{
    AddGuestArgs, AdminArgs, CleanupArgs, ColumnsArgs, CreateArgs, DeleteArgs, EditArgs,
    ExportArgs, LookupArgs, MappingArgs, RemoveGuestArgs, ReplaceArgs, ShowArgs, UpdateGuestArgs,
};
use tf_cli::commands::{
    AppContext, CreateResult, run_add_guest, run_cleanup, run_columns, run_create, run_delete,
    run_edit, run_export, run_lookup, run_recovery, run_remove_guest, run_replace, run_show,
    run_update_guest,
};
use tf_cli::settings::Settings;
use tf_model::{AdminRecoveryFile, CanonicalField, ColumnMapping, NameField};
use tf_store::{Access, CleanupOutcome};

const GUESTS: &str = "First Name,Last Name,Table,Diet\n\
                      Katie,Davis,3,vegan\n\
                      Kate,Davison,12,\n\
                      Anna,Smith,Family Table,\n";

struct Fixture {
    dir: TempDir,
    ctx: AppContext,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let ctx = AppContext::open(
            Settings::default(),
            Some(dir.path().join("store")),
            Some("https://seats.example".to_string()),
        )
        .unwrap();
        Self { dir, ctx }
    }

    fn write(&self, name: &str, contents: &str) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn create(&self, delete_after: Option<NaiveDate>) -> CreateResult {
        let csv = self.write("guests.csv", GUESTS);
        run_create(
            &self.ctx,
            &CreateArgs {
                title: "Summer Wedding".to_string(),
                csv,
                mapping: MappingArgs::default(),
                prefix: None,
                delete_after,
            },
        )
        .unwrap()
    }
}

fn admin(created: &CreateResult) -> AdminArgs {
    AdminArgs {
        event: created.event_id.to_string(),
        token: created.meta.creator_token.as_str().to_string(),
    }
}

fn lookup_args(event: &str, query: &str, first: bool) -> LookupArgs {
    LookupArgs {
        event: event.to_string(),
        query: query.to_string(),
        first,
        threshold: None,
        limit: None,
        substring: false,
    }
}

#[test]
fn create_uses_suggested_mapping_and_settings_prefix() {
    let fx = Fixture::new();
    let created = fx.create(None);

    assert_eq!(created.guest_count, 3);
    assert_eq!(created.meta.title, "Summer Wedding");
    assert_eq!(created.meta.table_prefix, "Table");
    assert_eq!(
        created.meta.column_mapping,
        ColumnMapping::new("First Name", "Last Name", "Table")
    );
    assert_eq!(
        created.guest_url,
        format!("https://seats.example/?event={}", created.event_id)
    );
    assert!(created.admin_url.ends_with(&format!(
        "&token={}",
        created.meta.creator_token.as_str()
    )));
}

#[test]
fn create_without_recognizable_columns_asks_for_flags() {
    let fx = Fixture::new();
    let csv = fx.write("odd.csv", "Alpha,Beta,Gamma\nx,y,z\n");
    let err = run_create(
        &fx.ctx,
        &CreateArgs {
            title: String::new(),
            csv,
            mapping: MappingArgs::default(),
            prefix: None,
            delete_after: None,
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("--first-name-column"), "{err}");
}

#[test]
fn create_with_explicit_columns() {
    let fx = Fixture::new();
    let csv = fx.write("seats.csv", "Name,Surname,Seat\nKatie,Davis,7\n");
    let created = run_create(
        &fx.ctx,
        &CreateArgs {
            title: String::new(),
            csv,
            mapping: MappingArgs {
                first_name: Some("Name".to_string()),
                last_name: Some("Surname".to_string()),
                table: Some("Seat".to_string()),
            },
            prefix: Some("Room".to_string()),
            delete_after: None,
        },
    )
    .unwrap();
    assert_eq!(created.meta.title, "Untitled Event");

    let result = run_lookup(
        &fx.ctx,
        &lookup_args(created.event_id.as_str(), "Davis", false),
    )
    .unwrap();
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].table, "Room 7");
}

#[test]
fn columns_reports_headers_and_suggestion() {
    let fx = Fixture::new();
    let csv = fx.write("guests.csv", GUESTS);
    let result = run_columns(&ColumnsArgs { csv }).unwrap();
    assert_eq!(result.rows, 3);
    assert_eq!(result.headers.len(), 4);
    assert_eq!(
        result
            .suggestion
            .candidate(CanonicalField::Table)
            .map(|c| c.column.as_str()),
        Some("Table")
    );
}

#[test]
fn lookup_ranks_closest_first_name() {
    let fx = Fixture::new();
    let created = fx.create(None);

    let result = run_lookup(&fx.ctx, &lookup_args(created.event_id.as_str(), "Kat", true)).unwrap();
    assert_eq!(result.field, NameField::First);
    let names: Vec<&str> = result
        .matches
        .iter()
        .map(|m| m.first_name.as_str())
        .collect();
    assert_eq!(names, vec!["Kate", "Katie"]);
    assert_eq!(result.matches[0].table, "Table 12");
    assert_eq!(result.matches[1].table, "Table 3");
}

#[test]
fn lookup_keeps_text_tables_verbatim() {
    let fx = Fixture::new();
    let created = fx.create(None);
    let result = run_lookup(
        &fx.ctx,
        &lookup_args(created.event_id.as_str(), "Smith", false),
    )
    .unwrap();
    assert_eq!(result.matches[0].table, "Family Table");
}

#[test]
fn lookup_short_query_and_unknown_event() {
    let fx = Fixture::new();
    let created = fx.create(None);
    let result = run_lookup(&fx.ctx, &lookup_args(created.event_id.as_str(), "K", true)).unwrap();
    assert!(result.matches.is_empty());

    let err = run_lookup(&fx.ctx, &lookup_args("nope42", "Kate", true)).unwrap_err();
    assert!(err.to_string().contains("event not found"), "{err}");
}

#[test]
fn show_hides_guests_without_token() {
    let fx = Fixture::new();
    let created = fx.create(None);

    let guest = run_show(
        &fx.ctx,
        &ShowArgs {
            event: created.event_id.to_string(),
            token: Some("wrong".to_string()),
        },
    )
    .unwrap();
    assert_eq!(guest.access, Access::Guest);
    assert!(guest.guests.is_none());
    assert_eq!(guest.guest_count, 3);

    let admin_view = run_show(
        &fx.ctx,
        &ShowArgs {
            event: created.event_id.to_string(),
            token: Some(created.meta.creator_token.as_str().to_string()),
        },
    )
    .unwrap();
    assert_eq!(admin_view.access, Access::Admin);
    assert_eq!(admin_view.guests.map(|g| g.row_count()), Some(3));
}

#[test]
fn admin_commands_reject_wrong_token() {
    let fx = Fixture::new();
    let created = fx.create(None);
    let err = run_edit(
        &fx.ctx,
        &EditArgs {
            admin: AdminArgs {
                event: created.event_id.to_string(),
                token: "wrong".to_string(),
            },
            title: Some("Hijacked".to_string()),
            prefix: None,
            delete_after: None,
            keep_forever: false,
        },
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "admin token does not match");
}

#[test]
fn edit_updates_meta() {
    let fx = Fixture::new();
    let created = fx.create(NaiveDate::from_ymd_opt(2026, 6, 1));
    let meta = run_edit(
        &fx.ctx,
        &EditArgs {
            admin: admin(&created),
            title: Some("  Autumn Gala ".to_string()),
            prefix: Some("Room".to_string()),
            delete_after: None,
            keep_forever: true,
        },
    )
    .unwrap();
    assert_eq!(meta.title, "Autumn Gala");
    assert_eq!(meta.table_prefix, "Room");
    assert_eq!(meta.delete_after, None);

    let result = run_lookup(&fx.ctx, &lookup_args(created.event_id.as_str(), "Kate", true)).unwrap();
    assert_eq!(result.title, "Autumn Gala");
    assert_eq!(result.matches[0].table, "Room 12");
}

#[test]
fn guest_edits_persist() {
    let fx = Fixture::new();
    let created = fx.create(None);

    let added = run_add_guest(
        &fx.ctx,
        &AddGuestArgs {
            admin: admin(&created),
            first_name: "Lena".to_string(),
            last_name: "Okafor".to_string(),
            table: "5".to_string(),
        },
    )
    .unwrap();
    assert_eq!(added.guest_count, 4);

    run_update_guest(
        &fx.ctx,
        &UpdateGuestArgs {
            admin: admin(&created),
            row: 1,
            first_name: None,
            last_name: None,
            table: Some("9".to_string()),
        },
    )
    .unwrap();

    let removed = run_remove_guest(
        &fx.ctx,
        &RemoveGuestArgs {
            admin: admin(&created),
            row: 3,
        },
    )
    .unwrap();
    assert_eq!(removed.guest_count, 3);

    let id = created.event_id.as_str();
    let davis = run_lookup(&fx.ctx, &lookup_args(id, "Davis", false)).unwrap();
    assert_eq!(davis.matches[0].table, "Table 9");
    let okafor = run_lookup(&fx.ctx, &lookup_args(id, "Okafor", false)).unwrap();
    assert_eq!(okafor.matches[0].table, "Table 5");
    let smith = run_lookup(&fx.ctx, &lookup_args(id, "Smith", false)).unwrap();
    assert!(smith.matches.is_empty());
}

#[test]
fn add_guest_with_shared_name_column_keeps_given_name() {
    let fx = Fixture::new();
    let csv = fx.write("mononyms.csv", "Guest,Table\nCher,4\n");
    let created = run_create(
        &fx.ctx,
        &CreateArgs {
            title: "Award Night".to_string(),
            csv,
            mapping: MappingArgs {
                first_name: Some("Guest".to_string()),
                last_name: Some("Guest".to_string()),
                table: Some("Table".to_string()),
            },
            prefix: None,
            delete_after: None,
        },
    )
    .unwrap();

    run_add_guest(
        &fx.ctx,
        &AddGuestArgs {
            admin: admin(&created),
            first_name: "Madonna".to_string(),
            last_name: String::new(),
            table: "7".to_string(),
        },
    )
    .unwrap();
    run_add_guest(
        &fx.ctx,
        &AddGuestArgs {
            admin: admin(&created),
            first_name: "Prince".to_string(),
            last_name: "Nelson".to_string(),
            table: "9".to_string(),
        },
    )
    .unwrap();

    let id = created.event_id.as_str();
    let madonna = run_lookup(&fx.ctx, &lookup_args(id, "Madonna", true)).unwrap();
    assert_eq!(madonna.matches.len(), 1);
    assert_eq!(madonna.matches[0].last_name, "Madonna");
    assert_eq!(madonna.matches[0].table, "Table 7");

    let prince = run_lookup(&fx.ctx, &lookup_args(id, "Prince", false)).unwrap();
    assert_eq!(prince.matches[0].table, "Table 9");
}

#[test]
fn row_numbers_start_at_one() {
    let fx = Fixture::new();
    let created = fx.create(None);
    let err = run_remove_guest(
        &fx.ctx,
        &RemoveGuestArgs {
            admin: admin(&created),
            row: 0,
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("start at 1"));
    assert!(
        run_remove_guest(
            &fx.ctx,
            &RemoveGuestArgs {
                admin: admin(&created),
                row: 4,
            },
        )
        .is_err()
    );
}

#[test]
fn replace_keeps_stored_columns_unless_given() {
    let fx = Fixture::new();
    let created = fx.create(None);

    let same_columns = fx.write(
        "v2.csv",
        "First Name,Last Name,Table\nOmar,Haddad,2\n",
    );
    let result = run_replace(
        &fx.ctx,
        &ReplaceArgs {
            admin: admin(&created),
            csv: same_columns,
            mapping: MappingArgs::default(),
        },
    )
    .unwrap();
    assert_eq!(result.guest_count, 1);

    let renamed = fx.write("v3.csv", "First Name,Last Name,Seat\nOmar,Haddad,4\n");
    let result = run_replace(
        &fx.ctx,
        &ReplaceArgs {
            admin: admin(&created),
            csv: renamed,
            mapping: MappingArgs {
                table: Some("Seat".to_string()),
                ..MappingArgs::default()
            },
        },
    )
    .unwrap();
    assert_eq!(
        result.mapping,
        ColumnMapping::new("First Name", "Last Name", "Seat")
    );
    let lookup = run_lookup(
        &fx.ctx,
        &lookup_args(created.event_id.as_str(), "Haddad", false),
    )
    .unwrap();
    assert_eq!(lookup.matches[0].table, "Table 4");
}

#[test]
fn export_and_recovery_write_files() {
    let fx = Fixture::new();
    let created = fx.create(None);

    let csv_out = fx.dir.path().join("export.csv");
    run_export(
        &fx.ctx,
        &ExportArgs {
            admin: admin(&created),
            out: csv_out.clone(),
        },
    )
    .unwrap();
    let exported = std::fs::read_to_string(&csv_out).unwrap();
    assert!(exported.starts_with("First Name,Last Name,Table,Diet\n"));
    assert!(exported.contains("Katie,Davis,3,vegan"));

    let json_out = fx.dir.path().join("recovery.json");
    run_recovery(
        &fx.ctx,
        &ExportArgs {
            admin: admin(&created),
            out: json_out.clone(),
        },
    )
    .unwrap();
    let recovery: AdminRecoveryFile =
        serde_json::from_slice(&std::fs::read(&json_out).unwrap()).unwrap();
    assert_eq!(recovery.event_id, created.event_id.as_str());
    assert_eq!(recovery.creator_token, created.meta.creator_token.as_str());
}

#[test]
fn delete_requires_confirmation() {
    let fx = Fixture::new();
    let created = fx.create(None);

    let refused = run_delete(
        &fx.ctx,
        &DeleteArgs {
            admin: admin(&created),
            yes: false,
        },
    );
    assert!(refused.is_err());

    let objects = run_delete(
        &fx.ctx,
        &DeleteArgs {
            admin: admin(&created),
            yes: true,
        },
    )
    .unwrap();
    assert_eq!(objects, 2);
    assert!(run_lookup(&fx.ctx, &lookup_args(created.event_id.as_str(), "Kate", true)).is_err());
    assert!(!store_has_events(&fx.dir.path().join("store")));
}

#[test]
fn cleanup_removes_expired_events() {
    let fx = Fixture::new();
    let expired = fx.create(NaiveDate::from_ymd_opt(2026, 1, 1));
    let future = fx.create(NaiveDate::from_ymd_opt(2027, 1, 1));
    let forever = fx.create(None);

    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let (_, preview) = run_cleanup(
        &fx.ctx,
        &CleanupArgs {
            today: Some(today),
            dry_run: true,
        },
    )
    .unwrap();
    assert_eq!(preview.expired_count(), 1);
    assert!(run_lookup(&fx.ctx, &lookup_args(expired.event_id.as_str(), "Kate", true)).is_ok());

    let (when, report) = run_cleanup(
        &fx.ctx,
        &CleanupArgs {
            today: Some(today),
            dry_run: false,
        },
    )
    .unwrap();
    assert_eq!(when, today);
    assert_eq!(report.expired_count(), 1);
    assert_eq!(report.problem_count(), 0);
    assert!(
        report
            .entries
            .iter()
            .any(|e| e.outcome == CleanupOutcome::Deleted { objects: 2 })
    );

    assert!(run_lookup(&fx.ctx, &lookup_args(expired.event_id.as_str(), "Kate", true)).is_err());
    for kept in [&future, &forever] {
        assert!(run_lookup(&fx.ctx, &lookup_args(kept.event_id.as_str(), "Kate", true)).is_ok());
    }
}

fn store_has_events(root: &Path) -> bool {
    std::fs::read_dir(root.join("events"))
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
