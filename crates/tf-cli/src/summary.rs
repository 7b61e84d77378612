use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tf_model::{CanonicalField, EventMeta};
use tf_store::{CleanupOutcome, CleanupReport};

use crate::commands::{ColumnsResult, CreateResult, GuestListResult, LookupResult, ShowResult};

pub fn print_created(result: &CreateResult) {
    println!("Created event: {}", result.meta.title);
    println!("Event id: {}", result.event_id);
    println!("Guests: {}", result.guest_count);
    print_mapping(&result.meta);
    println!("Guest link: {}", result.guest_url);
    println!("Admin link: {}", result.admin_url);
    println!("Keep the admin link private; it is the only way to manage this event.");
}

fn print_mapping(meta: &EventMeta) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Column")]);
    apply_table_style(&mut table);
    for (field, column) in meta.column_mapping.iter() {
        table.add_row(vec![Cell::new(field), Cell::new(column)]);
    }
    println!("{table}");
}

pub fn print_columns(result: &ColumnsResult) {
    println!(
        "Columns: {} ({} rows)",
        result.headers.join(", "),
        result.rows
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Suggested column"),
        header_cell("Score"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for field in CanonicalField::ALL {
        match result.suggestion.candidate(field) {
            Some(candidate) => table.add_row(vec![
                Cell::new(field),
                Cell::new(&candidate.column).fg(Color::Green),
                Cell::new(format!("{:.2}", candidate.score)),
            ]),
            None => table.add_row(vec![Cell::new(field), dim_cell("-"), dim_cell("-")]),
        };
    }
    println!("{table}");
    if result.suggestion.mapping.is_none() {
        println!("Pass --first-name-column, --last-name-column and --table-column for the missing fields.");
    }
}

pub fn print_lookup(result: &LookupResult) {
    println!("{}", result.title);
    if result.matches.is_empty() {
        println!("No guests found. Check the spelling or try the other name field.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("First name"),
        header_cell("Last name"),
        header_cell("Table"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in &result.matches {
        table.add_row(vec![
            Cell::new(&row.first_name),
            Cell::new(&row.last_name),
            Cell::new(&row.table)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{:.0}%", row.score * 100.0)),
        ]);
    }
    println!("{table}");
}

pub fn print_show(result: &ShowResult) {
    let meta = &result.meta;
    println!("Event: {} ({})", meta.title, result.event_id);
    println!("Guest link: {}", result.guest_url);
    println!("Guests: {}", result.guest_count);
    if !result.access.is_admin() {
        return;
    }
    println!("Created: {}", meta.created.format("%Y-%m-%d %H:%M UTC"));
    println!("Table prefix: {}", meta.table_prefix);
    println!(
        "Delete after: {}",
        meta.delete_after.as_deref().unwrap_or("never")
    );
    print_mapping(meta);
    let Some(guests) = &result.guests else {
        return;
    };
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(guests.headers.iter().map(|h| header_cell(h)));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, row) in guests.rows.iter().enumerate() {
        let mut cells = vec![dim_cell(index + 1)];
        cells.extend(row.iter().map(|value| {
            if value.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(value)
            }
        }));
        table.add_row(cells);
    }
    println!("{table}");
}

pub fn print_meta(meta: &EventMeta) {
    println!("Title: {}", meta.title);
    println!("Table prefix: {}", meta.table_prefix);
    println!(
        "Delete after: {}",
        meta.delete_after.as_deref().unwrap_or("never")
    );
}

pub fn print_guest_list(result: &GuestListResult) {
    println!(
        "Event {} now has {} guests.",
        result.event_id, result.guest_count
    );
}

pub fn print_cleanup(today: chrono::NaiveDate, report: &CleanupReport, dry_run: bool) {
    println!("Cleanup as of {today}");
    if report.entries.is_empty() {
        println!("No events found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Event"),
        header_cell("Outcome"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    for entry in &report.entries {
        table.add_row(vec![
            Cell::new(&entry.prefix),
            outcome_cell(&entry.outcome),
            detail_cell(&entry.outcome),
        ]);
    }
    println!("{table}");
    let verb = if dry_run { "would delete" } else { "deleted" };
    println!(
        "{} {verb}, {} skipped with problems",
        report.expired_count(),
        report.problem_count()
    );
}

fn outcome_cell(outcome: &CleanupOutcome) -> Cell {
    let cell = Cell::new(outcome.label());
    match outcome {
        CleanupOutcome::Deleted { .. } => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        CleanupOutcome::WouldDelete { .. } => cell.fg(Color::Yellow),
        _ if outcome.is_problem() => cell.fg(Color::Red),
        _ => cell.fg(Color::DarkGrey),
    }
}

fn detail_cell(outcome: &CleanupOutcome) -> Cell {
    match outcome {
        CleanupOutcome::Deleted { objects } | CleanupOutcome::WouldDelete { objects } => {
            Cell::new(format!("{objects} objects"))
        }
        CleanupOutcome::NotDue { delete_after } => dim_cell(delete_after),
        CleanupOutcome::InvalidDate { raw } => Cell::new(format!("{raw:?}")).fg(Color::Red),
        CleanupOutcome::Unreadable { reason } | CleanupOutcome::DeleteFailed { reason } => {
            Cell::new(reason).fg(Color::Red)
        }
        CleanupOutcome::NoExpiry => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
