/// Formats a raw table value for display.
///
/// Purely numeric values get the event prefix (`"12"` with `"Room"` becomes
/// `"Room 12"`); descriptive values are returned unchanged and blank values
/// become an empty string (guest not yet seated). Always call this with the
/// raw stored value, never with a previously formatted label.
pub fn format_table_label(raw_table: &str, prefix: &str) -> String {
    let trimmed = raw_table.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return format!("{prefix} {trimmed}");
    }
    raw_table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_table_is_unassigned() {
        assert_eq!(format_table_label("", "Room"), "");
        assert_eq!(format_table_label("   ", "Room"), "");
    }

    #[test]
    fn numeric_table_gets_prefix() {
        assert_eq!(format_table_label("12", "Room"), "Room 12");
        assert_eq!(format_table_label(" 7 ", "Table"), "Table 7");
    }

    #[test]
    fn descriptive_table_is_unchanged() {
        assert_eq!(format_table_label("Family Table", "Room"), "Family Table");
        assert_eq!(format_table_label("12A", "Room"), "12A");
        assert_eq!(format_table_label("7.5", "Room"), "7.5");
        assert_eq!(format_table_label("-3", "Room"), "-3");
    }
}
