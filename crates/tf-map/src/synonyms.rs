use tf_model::CanonicalField;

/// Header spellings commonly used for each canonical field, already normalized.
pub fn synonyms(field: CanonicalField) -> &'static [&'static str] {
    match field {
        CanonicalField::FirstName => &[
            "first name",
            "firstname",
            "first",
            "given name",
            "givenname",
            "forename",
            "name",
            "vorname",
            "prenom",
        ],
        CanonicalField::LastName => &[
            "last name",
            "lastname",
            "last",
            "surname",
            "family name",
            "familyname",
            "nachname",
            "nom",
        ],
        CanonicalField::Table => &[
            "table",
            "table number",
            "table no",
            "table nr",
            "table id",
            "seat",
            "seating",
            "assigned table",
            "tisch",
        ],
    }
}

/// Normalizes a header for comparison: lowercase, separators to spaces.
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '#'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
