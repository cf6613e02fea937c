//! Identifier-safe codes derived from human field names.
//!
//! Postgres truncates identifiers at 63 bytes; slugs are held to
//! [`MAX_IDENT_LEN`] so that a collision suffix still fits.

/// Upper bound on generated codes and column names.
pub const MAX_IDENT_LEN: usize = 55;

const RESERVED: &[&str] = &[
    "user", "order", "group", "limit", "offset", "select", "where", "from", "to",
];

/// Converts a display name such as `DDNA ID#` into `ddna_id`.
pub fn slugify_field(name: &str) -> String {
    let mut slug = ascii_runs(name);
    if slug.is_empty() {
        slug = "field".to_string();
    }

    if slug.starts_with(|c: char| c.is_ascii_digit()) {
        slug = format!("f_{slug}");
    }

    if RESERVED.contains(&slug.as_str()) {
        slug = format!("f_{slug}");
    }

    if slug.len() > MAX_IDENT_LEN {
        slug.truncate(MAX_IDENT_LEN);
        let trimmed = slug.trim_end_matches('_').len();
        slug.truncate(trimmed);
    }

    slug
}

/// Appends a disambiguating `suffix` to `base`, shortening `base` as needed
/// so the result stays within [`MAX_IDENT_LEN`].
pub fn disambiguate(base: &str, suffix: &str) -> String {
    let mut suffix = ascii_runs(suffix);
    if suffix.is_empty() {
        suffix = "alt".to_string();
    }
    if suffix.len() > MAX_IDENT_LEN / 2 {
        suffix.truncate(MAX_IDENT_LEN / 2);
        let trimmed = suffix.trim_end_matches('_').len();
        suffix.truncate(trimmed);
    }

    let mut cut = (MAX_IDENT_LEN - suffix.len() - 1).min(base.len());
    while !base.is_char_boundary(cut) {
        cut -= 1;
    }
    let base = base[..cut].trim_end_matches('_');
    format!("{base}_{suffix}")
}

/// Lowercased ASCII alphanumeric runs joined with single underscores.
fn ascii_runs(value: &str) -> String {
    value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
