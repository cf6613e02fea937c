//! Conservative Postgres storage types for declared field data types.
//!
//! Precedence: structural overrides on explicitly mapped columns, then the
//! declared data type, then `text`.

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PgType {
    Text,
    Boolean,
    Integer,
    DoublePrecision,
    Numeric,
    Date,
    TimestampTz,
    Uuid,
    Jsonb,
    TextArray,
}

impl PgType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            PgType::Text => "text",
            PgType::Boolean => "boolean",
            PgType::Integer => "integer",
            PgType::DoublePrecision => "double precision",
            PgType::Numeric => "numeric",
            PgType::Date => "date",
            PgType::TimestampTz => "timestamptz",
            PgType::Uuid => "uuid",
            PgType::Jsonb => "jsonb",
            PgType::TextArray => "text[]",
        }
    }
}

impl fmt::Display for PgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl Serialize for PgType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_sql())
    }
}

const INTEGER_COLUMNS: &[&str] = &[
    "id",
    "project_id",
    "sequence_id",
    "shot_id",
    "task_id",
    "version_id",
    "entity_id",
    "step_id",
];

const TIMESTAMP_COLUMNS: &[&str] = &[
    "created_at",
    "updated_at",
    "published_at",
    "date_viewed",
    "client_approved_at",
];

const ACTOR_COLUMNS: &[&str] = &[
    "created_by",
    "updated_by",
    "author_id",
    "artist_id",
    "published_by",
    "assigned_to",
];

const CORE_TEXT_COLUMNS: &[&str] = &["content", "subject", "description", "name", "code", "status"];

/// Infers `(type, default)` for a field. The default is a ready-to-emit SQL
/// literal. `mapped_column` must be the explicit mapping only, never the slug
/// fallback, so unmapped fields cannot hit a structural override by accident.
pub fn infer_pg_type(
    field_name: &str,
    data_type: &str,
    mapped_column: Option<&str>,
) -> (PgType, Option<&'static str>) {
    if let Some(column) = mapped_column {
        if INTEGER_COLUMNS.contains(&column) {
            return (PgType::Integer, None);
        }
        if TIMESTAMP_COLUMNS.contains(&column) {
            return (PgType::TimestampTz, None);
        }
        if ACTOR_COLUMNS.contains(&column) {
            return (PgType::Uuid, None);
        }
        if CORE_TEXT_COLUMNS.contains(&column) {
            return (PgType::Text, None);
        }
    }

    let declared = data_type.trim().to_ascii_lowercase();
    let name = field_name.trim().to_ascii_lowercase();

    match declared.as_str() {
        "text" | "url" | "status_list" | "list" | "color" => (PgType::Text, None),
        // stored as a URL or path
        "image" => (PgType::Text, None),
        "checkbox" => (PgType::Boolean, Some("false")),
        "date" => (PgType::Date, None),
        "date_time" => (PgType::TimestampTz, None),
        "number" => (PgType::Integer, None),
        "float" => (PgType::DoublePrecision, None),
        "duration" | "percent" => (PgType::Numeric, None),
        "summary" if name.contains("count") || name.contains("number") => {
            (PgType::Integer, Some("0"))
        }
        "summary" => (PgType::Text, None),
        "serializable" => (PgType::Jsonb, None),
        "multi_entity" => (PgType::TextArray, Some("'{}'::text[]")),
        // single links are often plain strings in existing rows
        "entity" => (PgType::Text, None),
        _ => (PgType::Text, None),
    }
}
