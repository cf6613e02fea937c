//! Idempotent column-alignment migration.
//!
//! Every statement is additive and guarded (`ADD COLUMN IF NOT EXISTS`,
//! `DROP CONSTRAINT IF EXISTS` + re-add), so the file can be applied any
//! number of times. Entity-type checks are added `NOT VALID`: they bind new
//! and updated rows while legacy rows are left alone.

use std::fmt::Write as _;

use crate::{
    entity::EntityKind,
    fields::{EntitySchema, FieldDef, SchemaSet},
};

const RULE: &str =
    "-- ============================================================================";

/// Allowed `entity_type` values for each polymorphic table.
pub const ENTITY_TYPE_CHECKS: &[(&str, &[&str])] = &[
    ("tasks", &["asset", "shot", "sequence", "project"]),
    ("versions", &["asset", "shot", "sequence"]),
    (
        "notes",
        &[
            "task",
            "asset",
            "shot",
            "sequence",
            "version",
            "project",
            "published_file",
        ],
    ),
    (
        "published_files",
        &["asset", "shot", "sequence", "task", "version", "note", "project"],
    ),
];

const PROFILE_COLUMNS: &[&str] = &[
    "created_by",
    "updated_by",
    "author_id",
    "artist_id",
    "published_by",
];

/// Foreign-key target as `(column type, referenced table)`.
fn foreign_key(kind: EntityKind, column: &str) -> Option<(&'static str, &'static str)> {
    match (kind, column) {
        (EntityKind::Asset, "sequence_id") => Some(("integer", "sequences")),
        (EntityKind::Asset, "shot_id") => Some(("integer", "shots")),
        (_, column) if PROFILE_COLUMNS.contains(&column) => Some(("uuid", "profiles")),
        _ => None,
    }
}

/// Column definition as it appears after `ADD COLUMN IF NOT EXISTS`.
/// Returns `None` for virtual fields.
pub fn column_definition(kind: EntityKind, field: &FieldDef) -> Option<String> {
    let column = field.column.as_deref()?;
    let pg_type = field.pg_type?;

    if let Some((fk_type, table)) = foreign_key(kind, column) {
        return Some(format!(
            "{column} {fk_type} REFERENCES public.{table}(id) ON DELETE SET NULL"
        ));
    }

    Some(match field.default_sql {
        Some(default) => format!("{column} {pg_type} DEFAULT {default}"),
        None => format!("{column} {pg_type}"),
    })
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "-- {title}");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
}

fn write_header(out: &mut String, source_label: &str) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "-- Align DB schema with CSV schema definitions");
    let _ = writeln!(out, "-- Source CSV dir: {source_label}");
    let _ = writeln!(out, "--");
    let _ = writeln!(out, "-- This migration is designed to be safe to re-run:");
    let _ = writeln!(out, "-- - Uses ALTER TABLE ... ADD COLUMN IF NOT EXISTS");
    let _ = writeln!(out, "-- - Does NOT drop tables or data");
    let _ = writeln!(
        out,
        "-- - Uses conservative Postgres types (TEXT / JSONB unless clearly inferable)"
    );
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
}

fn write_constraints(out: &mut String) {
    section(out, "0) Polymorphic Entity Constraints");
    let _ = writeln!(
        out,
        "-- NOTE: Constraints are added NOT VALID so legacy rows with unexpected values do not fail the migration."
    );
    let _ = writeln!(
        out,
        "--       They are still enforced for new/updated rows. Validate after cleanup with:"
    );
    for (table, _) in ENTITY_TYPE_CHECKS {
        let _ = writeln!(
            out,
            "--         ALTER TABLE public.{table} VALIDATE CONSTRAINT {table}_entity_type_check;"
        );
    }
    let _ = writeln!(out);

    for (table, allowed) in ENTITY_TYPE_CHECKS {
        let values = allowed
            .iter()
            .map(|value| format!("'{value}'"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "ALTER TABLE public.{table} DROP CONSTRAINT IF EXISTS {table}_entity_type_check;"
        );
        let _ = writeln!(out, "ALTER TABLE public.{table}");
        let _ = writeln!(out, "  ADD CONSTRAINT {table}_entity_type_check");
        let _ = writeln!(out, "  CHECK (entity_type IN ({values})) NOT VALID;");
        let _ = writeln!(out);
    }
}

fn write_entity(out: &mut String, entity: &EntitySchema) {
    let definitions = entity
        .fields
        .iter()
        .filter_map(|field| column_definition(entity.kind, field))
        .collect::<Vec<_>>();
    if definitions.is_empty() {
        return;
    }

    section(
        out,
        &format!(
            "{} (from {})",
            entity.table().to_ascii_uppercase(),
            entity.csv_file()
        ),
    );
    let _ = writeln!(out, "ALTER TABLE public.{}", entity.table());
    let last = definitions.len() - 1;
    for (idx, definition) in definitions.iter().enumerate() {
        let terminator = if idx == last { ';' } else { ',' };
        let _ = writeln!(out, "  ADD COLUMN IF NOT EXISTS {definition}{terminator}");
    }
    let _ = writeln!(out);
}

/// Renders the full migration. `source_label` names the CSV directory in the
/// banner and should be stable across machines for byte-identical output.
pub fn render_migration(schema: &SchemaSet, source_label: &str) -> String {
    let mut out = String::new();
    write_header(&mut out, source_label);
    write_constraints(&mut out);
    for entity in &schema.entities {
        write_entity(&mut out, entity);
    }
    out
}
