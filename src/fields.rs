//! Field definitions derived from entity CSV exports.
//!
//! This module owns the in-memory schema model ([`FieldDef`],
//! [`EntitySchema`], [`SchemaSet`]) and the builder that turns raw CSV rows
//! into it:
//!
//! - rows are trimmed, blank rows skipped, and duplicates of the same
//!   `(name, data type)` pair dropped keeping the first;
//! - each row gets a slug code and a column from the explicit mappings or the
//!   slug fallback;
//! - virtual fields keep their code but receive no column or type;
//! - code and column collisions are resolved by suffixing the data type, then
//!   a counter, so both stay pairwise unique within an entity.

use std::{
    collections::{BTreeSet, HashSet},
    path::Path,
};

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use log::{debug, info, warn};

use crate::{
    entity::EntityKind,
    error::SchemaAlignError,
    io_utils, mapping,
    pg_type::{PgType, infer_pg_type},
    slug::{disambiguate, slugify_field},
};

/// One `(name, data type, field type)` row from an entity export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub name: String,
    pub data_type: String,
    pub field_type: String,
}

impl RawField {
    pub fn new(name: &str, data_type: &str, field_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            field_type: field_type.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub data_type: String,
    pub field_type: String,
    pub code: String,
    /// `None` for virtual fields.
    pub column: Option<String>,
    pub pg_type: Option<PgType>,
    pub default_sql: Option<&'static str>,
}

impl FieldDef {
    pub fn is_virtual(&self) -> bool {
        self.column.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub fields: Vec<FieldDef>,
}

impl EntitySchema {
    pub fn table(&self) -> &'static str {
        self.kind.table()
    }

    pub fn csv_file(&self) -> &'static str {
        self.kind.csv_file()
    }

    /// Materialized columns, excluding virtual fields.
    pub fn columns(&self) -> BTreeSet<&str> {
        self.fields
            .iter()
            .filter_map(|field| field.column.as_deref())
            .collect()
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_by_column(&self, column: &str) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|field| field.column.as_deref() == Some(column))
    }
}

/// All entity schemas in [`EntityKind::ALL`] order.
#[derive(Debug, Clone)]
pub struct SchemaSet {
    pub entities: Vec<EntitySchema>,
}

impl SchemaSet {
    pub fn get(&self, kind: EntityKind) -> Option<&EntitySchema> {
        self.entities.iter().find(|entity| entity.kind == kind)
    }

    pub fn field_count(&self) -> usize {
        self.entities.iter().map(|entity| entity.fields.len()).sum()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

/// Reads the field rows of one export. The first row is a header and is
/// skipped; short rows read missing cells as empty strings.
pub fn read_csv_fields(path: &Path, options: &ReadOptions) -> Result<Vec<RawField>> {
    let delimiter = options
        .delimiter
        .unwrap_or(io_utils::DEFAULT_CSV_DELIMITER);
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter, true)?;

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record =
            record.with_context(|| format!("Reading row {} in {:?}", row_idx + 2, path))?;
        let decoded = io_utils::decode_record(&record, options.encoding)
            .with_context(|| format!("Decoding row {} in {:?}", row_idx + 2, path))?;
        rows.push(decoded);
    }
    Ok(normalize_rows(rows))
}

/// Trims cells, skips blank and nameless rows, and drops repeated
/// `(name, data type)` pairs.
pub fn normalize_rows(rows: Vec<Vec<String>>) -> Vec<RawField> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in rows {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let cell = |idx: usize| -> String {
            row.get(idx)
                .map(|value| value.trim().trim_matches('"').to_string())
                .unwrap_or_default()
        };
        let raw = RawField {
            name: cell(0),
            data_type: cell(1),
            field_type: cell(2),
        };
        if raw.name.is_empty() {
            debug!("Skipping row without a field name: {row:?}");
            continue;
        }
        if !seen.insert((raw.name.clone(), raw.data_type.clone())) {
            debug!(
                "Dropping duplicate field '{}' ({})",
                raw.name, raw.data_type
            );
            continue;
        }
        out.push(raw);
    }
    out
}

/// Picks the first free name among `base`, `base_<data type>`, then
/// `base_<data type>_2`, `_3`, ... and reserves it.
fn claim_unique(taken: &mut HashSet<String>, base: &str, data_type: &str) -> String {
    if taken.insert(base.to_string()) {
        return base.to_string();
    }
    let suffixed = disambiguate(base, data_type);
    if taken.insert(suffixed.clone()) {
        return suffixed;
    }
    let mut counter = 2usize;
    loop {
        let candidate = disambiguate(&suffixed, &counter.to_string());
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

fn synthesize_shot_name(rows: &mut Vec<RawField>) {
    if rows.iter().any(|row| row.name == "Shot Name") {
        return;
    }
    let insert_at = rows
        .iter()
        .position(|row| row.name == "Shot Code")
        .unwrap_or(rows.len());
    debug!("Synthesizing 'Shot Name' at position {insert_at}");
    rows.insert(insert_at, RawField::new("Shot Name", "text", "permanent"));
}

pub fn build_entity_fields(kind: EntityKind, mut rows: Vec<RawField>) -> Vec<FieldDef> {
    // some shot exports omit the primary display name even though the column exists
    if kind == EntityKind::Shot {
        synthesize_shot_name(&mut rows);
    }

    let mut codes = HashSet::new();
    let mut columns = HashSet::new();
    let mut fields = Vec::with_capacity(rows.len());

    for raw in rows {
        let slug = slugify_field(&raw.name);
        let code = claim_unique(&mut codes, &slug, &raw.data_type);
        if code != slug {
            debug!("{kind}: code '{slug}' already used, '{}' becomes '{code}'", raw.name);
        }

        if mapping::is_virtual(kind, &raw.name) {
            fields.push(FieldDef {
                name: raw.name,
                data_type: raw.data_type,
                field_type: raw.field_type,
                code,
                column: None,
                pg_type: None,
                default_sql: None,
            });
            continue;
        }

        let mapped = mapping::mapped_column(kind, &raw.name, &raw.data_type);
        let base = mapped.map(str::to_string).unwrap_or(slug);
        let column = claim_unique(&mut columns, &base, &raw.data_type);
        if column != base {
            warn!(
                "{kind}: column '{base}' already used, '{}' ({}) stored as '{column}'",
                raw.name, raw.data_type
            );
        }

        let (pg_type, default_sql) = infer_pg_type(&raw.name, &raw.data_type, mapped);
        fields.push(FieldDef {
            name: raw.name,
            data_type: raw.data_type,
            field_type: raw.field_type,
            code,
            column: Some(column),
            pg_type: Some(pg_type),
            default_sql,
        });
    }

    fields
}

/// Builds every entity from `csv_dir`. All inputs are checked up front so a
/// missing file aborts before anything is read.
pub fn build_schema_set(csv_dir: &Path, options: &ReadOptions) -> Result<SchemaSet> {
    let missing = EntityKind::ALL
        .iter()
        .map(|kind| kind.csv_file())
        .filter(|file| !csv_dir.join(file).is_file())
        .map(str::to_string)
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(SchemaAlignError::MissingCsv {
            dir: csv_dir.to_path_buf(),
            files: missing,
        }
        .into());
    }

    let mut entities = Vec::with_capacity(EntityKind::ALL.len());
    for kind in EntityKind::ALL {
        let path = csv_dir.join(kind.csv_file());
        let rows = read_csv_fields(&path, options)
            .with_context(|| format!("Loading {kind} fields from {path:?}"))?;
        let fields = build_entity_fields(kind, rows);
        let virtual_count = fields.iter().filter(|field| field.is_virtual()).count();
        debug!(
            "{kind}: {} field(s), {virtual_count} virtual",
            fields.len()
        );
        entities.push(EntitySchema { kind, fields });
    }

    let set = SchemaSet { entities };
    info!(
        "Derived {} field(s) across {} entities from {:?}",
        set.field_count(),
        set.entities.len(),
        csv_dir
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[(&str, &str, &str)]) -> Vec<RawField> {
        values
            .iter()
            .map(|(name, data_type, field_type)| RawField::new(name, data_type, field_type))
            .collect()
    }

    #[test]
    fn normalize_rows_pads_short_rows_and_strips_quotes() {
        let raw = vec![
            vec![" \"Status\" ".to_string(), "status_list".to_string()],
            vec!["".to_string(), " ".to_string(), "".to_string()],
            vec!["Status".to_string(), "status_list".to_string(), "x".to_string()],
            vec!["".to_string(), "text".to_string(), "custom".to_string()],
        ];
        let normalized = normalize_rows(raw);
        assert_eq!(normalized, vec![RawField::new("Status", "status_list", "")]);
    }

    #[test]
    fn claim_unique_escalates_to_counter() {
        let mut taken = HashSet::new();
        assert_eq!(claim_unique(&mut taken, "foo", "text"), "foo");
        assert_eq!(claim_unique(&mut taken, "foo", "text"), "foo_text");
        assert_eq!(claim_unique(&mut taken, "foo", "text"), "foo_text_2");
        assert_eq!(claim_unique(&mut taken, "foo", "text"), "foo_text_3");
    }

    #[test]
    fn shot_name_is_inserted_before_shot_code() {
        let fields = build_entity_fields(
            EntityKind::Shot,
            rows(&[("Id", "number", "permanent"), ("Shot Code", "text", "permanent")]),
        );
        let names = fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Id", "Shot Name", "Shot Code"]);
        assert_eq!(fields[1].column.as_deref(), Some("name"));
    }

    #[test]
    fn shot_name_is_not_synthesized_for_other_entities() {
        let fields = build_entity_fields(EntityKind::Asset, rows(&[("Id", "number", "")]));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn virtual_fields_keep_code_but_no_storage() {
        let fields = build_entity_fields(
            EntityKind::Task,
            rows(&[("Link", "entity", "permanent"), ("Task Name", "text", "permanent")]),
        );
        let link = &fields[0];
        assert_eq!(link.code, "link");
        assert!(link.is_virtual());
        assert_eq!(link.pg_type, None);
        assert_eq!(link.default_sql, None);
    }

    #[test]
    fn repeated_slug_gets_type_suffix_on_code_and_column() {
        let fields = build_entity_fields(
            EntityKind::Note,
            rows(&[("Cut-In", "number", "custom"), ("Cut In", "text", "custom")]),
        );
        assert_eq!(fields[0].code, "cut_in");
        assert_eq!(fields[1].code, "cut_in_text");
        assert_eq!(fields[0].column.as_deref(), Some("cut_in"));
        assert_eq!(fields[1].column.as_deref(), Some("cut_in_text"));
    }
}
