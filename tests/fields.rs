mod common;

use std::collections::HashSet;

use common::{ASSET_CSV, TestWorkspace};
use encoding_rs::WINDOWS_1252;
use schema_align::entity::EntityKind;
use schema_align::error::SchemaAlignError;
use schema_align::fields::{ReadOptions, build_schema_set, read_csv_fields};
use schema_align::pg_type::PgType;

#[test]
fn task_notes_with_two_types_map_to_distinct_columns() {
    let workspace = TestWorkspace::with_exports();
    let schema = build_schema_set(&workspace.csv_dir(), &ReadOptions::default()).expect("schema");
    let task = schema.get(EntityKind::Task).expect("task entity");

    let notes = task
        .fields
        .iter()
        .filter(|field| field.name == "Notes")
        .collect::<Vec<_>>();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].data_type, "multi_entity");
    assert_eq!(notes[0].column.as_deref(), Some("notes_links"));
    assert_eq!(notes[0].pg_type, Some(PgType::TextArray));
    assert_eq!(notes[0].default_sql, Some("'{}'::text[]"));
    assert_eq!(notes[1].column.as_deref(), Some("notes"));
    assert_eq!(notes[1].pg_type, Some(PgType::Text));
    assert_ne!(notes[0].code, notes[1].code);
}

#[test]
fn virtual_link_fields_never_materialize() {
    let workspace = TestWorkspace::with_exports();
    let schema = build_schema_set(&workspace.csv_dir(), &ReadOptions::default()).expect("schema");

    for kind in [EntityKind::Task, EntityKind::PublishedFile] {
        let link = schema
            .get(kind)
            .and_then(|entity| entity.field_by_name("Link"))
            .expect("link field");
        assert!(link.is_virtual(), "{kind} Link must be virtual");
        assert_eq!(link.column, None);
        assert_eq!(link.pg_type, None);
        assert_eq!(link.default_sql, None);
        assert!(!schema.get(kind).unwrap().columns().contains("link"));
    }
}

#[test]
fn columns_and_codes_are_pairwise_distinct_per_entity() {
    let workspace = TestWorkspace::with_exports();
    let schema = build_schema_set(&workspace.csv_dir(), &ReadOptions::default()).expect("schema");

    assert_eq!(schema.entities.len(), 7);
    for entity in &schema.entities {
        let mut columns = HashSet::new();
        let mut codes = HashSet::new();
        for field in &entity.fields {
            assert!(codes.insert(field.code.clone()), "{}: duplicate code", entity.kind);
            if let Some(column) = &field.column {
                assert!(columns.insert(column.clone()), "{}: duplicate column", entity.kind);
            }
        }
    }
}

#[test]
fn inference_follows_mapping_and_declared_types() {
    let workspace = TestWorkspace::with_exports();
    let schema = build_schema_set(&workspace.csv_dir(), &ReadOptions::default()).expect("schema");
    let task = schema.get(EntityKind::Task).unwrap();

    let checkbox = task.field_by_name("Checkbox Field").expect("checkbox field");
    assert_eq!(checkbox.pg_type, Some(PgType::Boolean));
    assert_eq!(checkbox.default_sql, Some("false"));

    let assignee = task.field_by_column("assigned_to").expect("assignee");
    assert_eq!(assignee.pg_type, Some(PgType::Uuid));

    let short = task.field_by_name("Short Row").expect("short row kept");
    assert_eq!(short.data_type, "");
    assert_eq!(short.pg_type, Some(PgType::Text));

    let bid = task.field_by_column("bid_days").expect("quoted name slugged");
    assert_eq!(bid.pg_type, Some(PgType::DoublePrecision));

    let sequence = schema.get(EntityKind::Sequence).unwrap();
    let count = sequence.field_by_column("open_notes_count").unwrap();
    assert_eq!(count.pg_type, Some(PgType::Integer));
    assert_eq!(count.default_sql, Some("0"));

    let version = schema.get(EntityKind::Version).unwrap();
    assert_eq!(
        version.field_by_column("date_viewed").unwrap().pg_type,
        Some(PgType::TimestampTz)
    );
    assert_eq!(
        version.field_by_column("sg_data").unwrap().pg_type,
        Some(PgType::Jsonb)
    );
}

#[test]
fn duplicate_rows_are_dropped_keeping_first() {
    let workspace = TestWorkspace::with_exports();
    let rows = read_csv_fields(
        &workspace.csv_dir().join("task.csv"),
        &ReadOptions::default(),
    )
    .expect("rows");
    let task_names = rows.iter().filter(|row| row.name == "Task Name").count();
    assert_eq!(task_names, 1);
    assert_eq!(rows.len(), 9);
}

#[test]
fn shot_name_is_synthesized_when_absent() {
    let workspace = TestWorkspace::with_exports();
    let schema = build_schema_set(&workspace.csv_dir(), &ReadOptions::default()).expect("schema");
    let shot = schema.get(EntityKind::Shot).unwrap();
    let names = shot
        .fields
        .iter()
        .map(|field| field.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(&names[..3], &["Id", "Shot Name", "Shot Code"]);
    assert_eq!(shot.field_by_name("Shot Name").unwrap().field_type, "permanent");
}

#[test]
fn missing_exports_abort_with_full_listing() {
    let workspace = TestWorkspace::with_exports();
    std::fs::remove_file(workspace.csv_dir().join("note.csv")).unwrap();
    std::fs::remove_file(workspace.csv_dir().join("shots.csv")).unwrap();

    let err = build_schema_set(&workspace.csv_dir(), &ReadOptions::default()).unwrap_err();
    match err.downcast_ref::<SchemaAlignError>() {
        Some(SchemaAlignError::MissingCsv { files, .. }) => {
            assert_eq!(files, &vec!["shots.csv".to_string(), "note.csv".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn semicolon_exports_are_read_with_explicit_delimiter() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "note.csv",
        "Field Name;Data Type;Field Type\nSubject;text;permanent\nClient Note;checkbox;custom\n",
    );
    let options = ReadOptions {
        delimiter: Some(b';'),
        ..ReadOptions::default()
    };
    let rows = read_csv_fields(&path, &options).expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].name, "Client Note");
    assert_eq!(rows[1].data_type, "checkbox");
}

fn write_windows_1252_asset_export(workspace: &TestWorkspace) {
    let mut bytes = ASSET_CSV.as_bytes().to_vec();
    bytes.extend_from_slice(b"Caf\xe9 Tag,text,custom\n");
    std::fs::write(workspace.csv_dir().join("asset.csv"), bytes).unwrap();
}

#[test]
fn legacy_encoded_exports_decode_with_selected_encoding() {
    let workspace = TestWorkspace::with_exports();
    write_windows_1252_asset_export(&workspace);

    let options = ReadOptions {
        encoding: WINDOWS_1252,
        ..ReadOptions::default()
    };
    let schema = build_schema_set(&workspace.csv_dir(), &options).expect("schema");
    let field = schema
        .get(EntityKind::Asset)
        .and_then(|asset| asset.field_by_name("Café Tag"))
        .expect("decoded field name");
    assert_eq!(field.code, "caf_tag");
    assert_eq!(field.column.as_deref(), Some("caf_tag"));
}

#[test]
fn legacy_encoded_exports_fail_as_utf8() {
    let workspace = TestWorkspace::with_exports();
    write_windows_1252_asset_export(&workspace);

    let err = build_schema_set(&workspace.csv_dir(), &ReadOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to decode text with encoding UTF-8"));
}
