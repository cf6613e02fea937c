//! Field listing for one entity.
//!
//! Renders the derived field definitions (code, column, storage type, default)
//! as an aligned table so mapping changes can be reviewed before generating.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::FieldsArgs,
    config::Settings,
    fields::{EntitySchema, build_schema_set},
    table,
};

pub fn field_rows(entity: &EntitySchema, columns_only: bool) -> Vec<Vec<String>> {
    entity
        .fields
        .iter()
        .filter(|field| !columns_only || !field.is_virtual())
        .enumerate()
        .map(|(idx, field)| {
            vec![
                (idx + 1).to_string(),
                field.name.clone(),
                field.data_type.clone(),
                field.code.clone(),
                field
                    .column
                    .clone()
                    .unwrap_or_else(|| "(virtual)".to_string()),
                field
                    .pg_type
                    .map(|pg_type| pg_type.to_string())
                    .unwrap_or_default(),
                field.default_sql.unwrap_or_default().to_string(),
            ]
        })
        .collect()
}

pub fn execute(args: &FieldsArgs) -> Result<i32> {
    let settings = Settings::from_args(&args.source)?;
    let schema = build_schema_set(&settings.csv_dir, &settings.read_options)?;
    let entity = schema
        .get(args.entity)
        .with_context(|| format!("Entity {} missing from schema set", args.entity))?;

    let headers = ["#", "name", "data type", "code", "column", "type", "default"]
        .iter()
        .map(|header| header.to_string())
        .collect::<Vec<_>>();
    let rows = field_rows(entity, args.columns_only);
    table::print_table(&headers, &rows);
    info!(
        "Listed {} field(s) for {} (table public.{})",
        rows.len(),
        entity.kind,
        entity.table()
    );
    Ok(0)
}
