//! TypeScript schema registry.
//!
//! The registry is a single module exporting `SCHEMA`, a JSON literal keyed
//! by entity kind. Object keys are emitted in sorted order (struct fields
//! below are declared alphabetically and entities sit in a `BTreeMap`) so the
//! output is stable across runs.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    entity::EntityKind,
    fields::{FieldDef, SchemaSet},
    pg_type::PgType,
};

#[derive(Debug, Serialize)]
struct RegistryField<'a> {
    code: &'a str,
    column: Option<&'a str>,
    #[serde(rename = "dataType")]
    data_type: &'a str,
    #[serde(rename = "defaultSql")]
    default_sql: Option<&'a str>,
    #[serde(rename = "fieldType")]
    field_type: &'a str,
    name: &'a str,
    #[serde(rename = "pgType")]
    pg_type: Option<PgType>,
    #[serde(rename = "virtual")]
    is_virtual: bool,
}

impl<'a> From<&'a FieldDef> for RegistryField<'a> {
    fn from(field: &'a FieldDef) -> Self {
        Self {
            code: &field.code,
            column: field.column.as_deref(),
            data_type: &field.data_type,
            default_sql: field.default_sql,
            field_type: &field.field_type,
            name: &field.name,
            pg_type: field.pg_type,
            is_virtual: field.is_virtual(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RegistryEntity<'a> {
    csv: &'static str,
    entity: EntityKind,
    fields: Vec<RegistryField<'a>>,
    table: &'static str,
}

/// Pretty-printed `SCHEMA` literal.
pub fn registry_json(schema: &SchemaSet) -> Result<String> {
    let entities = schema
        .entities
        .iter()
        .map(|entity| {
            (
                entity.kind.as_str(),
                RegistryEntity {
                    csv: entity.csv_file(),
                    entity: entity.kind,
                    fields: entity.fields.iter().map(RegistryField::from).collect(),
                    table: entity.table(),
                },
            )
        })
        .collect::<BTreeMap<_, _>>();
    serde_json::to_string_pretty(&entities).context("Serializing schema registry")
}

pub fn render_registry(schema: &SchemaSet) -> Result<String> {
    let json = registry_json(schema)?;
    let entity_keys = schema
        .entities
        .iter()
        .map(|entity| format!("'{}'", entity.kind))
        .collect::<Vec<_>>()
        .join(" | ");

    Ok(format!(
        r#"/* eslint-disable */
// AUTO-GENERATED FILE. DO NOT EDIT BY HAND.
// Generated by schema-align generate

export type EntityKey = {entity_keys}

export interface SchemaField {{
  name: string
  dataType: string
  fieldType: string
  code: string
  // When virtual=true, column/pgType/defaultSql will be null.
  column: string | null
  pgType: string | null
  defaultSql: string | null
  virtual: boolean
}}

export interface EntitySchema {{
  entity: EntityKey
  table: string
  csv: string
  fields: SchemaField[]
}}

export const SCHEMA: Record<EntityKey, EntitySchema> = {json} as any
"#
    ))
}
