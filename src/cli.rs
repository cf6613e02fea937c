use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::entity::EntityKind;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Align database columns and the schema registry with entity field CSV exports",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the column migration (.sql) and schema registry (.ts) from the CSV exports
    Generate(GenerateArgs),
    /// Check hardcoded page column lists against the generated schema
    Audit(AuditArgs),
    /// List the derived field definitions for one entity
    Fields(FieldsArgs),
}

/// Options shared by every command that reads the CSV exports.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Project root that relative paths resolve against (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Config file (defaults to schema-align.yaml under the root, when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory holding the per-entity CSV exports
    #[arg(long = "csv-dir")]
    pub csv_dir: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the CSV exports (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Destination of the SQL migration
    #[arg(long = "sql-output")]
    pub sql_output: Option<PathBuf>,
    /// Destination of the TypeScript schema registry
    #[arg(long = "registry-output")]
    pub registry_output: Option<PathBuf>,
    /// Write nothing; exit non-zero if either artifact is missing or out of date
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Args)]
pub struct AuditArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Directory scanned recursively for page.tsx files
    #[arg(long = "pages-root")]
    pub pages_root: Option<PathBuf>,
    /// Exit non-zero if unknown/non-schema hardcoded columns are found
    #[arg(long)]
    pub check: bool,
    /// Print per-page hardcoded coverage snapshot
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Entity kind to list
    #[arg(short, long, value_enum)]
    pub entity: EntityKind,
    /// Only list fields that materialize a column
    #[arg(long = "columns-only")]
    pub columns_only: bool,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
