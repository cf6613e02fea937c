use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaAlignError {
    #[error("Missing CSV files in {dir:?}: {}", files.join(", "))]
    MissingCsv { dir: PathBuf, files: Vec<String> },

    #[error("Invalid config {path:?}: {message}")]
    InvalidConfig { path: PathBuf, message: String },
}
