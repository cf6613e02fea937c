//! Project configuration.
//!
//! Built-in defaults describe the production-tracking repository layout. An
//! optional `schema-align.yaml` at the project root (or the file passed with
//! `--config`) overrides them, and command-line flags override both. Relative
//! paths resolve against the project root.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::debug;
use serde::Deserialize;

use crate::{
    cli::{SourceArgs, parse_delimiter},
    entity::EntityKind,
    error::SchemaAlignError,
    fields::ReadOptions,
    io_utils,
};

pub const CONFIG_FILE_NAME: &str = "schema-align.yaml";

pub const DEFAULT_CSV_DIR: &str = "images/schema";
pub const DEFAULT_SQL_OUTPUT: &str =
    "echo/migrations&fixes/generated/migration_align_schema_from_csv.sql";
pub const DEFAULT_REGISTRY_OUTPUT: &str = "echo/src/lib/schema/schema.generated.ts";
pub const DEFAULT_PAGES_ROOT: &str = "echo/src/app/(dashboard)/apex/[projectId]";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub csv_dir: Option<PathBuf>,
    pub sql_output: Option<PathBuf>,
    pub registry_output: Option<PathBuf>,
    pub pages_root: Option<PathBuf>,
    pub delimiter: Option<String>,
    pub input_encoding: Option<String>,
    /// Extra UI-only column ids accepted by the auditor, per entity.
    pub allowed_computed: BTreeMap<EntityKind, Vec<String>>,
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("Opening config {path:?}"))?;
        let mut config = if raw.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str::<Config>(&raw).map_err(|err| SchemaAlignError::InvalidConfig {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?
        };
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Loads `explicit` when given, else `<root>/schema-align.yaml` when it
    /// exists, else the defaults.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Config::load(&resolve(root, path));
        }
        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!("Using config {candidate:?}");
            Config::load(&candidate)
        } else {
            Ok(Config::default())
        }
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Fully resolved inputs shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub root: PathBuf,
    pub config: Config,
    pub csv_dir: PathBuf,
    pub read_options: ReadOptions,
}

impl Settings {
    pub fn from_args(args: &SourceArgs) -> Result<Self> {
        let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let config = Config::discover(&root, args.config.as_deref())?;

        let csv_dir = args
            .csv_dir
            .as_deref()
            .or(config.csv_dir.as_deref())
            .unwrap_or(Path::new(DEFAULT_CSV_DIR));
        let csv_dir = resolve(&root, csv_dir);

        let delimiter = match (args.delimiter, config.delimiter.as_deref()) {
            (Some(delimiter), _) => Some(delimiter),
            (None, Some(raw)) => Some(parse_delimiter(raw).map_err(|message| {
                SchemaAlignError::InvalidConfig {
                    path: config
                        .source
                        .clone()
                        .unwrap_or_else(|| root.join(CONFIG_FILE_NAME)),
                    message,
                }
            })?),
            (None, None) => None,
        };
        let encoding: &'static Encoding = io_utils::resolve_encoding(
            args.input_encoding
                .as_deref()
                .or(config.input_encoding.as_deref()),
        )?;

        Ok(Settings {
            root,
            csv_dir,
            read_options: ReadOptions {
                delimiter,
                encoding,
            },
            config,
        })
    }

    pub fn sql_output(&self, flag: Option<&Path>) -> PathBuf {
        let path = flag
            .or(self.config.sql_output.as_deref())
            .unwrap_or(Path::new(DEFAULT_SQL_OUTPUT));
        resolve(&self.root, path)
    }

    pub fn registry_output(&self, flag: Option<&Path>) -> PathBuf {
        let path = flag
            .or(self.config.registry_output.as_deref())
            .unwrap_or(Path::new(DEFAULT_REGISTRY_OUTPUT));
        resolve(&self.root, path)
    }

    pub fn pages_root(&self, flag: Option<&Path>) -> PathBuf {
        let path = flag
            .or(self.config.pages_root.as_deref())
            .unwrap_or(Path::new(DEFAULT_PAGES_ROOT));
        resolve(&self.root, path)
    }

    /// `path` relative to the project root when possible, with `/` separators.
    pub fn display_relative(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn extra_computed(&self, kind: EntityKind) -> BTreeSet<&str> {
        self.config
            .allowed_computed
            .get(&kind)
            .map(|ids| ids.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
