pub mod audit;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod fields;
pub mod fields_cmd;
pub mod generate;
pub mod io_utils;
pub mod mapping;
pub mod migration;
pub mod pg_type;
pub mod registry;
pub mod slug;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("schema_align", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

/// Parses the command line, runs the selected command, and returns the
/// process exit code.
pub fn run() -> Result<i32> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate::execute(&args),
        Commands::Audit(args) => audit::execute(&args),
        Commands::Fields(args) => fields_cmd::execute(&args),
    }
}
