use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;
use similar::TextDiff;

use crate::{
    cli::GenerateArgs,
    config::Settings,
    fields::{SchemaSet, build_schema_set},
    io_utils, migration, registry,
};

/// Rendered artifact text paired with its destination.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

pub fn render_artifacts(
    settings: &Settings,
    schema: &SchemaSet,
    sql_output: &Path,
    registry_output: &Path,
) -> Result<Vec<Artifact>> {
    let source_label = settings.display_relative(&settings.csv_dir);
    Ok(vec![
        Artifact {
            path: sql_output.to_path_buf(),
            contents: migration::render_migration(schema, &source_label),
        },
        Artifact {
            path: registry_output.to_path_buf(),
            contents: registry::render_registry(schema)?,
        },
    ])
}

pub fn execute(args: &GenerateArgs) -> Result<i32> {
    let settings = Settings::from_args(&args.source)?;
    let schema = build_schema_set(&settings.csv_dir, &settings.read_options)?;
    let artifacts = render_artifacts(
        &settings,
        &schema,
        &settings.sql_output(args.sql_output.as_deref()),
        &settings.registry_output(args.registry_output.as_deref()),
    )?;

    if args.check {
        let stale = check_artifacts(&settings, &artifacts)?;
        if stale > 0 {
            println!("{stale} generated file(s) out of date; run `schema-align generate`");
            return Ok(1);
        }
        info!("Generated files are up to date");
        return Ok(0);
    }

    for artifact in &artifacts {
        io_utils::write_artifact(&artifact.path, &artifact.contents)?;
        info!("Wrote: {:?}", artifact.path);
    }
    Ok(0)
}

/// Prints a unified diff for each artifact that differs from disk and
/// returns how many are stale.
fn check_artifacts(settings: &Settings, artifacts: &[Artifact]) -> Result<usize> {
    let mut stale = 0;
    for artifact in artifacts {
        let label = settings.display_relative(&artifact.path);
        match io_utils::read_existing(&artifact.path)? {
            None => {
                println!("missing: {label}");
                stale += 1;
            }
            Some(current) if current != artifact.contents => {
                let diff = TextDiff::from_lines(current.as_str(), artifact.contents.as_str());
                print!(
                    "{}",
                    diff.unified_diff()
                        .context_radius(3)
                        .header(&format!("{label} (on disk)"), &format!("{label} (generated)"))
                );
                stale += 1;
            }
            Some(_) => {}
        }
    }
    Ok(stale)
}
