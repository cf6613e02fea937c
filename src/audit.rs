//! Drift audit for hardcoded page column lists.
//!
//! Pages under the pages root declare `const columns = [ ... ]` with
//! `id: '<column>'` entries. Each list is checked against the schema columns
//! of the entity its route belongs to. Ids that are neither schema columns
//! nor known computed UI columns are drift; schema columns the page does not
//! list are reported only as coverage.
//!
//! Runtime auto-appended schema columns are out of reach of this check.

use std::{
    collections::BTreeSet,
    fs,
    path::{Component, Path, PathBuf},
    sync::OnceLock,
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use itertools::Itertools;
use log::{debug, info};
use regex::Regex;

use crate::{
    cli::AuditArgs,
    config::Settings,
    entity::EntityKind,
    fields::{SchemaSet, build_schema_set},
};

const COLUMNS_MARKER: &str = "const columns = [";
const SNAPSHOT_PAGES: usize = 20;
const SNAPSHOT_SAMPLE: usize = 12;

/// UI-only ids each entity's pages may use without a backing column.
pub fn allowed_computed(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Asset => &["project_label", "sequence_label", "shot_label"],
        EntityKind::Shot => &["project_label", "sequence_name", "sequence_code"],
        EntityKind::Sequence => &["project_label"],
        EntityKind::Task => &["step_name", "assignee_name", "project_label"],
        EntityKind::Version => &["task_label", "artist_label", "project_label"],
        EntityKind::Note => &["author_label", "link_label", "link_url", "attachments_count"],
        EntityKind::PublishedFile => &[
            "task_label",
            "version_label",
            "created_by_label",
            "project_label",
            "link",
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAudit {
    pub path: String,
    pub entity: EntityKind,
    pub unknown_columns: Vec<String>,
    pub missing_schema_columns: Vec<String>,
}

/// Entity for a page path relative to the pages root, taken from the nearest
/// enclosing route segment. Dynamic `[param]` segments are skipped.
pub fn infer_entity_from_path(relative: &Path) -> Option<EntityKind> {
    let parent = relative.parent()?;
    parent
        .components()
        .rev()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .filter(|part| !part.starts_with('['))
        .find_map(EntityKind::from_route_token)
}

fn columns_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)const columns\s*=\s*\[(.*?)\n\s*\]").expect("valid columns regex")
    })
}

fn column_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"id:\s*'([^']+)'").expect("valid column id regex"))
}

/// Column ids of the first `const columns = [...]` block, in source order.
/// The closing bracket must sit on its own line.
pub fn extract_hardcoded_column_ids(source: &str) -> Vec<String> {
    let Some(block) = columns_block().captures(source).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };
    column_id()
        .captures_iter(block.as_str())
        .filter_map(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .collect()
}

/// Compares one page's ids against its entity's schema columns.
pub fn audit_columns(
    ids: &[String],
    schema_columns: &BTreeSet<&str>,
    computed: &BTreeSet<&str>,
) -> (Vec<String>, Vec<String>) {
    let listed = ids.iter().map(String::as_str).collect::<BTreeSet<_>>();
    let unknown = listed
        .iter()
        .filter(|id| !schema_columns.contains(*id) && !computed.contains(*id))
        .map(|id| id.to_string())
        .collect();
    let missing = schema_columns
        .iter()
        .filter(|column| !listed.contains(*column))
        .map(|column| column.to_string())
        .collect();
    (unknown, missing)
}

fn discover_pages(pages_root: &Path) -> Result<Vec<PathBuf>> {
    let root = pages_root.to_string_lossy();
    // route folders such as `[projectId]` and `(dashboard)` are literal here
    let pattern = format!("{}/**/page.tsx", Pattern::escape(&root));
    let mut pages = glob(&pattern)
        .with_context(|| format!("Failed to read glob pattern '{pattern}'"))?
        .filter_map(|entry| entry.ok())
        .collect::<Vec<_>>();
    pages.sort();
    Ok(pages)
}

pub fn audit_pages(
    settings: &Settings,
    schema: &SchemaSet,
    pages_root: &Path,
) -> Result<Vec<FileAudit>> {
    let pages = discover_pages(pages_root)?;
    debug!("Found {} page(s) under {:?}", pages.len(), pages_root);

    let mut audits = Vec::new();
    for path in pages {
        let text = fs::read_to_string(&path).with_context(|| format!("Reading page {path:?}"))?;
        if !text.contains(COLUMNS_MARKER) {
            continue;
        }

        let relative = path.strip_prefix(pages_root).unwrap_or(&path);
        let Some(entity) = infer_entity_from_path(relative) else {
            debug!("No entity route segment in {relative:?}; skipping");
            continue;
        };
        let Some(entity_schema) = schema.get(entity) else {
            continue;
        };

        let ids = extract_hardcoded_column_ids(&text);
        if ids.is_empty() {
            continue;
        }

        let mut computed = allowed_computed(entity)
            .iter()
            .copied()
            .collect::<BTreeSet<_>>();
        computed.extend(settings.extra_computed(entity));

        let (unknown_columns, missing_schema_columns) =
            audit_columns(&ids, &entity_schema.columns(), &computed);
        audits.push(FileAudit {
            path: settings.display_relative(&path),
            entity,
            unknown_columns,
            missing_schema_columns,
        });
    }
    Ok(audits)
}

/// Renders the report and returns the number of pages with unknown ids.
pub fn render_summary(audits: &[FileAudit], verbose: bool) -> (String, usize) {
    let mut lines = Vec::new();
    let with_unknown = audits
        .iter()
        .filter(|audit| !audit.unknown_columns.is_empty())
        .collect::<Vec<_>>();

    if with_unknown.is_empty() {
        lines.push("Unknown/non-schema hardcoded columns: none".to_string());
    } else {
        lines.push("Unknown/non-schema hardcoded columns found:".to_string());
        for audit in &with_unknown {
            lines.push(format!("- {} [{}]", audit.path, audit.entity));
            lines.push(format!("  unknown: {}", audit.unknown_columns.join(", ")));
        }
    }

    if verbose {
        lines.push(String::new());
        lines.push("Hardcoded-column coverage snapshot (missing schema columns):".to_string());
        let by_missing = audits
            .iter()
            .sorted_by(|a, b| {
                b.missing_schema_columns
                    .len()
                    .cmp(&a.missing_schema_columns.len())
            })
            .take(SNAPSHOT_PAGES);
        for audit in by_missing {
            lines.push(format!(
                "- {} [{}] missing={}",
                audit.path,
                audit.entity,
                audit.missing_schema_columns.len()
            ));
            if !audit.missing_schema_columns.is_empty() {
                let sample = audit
                    .missing_schema_columns
                    .iter()
                    .take(SNAPSHOT_SAMPLE)
                    .join(", ");
                lines.push(format!("  sample: {sample}"));
            }
        }
    }

    let mut report = lines.join("\n");
    report.push('\n');
    (report, with_unknown.len())
}

pub fn execute(args: &AuditArgs) -> Result<i32> {
    let settings = Settings::from_args(&args.source)?;
    let schema = build_schema_set(&settings.csv_dir, &settings.read_options)?;
    let pages_root = settings.pages_root(args.pages_root.as_deref());
    info!("Auditing pages under {:?}", pages_root);

    let audits = audit_pages(&settings, &schema, &pages_root)?;
    let (report, unknown_pages) = render_summary(&audits, args.verbose);
    print!("{report}");
    info!(
        "Audited {} page(s); {} with unknown columns",
        audits.len(),
        unknown_pages
    );

    if args.check && unknown_pages > 0 {
        return Ok(1);
    }
    Ok(0)
}
