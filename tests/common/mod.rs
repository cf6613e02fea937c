#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

pub const CSV_DIR: &str = "images/schema";
pub const PAGES_ROOT: &str = "echo/src/app/(dashboard)/apex/[projectId]";

pub const ASSET_CSV: &str = "\
Field Name,Data Type,Field Type
Asset Name,text,permanent
Id,number,permanent
Project,entity,permanent
Sequence,entity,custom
Shot,entity,custom
Keep,checkbox,custom
Tags,multi_entity,permanent
Created by,entity,permanent
Date Created,date_time,permanent
";

pub const SEQUENCE_CSV: &str = "\
Field Name,Data Type,Field Type
Sequence Name,text,permanent
Id,number,permanent
Open Notes Count,summary,custom
Description,text,permanent
";

// deliberately lacks "Shot Name"
pub const SHOTS_CSV: &str = "\
Field Name,Data Type,Field Type
Id,number,permanent
Shot Code,text,permanent
Sequence,entity,permanent
Cut In,number,custom
Cut Summary,summary,custom
Status,status_list,permanent
";

pub const TASK_CSV: &str = "\
Field Name,Data Type,Field Type
Task Name,text,permanent
Link,entity,permanent
Notes,multi_entity,permanent
Notes,text,custom
Assigned To,multi_entity,permanent
Checkbox Field,checkbox,permanent
Milestone,checkbox,custom

Short Row
\"Bid, Days\",float,custom
Task Name,text,permanent
";

pub const VERSION_CSV: &str = "\
Field Name,Data Type,Field Type
Version Name,text,permanent
Artist,entity,permanent
Date Viewed,date_time,custom
Frame Count,number,custom
Sg Data,serializable,custom
";

pub const NOTE_CSV: &str = "\
Field Name,Data Type,Field Type
Subject,text,permanent
Body,text,permanent
Author,entity,permanent
Links,multi_entity,permanent
";

pub const PUBLISHFILE_CSV: &str = "\
Field Name,Data Type,Field Type
Published File Name,text,permanent
Link,entity,permanent
Created by,entity,permanent
Path,url,permanent
Version Number,number,permanent
";

pub const EXPORTS: &[(&str, &str)] = &[
    ("asset.csv", ASSET_CSV),
    ("sequence.csv", SEQUENCE_CSV),
    ("shots.csv", SHOTS_CSV),
    ("task.csv", TASK_CSV),
    ("version.csv", VERSION_CSV),
    ("note.csv", NOTE_CSV),
    ("publishfile.csv", PUBLISHFILE_CSV),
];

/// Scratch project root that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates an empty project root.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Creates a project root holding all seven field exports.
    pub fn with_exports() -> Self {
        let workspace = Self::new();
        for (name, contents) in EXPORTS {
            workspace.write(&format!("{CSV_DIR}/{name}"), contents);
        }
        workspace
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn csv_dir(&self) -> PathBuf {
        self.path().join(CSV_DIR)
    }

    /// Writes `contents` under the workspace, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    /// Writes a page under the default pages root.
    pub fn write_page(&self, route: &str, contents: &str) -> PathBuf {
        self.write(&format!("{PAGES_ROOT}/{route}/page.tsx"), contents)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).expect("read workspace file")
    }
}

/// A page declaring a hardcoded column list with the given ids.
pub fn page_with_columns(ids: &[&str]) -> String {
    let mut source = String::from("export default function Page() {\n  const columns = [\n");
    for id in ids {
        source.push_str(&format!(
            "    {{ id: '{id}', label: '{id}', type: 'text' as const }},\n"
        ));
    }
    source.push_str("  ]\n  return null\n}\n");
    source
}
