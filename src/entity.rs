//! The seven tracked entity kinds and their fixed storage metadata.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum EntityKind {
    Asset,
    Sequence,
    Shot,
    Task,
    Version,
    Note,
    PublishedFile,
}

impl EntityKind {
    /// Every kind in generation order. Artifacts list entities in this order.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Asset,
        EntityKind::Sequence,
        EntityKind::Shot,
        EntityKind::Task,
        EntityKind::Version,
        EntityKind::Note,
        EntityKind::PublishedFile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Asset => "asset",
            EntityKind::Sequence => "sequence",
            EntityKind::Shot => "shot",
            EntityKind::Task => "task",
            EntityKind::Version => "version",
            EntityKind::Note => "note",
            EntityKind::PublishedFile => "published_file",
        }
    }

    /// Source CSV file name under the CSV directory.
    pub fn csv_file(&self) -> &'static str {
        match self {
            EntityKind::Asset => "asset.csv",
            EntityKind::Sequence => "sequence.csv",
            EntityKind::Shot => "shots.csv",
            EntityKind::Task => "task.csv",
            EntityKind::Version => "version.csv",
            EntityKind::Note => "note.csv",
            EntityKind::PublishedFile => "publishfile.csv",
        }
    }

    /// Storage table in the `public` schema.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Asset => "assets",
            EntityKind::Sequence => "sequences",
            EntityKind::Shot => "shots",
            EntityKind::Task => "tasks",
            EntityKind::Version => "versions",
            EntityKind::Note => "notes",
            EntityKind::PublishedFile => "published_files",
        }
    }

    /// Maps a UI route segment such as `published-files` to its entity kind.
    pub fn from_route_token(token: &str) -> Option<EntityKind> {
        match token {
            "assets" => Some(EntityKind::Asset),
            "shots" => Some(EntityKind::Shot),
            "sequences" => Some(EntityKind::Sequence),
            "tasks" => Some(EntityKind::Task),
            "versions" => Some(EntityKind::Version),
            "publishes" | "published-files" => Some(EntityKind::PublishedFile),
            "notes" => Some(EntityKind::Note),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
