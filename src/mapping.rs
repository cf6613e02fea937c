//! Display-name to column mappings.
//!
//! Entity maps take precedence over [`COMMON_FIELDS`]; names in neither fall
//! back to their slug. Polymorphic `Link` fields stay virtual because the
//! existing `entity_type`/`entity_id` pair already stores them.

use crate::entity::EntityKind;

pub const COMMON_FIELDS: &[(&str, &str)] = &[
    ("Id", "id"),
    ("Project", "project_id"),
    ("Date Created", "created_at"),
    ("Date Updated", "updated_at"),
    ("Created by", "created_by"),
    ("Updated by", "updated_by"),
    ("Description", "description"),
    ("Status", "status"),
    ("Cached Display Name", "cached_display_name"),
    ("Thumbnail", "thumbnail_url"),
    ("Filmstrip Thumbnail", "filmstrip_thumbnail_url"),
    ("Thumbnail Blur Hash", "thumbnail_blur_hash"),
    ("Ayon ID", "ayon_id"),
    ("Ayon Sync Status", "ayon_sync_status"),
];

const ASSET_FIELDS: &[(&str, &str)] = &[
    ("Asset Name", "name"),
    ("Type", "asset_type"),
    ("Sequence", "sequence_id"),
    ("Shot", "shot_id"),
    ("Client Name", "client_name"),
    ("DD Client Name", "dd_client_name"),
    ("Keep", "keep"),
    ("Outsource", "outsource"),
    ("Tags", "tags"),
    ("Vendor Groups", "vendor_groups"),
    ("Sub Assets", "sub_assets"),
    ("Parent Assets", "parent_assets"),
    ("Sequences", "sequences"),
    ("Shots", "shots"),
    ("Task Template", "task_template"),
    ("Published File <-> Link", "published_file_links"),
];

const SEQUENCE_FIELDS: &[(&str, &str)] = &[
    ("Sequence Name", "name"),
    ("Type", "sequence_type"),
    ("Client Name", "client_name"),
    ("DD Client Name", "dd_client_name"),
    ("Cc", "cc"),
    ("Tags", "tags"),
    ("Shots", "shots"),
    ("Assets", "assets"),
    ("Plates", "plates"),
    ("Cuts", "cuts"),
    ("Open Notes Count", "open_notes_count"),
    ("Task Template", "task_template"),
    ("Published File <-> Link", "published_file_links"),
];

const SHOT_FIELDS: &[(&str, &str)] = &[
    ("Shot Name", "name"),
    ("Shot Code", "code"),
    ("Sequence", "sequence_id"),
    ("Type", "shot_type"),
    ("Client Name", "client_name"),
    ("DD Client Name", "dd_client_name"),
    ("Cc", "cc"),
    ("Comp Note", "comp_note"),
    ("Cut In", "cut_in"),
    ("Cut Out", "cut_out"),
    ("Cut Duration", "cut_duration"),
    ("Cut Order", "cut_order"),
    ("Cut Summary", "cut_summary"),
    ("Duration Summary", "duration_summary"),
    ("DD Location", "dd_location"),
    ("Delivery Date", "delivery_date"),
    ("Head Duration", "head_duration"),
    ("Head In", "head_in"),
    ("Head Out", "head_out"),
    ("Tail In", "tail_in"),
    ("Tail Out", "tail_out"),
    ("Working Duration", "working_duration"),
    ("Next Review", "next_review"),
    ("Open Notes", "open_notes"),
    ("Open Notes Count", "open_notes_count"),
    ("Parent Shots", "parent_shots"),
    ("Plates", "plates"),
    ("Seq Shot", "seq_shot"),
    ("Shot Notes", "shot_notes"),
    ("Sub Shots", "sub_shots"),
    ("Target Date", "target_date"),
    ("Task Template", "task_template"),
    ("Vendor Groups", "vendor_groups"),
    ("Assets", "assets"),
    ("Tags", "tags"),
    ("Published File <-> Link", "published_file_links"),
];

const TASK_FIELDS: &[(&str, &str)] = &[
    ("Task Name", "name"),
    ("Assigned To", "assigned_to"),
    ("Pipeline Step", "step_id"),
    ("Priority", "priority"),
    ("Due Date", "due_date"),
    ("Start Date", "start_date"),
    ("End Date", "end_date"),
    ("Duration", "duration"),
    ("Bid", "bid"),
    ("Bid Breakdown", "bid_breakdown"),
    ("Buffer Days", "buffer_days"),
    ("Buffer Days2", "buffer_days2"),
    ("Casting", "casting"),
    ("Cc", "cc"),
    ("DDNA Bid", "ddna_bid"),
    ("DDNA ID#", "ddna_id"),
    ("DDNA TO#", "ddna_to"),
    ("Dependency Violation", "dependency_violation"),
    ("Downstream Dependency", "downstream_dependency"),
    ("Gantt Bar Color", "gantt_bar_color"),
    ("Inventory Date", "inventory_date"),
    ("Milestone", "milestone"),
    ("Prod Comments", "prod_comments"),
    ("Proposed Start Date", "proposed_start_date"),
    ("Publish Version Number", "publish_version_number"),
    ("Reviewer", "reviewer"),
    ("Tags", "tags"),
    ("Task Complexity", "task_complexity"),
    ("Task Template", "task_template"),
    ("Thumbnail", "thumbnail_url"),
    ("Versions", "versions"),
    ("Workload Assignee Count", "workload_assignee_count"),
];

const VERSION_FIELDS: &[(&str, &str)] = &[
    ("Version Name", "code"),
    ("Version Number", "version_number"),
    ("Client Approved", "client_approved"),
    ("Client Approved At", "client_approved_at"),
    ("Client Approved by", "client_approved_by"),
    ("Client Version Name", "client_version_name"),
    ("Date Viewed", "date_viewed"),
    ("Department", "department"),
    ("Editorial QC", "editorial_qc"),
    ("Flagged", "flagged"),
    ("Movie Aspect Ratio", "movie_aspect_ratio"),
    ("Movie Has Slate", "movie_has_slate"),
    ("Nuke script", "nuke_script"),
    ("Playlists", "playlists"),
    ("Published Files", "published_files"),
    ("Send EXRs", "send_exrs"),
    ("Source Clip", "source_clip"),
    ("Tags", "tags"),
    ("Task Template", "task_template"),
    ("Type", "version_type"),
    ("Uploaded Movie", "uploaded_movie"),
    ("Viewed/Unviewed", "viewed_status"),
    ("Cuts", "cuts"),
    ("Path to Frames", "frames_path"),
    ("Path to Movie", "movie_url"),
    ("First Frame", "first_frame"),
    ("Last Frame", "last_frame"),
    ("Frame Count", "frame_count"),
    ("Frame Range", "frame_range"),
    ("Artist", "artist_id"),
    ("Task", "task_id"),
];

const NOTE_FIELDS: &[(&str, &str)] = &[
    ("Subject", "subject"),
    ("Body", "content"),
    ("Author", "author_id"),
    ("Status", "status"),
    ("Type", "note_type"),
    ("Client Approved", "client_approved"),
    ("Client Note", "client_note"),
    ("Suppress Email Notification", "suppress_email_notification"),
];

const PUBLISHED_FILE_FIELDS: &[(&str, &str)] = &[
    ("Published File Name", "code"),
    ("Name", "name"),
    ("Path", "file_path"),
    ("Published File Type", "file_type"),
    ("Version Number", "version_number"),
    ("Task", "task_id"),
    ("Version", "version_id"),
    ("Client Version", "client_version"),
    ("Downstream Published Files", "downstream_published_files"),
    ("Upstream Published Files", "upstream_published_files"),
    ("Tags", "tags"),
    ("Element", "element"),
    ("Output", "output"),
    ("Path Cache", "path_cache"),
    ("Path Cache Storage", "path_cache_storage"),
    ("Path to Source", "path_to_source"),
    ("Submission Notes", "submission_notes"),
    ("Snapshot ID", "snapshot_id"),
    ("Snapshot Type", "snapshot_type"),
    ("Target Name", "target_name"),
    // published_files stores its creator as published_by
    ("Created by", "published_by"),
];

pub fn entity_fields(kind: EntityKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        EntityKind::Asset => ASSET_FIELDS,
        EntityKind::Sequence => SEQUENCE_FIELDS,
        EntityKind::Shot => SHOT_FIELDS,
        EntityKind::Task => TASK_FIELDS,
        EntityKind::Version => VERSION_FIELDS,
        EntityKind::Note => NOTE_FIELDS,
        EntityKind::PublishedFile => PUBLISHED_FILE_FIELDS,
    }
}

/// Display names stored through the polymorphic `entity_type`/`entity_id` pair.
pub fn virtual_fields(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Task | EntityKind::PublishedFile => &["Link"],
        _ => &[],
    }
}

pub fn is_virtual(kind: EntityKind, name: &str) -> bool {
    virtual_fields(kind).contains(&name)
}

fn lookup(table: &'static [(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(display, _)| *display == name)
        .map(|(_, column)| *column)
}

/// Explicitly mapped column for `name`, if any. `None` means the caller
/// should fall back to the slug.
pub fn mapped_column(kind: EntityKind, name: &str, data_type: &str) -> Option<&'static str> {
    // task.csv declares "Notes" twice: free text and a multi-entity link list
    if kind == EntityKind::Task && name == "Notes" {
        return if data_type.trim().eq_ignore_ascii_case("text") {
            Some("notes")
        } else {
            Some("notes_links")
        };
    }
    lookup(entity_fields(kind), name).or_else(|| lookup(COMMON_FIELDS, name))
}
