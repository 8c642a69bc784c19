//! Tracking migrator: take committed local-notes files out of the index.
//!
//! Best effort throughout. A plain directory, an unreadable index or a path
//! that vanished from the index between query and removal never fails the
//! surrounding policy application.

use std::path::Path;

use serde::Serialize;

use agentpolicy_core::NOTES_GLOBS;
use agentpolicy_index::{IndexOutcome, VcsIndex};

/// A matched path that was not removed, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPath {
    pub path: String,
    pub reason: String,
}

/// Outcome of [`untrack_local_notes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MigrationReport {
    /// The root is not inside a working tree; nothing was queried.
    NotVersioned,
    /// The index query failed; nothing was changed.
    IndexUnavailable { reason: String },
    Migrated {
        untracked: Vec<String>,
        skipped: Vec<SkippedPath>,
    },
    /// Dry-run: these paths are tracked and *would* be untracked.
    WouldUntrack { paths: Vec<String> },
}

impl MigrationReport {
    /// Paths removed from the index by this run.
    pub fn untracked(&self) -> &[String] {
        match self {
            MigrationReport::Migrated { untracked, .. } => untracked,
            _ => &[],
        }
    }
}

/// Untrack every indexed path under `repo_root` matching the notes globs,
/// leaving the files on disk.
pub fn untrack_local_notes<I: VcsIndex + ?Sized>(
    index: &I,
    repo_root: &Path,
    dry_run: bool,
) -> MigrationReport {
    if !index.is_inside_work_tree(repo_root) {
        tracing::debug!("not a work tree, skipping index: {}", repo_root.display());
        return MigrationReport::NotVersioned;
    }

    let tracked = match index.list_tracked(repo_root, &NOTES_GLOBS) {
        IndexOutcome::Ok(paths) => paths,
        IndexOutcome::Unavailable { reason } => {
            tracing::warn!("index unavailable at {}: {reason}", repo_root.display());
            return MigrationReport::IndexUnavailable { reason };
        }
        IndexOutcome::PerItemMiss { .. } => Vec::new(),
    };

    if dry_run {
        for path in &tracked {
            tracing::info!("[dry-run] would untrack: {path}");
        }
        return MigrationReport::WouldUntrack { paths: tracked };
    }

    let mut untracked = Vec::new();
    let mut skipped = Vec::new();
    for path in tracked {
        match index.untrack(repo_root, &path) {
            IndexOutcome::Ok(()) => {
                tracing::info!("untracked: {path}");
                untracked.push(path);
            }
            IndexOutcome::PerItemMiss { .. } => {
                tracing::debug!("already untracked: {path}");
                skipped.push(SkippedPath {
                    path,
                    reason: "not in the index".to_string(),
                });
            }
            IndexOutcome::Unavailable { reason } => {
                tracing::warn!("could not untrack {path}: {reason}");
                skipped.push(SkippedPath { path, reason });
            }
        }
    }

    MigrationReport::Migrated { untracked, skipped }
}
