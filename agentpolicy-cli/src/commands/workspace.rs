//! `agents workspace-init --workspace-root <path>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::report;
use crate::{absolute, GlobalArgs};

/// Create the workspace-level policy documents.
#[derive(Args, Debug)]
pub struct WorkspaceInitArgs {
    /// Workspace root; created if absent.
    #[arg(long, value_name = "PATH")]
    pub workspace_root: PathBuf,

    /// Show what would change without writing files.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

impl WorkspaceInitArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let engine = super::engine(global, self.dry_run)?;
        let workspace_root = absolute(&self.workspace_root)?;
        let report = engine.workspace_init(&workspace_root).with_context(|| {
            format!("failed to initialize workspace '{}'", workspace_root.display())
        })?;

        if self.json {
            report::print_json(&report)
        } else {
            report::print_workspace(&report, self.dry_run);
            Ok(())
        }
    }
}
