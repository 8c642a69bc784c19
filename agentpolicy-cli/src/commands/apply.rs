//! `agents apply --workspace-root <path> --repo-root <path>...`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::report;
use crate::{absolute, GlobalArgs};

/// Apply repository policy to one or more repository roots.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Workspace root holding the global AGENTS.md and AGENT_NOTES_GLOBAL.md.
    #[arg(long, value_name = "PATH")]
    pub workspace_root: PathBuf,

    /// Repository root to bring into compliance; repeat for several.
    #[arg(long = "repo-root", value_name = "PATH", required = true)]
    pub repo_roots: Vec<PathBuf>,

    /// Show what would change without writing files or touching the index.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the reports as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

impl ApplyArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let engine = super::engine(global, self.dry_run)?;
        let workspace_root = absolute(&self.workspace_root)?;

        let mut reports = Vec::with_capacity(self.repo_roots.len());
        for repo_root in &self.repo_roots {
            let repo_root = absolute(repo_root)?;
            let report = engine
                .apply_repo_policy(&workspace_root, &repo_root)
                .with_context(|| format!("failed to apply policy to '{}'", repo_root.display()))?;
            if !self.json {
                report::print_repo(&report, self.dry_run);
            }
            reports.push(report);
        }

        if self.json {
            report::print_json(&reports)?;
        }
        Ok(())
    }
}
