//! `agents setup --workspace-root <path> --repo-root <path>...`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use agentpolicy_sync::{RepoReport, WorkspaceReport};

use super::report;
use crate::{absolute, GlobalArgs};

/// Initialize the workspace, then apply policy to each repository root.
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Workspace root; created if absent.
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

#[derive(Serialize)]
struct SetupOutput {
    workspace: WorkspaceReport,
    repos: Vec<RepoReport>,
}

impl SetupArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let engine = super::engine(global, self.dry_run)?;
        let workspace_root = absolute(&self.workspace_root)?;

        let workspace = engine.workspace_init(&workspace_root).with_context(|| {
            format!("failed to initialize workspace '{}'", workspace_root.display())
        })?;
        if !self.json {
            report::print_workspace(&workspace, self.dry_run);
        }

        let mut repos = Vec::with_capacity(self.repo_roots.len());
        for repo_root in &self.repo_roots {
            let repo_root = absolute(repo_root)?;
            let report = engine
                .apply_repo_policy(&workspace_root, &repo_root)
                .with_context(|| format!("failed to apply policy to '{}'", repo_root.display()))?;
            if !self.json {
                report::print_repo(&report, self.dry_run);
            }
            repos.push(report);
        }

        if self.json {
            report::print_json(&SetupOutput { workspace, repos })?;
        }
        Ok(())
    }
}
