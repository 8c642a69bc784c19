//! Policy orchestrator: the two top-level operations.
//!
//! `apply_repo_policy(workspace, repo)`:
//!
//! 1. Verify the repo templates exist (fail fast).
//! 2. Ensure `repo` exists.
//! 3. Ensure `/docs/`, `AGENT_NOTES*.md`, `.agentsmd` in `repo/.gitignore`.
//! 4. Materialize `AGENTS.md` and `AGENT_NOTES.md`.
//! 5. Untrack committed local notes.
//!
//! `workspace_init(workspace)` verifies the global templates, ensures the
//! directory and materializes `AGENTS.md` and `AGENT_NOTES_GLOBAL.md`.
//!
//! Both are safe to repeat without limit; each step's effect is
//! independently idempotent, so a retry after a fatal error resumes cleanly.

use std::path::{Path, PathBuf};

use serde::Serialize;

use agentpolicy_core::error::io_err;
use agentpolicy_core::{
    DocumentKind, PolicyError, TemplateKind, TemplateSet, IGNORE_FILE, REQUIRED_IGNORE_RULES,
};
use agentpolicy_index::VcsIndex;
use agentpolicy_renderer::Substitutions;

use crate::ignore::{ensure_line, LineResult};
use crate::migrate::{untrack_local_notes, MigrationReport};
use crate::writer::{materialize, WriteResult};

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// One rendered policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentResult {
    pub template: TemplateKind,
    pub kind: DocumentKind,
    #[serde(flatten)]
    pub write: WriteResult,
}

/// Outcome of [`PolicyEngine::workspace_init`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceReport {
    pub workspace_root: PathBuf,
    /// The directory did not exist before this run.
    pub created_root: bool,
    pub documents: Vec<DocumentResult>,
}

/// Outcome of [`PolicyEngine::apply_repo_policy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoReport {
    pub workspace_root: PathBuf,
    pub repo_root: PathBuf,
    pub created_root: bool,
    pub ignore_file: PathBuf,
    pub ignore_rules: Vec<LineResult>,
    pub documents: Vec<DocumentResult>,
    pub migration: MigrationReport,
}

/// Outcome of [`PolicyEngine::setup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    pub workspace: WorkspaceReport,
    pub repo: RepoReport,
}

// ---------------------------------------------------------------------------
// PolicyEngine
// ---------------------------------------------------------------------------

/// Applies the policy using a fixed template set and index.
#[derive(Debug)]
pub struct PolicyEngine<I> {
    templates: TemplateSet,
    index: I,
    dry_run: bool,
}

impl<I: VcsIndex> PolicyEngine<I> {
    pub fn new(templates: TemplateSet, index: I) -> Self {
        Self {
            templates,
            index,
            dry_run: false,
        }
    }

    /// Report what would change without touching the filesystem or index.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Materialize the global guidance and notes into `workspace_root`.
    pub fn workspace_init(&self, workspace_root: &Path) -> Result<WorkspaceReport, PolicyError> {
        self.templates.verify(TemplateKind::global())?;
        let created_root = ensure_dir(workspace_root, self.dry_run)?;
        let documents = self.render_all(TemplateKind::global(), workspace_root, workspace_root)?;

        tracing::info!("initialized workspace policy in {}", workspace_root.display());
        Ok(WorkspaceReport {
            workspace_root: workspace_root.to_path_buf(),
            created_root,
            documents,
        })
    }

    /// Bring `repo_root` into compliance with the repository policy.
    pub fn apply_repo_policy(
        &self,
        workspace_root: &Path,
        repo_root: &Path,
    ) -> Result<RepoReport, PolicyError> {
        self.templates.verify(TemplateKind::repo())?;
        let created_root = ensure_dir(repo_root, self.dry_run)?;

        let ignore_file = repo_root.join(IGNORE_FILE);
        let ignore_rules = REQUIRED_IGNORE_RULES
            .iter()
            .map(|rule| ensure_line(&ignore_file, rule, self.dry_run))
            .collect::<Result<Vec<_>, _>>()?;

        let documents = self.render_all(TemplateKind::repo(), workspace_root, repo_root)?;
        let migration = untrack_local_notes(&self.index, repo_root, self.dry_run);

        tracing::info!("applied policy to {}", repo_root.display());
        Ok(RepoReport {
            workspace_root: workspace_root.to_path_buf(),
            repo_root: repo_root.to_path_buf(),
            created_root,
            ignore_file,
            ignore_rules,
            documents,
            migration,
        })
    }

    /// `workspace_init` followed by `apply_repo_policy`.
    pub fn setup(&self, workspace_root: &Path, repo_root: &Path) -> Result<SetupReport, PolicyError> {
        let workspace = self.workspace_init(workspace_root)?;
        let repo = self.apply_repo_policy(workspace_root, repo_root)?;
        Ok(SetupReport { workspace, repo })
    }

    fn render_all(
        &self,
        kinds: &[TemplateKind],
        workspace_root: &Path,
        target_root: &Path,
    ) -> Result<Vec<DocumentResult>, PolicyError> {
        let mut documents = Vec::with_capacity(kinds.len());
        for kind in kinds {
            // Fresh date per render.
            let subs = Substitutions::today(workspace_root);
            let write = materialize(
                &self.templates.path(*kind),
                &target_root.join(kind.output_name()),
                &subs,
                self.dry_run,
            )?;
            documents.push(DocumentResult {
                template: *kind,
                kind: kind.document_kind(),
                write,
            });
        }
        Ok(documents)
    }
}

/// Create `dir` (and parents) if absent. Returns whether it was absent.
fn ensure_dir(dir: &Path, dry_run: bool) -> Result<bool, PolicyError> {
    if dir.is_dir() {
        return Ok(false);
    }
    if dry_run {
        tracing::info!("[dry-run] would create directory {}", dir.display());
        return Ok(true);
    }
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    tracing::info!("created directory {}", dir.display());
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
