//! Policy vocabulary shared by every crate.
//!
//! | Template kind | Source (under the template dir)          | Output name             |
//! |---------------|------------------------------------------|-------------------------|
//! | RepoAgents    | `repo/AGENTS.md.template`                | `AGENTS.md`             |
//! | RepoNotes     | `repo/AGENT_NOTES.md.template`           | `AGENT_NOTES.md`        |
//! | GlobalAgents  | `global/AGENTS.md.template`              | `AGENTS.md`             |
//! | GlobalNotes   | `global/AGENT_NOTES_GLOBAL.md.template`  | `AGENT_NOTES_GLOBAL.md` |

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Ignore file maintained at every repository root.
pub const IGNORE_FILE: &str = ".gitignore";

/// Rules enforced in the ignore file, in application order.
pub const REQUIRED_IGNORE_RULES: [&str; 3] = ["/docs/", "AGENT_NOTES*.md", ".agentsmd"];

/// Index query patterns selecting local-notes files at any depth.
pub const NOTES_GLOBS: [&str; 4] = [
    "AGENT_NOTES*.md",
    "**/AGENT_NOTES*.md",
    ".agentsmd",
    "**/.agentsmd",
];

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// Whether a generated document belongs in version control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Review guidance; stays tracked.
    TrackedGuidance,
    /// Local notes; removed from the index if ever committed.
    UntrackedNotes,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentKind::TrackedGuidance => "tracked",
            DocumentKind::UntrackedNotes => "untracked",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// TemplateKind
// ---------------------------------------------------------------------------

/// The four template sources a policy is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    RepoAgents,
    RepoNotes,
    GlobalAgents,
    GlobalNotes,
}

impl TemplateKind {
    /// All kinds in a stable order.
    pub fn all() -> &'static [TemplateKind] {
        &[
            TemplateKind::RepoAgents,
            TemplateKind::RepoNotes,
            TemplateKind::GlobalAgents,
            TemplateKind::GlobalNotes,
        ]
    }

    /// Templates rendered into a repository root.
    pub fn repo() -> &'static [TemplateKind] {
        &[TemplateKind::RepoAgents, TemplateKind::RepoNotes]
    }

    /// Templates rendered into the workspace root.
    pub fn global() -> &'static [TemplateKind] {
        &[TemplateKind::GlobalAgents, TemplateKind::GlobalNotes]
    }

    /// Source location relative to a template directory.
    pub fn source_path(&self) -> PathBuf {
        let (scope, file) = match self {
            TemplateKind::RepoAgents => ("repo", "AGENTS.md.template"),
            TemplateKind::RepoNotes => ("repo", "AGENT_NOTES.md.template"),
            TemplateKind::GlobalAgents => ("global", "AGENTS.md.template"),
            TemplateKind::GlobalNotes => ("global", "AGENT_NOTES_GLOBAL.md.template"),
        };
        Path::new(scope).join(file)
    }

    /// File name of the rendered document.
    pub fn output_name(&self) -> &'static str {
        match self {
            TemplateKind::RepoAgents | TemplateKind::GlobalAgents => "AGENTS.md",
            TemplateKind::RepoNotes => "AGENT_NOTES.md",
            TemplateKind::GlobalNotes => "AGENT_NOTES_GLOBAL.md",
        }
    }

    pub fn document_kind(&self) -> DocumentKind {
        match self {
            TemplateKind::RepoAgents | TemplateKind::GlobalAgents => DocumentKind::TrackedGuidance,
            TemplateKind::RepoNotes | TemplateKind::GlobalNotes => DocumentKind::UntrackedNotes,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_path().display())
    }
}
