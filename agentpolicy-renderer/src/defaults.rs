//! Built-in template texts, baked into the binary at compile time.

use agentpolicy_core::TemplateKind;

const REPO_AGENTS: &str = include_str!("templates/repo/AGENTS.md.template");
const REPO_NOTES: &str = include_str!("templates/repo/AGENT_NOTES.md.template");
const GLOBAL_AGENTS: &str = include_str!("templates/global/AGENTS.md.template");
const GLOBAL_NOTES: &str = include_str!("templates/global/AGENT_NOTES_GLOBAL.md.template");

/// Default source text for `kind`.
pub fn default_template(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::RepoAgents => REPO_AGENTS,
        TemplateKind::RepoNotes => REPO_NOTES,
        TemplateKind::GlobalAgents => GLOBAL_AGENTS,
        TemplateKind::GlobalNotes => GLOBAL_NOTES,
    }
}
