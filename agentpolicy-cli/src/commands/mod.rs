pub mod apply;
pub mod report;
pub mod setup;
pub mod templates;
pub mod validate;
pub mod workspace;

use anyhow::Result;

use agentpolicy_index::GitCli;
use agentpolicy_sync::PolicyEngine;

use crate::GlobalArgs;

/// Engine over the resolved templates and the real git index.
pub(crate) fn engine(global: &GlobalArgs, dry_run: bool) -> Result<PolicyEngine<GitCli>> {
    let templates = global.template_set()?;
    tracing::debug!("using templates in {}", templates.dir().display());
    Ok(PolicyEngine::new(templates, GitCli::default()).dry_run(dry_run))
}
