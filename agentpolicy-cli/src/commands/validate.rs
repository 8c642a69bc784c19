//! `agents validate`: run the policy in a scratch workspace and check it.
//!
//! 1. `setup` twice; each required ignore rule must occur exactly once.
//! 2. Both repository documents must reference
//!    `<workspace>/AGENT_NOTES_GLOBAL.md`.
//! 3. With git available: commit `AGENTS.md`, `AGENT_NOTES.md` and
//!    `sub/AGENT_NOTES_EXTRA.md`, re-apply, and require that only
//!    `AGENTS.md` remains tracked while the notes stay on disk.

use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};

use agentpolicy_core::{TemplateKind, IGNORE_FILE, REQUIRED_IGNORE_RULES};
use agentpolicy_index::GitCli;
use agentpolicy_sync::PolicyEngine;

use crate::GlobalArgs;

pub fn run(global: &GlobalArgs) -> Result<()> {
    let templates = global.template_set()?;
    templates
        .verify(TemplateKind::all())
        .context("template directory is incomplete; run `agents templates install`")?;

    let scratch = tempfile::Builder::new()
        .prefix("agents-config-validate-")
        .tempdir()
        .context("failed to create scratch directory")?;
    let workspace_root = scratch.path().join("workspace");
    let repo_root = workspace_root.join("sample-repo");

    let git = GitCli::default();
    let engine = PolicyEngine::new(templates, git.clone());
    engine.setup(&workspace_root, &repo_root)?;
    engine.setup(&workspace_root, &repo_root)?;

    check_ignore_rules(&repo_root.join(IGNORE_FILE))?;
    check_interpolation(&workspace_root, &repo_root)?;

    if git.is_available() {
        check_detracking(&engine, &git, &workspace_root, &repo_root)?;
    } else {
        println!("git not found; skipped index checks");
    }

    println!("setup consistency checks passed");
    Ok(())
}

fn count_line(path: &Path, line: &str) -> Result<usize> {
    let content =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    Ok(content.lines().filter(|l| *l == line).count())
}

fn check_ignore_rules(ignore_file: &Path) -> Result<()> {
    for rule in REQUIRED_IGNORE_RULES {
        let n = count_line(ignore_file, rule)?;
        ensure!(n == 1, "non-idempotent {rule} entry in generated {IGNORE_FILE} ({n} copies)");
    }
    Ok(())
}

fn check_interpolation(workspace_root: &Path, repo_root: &Path) -> Result<()> {
    let expected = workspace_root.join("AGENT_NOTES_GLOBAL.md").display().to_string();
    for kind in TemplateKind::repo() {
        let path = repo_root.join(kind.output_name());
        let content = fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        ensure!(
            content.contains(&expected),
            "generated repo {} does not interpolate the workspace path",
            kind.output_name()
        );
    }
    Ok(())
}

fn git(git: &GitCli, root: &Path, args: &[&str]) -> Result<()> {
    let output = git
        .run(root, args)
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

fn check_detracking(
    engine: &PolicyEngine<GitCli>,
    cli: &GitCli,
    workspace_root: &Path,
    repo_root: &Path,
) -> Result<()> {
    let nested = repo_root.join("sub").join("AGENT_NOTES_EXTRA.md");
    fs::create_dir_all(repo_root.join("sub")).context("failed to create sub directory")?;
    fs::write(&nested, "nested note\n").context("failed to write nested note")?;

    git(cli, repo_root, &["init", "-q"])?;
    git(
        cli,
        repo_root,
        &["add", "-f", "AGENTS.md", "AGENT_NOTES.md", "sub/AGENT_NOTES_EXTRA.md"],
    )?;
    git(
        cli,
        repo_root,
        &[
            "-c",
            "user.email=validate@example.com",
            "-c",
            "user.name=validate",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "-qm",
            "seed tracked notes",
        ],
    )?;

    engine.apply_repo_policy(workspace_root, repo_root)?;

    ensure!(
        !cli.is_tracked(repo_root, "AGENT_NOTES.md"),
        "AGENT_NOTES.md should be untracked after policy application"
    );
    ensure!(
        !cli.is_tracked(repo_root, "sub/AGENT_NOTES_EXTRA.md"),
        "nested AGENT_NOTES file should be untracked after policy application"
    );
    ensure!(
        cli.is_tracked(repo_root, "AGENTS.md"),
        "AGENTS.md should remain tracked for review guidance"
    );
    ensure!(
        fs::read_to_string(&nested).context("nested note vanished")? == "nested note\n",
        "untracking changed the nested note on disk"
    );
    Ok(())
}
