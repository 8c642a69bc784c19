//! Human-readable summaries and JSON output for engine reports.
//!
//! ```text
//! ✓ Applied policy to /code/ws/api
//!   .gitignore
//!     +  /docs/
//!     ·  AGENT_NOTES*.md
//!   documents
//!     ✎  /code/ws/api/AGENTS.md (tracked)
//!     ·  /code/ws/api/AGENT_NOTES.md (untracked)
//!   index
//!     −  AGENT_NOTES.md
//! ```

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use agentpolicy_sync::{
    DocumentResult, LineResult, MigrationReport, RepoReport, WorkspaceReport, WriteResult,
};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}

fn prefix(dry_run: bool) -> &'static str {
    if dry_run {
        "[dry-run] "
    } else {
        ""
    }
}

pub fn print_workspace(report: &WorkspaceReport, dry_run: bool) {
    println!(
        "{}{} Initialized workspace policy in {}",
        prefix(dry_run),
        "✓".green(),
        report.workspace_root.display()
    );
    print_documents(&report.documents);
}

pub fn print_repo(report: &RepoReport, dry_run: bool) {
    println!(
        "{}{} Applied policy to {}",
        prefix(dry_run),
        "✓".green(),
        report.repo_root.display()
    );

    println!("  {}", report.ignore_file.display());
    for rule in &report.ignore_rules {
        match rule {
            LineResult::Appended { line } => println!("    {}  {line}", "+".green()),
            LineResult::WouldAppend { line } => println!("    {}  {line}", "~".yellow()),
            LineResult::Present { line } => println!("    {}  {line}", "·".dimmed()),
        }
    }

    print_documents(&report.documents);

    println!("  index");
    match &report.migration {
        MigrationReport::NotVersioned => {
            println!("    {}", "not a git work tree; nothing to untrack".dimmed())
        }
        MigrationReport::IndexUnavailable { reason } => {
            println!("    {}  index unavailable: {reason}", "!".yellow())
        }
        MigrationReport::WouldUntrack { paths } if paths.is_empty() => {
            println!("    {}", "no tracked local notes".dimmed())
        }
        MigrationReport::WouldUntrack { paths } => {
            for path in paths {
                println!("    {}  {path}", "~".yellow());
            }
        }
        MigrationReport::Migrated { untracked, skipped } => {
            if untracked.is_empty() && skipped.is_empty() {
                println!("    {}", "no tracked local notes".dimmed());
            }
            for path in untracked {
                println!("    {}  {path}", "−".red());
            }
            for s in skipped {
                println!("    {}  {} ({})", "!".yellow(), s.path, s.reason);
            }
        }
    }
}

fn print_documents(documents: &[DocumentResult]) {
    println!("  documents");
    for doc in documents {
        let marker = match doc.write {
            WriteResult::Written { .. } => "✎".green(),
            WriteResult::WouldWrite { .. } => "~".yellow(),
            WriteResult::Existing { .. } => "·".dimmed(),
        };
        println!(
            "    {marker}  {} ({})",
            doc.write.path().display(),
            doc.kind
        );
    }
}
