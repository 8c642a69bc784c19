//! agents-config: keep agent guidance and local notes policy in sync.
//!
//! # Usage
//!
//! ```text
//! agents setup --workspace-root <path> --repo-root <path>... [--dry-run] [--json]
//! agents workspace-init --workspace-root <path> [--dry-run] [--json]
//! agents apply --workspace-root <path> --repo-root <path>... [--dry-run] [--json]
//! agents templates install [--dry-run]
//! agents validate
//! ```
//!
//! `AGENTS.md` stays tracked; `AGENT_NOTES*.md` and `.agentsmd` are ignored
//! and untracked.

mod commands;

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use agentpolicy_core::{config, TemplateSet};
use commands::{
    apply::ApplyArgs, setup::SetupArgs, templates::TemplatesCommand, workspace::WorkspaceInitArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "agents",
    version,
    about = "Apply agent guidance and local-notes policy to a workspace and its repositories",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options accepted by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Template directory (overrides $AGENTS_CONFIG_TEMPLATES and config.yaml).
    #[arg(long, global = true, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug). RUST_LOG wins when set.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Resolve the template directory: flag, environment, config file, default.
    pub fn template_set(&self) -> Result<TemplateSet> {
        let flag = self.templates.as_deref().map(absolute).transpose()?;
        let env = std::env::var_os(config::TEMPLATES_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .map(|p| absolute(&p))
            .transpose()?;
        config::resolve_templates(flag.as_deref(), env.as_deref())
            .context("failed to resolve template directory")
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize the workspace, then apply repository policy.
    Setup(SetupArgs),

    /// Create the workspace-level AGENTS.md and AGENT_NOTES_GLOBAL.md.
    WorkspaceInit(WorkspaceInitArgs),

    /// Apply repository policy: .gitignore rules, documents, untracking.
    Apply(ApplyArgs),

    /// Manage the template directory.
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },

    /// Run the policy end to end in a scratch workspace and check the result.
    Validate,
}

/// Make `path` absolute against the current directory without requiring it
/// to exist. `.` and `..` are resolved lexically; symlinks are not followed.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Ok(normalize(&cwd.join(path)))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            // `..` at the root stays at the root.
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    match cli.command {
        Commands::Setup(args) => args.run(&cli.global),
        Commands::WorkspaceInit(args) => args.run(&cli.global),
        Commands::Apply(args) => args.run(&cli.global),
        Commands::Templates { command } => commands::templates::run(command, &cli.global),
        Commands::Validate => commands::validate::run(&cli.global),
    }
}
