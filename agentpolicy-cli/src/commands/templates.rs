//! `agents templates install [--dry-run]`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use agentpolicy_sync::{install_defaults, WriteResult};

use crate::GlobalArgs;

/// Manage the template directory.
#[derive(Subcommand, Debug)]
pub enum TemplatesCommand {
    /// Write the built-in templates; existing template files are kept.
    Install(InstallArgs),

    /// Print the resolved template directory.
    Path,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Show what would be written without writing.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(cmd: TemplatesCommand, global: &GlobalArgs) -> Result<()> {
    let set = global.template_set()?;
    match cmd {
        TemplatesCommand::Path => {
            println!("{}", set.dir().display());
            Ok(())
        }
        TemplatesCommand::Install(args) => {
            let results = install_defaults(&set, args.dry_run).with_context(|| {
                format!("failed to install templates into '{}'", set.dir().display())
            })?;
            let prefix = if args.dry_run { "[dry-run] " } else { "" };
            println!("{prefix}✓ Templates in {}", set.dir().display());
            for r in &results {
                match r {
                    WriteResult::Written { path } => println!("  ✎  {}", path.display()),
                    WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
                    WriteResult::Existing { path } => println!("  ·  {}", path.display()),
                }
            }
            Ok(())
        }
    }
}
