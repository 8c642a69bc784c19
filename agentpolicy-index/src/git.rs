//! Subprocess-backed index: every operation is one `git -C <root> …` call.
//!
//! | Operation             | Command                                             |
//! |-----------------------|-----------------------------------------------------|
//! | `is_inside_work_tree` | `rev-parse --is-inside-work-tree`                   |
//! | `list_tracked`        | `ls-files -z -- :(glob)<glob>…`                     |
//! | `untrack`             | `rm --cached --ignore-unmatch -- :(literal)<path>`  |
//! | `is_tracked`          | `ls-files --error-unmatch -- :(literal)<path>`      |
//!
//! `ls-files` output is filtered again through [`PathGlobs`] so results
//! agree with every other index on what a glob selects.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::pattern::{glob_pathspecs, literal_pathspec, PathGlobs};
use crate::{IndexOutcome, VcsIndex};

/// Runs the `git` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Whether the executable can be spawned at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Run `git -C <root> <args…>` and capture its output.
    pub fn run<I, S>(&self, root: &Path, args: I) -> io::Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Command::new(&self.program)
            .arg("-C")
            .arg(root)
            .args(args)
            .output()
    }

    /// Whether `rel` is currently in the index.
    pub fn is_tracked(&self, root: &Path, rel: &str) -> bool {
        let spec = literal_pathspec(rel);
        self.run(root, ["ls-files", "--error-unmatch", "--", spec.as_str()])
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("git exited with {}", output.status)
    } else {
        stderr
    }
}

impl VcsIndex for GitCli {
    fn is_inside_work_tree(&self, root: &Path) -> bool {
        match self.run(root, ["rev-parse", "--is-inside-work-tree"]) {
            Ok(output) => {
                output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "true"
            }
            Err(e) => {
                tracing::debug!("cannot run {}: {e}", self.program.display());
                false
            }
        }
    }

    fn list_tracked(&self, root: &Path, globs: &[&str]) -> IndexOutcome<Vec<String>> {
        let patterns = match PathGlobs::new(globs) {
            Ok(p) => p,
            Err(e) => return IndexOutcome::unavailable(e.to_string()),
        };
        let specs = glob_pathspecs(globs);
        let mut args = vec!["ls-files", "-z", "--"];
        args.extend(specs.iter().map(String::as_str));
        let output = match self.run(root, &args) {
            Ok(o) => o,
            Err(e) => return IndexOutcome::unavailable(e.to_string()),
        };
        if !output.status.success() {
            return IndexOutcome::unavailable(failure_reason(&output));
        }
        let paths = String::from_utf8_lossy(&output.stdout)
            .split('\0')
            .filter(|entry| !entry.is_empty() && patterns.matches(entry))
            .map(str::to_string)
            .collect();
        IndexOutcome::Ok(paths)
    }

    fn untrack(&self, root: &Path, rel: &str) -> IndexOutcome<()> {
        let spec = literal_pathspec(rel);
        let args = ["rm", "--cached", "--ignore-unmatch", "--", spec.as_str()];
        let output = match self.run(root, args) {
            Ok(o) => o,
            Err(e) => return IndexOutcome::unavailable(e.to_string()),
        };
        if !output.status.success() {
            return IndexOutcome::unavailable(failure_reason(&output));
        }
        // With --ignore-unmatch git succeeds silently when nothing matched.
        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return IndexOutcome::PerItemMiss {
                path: rel.to_string(),
            };
        }
        IndexOutcome::Ok(())
    }
}
