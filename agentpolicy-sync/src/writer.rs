//! Template materializer.
//!
//! ## `materialize` protocol
//!
//! 1. Target exists (file, directory, even a dangling symlink) → `Existing`.
//! 2. Read the template; failure is `MissingResource`.
//! 3. Substitute `{{WORKSPACE_ROOT}}` and `{{DATE}}`.
//! 4. Write to a uniquely named temp file in the target's directory,
//!    created with the mode a plain new file would get (0666 minus umask).
//! 5. Publish with a no-clobber link; losing a race to another writer
//!    yields `Existing` and leaves the winner's content alone.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use agentpolicy_core::error::{io_err, missing};
use agentpolicy_core::{PolicyError, TemplateKind, TemplateSet};
use agentpolicy_renderer::{default_template, render, Substitutions};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual file materialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WriteResult {
    /// File did not exist and was created.
    Written { path: PathBuf },
    /// File already existed; its content was left untouched.
    Existing { path: PathBuf },
    /// Dry-run: the file *would* have been created.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Existing { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// materialize
// ---------------------------------------------------------------------------

fn occupied(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Render `template` into `output` unless `output` already exists.
pub fn materialize(
    template: &Path,
    output: &Path,
    subs: &Substitutions,
    dry_run: bool,
) -> Result<WriteResult, PolicyError> {
    if occupied(output) {
        tracing::debug!("exists, left as is: {}", output.display());
        return Ok(WriteResult::Existing {
            path: output.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(template).map_err(|e| missing(template, e))?;
    let content = render(&text, subs);

    if dry_run {
        tracing::info!("[dry-run] would write: {}", output.display());
        return Ok(WriteResult::WouldWrite {
            path: output.to_path_buf(),
        });
    }

    write_new(output, &content)
}

/// Atomically create `path` with `content`; never replaces an existing file.
pub(crate) fn write_new(path: &Path, content: &str) -> Result<WriteResult, PolicyError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".agentpolicy-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Requested at creation, so the umask applies as for any new file.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(|e| io_err(dir, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|e| io_err(tmp.path().to_path_buf(), e))?;

    match tmp.persist_noclobber(path) {
        Ok(_) => {
            tracing::info!("wrote: {}", path.display());
            Ok(WriteResult::Written {
                path: path.to_path_buf(),
            })
        }
        // The temp file is removed when the error (and the file it owns) drops.
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
            tracing::debug!("created concurrently, left as is: {}", path.display());
            Ok(WriteResult::Existing {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(io_err(path, e.error)),
    }
}

// ---------------------------------------------------------------------------
// install_defaults
// ---------------------------------------------------------------------------

/// Write the built-in templates into `set`'s directory, keeping any source
/// that is already there.
pub fn install_defaults(set: &TemplateSet, dry_run: bool) -> Result<Vec<WriteResult>, PolicyError> {
    let mut results = Vec::new();
    for kind in TemplateKind::all() {
        let path = set.path(*kind);
        if occupied(&path) {
            results.push(WriteResult::Existing { path });
            continue;
        }
        if dry_run {
            results.push(WriteResult::WouldWrite { path });
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        results.push(write_new(&path, default_template(*kind))?);
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
