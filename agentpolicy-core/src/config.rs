//! Template locations and optional YAML configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.agents-config/
//!   config.yaml      (optional: `templates_dir: <path>`)
//!   templates/       (default template directory)
//!     repo/AGENTS.md.template
//!     repo/AGENT_NOTES.md.template
//!     global/AGENTS.md.template
//!     global/AGENT_NOTES_GLOBAL.md.template
//! ```
//!
//! # API pattern
//!
//! Home-dependent functions come in two forms:
//! - `fn_at(home: &Path, …)`: explicit home; used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, missing, PolicyError};
use crate::types::TemplateKind;

/// Environment variable overriding the configured template directory.
pub const TEMPLATES_ENV: &str = "AGENTS_CONFIG_TEMPLATES";

// ---------------------------------------------------------------------------
// TemplateSet
// ---------------------------------------------------------------------------

/// A directory holding the four template sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    dir: PathBuf,
}

impl TemplateSet {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute source path for `kind`.
    pub fn path(&self, kind: TemplateKind) -> PathBuf {
        self.dir.join(kind.source_path())
    }

    /// Fail with [`PolicyError::MissingResource`] on the first kind whose
    /// source is not a regular file.
    pub fn verify(&self, kinds: &[TemplateKind]) -> Result<(), PolicyError> {
        for kind in kinds {
            let path = self.path(*kind);
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => {
                    return Err(missing(
                        path,
                        std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
                    ))
                }
                Err(e) => return Err(missing(path, e)),
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Contents of `~/.agents-config/config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Template directory; relative values are resolved against the config dir.
    pub templates_dir: Option<PathBuf>,
}

/// `<home>/.agents-config/` (pure, no I/O).
pub fn config_dir_at(home: &Path) -> PathBuf {
    home.join(".agents-config")
}

/// `<home>/.agents-config/config.yaml` (pure, no I/O).
pub fn config_path_at(home: &Path) -> PathBuf {
    config_dir_at(home).join("config.yaml")
}

/// `<home>/.agents-config/templates` (pure, no I/O).
pub fn default_templates_dir_at(home: &Path) -> PathBuf {
    config_dir_at(home).join("templates")
}

/// Load the configuration file, returning the default when it is absent.
pub fn load_at(home: &Path) -> Result<Config, PolicyError> {
    let path = config_path_at(home);
    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(io_err(&path, e)),
    };
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| PolicyError::Config { path, source: e })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, PolicyError> {
    load_at(&home()?)
}

/// Pick the template directory: CLI flag, then environment, then config
/// file, then `<home>/.agents-config/templates`.
pub fn resolve_templates_at(
    home: &Path,
    flag: Option<&Path>,
    env: Option<&Path>,
) -> Result<TemplateSet, PolicyError> {
    if let Some(dir) = flag.or(env) {
        return Ok(TemplateSet::new(dir));
    }
    let config = load_at(home)?;
    let dir = match config.templates_dir {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => config_dir_at(home).join(dir),
        None => default_templates_dir_at(home),
    };
    Ok(TemplateSet::new(dir))
}

/// `resolve_templates_at` convenience wrapper.
pub fn resolve_templates(
    flag: Option<&Path>,
    env: Option<&Path>,
) -> Result<TemplateSet, PolicyError> {
    resolve_templates_at(&home()?, flag, env)
}

fn home() -> Result<PathBuf, PolicyError> {
    dirs::home_dir().ok_or(PolicyError::HomeNotFound)
}
