//! Error types for agentpolicy-core and the engine built on it.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors of a policy operation.
///
/// Version-control index problems are deliberately absent: they are values of
/// `IndexOutcome` in `agentpolicy-index` and never abort an operation.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A required template source is absent or unreadable.
    #[error("missing required template {path}: {source}")]
    MissingResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory creation, file read or file write failed.
    #[error("I/O error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration YAML could not be parsed.
    #[error("failed to parse config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Convenience constructor for [`PolicyError::Filesystem`].
pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PolicyError {
    PolicyError::Filesystem {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`PolicyError::MissingResource`].
pub fn missing(path: impl Into<PathBuf>, source: std::io::Error) -> PolicyError {
    PolicyError::MissingResource {
        path: path.into(),
        source,
    }
}
