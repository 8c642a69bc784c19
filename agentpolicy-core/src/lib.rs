//! agents-config core library: policy constants, template sources, errors.
//!
//! Public API surface:
//! - [`types`]: ignore rules, notes globs and [`TemplateKind`]
//! - [`error`]: [`PolicyError`]
//! - [`config`]: [`TemplateSet`] and YAML configuration loading

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, TemplateSet};
pub use error::PolicyError;
pub use types::{DocumentKind, TemplateKind, IGNORE_FILE, NOTES_GLOBS, REQUIRED_IGNORE_RULES};
