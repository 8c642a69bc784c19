//! # agentpolicy-renderer
//!
//! Placeholder substitution for policy templates and the built-in default
//! template texts.
//!
//! Only two tokens are recognised, `{{WORKSPACE_ROOT}}` and `{{DATE}}`; any
//! other text (including other `{{…}}` sequences) passes through verbatim.
//!
//! ```rust
//! use agentpolicy_renderer::{render, Substitutions};
//!
//! let subs = Substitutions::today("/ws");
//! let out = render("notes: {{WORKSPACE_ROOT}}/AGENT_NOTES_GLOBAL.md", &subs);
//! assert_eq!(out, "notes: /ws/AGENT_NOTES_GLOBAL.md");
//! ```

pub mod defaults;
pub mod engine;

pub use defaults::default_template;
pub use engine::{render, Substitutions, DATE_TOKEN, WORKSPACE_ROOT_TOKEN};
