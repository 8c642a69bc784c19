//! # agentpolicy-sync
//!
//! The policy-reconciliation engine.
//!
//! - [`writer`]: materialize a template once, atomically
//! - [`ignore`]: append an ignore rule unless already present
//! - [`migrate`]: untrack committed local-notes files, keep them on disk
//! - [`pipeline`]: [`PolicyEngine`]: workspace init and repository policy
//!
//! Every primitive is idempotent, so re-running an operation after a failure
//! resumes where the previous run stopped.

pub mod ignore;
pub mod migrate;
pub mod pipeline;
pub mod writer;

pub use ignore::{ensure_line, LineResult};
pub use migrate::{untrack_local_notes, MigrationReport, SkippedPath};
pub use pipeline::{DocumentResult, PolicyEngine, RepoReport, SetupReport, WorkspaceReport};
pub use writer::{install_defaults, materialize, WriteResult};
