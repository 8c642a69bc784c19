//! # agentpolicy-index
//!
//! The version-control index as seen by the policy engine: three operations,
//! none of which can fail fatally.
//!
//! - [`VcsIndex`]: the capability trait
//! - [`GitCli`]: subprocess-backed implementation (`git -C <root> …`)
//! - [`MemoryIndex`]: in-memory fake for tests
//! - [`IndexOutcome`]: `Ok` / `Unavailable` / `PerItemMiss`
//! - [`PathGlobs`]: the shared glob semantics

pub mod git;
pub mod memory;
pub mod outcome;
pub mod pattern;

use std::path::Path;

pub use git::GitCli;
pub use memory::{IndexCall, MemoryIndex};
pub use outcome::IndexOutcome;
pub use pattern::PathGlobs;

/// Query/mutation surface of a version-control index.
pub trait VcsIndex {
    /// Whether `root` lies inside a working tree. Any failure means `false`.
    fn is_inside_work_tree(&self, root: &Path) -> bool;

    /// Tracked paths, relative to `root`, matching any of `globs`.
    fn list_tracked(&self, root: &Path, globs: &[&str]) -> IndexOutcome<Vec<String>>;

    /// Remove `rel` from the index, leaving the file on disk.
    fn untrack(&self, root: &Path, rel: &str) -> IndexOutcome<()>;
}

impl<T: VcsIndex + ?Sized> VcsIndex for &T {
    fn is_inside_work_tree(&self, root: &Path) -> bool {
        (**self).is_inside_work_tree(root)
    }

    fn list_tracked(&self, root: &Path, globs: &[&str]) -> IndexOutcome<Vec<String>> {
        (**self).list_tracked(root, globs)
    }

    fn untrack(&self, root: &Path, rel: &str) -> IndexOutcome<()> {
        (**self).untrack(root, rel)
    }
}
