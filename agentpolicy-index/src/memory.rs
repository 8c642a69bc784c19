//! In-memory index used by tests in place of a real repository.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::Path;

use crate::pattern::PathGlobs;
use crate::{IndexOutcome, VcsIndex};

/// One recorded call against a [`MemoryIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexCall {
    IsInsideWorkTree,
    ListTracked(Vec<String>),
    Untrack(String),
}

/// Fake index holding a single repository's tracked set.
///
/// The `root` argument of every operation is ignored; paths are stored
/// `/`-separated and relative to the repository root.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    work_tree: bool,
    query_fails: bool,
    tracked: RefCell<BTreeSet<String>>,
    calls: RefCell<Vec<IndexCall>>,
}

impl MemoryIndex {
    /// An index for a plain directory: not a work tree.
    pub fn plain() -> Self {
        Self::default()
    }

    /// A work tree tracking `paths`.
    pub fn with_tracked<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            work_tree: true,
            tracked: RefCell::new(paths.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Make `list_tracked` report the index as unavailable.
    pub fn failing_queries(mut self) -> Self {
        self.query_fails = true;
        self
    }

    /// Stage `rel`, as a user running `git add -f` would.
    pub fn track(&self, rel: impl Into<String>) {
        self.tracked.borrow_mut().insert(rel.into());
    }

    pub fn is_tracked(&self, rel: &str) -> bool {
        self.tracked.borrow().contains(rel)
    }

    pub fn tracked(&self) -> Vec<String> {
        self.tracked.borrow().iter().cloned().collect()
    }

    pub fn calls(&self) -> Vec<IndexCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: IndexCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl VcsIndex for MemoryIndex {
    fn is_inside_work_tree(&self, _root: &Path) -> bool {
        self.record(IndexCall::IsInsideWorkTree);
        self.work_tree
    }

    fn list_tracked(&self, _root: &Path, globs: &[&str]) -> IndexOutcome<Vec<String>> {
        self.record(IndexCall::ListTracked(
            globs.iter().map(|g| g.to_string()).collect(),
        ));
        if self.query_fails || !self.work_tree {
            return IndexOutcome::unavailable("index is not readable");
        }
        let patterns = match PathGlobs::new(globs) {
            Ok(p) => p,
            Err(e) => return IndexOutcome::unavailable(e.to_string()),
        };
        IndexOutcome::Ok(
            self.tracked
                .borrow()
                .iter()
                .filter(|path| patterns.matches(path))
                .cloned()
                .collect(),
        )
    }

    fn untrack(&self, _root: &Path, rel: &str) -> IndexOutcome<()> {
        self.record(IndexCall::Untrack(rel.to_string()));
        if self.tracked.borrow_mut().remove(rel) {
            IndexOutcome::Ok(())
        } else {
            IndexOutcome::PerItemMiss {
                path: rel.to_string(),
            }
        }
    }
}
