//! Result type for best-effort index operations.

/// Outcome of an index operation.
///
/// None of the variants is an error in the `Result` sense: callers degrade
/// on `Unavailable` and continue past `PerItemMiss`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome<T> {
    Ok(T),
    /// The index could not be queried or mutated.
    Unavailable { reason: String },
    /// The targeted path was not in the index (already removed, never added).
    PerItemMiss { path: String },
}

impl<T> IndexOutcome<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        IndexOutcome::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, IndexOutcome::Ok(_))
    }

    /// The success value, discarding degraded outcomes.
    pub fn ok(self) -> Option<T> {
        match self {
            IndexOutcome::Ok(v) => Some(v),
            _ => None,
        }
    }
}
