//! Token substitution.

use std::path::Path;

use chrono::{NaiveDate, Utc};

pub const WORKSPACE_ROOT_TOKEN: &str = "{{WORKSPACE_ROOT}}";
pub const DATE_TOKEN: &str = "{{DATE}}";

/// Values substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitutions {
    pub workspace_root: String,
    pub date: NaiveDate,
}

impl Substitutions {
    pub fn new(workspace_root: impl AsRef<Path>, date: NaiveDate) -> Self {
        Self {
            workspace_root: workspace_root.as_ref().display().to_string(),
            date,
        }
    }

    /// Substitutions dated with the current UTC calendar day.
    ///
    /// Call once per render; the date is not cached across calls.
    pub fn today(workspace_root: impl AsRef<Path>) -> Self {
        Self::new(workspace_root, Utc::now().date_naive())
    }
}

/// Replace every occurrence of both tokens.
pub fn render(template: &str, subs: &Substitutions) -> String {
    let date = subs.date.format("%Y-%m-%d").to_string();
    template
        .replace(WORKSPACE_ROOT_TOKEN, &subs.workspace_root)
        .replace(DATE_TOKEN, &date)
}
