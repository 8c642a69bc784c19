//! Path-glob semantics every index implementation agrees on.
//!
//! A pattern matches a whole `/`-separated path relative to the repository
//! root. `*` stays within one component; a leading `**/` spans any number
//! of directories. A literal name never matches as a directory prefix, so
//! `.agentsmd` selects the file `.agentsmd` but not `.agentsmd/guide.txt`.

use glob::{MatchOptions, Pattern, PatternError};

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled set of index query globs.
#[derive(Debug, Clone)]
pub struct PathGlobs {
    patterns: Vec<Pattern>,
}

impl PathGlobs {
    pub fn new(globs: &[&str]) -> Result<Self, PatternError> {
        let patterns = globs
            .iter()
            .map(|g| Pattern::new(g))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches_with(path, OPTIONS))
    }
}

/// `globs` as git pathspecs with `glob` magic, so `*` does not cross `/`.
pub fn glob_pathspecs(globs: &[&str]) -> Vec<String> {
    globs.iter().map(|g| format!(":(glob){g}")).collect()
}

/// `path` as a git pathspec matched byte for byte.
pub fn literal_pathspec(path: &str) -> String {
    format!(":(literal){path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentpolicy_core::NOTES_GLOBS;
    use rstest::rstest;

    #[rstest]
    #[case("AGENT_NOTES_archive/README.md")]
    #[case(".agentsmd/guide.txt")]
    #[case("sub/.agentsmd/guide.txt")]
    #[case("AGENT_NOTES/x.md")]
    fn directories_named_like_notes_do_not_match(#[case] path: &str) {
        let globs = PathGlobs::new(&NOTES_GLOBS).unwrap();
        assert!(!globs.matches(path), "{path}");
    }

    #[test]
    fn pathspecs_carry_magic() {
        assert_eq!(
            glob_pathspecs(&["AGENT_NOTES*.md", "**/.agentsmd"]),
            vec![":(glob)AGENT_NOTES*.md", ":(glob)**/.agentsmd"]
        );
        assert_eq!(literal_pathspec("AGENT_NOTES[1].md"), ":(literal)AGENT_NOTES[1].md");
    }

    #[test]
    fn malformed_glob_is_rejected() {
        assert!(PathGlobs::new(&["AGENT_NOTES[.md"]).is_err());
    }
}
