//! Git diff retrieval

use std::path::Path;

use super::git_command_raw;
use crate::error::Result;

/// Which changes a diff query covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffScope {
    /// Index vs HEAD (`--cached`)
    Staged,
    /// Working tree vs index
    Unstaged,
    /// Changes on HEAD since it forked from `REF` (`REF...HEAD`)
    Base(String),
}

impl DiffScope {
    /// Scope-specific arguments appended to the narrow diff invocation
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Staged => vec!["--cached".to_string()],
            Self::Unstaged => Vec::new(),
            Self::Base(base) => vec![format!("{}...HEAD", base)],
        }
    }

    /// Get a human-readable description
    pub fn as_str(&self) -> &str {
        match self {
            Self::Staged => "staged",
            Self::Unstaged => "unstaged",
            Self::Base(base) => base,
        }
    }
}

/// Fixed flags for a narrow, unambiguous diff: no colour, no external diff
/// driver, no `a/`/`b/` prefixes, zero context lines.
const NARROW_DIFF_ARGS: [&str; 5] = ["diff", "--no-color", "--no-ext-diff", "--no-prefix", "-U0"];

/// Get the narrow unified diff for `scope`
pub fn get_diff(scope: &DiffScope, cwd: &Path) -> Result<String> {
    let scope_args = scope.args();
    let mut args: Vec<&str> = NARROW_DIFF_ARGS.to_vec();
    args.extend(scope_args.iter().map(String::as_str));

    git_command_raw(&args, Some(cwd))
}
