//! Repository discovery

use std::path::{Path, PathBuf};

use super::git_command_optional;

/// Top level of the work tree containing `start`, or `start` itself when
/// git cannot tell (not a repository, git missing).
pub fn discover_repo_root(start: &Path) -> PathBuf {
    match git_command_optional(&["rev-parse", "--show-toplevel"], Some(start)) {
        Some(top) if !top.is_empty() => PathBuf::from(top),
        _ => start.to_path_buf(),
    }
}
