//! Git operations for the scan sources
//!
//! All history and working-tree queries go through the [`Vcs`] trait so the
//! source adapters can be exercised against a stub. [`Git`] is the real
//! implementation; it shells out to the `git` binary for maximum
//! compatibility.

mod commit;
mod diff;
mod files;
mod repo;

pub use diff::DiffScope;
pub use repo::discover_repo_root;

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, ScanError};

/// The version-control queries the scanner needs.
pub trait Vcs {
    /// Repository root that relative paths are resolved against
    fn root(&self) -> &Path;

    /// Unified diff for `scope` in the narrow format
    /// (`--no-color --no-ext-diff --no-prefix -U0`). Failure is fatal.
    fn diff(&self, scope: &DiffScope) -> Result<String>;

    /// Repository-relative paths of all tracked files
    fn tracked_files(&self) -> Result<Vec<String>>;

    /// Repository-relative paths of untracked, non-ignored files
    fn untracked_files(&self) -> Result<Vec<String>>;

    /// Raw message body of one commit, or None if it cannot be read
    fn commit_message(&self, sha: &str) -> Option<String>;

    /// Commits in `range`, oldest first, or None if git rejects the range
    fn rev_list(&self, range: &str) -> Option<Vec<String>>;
}

/// `git` subprocess backed [`Vcs`]
#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
}

impl Git {
    /// Operate on the repository rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Vcs for Git {
    fn root(&self) -> &Path {
        &self.root
    }

    fn diff(&self, scope: &DiffScope) -> Result<String> {
        diff::get_diff(scope, &self.root)
    }

    fn tracked_files(&self) -> Result<Vec<String>> {
        files::list_tracked(&self.root)
    }

    fn untracked_files(&self) -> Result<Vec<String>> {
        files::list_untracked(&self.root)
    }

    fn commit_message(&self, sha: &str) -> Option<String> {
        commit::get_commit_message(sha, &self.root)
    }

    fn rev_list(&self, range: &str) -> Option<Vec<String>> {
        commit::rev_list(range, &self.root)
    }
}

/// Run a git command and return stdout as string (trimmed)
pub fn git_command(args: &[&str], cwd: Option<&Path>) -> Result<String> {
    git_command_raw(args, cwd).map(|out| out.trim().to_string())
}

/// Run a git command and return stdout untouched apart from lossy UTF-8
/// decoding. Used wherever trailing whitespace is part of the payload.
pub fn git_command_raw(args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.args(args);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    tracing::debug!("running git {}", args.join(" "));

    let output = cmd.output().map_err(|e| ScanError::GitError {
        message: format!("Failed to execute git: {}", e),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ScanError::GitError {
            message: format!("git {} failed: {}", args.join(" "), stderr.trim()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a git command, returning None if it fails (for optional queries)
pub fn git_command_optional(args: &[&str], cwd: Option<&Path>) -> Option<String> {
    git_command(args, cwd).ok()
}
