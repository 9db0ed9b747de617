//! Tracked and untracked file listing

use std::path::Path;

use super::git_command_raw;
use crate::error::Result;

/// All tracked files, repository-relative
pub fn list_tracked(cwd: &Path) -> Result<Vec<String>> {
    let output = git_command_raw(&["ls-files", "-z"], Some(cwd))?;
    Ok(split_nul_list(&output))
}

/// Untracked files that are not ignored, repository-relative
pub fn list_untracked(cwd: &Path) -> Result<Vec<String>> {
    let output = git_command_raw(
        &["ls-files", "-z", "--others", "--exclude-standard"],
        Some(cwd),
    )?;
    Ok(split_nul_list(&output))
}

/// Split `-z` output. NUL termination keeps paths verbatim (no C quoting).
fn split_nul_list(output: &str) -> Vec<String> {
    output
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
