//! Commit message and range queries

use std::path::Path;

use super::{git_command, git_command_raw};

/// Raw message body (`%B`) of `sha`.
///
/// Returns None if git cannot show the commit; callers treat that as a
/// per-commit soft failure.
pub fn get_commit_message(sha: &str, cwd: &Path) -> Option<String> {
    match git_command_raw(&["show", "-s", "--format=%B", sha], Some(cwd)) {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::warn!("cannot read message of commit {}: {}", sha, e);
            None
        }
    }
}

/// Commits in `range`, oldest first.
///
/// None means git rejected the range (unknown ref, malformed expression,
/// missing history).
pub fn rev_list(range: &str, cwd: &Path) -> Option<Vec<String>> {
    let output = match git_command(&["rev-list", "--reverse", range], Some(cwd)) {
        Ok(out) => out,
        Err(e) => {
            tracing::debug!("rev-list {} failed: {}", range, e);
            return None;
        }
    };

    Some(parse_rev_list(&output))
}

fn parse_rev_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
