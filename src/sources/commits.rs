//! Commit message scanning

use crate::error::{Result, ScanError};
use crate::git::Vcs;
use crate::scanner::{scan_text, scan_unit, Finding, Origin, ScanUnit};

/// Scan one commit message fetched from git. An unreadable commit yields
/// nothing.
pub fn scan_commit(vcs: &dyn Vcs, sha: &str) -> Vec<Finding> {
    match vcs.commit_message(sha) {
        Some(message) => scan_message(sha, &message),
        None => Vec::new(),
    }
}

/// Scan a commit message obtained elsewhere (payload, API)
pub fn scan_message(sha: &str, message: &str) -> Vec<Finding> {
    scan_text(&Origin::Commit(sha.to_string()), message, 1)
}

/// Scan a commit id taken from an event payload or the API. Ids from local
/// git are hex and need no check.
pub fn scan_commit_id(sha: &str) -> Vec<Finding> {
    scan_unit(&ScanUnit::commit_id(sha))
}

/// Scan every commit message in `range`, oldest first.
///
/// A range git cannot resolve is an operational error, not an empty scan.
pub fn scan_commit_range(vcs: &dyn Vcs, range: &str) -> Result<Vec<Finding>> {
    let shas = vcs.rev_list(range).ok_or_else(|| ScanError::InvalidRange {
        range: range.to_string(),
    })?;
    tracing::debug!("scanning {} commit message(s) in {}", shas.len(), range);

    Ok(shas.iter().flat_map(|sha| scan_commit(vcs, sha)).collect())
}
