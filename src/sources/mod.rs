//! Source adapters
//!
//! Each adapter turns one origin into [`ScanUnit`]s and scans them:
//!
//! - `files` - tracked / untracked files in the working tree
//! - `diff` - added lines of a staged, unstaged or base-ref diff
//! - `commits` - single commit messages and commit ranges
//! - `event` - CI event payloads (pull request and push shapes)
//!
//! The origin's own identifier is scanned alongside its content wherever it
//! is user-controlled: every file path (even when the entry has no readable
//! contents) and every commit id taken from a payload or the API.

pub mod commits;
pub mod diff;
pub mod event;
pub mod files;

use crate::scanner::{scan_unit, Finding, ScanUnit};

/// Scan units in order and concatenate their findings.
pub fn scan_units<'a>(units: impl IntoIterator<Item = &'a ScanUnit>) -> Vec<Finding> {
    units.into_iter().flat_map(scan_unit).collect()
}
