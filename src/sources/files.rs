//! Whole-file scanning

use std::fs;

use crate::error::Result;
use crate::git::Vcs;
use crate::scanner::{scan_unit, Finding, Origin, ScanUnit};

use super::scan_units;

/// Bytes inspected by the control-byte heuristic
const BINARY_SAMPLE_LEN: usize = 4096;

/// Share of control bytes above which a sample counts as binary
const BINARY_CONTROL_RATIO: f64 = 0.3;

/// Heuristic binary detection.
///
/// Any NUL byte makes the data binary. Otherwise more than 30% control
/// bytes (excluding tab, LF, VT, FF, CR) in the first 4096 bytes does.
pub fn is_probably_binary(data: &[u8]) -> bool {
    if data.contains(&0) {
        return true;
    }
    let sample = &data[..data.len().min(BINARY_SAMPLE_LEN)];
    if sample.is_empty() {
        return false;
    }
    let nontext = sample
        .iter()
        .filter(|&&b| b < 9 || (13 < b && b < 32) || b == 127)
        .count();
    (nontext as f64 / sample.len() as f64) > BINARY_CONTROL_RATIO
}

/// Units for one repository-relative file: its path string, then its
/// contents unless unreadable or binary.
pub fn file_units(vcs: &dyn Vcs, rel: &str) -> Vec<ScanUnit> {
    let mut units = vec![ScanUnit::path_name(rel)];

    let data = match fs::read(vcs.root().join(rel)) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("skipping contents of {}: {}", rel, e);
            return units;
        }
    };

    if is_probably_binary(&data) {
        tracing::debug!("skipping binary file {}", rel);
        return units;
    }

    // Never guess encodings; invalid sequences become U+FFFD.
    let text = String::from_utf8_lossy(&data).into_owned();
    units.push(ScanUnit::block(Origin::File(rel.to_string()), text));
    units
}

/// Scan the given repository-relative files. Every path string is scanned;
/// contents only for regular files, so deleted entries, directories,
/// submodules and dangling symlinks contribute just their name.
pub fn scan_files(vcs: &dyn Vcs, paths: &[String]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for rel in paths {
        if vcs.root().join(rel).is_file() {
            findings.extend(scan_units(&file_units(vcs, rel)));
        } else {
            tracing::debug!("not a regular file, scanning name only: {}", rel);
            findings.extend(scan_unit(&ScanUnit::path_name(rel)));
        }
    }
    findings
}

/// Scan every tracked file
pub fn scan_tracked(vcs: &dyn Vcs) -> Result<Vec<Finding>> {
    let paths = vcs.tracked_files()?;
    tracing::debug!("scanning {} tracked file(s)", paths.len());
    Ok(scan_files(vcs, &paths))
}

/// Scan every untracked, non-ignored file
pub fn scan_untracked(vcs: &dyn Vcs) -> Result<Vec<Finding>> {
    let paths = vcs.untracked_files()?;
    tracing::debug!("scanning {} untracked file(s)", paths.len());
    Ok(scan_files(vcs, &paths))
}
