//! Diff scanning: only lines a change adds are inspected

use std::collections::HashSet;

use crate::error::Result;
use crate::git::{DiffScope, Vcs};
use crate::scanner::{Finding, Origin, ScanUnit};
use crate::unified_diff::{parse_diff, DiffEvent};

use super::scan_units;

/// Units for a diff: each surviving post-image path once (on first sight,
/// even without added lines), then every added line at its post-image line
/// number.
pub fn diff_units(diff_text: &str) -> Vec<ScanUnit> {
    let mut units = Vec::new();
    let mut seen_paths: HashSet<String> = HashSet::new();

    for event in parse_diff(diff_text) {
        match event {
            DiffEvent::File(path) => {
                if seen_paths.insert(path.clone()) {
                    units.push(ScanUnit::path_name(&path));
                }
            }
            DiffEvent::Added(row) => {
                units.push(ScanUnit::line(Origin::File(row.path), row.line, row.text));
            }
        }
    }

    units
}

/// Query the diff for `scope` and scan its added lines. A failing diff
/// query aborts the run.
pub fn scan_diff(vcs: &dyn Vcs, scope: &DiffScope) -> Result<Vec<Finding>> {
    let diff_text = vcs.diff(scope)?;
    let units = diff_units(&diff_text);
    tracing::debug!("scanning {} unit(s) from {} diff", units.len(), scope.as_str());
    Ok(scan_units(&units))
}
