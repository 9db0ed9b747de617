//! Scan orchestration
//!
//! Picks the adapters for a [`ScanPlan`], runs them in a fixed order and
//! concatenates their findings. Order is never re-sorted: the report lists
//! findings exactly as the adapters produced them.

use std::path::PathBuf;

use crate::error::{Result, ScanError};
use crate::git::{DiffScope, Vcs};
use crate::github::CommitFetcher;
use crate::scanner::Finding;
use crate::sources::commits::scan_commit_range;
use crate::sources::diff::scan_diff;
use crate::sources::event::{scan_event_file, EventContext};
use crate::sources::files::{scan_tracked, scan_untracked};

/// Which part of the working tree to scan
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanScope {
    /// Every tracked file
    All,
    /// Added lines of the staged diff
    Staged,
    /// Added lines of `<REF>...HEAD`
    Base(String),
    /// Staged diff, then unstaged diff, then untracked files
    #[default]
    Default,
}

/// Event payload scanning request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRequest {
    /// Payload location; None when neither flag nor environment supplied one
    pub path: Option<PathBuf>,
}

/// Everything one run should scan
#[derive(Debug, Clone, Default)]
pub struct ScanPlan {
    pub scope: ScanScope,
    pub commit_range: Option<String>,
    pub event: Option<EventRequest>,
}

/// Runs a [`ScanPlan`] against its collaborators
pub struct Orchestrator<'a> {
    pub vcs: &'a dyn Vcs,
    pub fetcher: &'a dyn CommitFetcher,
    pub token: Option<&'a str>,
}

impl Orchestrator<'_> {
    /// Run every adapter the plan selects.
    ///
    /// Scope first, then the commit range, then the event payload. A missing
    /// event path is rejected before anything is scanned.
    pub fn run(&self, plan: &ScanPlan) -> Result<Vec<Finding>> {
        let event_path = match &plan.event {
            Some(EventRequest { path: Some(path) }) => Some(path.as_path()),
            Some(EventRequest { path: None }) => return Err(ScanError::MissingEventPath),
            None => None,
        };

        let mut findings = self.scan_scope(&plan.scope)?;

        if let Some(range) = &plan.commit_range {
            findings.extend(scan_commit_range(self.vcs, range)?);
        }

        if let Some(path) = event_path {
            tracing::debug!("scanning event payload {}", path.display());
            let ctx = EventContext {
                vcs: self.vcs,
                fetcher: self.fetcher,
                token: self.token,
            };
            findings.extend(scan_event_file(path, &ctx));
        }

        tracing::debug!("{} finding(s) in total", findings.len());
        Ok(findings)
    }

    fn scan_scope(&self, scope: &ScanScope) -> Result<Vec<Finding>> {
        match scope {
            ScanScope::All => scan_tracked(self.vcs),
            ScanScope::Staged => scan_diff(self.vcs, &DiffScope::Staged),
            ScanScope::Base(base) => scan_diff(self.vcs, &DiffScope::Base(base.clone())),
            ScanScope::Default => {
                let mut findings = scan_diff(self.vcs, &DiffScope::Staged)?;
                findings.extend(scan_diff(self.vcs, &DiffScope::Unstaged)?);
                findings.extend(scan_untracked(self.vcs)?);
                Ok(findings)
            }
        }
    }
}
