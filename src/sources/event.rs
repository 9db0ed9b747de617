//! CI event payload scanning
//!
//! Recognises two payload shapes:
//!
//! - pull request (`pull_request` object): title, body and the messages of
//!   every commit in the request, plus the ids of commits fetched remotely
//! - push (`commits` array): each included commit id and message once
//!
//! Anything else is silently accepted. Payloads are untrusted input, so each
//! field is type-checked before use rather than deserialised wholesale.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::git::Vcs;
use crate::github::{fetch_pr_commits, CommitFetcher};
use crate::scanner::{scan_text, Finding, Origin};

use super::commits::{scan_commit, scan_commit_id, scan_message};

const SKIPPED_MESSAGE: &str =
    "unable to scan PR commit messages (missing git history and no API token)";
const INVALID_MESSAGE: &str = "unable to read/parse GitHub event payload";

/// Collaborators the event adapter needs
pub struct EventContext<'a> {
    pub vcs: &'a dyn Vcs,
    pub fetcher: &'a dyn CommitFetcher,
    /// API credential; None disables the remote fallback
    pub token: Option<&'a str>,
}

enum EventShape<'a> {
    PullRequest(&'a Map<String, Value>),
    Push(&'a [Value]),
    Unknown,
}

fn shape(payload: &Value) -> EventShape<'_> {
    let Value::Object(obj) = payload else {
        return EventShape::Unknown;
    };
    if let Some(Value::Object(pr)) = obj.get("pull_request") {
        return EventShape::PullRequest(pr);
    }
    if let Some(Value::Array(commits)) = obj.get("commits") {
        return EventShape::Push(commits);
    }
    EventShape::Unknown
}

/// Read and scan the payload at `path`.
///
/// An unreadable or unparsable file produces a single ERR finding instead
/// of an error, so the report stays uniform.
pub fn scan_event_file(path: &Path, ctx: &EventContext<'_>) -> Vec<Finding> {
    let payload = fs::read(path)
        .map_err(|e| tracing::warn!("cannot read event payload {}: {}", path.display(), e))
        .ok()
        .and_then(|raw| {
            serde_json::from_str::<Value>(&String::from_utf8_lossy(&raw))
                .map_err(|e| tracing::warn!("event payload is not JSON: {}", e))
                .ok()
        });

    match payload {
        Some(payload) => scan_event(&payload, ctx),
        None => vec![Finding::notice(
            Origin::Event,
            "INVALID",
            "ERR",
            INVALID_MESSAGE,
        )],
    }
}

/// Scan an already-parsed payload
pub fn scan_event(payload: &Value, ctx: &EventContext<'_>) -> Vec<Finding> {
    match shape(payload) {
        EventShape::PullRequest(pr) => scan_pull_request(pr, ctx),
        EventShape::Push(commits) => scan_push(commits),
        EventShape::Unknown => {
            tracing::debug!("event payload has no recognised shape; nothing to scan");
            Vec::new()
        }
    }
}

fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn ref_sha<'a>(pr: &'a Map<String, Value>, side: &str) -> Option<&'a str> {
    pr.get(side)?.get("sha")?.as_str()
}

fn scan_pull_request(pr: &Map<String, Value>, ctx: &EventContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Some(title) = non_empty_str(pr, "title") {
        findings.extend(scan_text(&Origin::PrTitle, title, 1));
    }
    if let Some(body) = non_empty_str(pr, "body") {
        findings.extend(scan_text(&Origin::PrBody, body, 1));
    }

    // Prefer local history; no network needed.
    let mut scanned_commits = false;
    if let (Some(base), Some(head)) = (ref_sha(pr, "base"), ref_sha(pr, "head")) {
        match ctx.vcs.rev_list(&format!("{}..{}", base, head)) {
            Some(shas) if !shas.is_empty() => {
                tracing::debug!("scanning {} PR commit(s) from local history", shas.len());
                for sha in &shas {
                    findings.extend(scan_commit(ctx.vcs, sha));
                }
                scanned_commits = true;
            }
            _ => tracing::debug!("PR commits not resolvable locally"),
        }
    }

    if !scanned_commits {
        let token = ctx.token.filter(|t| !t.is_empty());
        let commits_url = non_empty_str(pr, "commits_url");
        if let (Some(token), Some(url)) = (token, commits_url) {
            let commits = fetch_pr_commits(ctx.fetcher, url, token);
            for commit in &commits {
                findings.extend(scan_commit_id(&commit.sha));
                findings.extend(scan_message(&commit.sha, &commit.message));
            }
            scanned_commits = !commits.is_empty();
        }
    }

    if !scanned_commits {
        findings.push(Finding::notice(
            Origin::PrCommits,
            "SKIPPED",
            "WARN",
            SKIPPED_MESSAGE,
        ));
    }

    findings
}

fn scan_push(commits: &[Value]) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for commit in commits {
        let (Some(sha), Some(message)) = (
            commit.get("id").and_then(Value::as_str),
            commit.get("message").and_then(Value::as_str),
        ) else {
            continue;
        };
        if !seen.insert(sha) {
            continue;
        }
        findings.extend(scan_commit_id(sha));
        findings.extend(scan_message(sha, message));
    }

    findings
}
