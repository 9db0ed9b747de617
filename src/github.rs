//! GitHub REST access for pull request commits
//!
//! Used only when local history cannot resolve a pull request's commits.
//! Every failure (transport, timeout, HTTP status, JSON) degrades to "no
//! data" so a CI run loses coverage instead of failing or retrying.

use std::collections::HashSet;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK};
use reqwest::Url;
use serde_json::Value;

use crate::error::{Result, ScanError};

static NEXT_LINK_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"^<([^>]+)>;\s*rel="next"$"#).ok());

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const PER_PAGE: &str = "100";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// One fetched page: the decoded JSON body and the next page, if any
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub body: Value,
    pub next: Option<String>,
}

/// A commit message obtained from the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommit {
    pub sha: String,
    pub message: String,
}

/// Authenticated GET of one page of a paginated resource.
pub trait CommitFetcher {
    /// Fetch `url`; None on any failure.
    fn fetch(&self, url: &str, token: &str) -> Option<Page>;
}

/// Blocking HTTP implementation of [`CommitFetcher`]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client whose every request is bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("invisible-scan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScanError::ConfigError {
                message: format!("cannot build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

impl CommitFetcher for HttpFetcher {
    fn fetch(&self, url: &str, token: &str) -> Option<Page> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(API_VERSION_HEADER, API_VERSION)
            .send()
            .map_err(|e| tracing::warn!("GitHub request failed: {}", e))
            .ok()?;

        if !response.status().is_success() {
            tracing::warn!("GitHub API returned {} for {}", response.status(), url);
            return None;
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_link);

        let raw = response
            .bytes()
            .map_err(|e| tracing::warn!("GitHub response read failed: {}", e))
            .ok()?;
        let body: Value = serde_json::from_str(&String::from_utf8_lossy(&raw))
            .map_err(|e| tracing::warn!("GitHub response is not JSON: {}", e))
            .ok()?;

        Some(Page { body, next })
    }
}

/// Extract the `rel="next"` target from a `Link` header.
///
/// `<https://api.github.com/...&page=2>; rel="next", <...>; rel="last"`
pub fn next_link(header: &str) -> Option<String> {
    let re = NEXT_LINK_RE.as_ref()?;
    header
        .split(',')
        .map(str::trim)
        .filter(|part| part.contains("rel=\"next\""))
        .find_map(|part| re.captures(part).map(|caps| caps[1].to_string()))
}

/// Ensure the URL asks for the largest page size unless it already sets one.
pub fn with_per_page(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if !parsed.query_pairs().any(|(k, _)| k == "per_page") {
        parsed.query_pairs_mut().append_pair("per_page", PER_PAGE);
    }
    parsed.to_string()
}

/// Walk every page of a pull request's commit list.
///
/// Stops at the first failed page, a body that is not an array, or a page
/// link already visited. Items lacking a string `sha` or `commit.message`
/// are skipped.
pub fn fetch_pr_commits(
    fetcher: &dyn CommitFetcher,
    commits_url: &str,
    token: &str,
) -> Vec<RemoteCommit> {
    let mut commits = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(with_per_page(commits_url));

    while let Some(url) = next.take() {
        if !visited.insert(url.clone()) {
            break;
        }
        let Some(page) = fetcher.fetch(&url, token) else {
            break;
        };
        let Value::Array(items) = page.body else {
            break;
        };

        commits.extend(items.iter().filter_map(remote_commit));
        next = page.next;
    }

    tracing::debug!("fetched {} commit(s) from {}", commits.len(), commits_url);
    commits
}

fn remote_commit(item: &Value) -> Option<RemoteCommit> {
    let sha = item.get("sha")?.as_str()?;
    let message = item.get("commit")?.get("message")?.as_str()?;
    Some(RemoteCommit {
        sha: sha.to_string(),
        message: message.to_string(),
    })
}
