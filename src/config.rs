//! Resolved runtime configuration
//!
//! Flags win over environment variables, which win over defaults. The
//! environment is read through a lookup function so resolution can be tested
//! without touching the process environment.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::{Cli, OutputFormat};
use crate::error::{Result, ScanError};
use crate::git::discover_repo_root;
use crate::orchestrator::{EventRequest, ScanPlan};

/// Credential variables, in order of preference
pub const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Everything a run needs, resolved once up front
#[derive(Debug, Clone)]
pub struct Settings {
    /// Repository root all relative paths are resolved against
    pub repo_root: PathBuf,
    pub plan: ScanPlan,
    /// GitHub API credential; None disables the remote fallback
    pub token: Option<String>,
    pub api_timeout: Duration,
    pub format: OutputFormat,
}

impl Settings {
    /// Resolve from parsed flags and the process environment.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = env::current_dir()?;
        Self::resolve(cli, &cwd, |name| env::var(name).ok())
    }

    /// Resolve against an explicit working directory and environment lookup.
    pub fn resolve(cli: &Cli, cwd: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if cli.api_timeout == 0 {
            return Err(ScanError::ConfigError {
                message: "--api-timeout must be at least 1 second".to_string(),
            });
        }

        let start = match &cli.repo {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };
        if !start.is_dir() {
            return Err(ScanError::ConfigError {
                message: format!("repository directory not found: {}", start.display()),
            });
        }
        let repo_root = discover_repo_root(&start);
        tracing::debug!("repository root: {}", repo_root.display());

        let event = cli.github_event.then(|| EventRequest {
            path: cli.github_event_path.clone().filter(|p| !p.as_os_str().is_empty()),
        });

        Ok(Self {
            repo_root,
            plan: ScanPlan {
                scope: cli.scope(),
                commit_range: cli.commit_range.clone(),
                event,
            },
            token: resolve_token(lookup),
            api_timeout: Duration::from_secs(cli.api_timeout),
            format: cli.format,
        })
    }
}

/// First non-empty credential among [`TOKEN_VARS`]
pub fn resolve_token(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.is_empty())
}
