//! CLI argument definitions using clap
//!
//! One flat command: a mutually exclusive scope selector plus additive
//! commit-range and event-payload layers.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

use crate::orchestrator::ScanScope;

/// Text report layout, shown below the option list
const REPORT_HELP: &str = "Report:\n  \
    OK: no invisible/suspicious characters found.\n  \
    FAIL: invisible/suspicious characters found:\n  \
    <path>:<line>:<col> U+XXXX <NAME> (<category>) :: <context>\n\n\
    Finding lines are printed bare, with no leading \"- \" bullet.\n\
    Invisible characters in <path> and <context> are shown as \\uXXXX escapes.\n\n\
    Exit status: 0 clean, 1 findings, 2 operational error.";

/// Scan a repository for invisible and suspicious Unicode characters
#[derive(Parser, Debug)]
#[command(name = "invisible-scan")]
#[command(about = "Fail when invisible or suspicious Unicode characters appear in files, diffs or commit metadata")]
#[command(version)]
#[command(after_help = REPORT_HELP)]
#[command(group(ArgGroup::new("scope").args(["all", "staged", "base"]).multiple(false)))]
pub struct Cli {
    /// Scan every tracked file
    #[arg(long)]
    pub all: bool,

    /// Scan only lines added in the staged diff
    #[arg(long)]
    pub staged: bool,

    /// Scan only lines added since REF (`REF...HEAD`)
    #[arg(long, value_name = "REF")]
    pub base: Option<String>,

    /// Also scan the messages of every commit in RANGE (e.g. `origin/main..HEAD`)
    #[arg(long, value_name = "RANGE")]
    pub commit_range: Option<String>,

    /// Also scan the CI event payload (PR title/body/commits, push commits)
    #[arg(long)]
    pub github_event: bool,

    /// Event payload location; only read with --github-event
    #[arg(long, value_name = "PATH", env = "GITHUB_EVENT_PATH")]
    pub github_event_path: Option<PathBuf>,

    /// Start repository discovery here instead of the current directory
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Per-request timeout for the GitHub API, in seconds
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 20,
        env = "INVISIBLE_SCAN_API_TIMEOUT"
    )]
    pub api_timeout: u64,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Show debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `OK:`/`FAIL:` report, one line per finding
    #[default]
    Text,
    /// JSON - standard JSON output for machine parsing
    Json,
}

impl Cli {
    /// Scope selected by the mutually exclusive flags
    pub fn scope(&self) -> ScanScope {
        if self.all {
            ScanScope::All
        } else if self.staged {
            ScanScope::Staged
        } else if let Some(base) = &self.base {
            ScanScope::Base(base.clone())
        } else {
            ScanScope::Default
        }
    }
}
