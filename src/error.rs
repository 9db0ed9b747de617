//! Error types and exit codes for invisible-scan

use std::process::ExitCode;
use thiserror::Error;

/// Operational failures that stop a scan.
///
/// Detected characters are never errors; they are reported as findings.
/// Everything in here means "could not run", which the CLI signals with
/// exit code 2.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{message}")]
    GitError { message: String },

    #[error("git rev-list failed for range: {range}")]
    InvalidRange { range: String },

    #[error("--github-event requires $GITHUB_EVENT_PATH or --github-event-path")]
    MissingEventPath,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Convert error to the process exit code:
    /// - 0: No findings
    /// - 1: Findings present (not produced here)
    /// - 2: Operational error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    /// Numeric form of [`ScanError::exit_code`].
    pub fn code(&self) -> u8 {
        match self {
            Self::GitError { .. }
            | Self::InvalidRange { .. }
            | Self::MissingEventPath
            | Self::ConfigError { .. }
            | Self::Io(_) => 2,
        }
    }
}

/// Result type alias for invisible-scan operations
pub type Result<T> = std::result::Result<T, ScanError>;
