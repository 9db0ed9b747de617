//! TestRepo builder for end-to-end CLI tests
//!
//! Every repository lives in its own temp dir and is driven through the real
//! `git` binary, so the scanner sees exactly what it would in CI.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Variables that would leak the host CI context into a test run
const HOST_ENV: [&str; 5] = [
    "GITHUB_EVENT_PATH",
    "GITHUB_TOKEN",
    "GH_TOKEN",
    "INVISIBLE_SCAN_API_TIMEOUT",
    "RUST_LOG",
];

/// Captured outcome of one CLI run
pub struct RunResult {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    fn from_output(output: Output) -> Self {
        Self {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Report lines after the FAIL header
    pub fn finding_lines(&self) -> Vec<&str> {
        self.stdout.lines().skip(1).collect()
    }
}

/// Builder for creating test repositories
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new empty directory (not yet a repository)
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Create a new directory initialised as a git repository
    pub fn with_git() -> Self {
        let repo = Self::new();
        repo.init_git();
        repo
    }

    /// Get the path to the test repository root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file with the given content
    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        self.add_bytes(relative_path, content.as_bytes())
    }

    /// Add a file with raw byte content
    pub fn add_bytes(&self, relative_path: &str, content: &[u8]) -> &Self {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    /// Run a git command in the repository and return trimmed stdout
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .current_dir(self.path())
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Initialize as a git repository
    pub fn init_git(&self) -> &Self {
        self.git(&["init", "-q"]);
        self.git(&["config", "user.email", "test@test.com"]);
        self.git(&["config", "user.name", "Test User"]);
        self.git(&["config", "commit.gpgsign", "false"]);
        self
    }

    /// Stage everything
    pub fn stage_all(&self) -> &Self {
        self.git(&["add", "-A"]);
        self
    }

    /// Create a git commit with all files
    pub fn commit(&self, message: &str) -> &Self {
        self.stage_all();
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
        self
    }

    /// Full sha of a revision
    pub fn rev(&self, rev: &str) -> String {
        self.git(&["rev-parse", rev])
    }

    /// Run the scanner with `args` inside the repository
    pub fn scan(&self, args: &[&str]) -> RunResult {
        self.scan_with_env(args, &[])
    }

    /// Run the scanner with extra environment variables
    pub fn scan_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> RunResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_invisible-scan"));
        cmd.current_dir(self.path()).args(args);
        for var in HOST_ENV {
            cmd.env_remove(var);
        }
        for (key, value) in env {
            cmd.env(key, value);
        }
        RunResult::from_output(cmd.output().expect("Failed to run invisible-scan"))
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
