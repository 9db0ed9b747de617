//! invisible-scan: invisible and suspicious Unicode character scanner
//!
//! Scans file contents, file names, the added lines of git diffs, commit
//! messages and CI event payloads for characters that render invisibly or
//! deceptively: zero-width characters, bidirectional controls, variation
//! selectors, stray control codes and the like. Every hit is reported with
//! its logical path, line and column.
//!
//! # Example
//!
//! ```
//! use invisible_scan::scanner::{scan_text, Origin};
//!
//! let findings = scan_text(&Origin::File("a.txt".into()), "foo\u{200B}bar", 1);
//! assert_eq!(findings[0].column, 4);
//! assert_eq!(findings[0].name, "ZERO WIDTH SPACE");
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod logging;
pub mod orchestrator;
pub mod report;
pub mod scanner;
pub mod sources;
pub mod unified_diff;

// Re-export commonly used types
pub use classify::{classify, Classification, Reason, Verdict};
pub use cli::{Cli, OutputFormat};
pub use error::{Result, ScanError};
pub use orchestrator::{Orchestrator, ScanPlan, ScanScope};
pub use scanner::{Finding, Origin, ScanUnit};
