//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout carries only the report.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. A non-empty `RUST_LOG` replaces the
/// default filter entirely, `--verbose` included; otherwise the crate logs
/// at `warn`, or `debug` when verbose. Later calls are no-ops.
pub fn init(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter_for(rust_log.as_deref(), verbose);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn filter_for(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => {
            let level = if verbose { "debug" } else { "warn" };
            EnvFilter::new(format!("invisible_scan={}", level))
        }
    }
}
