//! Custom assertions for integration tests

use serde_json::Value;

use super::RunResult;

pub const OK_LINE: &str = "OK: no invisible/suspicious characters found.";
pub const FAIL_LINE: &str = "FAIL: invisible/suspicious characters found:";

/// Assert a clean scan: exit 0 and the OK line only
pub fn assert_clean(result: &RunResult) {
    assert_eq!(
        result.code, 0,
        "expected clean scan\nstdout:\n{}\nstderr:\n{}",
        result.stdout, result.stderr
    );
    assert_eq!(result.stdout.trim_end(), OK_LINE);
}

/// Assert a failing scan reporting exactly `expected`, in order
pub fn assert_findings(result: &RunResult, expected: &[&str]) {
    assert_eq!(
        result.code, 1,
        "expected findings\nstdout:\n{}\nstderr:\n{}",
        result.stdout, result.stderr
    );
    assert_eq!(result.stdout.lines().next(), Some(FAIL_LINE));
    assert_eq!(result.finding_lines(), expected);
}

/// Assert an operational error: exit 2 and `message` on stderr
pub fn assert_operational_error(result: &RunResult, message: &str) {
    assert_eq!(
        result.code, 2,
        "expected operational error\nstdout:\n{}\nstderr:\n{}",
        result.stdout, result.stderr
    );
    assert!(
        result.stderr.contains(message),
        "expected {:?} in stderr:\n{}",
        message,
        result.stderr
    );
}

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}
