//! Tests for report formats, logging and exit codes

use crate::common::{assert_valid_json, TestRepo, OK_LINE};

fn repo_with_finding() -> TestRepo {
    let repo = TestRepo::with_git();
    repo.add_file("x.txt", "a\u{E000}b\u{FE0F}\n");
    repo.commit("Initial commit");
    repo
}

#[test]
fn test_findings_keep_emission_order_within_a_line() {
    let repo = repo_with_finding();
    let result = repo.scan(&["--all"]);

    assert_eq!(result.code, 1);
    let lines = result.finding_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("x.txt:1:2 U+E000 "), "{}", lines[0]);
    assert!(lines[0].ends_with("(Co) :: a\\ue000b\\ufe0f"));
    assert_eq!(
        lines[1],
        "x.txt:1:4 U+FE0F VARIATION SELECTOR-16 (Mn) :: a\\ue000b\\ufe0f"
    );
}

#[test]
fn test_json_format_with_findings() {
    let repo = repo_with_finding();
    let result = repo.scan(&["--all", "--format", "json"]);

    assert_eq!(result.code, 1);
    let json = assert_valid_json(&result.stdout, "json report");
    assert_eq!(json["status"], "fail");
    assert_eq!(json["count"], 2);
    assert_eq!(json["findings"][1]["path"], "x.txt");
    assert_eq!(json["findings"][1]["line"], 1);
    assert_eq!(json["findings"][1]["column"], 4);
    assert_eq!(json["findings"][1]["codepoint"], "U+FE0F");
    assert_eq!(json["findings"][1]["category"], "Mn");
}

#[test]
fn test_json_format_clean() {
    let repo = TestRepo::with_git();
    repo.add_file("x.txt", "plain\n");
    repo.commit("Initial commit");
    let result = repo.scan(&["--all", "--format", "json"]);

    assert_eq!(result.code, 0);
    let json = assert_valid_json(&result.stdout, "json report");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["count"], 0);
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let repo = TestRepo::with_git();
    repo.add_file("x.txt", "plain\n");
    repo.commit("Initial commit");
    let result = repo.scan(&["--all", "--verbose"]);

    assert_eq!(result.code, 0);
    assert_eq!(result.stdout.trim_end(), OK_LINE);
    assert!(result.stderr.contains("DEBUG"), "{}", result.stderr);
}

#[test]
fn test_repo_flag_discovers_root_from_subdirectory() {
    let repo = TestRepo::with_git();
    repo.add_file("src/deep/x.txt", "z\u{200C}\n");
    repo.commit("Initial commit");
    let sub = repo.path().join("src/deep");

    let result = repo.scan(&["--all", "--repo", &sub.to_string_lossy()]);
    assert_eq!(result.code, 1);
    assert_eq!(
        result.finding_lines(),
        vec!["src/deep/x.txt:1:2 U+200C ZERO WIDTH NON-JOINER (Cf) :: z\\u200c"]
    );
}
