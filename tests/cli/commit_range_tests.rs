//! Tests for `--commit-range`

use crate::common::{assert_clean, assert_findings, assert_operational_error, TestRepo};

fn repo_with_history() -> TestRepo {
    let repo = TestRepo::with_git();
    repo.add_file("a.txt", "a\n");
    repo.commit("Initial commit");
    repo.add_file("b.txt", "b\n");
    repo.commit("Add b\n\nSee the docs\u{2066} for details");
    repo.add_file("c.txt", "c\n");
    repo.commit("Add c");
    repo
}

#[test]
fn test_commit_range_reports_message_findings() {
    let repo = repo_with_history();
    let sha = repo.rev("HEAD~1");

    let expected = format!(
        "commit[{}]:3:13 U+2066 LEFT-TO-RIGHT ISOLATE (Cf) :: See the docs\\u2066 for details",
        sha
    );
    assert_findings(
        &repo.scan(&["--all", "--commit-range", "HEAD~2..HEAD"]),
        &[expected.as_str()],
    );
}

#[test]
fn test_commit_range_outside_offending_commit() {
    let repo = repo_with_history();
    assert_clean(&repo.scan(&["--all", "--commit-range", "HEAD~1..HEAD"]));
}

#[test]
fn test_empty_commit_range_is_clean() {
    let repo = repo_with_history();
    assert_clean(&repo.scan(&["--all", "--commit-range", "HEAD..HEAD"]));
}

#[test]
fn test_invalid_commit_range_is_operational_error() {
    let repo = repo_with_history();
    let result = repo.scan(&["--all", "--commit-range", "nope..HEAD"]);

    assert_operational_error(&result, "ERROR: git rev-list failed for range: nope..HEAD");
    assert!(result.stdout.is_empty());
}

#[test]
fn test_commit_range_layers_after_scope_findings() {
    let repo = repo_with_history();
    repo.add_file("d.txt", "d\u{00AD}\n");
    let sha = repo.rev("HEAD~1");

    let result = repo.scan(&["--commit-range", "HEAD~2..HEAD"]);
    let lines = result.finding_lines();
    assert_eq!(lines.len(), 2, "{}", result.stdout);
    assert!(lines[0].starts_with("d.txt:1:2 U+00AD SOFT HYPHEN (Cf)"));
    assert!(lines[1].starts_with(&format!("commit[{}]:3:13", sha)));
}
