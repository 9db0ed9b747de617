//! Tests for the scan scope flags
//!
//! - `--all` - every tracked file, contents and names
//! - `--staged` - added lines of the staged diff
//! - `--base REF` - added lines since REF
//! - no flag - staged diff, unstaged diff, untracked files

use crate::common::{assert_clean, assert_findings, assert_operational_error, TestRepo};

// ============================================================================
// --all
// ============================================================================

#[test]
fn test_all_clean_repository() {
    let repo = TestRepo::with_git();
    repo.add_file("src/main.rs", "fn main() {\n    println!(\"héllo\");\n}\n");
    repo.commit("Initial commit");

    assert_clean(&repo.scan(&["--all"]));
}

#[test]
fn test_all_reports_file_contents() {
    let repo = TestRepo::with_git();
    repo.add_file("src/a.txt", "clean\nfoo\u{200B}bar\n");
    repo.commit("Initial commit");

    assert_findings(
        &repo.scan(&["--all"]),
        &["src/a.txt:2:4 U+200B ZERO WIDTH SPACE (Cf) :: foo\\u200bbar"],
    );
}

#[test]
fn test_all_reports_deceptive_file_names() {
    let repo = TestRepo::with_git();
    repo.add_file("a\u{200B}.txt", "ok\n");
    repo.commit("Initial commit");

    assert_findings(
        &repo.scan(&["--all"]),
        &["path[a\\u200b.txt]:1:2 U+200B ZERO WIDTH SPACE (Cf) :: a\\u200b.txt"],
    );
}

#[test]
fn test_all_skips_binary_contents() {
    let repo = TestRepo::with_git();
    let mut blob = b"\x00\x01\x02".to_vec();
    blob.extend_from_slice("\u{200B}".as_bytes());
    repo.add_bytes("image.bin", &blob);
    repo.commit("Add binary");

    assert_clean(&repo.scan(&["--all"]));
}

#[test]
fn test_all_survives_invalid_utf8() {
    let repo = TestRepo::with_git();
    let mut bytes = b"caf\xe9\n".to_vec();
    bytes.extend_from_slice("tab\u{00AD}\n".as_bytes());
    repo.add_bytes("latin1.txt", &bytes);
    repo.commit("Add latin-1 file");

    assert_findings(
        &repo.scan(&["--all"]),
        &["latin1.txt:2:4 U+00AD SOFT HYPHEN (Cf) :: tab\\xad"],
    );
}

#[test]
fn test_all_ignores_untracked_files() {
    let repo = TestRepo::with_git();
    repo.add_file("tracked.txt", "ok\n");
    repo.commit("Initial commit");
    repo.add_file("untracked.txt", "bad\u{2060}\n");

    assert_clean(&repo.scan(&["--all"]));
}

#[test]
fn test_all_outside_repository_is_operational_error() {
    let dir = TestRepo::new();
    dir.add_file("a.txt", "x\n");

    assert_operational_error(&dir.scan(&["--all"]), "ERROR:");
}

// ============================================================================
// --staged
// ============================================================================

fn repo_with_pending_changes() -> TestRepo {
    let repo = TestRepo::with_git();
    repo.add_file("notes.txt", "one\ntwo\n");
    repo.commit("Initial commit");

    repo.add_file("notes.txt", "one\ntwo\nthr\u{00A0}ee\n");
    repo.stage_all();
    repo.add_file("notes.txt", "one\ntwo\nthr\u{00A0}ee\nfour\u{200B}\n");
    repo
}

#[test]
fn test_staged_reports_only_staged_additions() {
    let repo = repo_with_pending_changes();

    assert_findings(
        &repo.scan(&["--staged"]),
        &["notes.txt:3:4 U+00A0 NO-BREAK SPACE (Zs) :: thr\\xa0ee"],
    );
}

#[test]
fn test_staged_ignores_removed_lines() {
    let repo = TestRepo::with_git();
    repo.add_file("a.txt", "keep\nbad\u{200B}\n");
    repo.commit("Initial commit");
    repo.add_file("a.txt", "keep\n");
    repo.stage_all();

    assert_clean(&repo.scan(&["--staged"]));
}

// ============================================================================
// default scope
// ============================================================================

#[test]
fn test_default_scope_order() {
    let repo = repo_with_pending_changes();
    repo.add_file("new.txt", "\u{FEFF}header\n");

    assert_findings(
        &repo.scan(&[]),
        &[
            "notes.txt:3:4 U+00A0 NO-BREAK SPACE (Zs) :: thr\\xa0ee",
            "notes.txt:4:5 U+200B ZERO WIDTH SPACE (Cf) :: four\\u200b",
            "new.txt:1:1 U+FEFF ZERO WIDTH NO-BREAK SPACE (Cf) :: \\ufeffheader",
        ],
    );
}

#[test]
fn test_default_scope_clean_tree() {
    let repo = TestRepo::with_git();
    repo.add_file("a.txt", "bad\u{200B}\n");
    repo.commit("Committed long ago");

    assert_clean(&repo.scan(&[]));
}

#[test]
fn test_default_scope_respects_gitignore() {
    let repo = TestRepo::with_git();
    repo.add_file(".gitignore", "build/\n");
    repo.commit("Initial commit");
    repo.add_file("build/out.txt", "bad\u{200B}\n");

    assert_clean(&repo.scan(&[]));
}

// ============================================================================
// --base
// ============================================================================

#[test]
fn test_base_reports_additions_since_ref() {
    let repo = TestRepo::with_git();
    repo.add_file("lib.rs", "pub fn a() {}\n");
    repo.commit("Initial commit");
    repo.add_file("lib.rs", "pub fn a() {}\npub fn b() { \"\u{2067}\" }\n");
    repo.commit("Add b");

    assert_findings(
        &repo.scan(&["--base", "HEAD~1"]),
        &["lib.rs:2:15 U+2067 RIGHT-TO-LEFT ISOLATE (Cf) :: pub fn b() { \"\\u2067\" }"],
    );
}

#[test]
fn test_base_unknown_ref_is_operational_error() {
    let repo = TestRepo::with_git();
    repo.add_file("a.txt", "x\n");
    repo.commit("Initial commit");

    assert_operational_error(&repo.scan(&["--base", "no-such-branch"]), "ERROR:");
}

#[test]
fn test_scope_flags_are_mutually_exclusive() {
    let repo = TestRepo::with_git();
    let result = repo.scan(&["--all", "--staged"]);
    assert_eq!(result.code, 2);
}
