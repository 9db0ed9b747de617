//! Unified diff parsing
//!
//! Extracts the surviving files and added lines of a unified diff, each line
//! tagged with its file and its line number in the post-image. Works best on
//! the narrow shape produced by `git diff --no-prefix -U0`, but context lines are
//! still counted if present.
//!
//! The parser is a three-state machine:
//!
//! - `Idle`: no usable file header seen. Nothing is emitted. Any `diff `
//!   line that is not a parseable `diff --git` header (for example the
//!   combined `diff --cc` sections of a merge conflict) returns here.
//! - `Header`: a file is known but no hunk has started. `rename to`, `+++`
//!   and `deleted file mode` refine the file; `---`, `index` and mode lines
//!   are skipped.
//! - `Hunk`: the next post-image line number is known. `+` lines are emitted
//!   and advance the cursor, `-` lines do neither, anything else advances.
//!
//! Every file that survives the change is announced once with
//! [`DiffEvent::File`], before any of its added lines, so renames and empty
//! new files still surface their post-image path.

use once_cell::sync::Lazy;
use regex::Regex;

static HUNK_HEADER_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^@@ -\d+(?:,\d+)? \+(?P<start>\d+)(?:,(?P<count>\d+))? @@").ok()
});

const DIFF_LINE_PREFIX: &str = "diff ";
const DIFF_HEADER_PREFIX: &str = "diff --git ";
const NULL_PATH: &str = "/dev/null";

/// One added line of a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedLine {
    /// Post-image path
    pub path: String,
    /// 1-based line number in the post-image
    pub line: usize,
    /// Line content without the leading `+`
    pub text: String,
}

/// What the parser reports, in diff order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffEvent {
    /// Post-image path of a file present after the change
    File(String),
    Added(AddedLine),
}

#[derive(Debug)]
enum Cursor {
    Idle,
    Header { path: String, deleted: bool },
    Hunk { path: String, next_line: usize },
}

/// Emit the file announcement for a header that is being left.
fn close_header(cursor: &Cursor, events: &mut Vec<DiffEvent>) {
    if let Cursor::Header {
        path,
        deleted: false,
    } = cursor
    {
        events.push(DiffEvent::File(path.clone()));
    }
}

/// Parse `diff` into file announcements and added lines.
pub fn parse_diff(diff: &str) -> Vec<DiffEvent> {
    let mut events = Vec::new();
    let mut cursor = Cursor::Idle;

    for raw in diff.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if line.starts_with(DIFF_LINE_PREFIX) {
            close_header(&cursor, &mut events);
            cursor = match parse_diff_header(line) {
                Some(path) => Cursor::Header {
                    path,
                    deleted: false,
                },
                None => Cursor::Idle,
            };
            continue;
        }

        if let Some(start) = parse_hunk_start(line) {
            close_header(&cursor, &mut events);
            cursor = match cursor {
                Cursor::Idle => Cursor::Idle,
                Cursor::Header { path, .. } | Cursor::Hunk { path, .. } => Cursor::Hunk {
                    path,
                    next_line: start,
                },
            };
            continue;
        }

        match &mut cursor {
            Cursor::Idle => {}
            Cursor::Header { path, deleted } => {
                if line.starts_with("deleted file mode") {
                    *deleted = true;
                } else if let Some(target) = line.strip_prefix("rename to ") {
                    *path = unquote_path(target);
                } else if let Some(target) = line.strip_prefix("+++ ") {
                    let target = target.strip_suffix('\t').unwrap_or(target);
                    if target != NULL_PATH {
                        *path = unquote_path(target);
                    }
                }
            }
            Cursor::Hunk { path, next_line } => {
                if line.starts_with('\\') {
                    // "\ No newline at end of file"
                    continue;
                }
                if let Some(added) = line.strip_prefix('+') {
                    events.push(DiffEvent::Added(AddedLine {
                        path: path.clone(),
                        line: *next_line,
                        text: added.to_string(),
                    }));
                    *next_line += 1;
                } else if !line.starts_with('-') {
                    *next_line += 1;
                }
            }
        }
    }

    close_header(&cursor, &mut events);
    events
}

/// A path as git prints it after `rename to` or `+++`, C-quoted or bare.
fn unquote_path(s: &str) -> String {
    match s.strip_prefix('"') {
        Some(_) => read_quoted(s.as_bytes(), 1).0,
        None => s.to_string(),
    }
}

/// New-side start line of a hunk header, if `line` is one.
pub fn parse_hunk_start(line: &str) -> Option<usize> {
    HUNK_HEADER_RE
        .as_ref()?
        .captures(line)
        .and_then(|caps| caps.name("start"))
        .and_then(|m| m.as_str().parse().ok())
}

/// New-side path from a `diff --git <old> <new>` header.
///
/// Paths containing unusual characters are C-quoted by git
/// (`"caf\303\251.txt"`); those escapes are decoded so the returned path is
/// the real one.
pub fn parse_diff_header(line: &str) -> Option<String> {
    let rest = line.strip_prefix(DIFF_HEADER_PREFIX)?;
    let words = split_git_words(rest);

    if words.len() == 2 {
        return words.into_iter().nth(1);
    }

    // Unquoted paths with spaces: "<p> <p>" when old and new are identical.
    if !rest.contains('"') && rest.len() % 2 == 1 {
        let mid = rest.len() / 2;
        if rest.is_char_boundary(mid)
            && rest.as_bytes()[mid] == b' '
            && rest[..mid] == rest[mid + 1..]
        {
            return Some(rest[mid + 1..].to_string());
        }
    }

    words.into_iter().last()
}

/// Split on spaces, honouring git's double-quoted C-style escapes.
fn split_git_words(s: &str) -> Vec<String> {
    let bytes = s.as_bytes();
    let mut words = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b' ' {
            i += 1;
            continue;
        }

        if bytes[i] == b'"' {
            let (word, next) = read_quoted(bytes, i + 1);
            words.push(word);
            i = next;
        } else {
            let start = i;
            while i < bytes.len() && bytes[i] != b' ' {
                i += 1;
            }
            words.push(String::from_utf8_lossy(&bytes[start..i]).into_owned());
        }
    }

    words
}

/// Read a quoted word starting after the opening quote. Returns the decoded
/// word and the index just past the closing quote.
fn read_quoted(bytes: &[u8], mut i: usize) -> (String, usize) {
    let mut out: Vec<u8> = Vec::new();

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i += 1;
                break;
            }
            b'\\' if i + 1 < bytes.len() => {
                let esc = bytes[i + 1];
                i += 2;
                match esc {
                    b'a' => out.push(0x07),
                    b'b' => out.push(0x08),
                    b't' => out.push(b'\t'),
                    b'n' => out.push(b'\n'),
                    b'v' => out.push(0x0B),
                    b'f' => out.push(0x0C),
                    b'r' => out.push(b'\r'),
                    b'0'..=b'7' => {
                        let mut value = u32::from(esc - b'0');
                        let mut digits = 1;
                        while digits < 3 && i < bytes.len() && (b'0'..=b'7').contains(&bytes[i]) {
                            value = value * 8 + u32::from(bytes[i] - b'0');
                            i += 1;
                            digits += 1;
                        }
                        out.push((value & 0xFF) as u8);
                    }
                    other => out.push(other),
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    (String::from_utf8_lossy(&out).into_owned(), i)
}
