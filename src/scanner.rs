//! Line scanner and the finding model
//!
//! A [`ScanUnit`] is one block of text tagged with its [`Origin`] and the
//! line number it starts at. [`scan_unit`] walks it line by line and
//! character by character, asking the classifier about every scalar value and
//! emitting a [`Finding`] for each forbidden one.

use std::fmt;

use crate::classify::{classify_char, verdict};

/// Rendered context longer than this is truncated.
pub const MAX_RENDERED_LEN: usize = 240;

const TRUNCATION_MARKER: &str = "...";

// ============================================================================
// Origins
// ============================================================================

/// Where a piece of scanned text came from.
///
/// Real files render as their bare repository-relative path; every synthetic
/// origin renders with a bracketed namespace so the two never collide in a
/// typed comparison, and only collide textually if a file is literally named
/// like `pr[title]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Contents of a file in the working tree or a diff
    File(String),
    /// The file path string itself
    PathName(String),
    /// A commit message
    Commit(String),
    /// A commit id as supplied by an event payload or the API
    CommitId(String),
    /// Pull request title
    PrTitle,
    /// Pull request body
    PrBody,
    /// Pull request commit list (advisory only)
    PrCommits,
    /// The event payload as a whole (errors only)
    Event,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path),
            Self::PathName(path) => write!(f, "path[{}]", path),
            Self::Commit(sha) => write!(f, "commit[{}]", sha),
            Self::CommitId(sha) => write!(f, "commit-id[{}]", sha),
            Self::PrTitle => write!(f, "pr[title]"),
            Self::PrBody => write!(f, "pr[body]"),
            Self::PrCommits => write!(f, "pr[commits]"),
            Self::Event => write!(f, "github[event]"),
        }
    }
}

// ============================================================================
// Findings
// ============================================================================

/// One occurrence of a forbidden character (or an advisory/error record).
///
/// `line` and `column` are 1-based and relative to the origin's own
/// coordinate space. Findings are never merged or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub origin: Origin,
    pub line: usize,
    pub column: usize,
    pub codepoint: u32,
    pub name: String,
    pub category: String,
    /// Escaped, bounded rendering of the whole source line
    pub context: String,
}

impl Finding {
    /// A synthetic finding that reports an operational condition rather than
    /// a character: codepoint 0 at 1:1.
    pub fn notice(origin: Origin, name: &str, category: &str, message: &str) -> Self {
        Self {
            origin,
            line: 1,
            column: 1,
            codepoint: 0,
            name: name.to_string(),
            category: category.to_string(),
            context: message.to_string(),
        }
    }

    /// Logical path as printed in reports
    pub fn path(&self) -> String {
        self.origin.to_string()
    }
}

// ============================================================================
// Scan units
// ============================================================================

/// How the text of a unit maps onto lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Split on every line terminator, numbering from `start_line`
    Block,
    /// Already a single physical line (a diff row); never split
    SingleLine,
}

/// Text waiting to be scanned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanUnit {
    pub origin: Origin,
    pub text: String,
    pub start_line: usize,
    pub layout: Layout,
}

impl ScanUnit {
    /// A multi-line block starting at line 1
    pub fn block(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
            start_line: 1,
            layout: Layout::Block,
        }
    }

    /// A single physical line at `line`
    pub fn line(origin: Origin, line: usize, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
            start_line: line,
            layout: Layout::SingleLine,
        }
    }

    /// The path string of a file, scanned as its own unit
    pub fn path_name(path: &str) -> Self {
        Self::block(Origin::PathName(path.to_string()), path)
    }

    /// A commit id string that did not come from local git
    pub fn commit_id(sha: &str) -> Self {
        Self::block(Origin::CommitId(sha.to_string()), sha)
    }
}

/// Scan one unit.
pub fn scan_unit(unit: &ScanUnit) -> Vec<Finding> {
    match unit.layout {
        Layout::Block => scan_text(&unit.origin, &unit.text, unit.start_line),
        Layout::SingleLine => scan_line(&unit.origin, unit.start_line, &unit.text),
    }
}

/// Scan a block of text, numbering lines from `start_line`.
pub fn scan_text(origin: &Origin, text: &str, start_line: usize) -> Vec<Finding> {
    logical_lines(text)
        .into_iter()
        .enumerate()
        .flat_map(|(i, line)| scan_line(origin, start_line + i, line))
        .collect()
}

/// Scan a single line, reporting 1-based columns in scalar values.
pub fn scan_line(origin: &Origin, line_no: usize, line: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut rendered: Option<String> = None;

    for (idx, ch) in line.chars().enumerate() {
        if !verdict(ch).is_forbidden() {
            continue;
        }
        let class = classify_char(ch);
        let context = rendered.get_or_insert_with(|| render_escaped(line)).clone();
        findings.push(Finding {
            origin: origin.clone(),
            line: line_no,
            column: idx + 1,
            codepoint: class.codepoint,
            name: class.name,
            category: class.category.to_string(),
            context,
        });
    }

    findings
}

/// Split text into logical lines.
///
/// Terminators are `\n`, `\r\n`, `\r`, VT, FF, FS, GS, RS, NEL, U+2028 and
/// U+2029. A trailing terminator does not open an extra empty line.
pub fn logical_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_terminator(ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        let mut end = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next_idx, '\n')) = chars.peek() {
                chars.next();
                end = next_idx + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_terminator(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r'
            | '\u{0B}'
            | '\u{0C}'
            | '\u{1C}'
            | '\u{1D}'
            | '\u{1E}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

// ============================================================================
// Rendering
// ============================================================================

/// Render text so it is safe to print to a terminal.
///
/// Printable ASCII is kept (backslash doubled); tab, LF and CR become `\t`
/// `\n` `\r`; anything else below U+0100 becomes `\xNN`, the rest of the BMP
/// `\uNNNN` and astral planes `\UNNNNNNNN`. Output beyond
/// [`MAX_RENDERED_LEN`] characters is cut and marked with `...`.
pub fn render_escaped(text: &str) -> String {
    render_escaped_bounded(text, MAX_RENDERED_LEN)
}

/// [`render_escaped`] with an explicit bound.
pub fn render_escaped_bounded(text: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ' '..='~' => out.push(ch),
            c if (c as u32) < 0x100 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if (c as u32) < 0x10000 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }

    // Output is pure ASCII here, so byte length equals character count.
    if out.len() > max_len {
        let keep = max_len.saturating_sub(TRUNCATION_MARKER.len());
        out.truncate(keep);
        out.push_str(TRUNCATION_MARKER);
    }
    out
}
