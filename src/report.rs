//! Report rendering and exit status

use std::process::ExitCode;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::{Result, ScanError};
use crate::scanner::{render_escaped, Finding};

const OK_LINE: &str = "OK: no invisible/suspicious characters found.";
const FAIL_LINE: &str = "FAIL: invisible/suspicious characters found:";

/// Exit code for a completed scan: 0 when clean, 1 when anything was found
pub fn exit_status(findings: &[Finding]) -> ExitCode {
    if findings.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Render the full report in `format`, newline-terminated.
pub fn render(findings: &[Finding], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(findings)),
        OutputFormat::Json => render_json(findings),
    }
}

/// One report line, with no list bullet in front:
/// `<escaped-path>:<line>:<col> U+<HEX> <name> (<category>) :: <context>`
pub fn format_finding(finding: &Finding) -> String {
    format!(
        "{}:{}:{} {} {} ({}) :: {}",
        render_escaped(&finding.path()),
        finding.line,
        finding.column,
        codepoint_label(finding.codepoint),
        finding.name,
        finding.category,
        finding.context
    )
}

fn codepoint_label(codepoint: u32) -> String {
    format!("U+{:04X}", codepoint)
}

fn render_text(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return format!("{}\n", OK_LINE);
    }

    let mut out = String::new();
    out.push_str(FAIL_LINE);
    out.push('\n');
    for finding in findings {
        out.push_str(&format_finding(finding));
        out.push('\n');
    }
    out
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    status: &'static str,
    count: usize,
    findings: Vec<JsonFinding<'a>>,
}

#[derive(Serialize)]
struct JsonFinding<'a> {
    path: String,
    line: usize,
    column: usize,
    codepoint: String,
    name: &'a str,
    category: &'a str,
    context: &'a str,
}

impl<'a> From<&'a Finding> for JsonFinding<'a> {
    fn from(f: &'a Finding) -> Self {
        Self {
            path: render_escaped(&f.path()),
            line: f.line,
            column: f.column,
            codepoint: codepoint_label(f.codepoint),
            name: &f.name,
            category: &f.category,
            context: &f.context,
        }
    }
}

fn render_json(findings: &[Finding]) -> Result<String> {
    let report = JsonReport {
        status: if findings.is_empty() { "ok" } else { "fail" },
        count: findings.len(),
        findings: findings.iter().map(JsonFinding::from).collect(),
    };
    let mut json = serde_json::to_string_pretty(&report).map_err(|e| ScanError::ConfigError {
        message: format!("JSON serialization failed: {}", e),
    })?;
    json.push('\n');
    Ok(json)
}
