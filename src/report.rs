//! Report Rendering
//!
//! Turns findings into the console and JSON output of the command-line
//! tool. Rendering is separated from printing so it can be tested as plain
//! strings.

use std::fmt::Write as _;
use std::path::Path;

use crate::validation::Finding;

/// Render findings in the line-per-finding text format:
/// `path:line:column: [Category] message`, each followed by the offending
/// line, indented.
pub fn render_text(path: &Path, findings: &[Finding]) -> String {
    let mut out = String::new();
    for finding in findings {
        let _ = writeln!(
            out,
            "{}:{}:{}: [{}] {}",
            path.display(),
            finding.line,
            finding.column,
            finding.category,
            finding.message
        );
        let context = finding.context.trim();
        if !context.is_empty() {
            let _ = writeln!(out, "    {context}");
        }
    }
    out
}

/// One-line verdict for a file.
pub fn render_summary(path: &Path, findings: &[Finding]) -> String {
    if findings.is_empty() {
        format!("{}: OK", path.display())
    } else {
        format!("{}: {} finding(s)", path.display(), findings.len())
    }
}

/// Render one file's findings as a JSON document.
pub fn render_json(path: &Path, findings: &[Finding]) -> String {
    let doc = serde_json::json!({
        "file": path.display().to_string(),
        "finding_count": findings.len(),
        "findings": findings,
    });
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}
