//! Expression Checker
//!
//! Validates the body of a `%...%` expression. Expressions fall into three
//! informal shapes: a function call (`format(price)`), a reference chain
//! (`member.address[0].city`), or a bare name. Bare names are always
//! accepted; the other shapes get structural checks. Anything the checker
//! does not recognize passes, because templates can reference fields and
//! functions this tool knows nothing about.

use std::sync::LazyLock;

use regex::Regex;

use super::finding::{Category, Finding};
use super::{is_digits, is_identifier};
use crate::scanner::ExpressionToken;

static INDEX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").unwrap());

/// Check one expression and append any findings.
pub(crate) fn check_expression(
    line_no: usize,
    line: &str,
    token: &ExpressionToken,
    findings: &mut Vec<Finding>,
) {
    let body = token.body.trim();
    if body.is_empty() {
        findings.push(Finding::new(
            line_no,
            token.column,
            Category::Syntax,
            "Empty expression",
            line,
        ));
        return;
    }

    if let Some(name) = leading_call(body) {
        if !is_identifier(name) {
            findings.push(Finding::new(
                line_no,
                token.column,
                Category::Function,
                format!("Invalid function name: '{name}'"),
                line,
            ));
        }
        check_parens(line_no, line, token, body, findings);
        // Function arguments may be arbitrary expressions; the reference
        // checks below would misread them.
        return;
    }

    if body.contains('.') || body.contains('[') {
        check_reference(line_no, line, token, body, findings);
    }
}

/// The leading `name(` of a call, if the body starts with one.
///
/// The name is matched loosely so that ill-formed names like `9lives(` are
/// still recognized as calls and reported, rather than sliding into the
/// reference checks.
fn leading_call(body: &str) -> Option<&str> {
    let open = body.find('(')?;
    let name = body[..open].trim_end();
    if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        Some(name)
    } else {
        None
    }
}

fn check_parens(
    line_no: usize,
    line: &str,
    token: &ExpressionToken,
    body: &str,
    findings: &mut Vec<Finding>,
) {
    let mut depth: i32 = 0;
    let mut closed_early = false;
    for ch in body.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    closed_early = true;
                    break;
                }
            }
            _ => {}
        }
    }
    if closed_early || depth != 0 {
        findings.push(Finding::new(
            line_no,
            token.column,
            Category::Function,
            format!("Unbalanced parentheses in expression: '{body}'"),
            line,
        ));
    }
}

fn check_reference(
    line_no: usize,
    line: &str,
    token: &ExpressionToken,
    body: &str,
    findings: &mut Vec<Finding>,
) {
    for caps in INDEX_RE.captures_iter(body) {
        let raw = caps.get(1).map_or("", |m| m.as_str());
        let index = raw.trim();
        if !is_digits(index) && !is_identifier(index) {
            findings.push(Finding::new(
                line_no,
                token.column,
                Category::Reference,
                format!("Invalid array index: '[{raw}]'"),
                line,
            ));
        }
    }

    for raw_segment in body.split('.') {
        let segment = strip_indexes(raw_segment).trim();
        // Empty segments come from adjacent dots or leading array access;
        // segments holding `(` are nested calls. Both are left alone.
        if segment.is_empty() || segment.contains('(') {
            continue;
        }
        if !is_identifier(segment) {
            findings.push(Finding::new(
                line_no,
                token.column,
                Category::Reference,
                format!("Invalid reference element: '{segment}'"),
                line,
            ));
        }
    }
}

/// Remove trailing `[...]` groups from a segment, so `lines[2]` checks as
/// `lines`.
fn strip_indexes(segment: &str) -> &str {
    let mut out = segment.trim_end();
    while out.ends_with(']') {
        match out.rfind('[') {
            Some(pos) => out = out[..pos].trim_end(),
            None => break,
        }
    }
    out
}
