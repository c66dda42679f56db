//! Attribute and Value Validation
//!
//! Parses the raw attribute text of a tag into `name="value"` pairs and
//! checks them against the element's specification: unknown names, missing
//! required attributes, and value shapes for the handful of attributes with
//! known grammar.

use std::sync::LazyLock;

use regex::Regex;

use super::finding::{Category, Finding};
use super::{is_digits, is_identifier};
use crate::registry::{self, ElementSpec};
use crate::scanner::TagToken;

static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\w-]+)\s*=\s*"((?:[^"\\]|\\.)*)""#).unwrap());

// A single quote opening a string literal, right after `(` or `,`.
static SINGLE_QUOTED_ARG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[(,]\s*'").unwrap());

static DOTTED_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*(\.[A-Za-z_]\w*)*$").unwrap());

/// Attributes whose value must not be empty or blank.
const CRITICAL_ATTRIBUTES: &[&str] = &["condition", "value", "name", "variable", "list", "string"];

/// Parse raw attribute text into `(name, value)` pairs, in order of
/// appearance. Values keep their escape sequences unprocessed.
pub(crate) fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE_RE
        .captures_iter(raw)
        .filter_map(|caps| match (caps.get(1), caps.get(2)) {
            (Some(name), Some(value)) => {
                Some((name.as_str().to_string(), value.as_str().to_string()))
            }
            _ => None,
        })
        .collect()
}

/// Check every attribute of `tag` against `spec` and append findings.
pub(crate) fn check_attributes(
    line_no: usize,
    line: &str,
    tag: &TagToken,
    spec: &ElementSpec,
    findings: &mut Vec<Finding>,
) {
    let attrs = parse_attributes(&tag.attributes);

    for (name, value) in &attrs {
        if !spec.allows_attribute(name) {
            findings.push(Finding::new(
                line_no,
                tag.column,
                Category::Attribute,
                format!("Invalid attribute '{name}' for {element}", element = spec.name),
                line,
            ));
        }
        check_value(line_no, line, tag, name, value, findings);
    }

    let missing = spec.missing_required(&attrs);
    if !missing.is_empty() {
        findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Attribute,
            format!(
                "Missing required attributes for '{element}': {list}",
                element = spec.name,
                list = missing.join(", ")
            ),
            line,
        ));
    }

    if spec.name == "wr-for" {
        check_for_sources(line_no, line, tag, &attrs, findings);
    }
}

/// Value-shape rules, keyed by attribute name.
fn check_value(
    line_no: usize,
    line: &str,
    tag: &TagToken,
    name: &str,
    value: &str,
    findings: &mut Vec<Finding>,
) {
    if CRITICAL_ATTRIBUTES.contains(&name) && value.trim().is_empty() {
        findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Attribute,
            format!("Empty {name} not allowed"),
            line,
        ));
        return;
    }

    match name {
        "condition" => check_condition(line_no, line, tag, value, findings),
        "name" | "variable" => check_binding_name(line_no, line, tag, name, value, findings),
        "times" => check_times(line_no, line, tag, value, findings),
        _ => {}
    }
}

fn check_condition(
    line_no: usize,
    line: &str,
    tag: &TagToken,
    value: &str,
    findings: &mut Vec<Finding>,
) {
    if SINGLE_QUOTED_ARG_RE.is_match(value) {
        findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Syntax,
            "Single-quoted string in condition: use double quotes",
            line,
        ));
    }
    if !condition_shape_ok(value) {
        findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Syntax,
            format!("Invalid condition syntax: '{value}'"),
            line,
        ));
    }
}

/// Whether a condition value has a recognized shape.
///
/// Recognized shapes are comparisons, calls of the built-in predicates, and
/// dotted references. Template-defined functions make arbitrary condition
/// text legal, so unrecognized shapes are accepted as well; the earlier
/// branches keep the recognized grammar documented and cheap to tighten.
fn condition_shape_ok(value: &str) -> bool {
    if registry::CONDITION_OPERATORS
        .iter()
        .any(|op| value.contains(op))
    {
        return true;
    }
    if registry::CONDITION_FUNCTIONS
        .iter()
        .any(|name| value.contains(name))
    {
        return true;
    }
    if DOTTED_NAME_RE.is_match(value.trim()) {
        return true;
    }
    true
}

fn check_binding_name(
    line_no: usize,
    line: &str,
    tag: &TagToken,
    attr: &str,
    value: &str,
    findings: &mut Vec<Finding>,
) {
    let word = value.trim();
    if !is_identifier(word) {
        findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Attribute,
            format!("Attribute '{attr}' must be an identifier, got '{value}'"),
            line,
        ));
    } else if registry::is_reserved_keyword(word) {
        findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Attribute,
            format!("Reserved keyword '{word}' cannot be used as {attr}"),
            line,
        ));
    }
}

fn check_times(
    line_no: usize,
    line: &str,
    tag: &TagToken,
    value: &str,
    findings: &mut Vec<Finding>,
) {
    let digits = value.trim();
    if !is_digits(digits) {
        findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Attribute,
            format!("Attribute 'times' must be a positive integer, got '{value}'"),
            line,
        ));
        return;
    }
    match digits.parse::<u64>() {
        Ok(0) => findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Attribute,
            "Attribute 'times' must be greater than zero",
            line,
        )),
        Ok(_) => {}
        // All digits, so the only parse failure left is overflow.
        Err(_) => findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Attribute,
            format!("Attribute 'times' exceeds the supported range, got '{value}'"),
            line,
        )),
    }
}

/// `wr-for` iterates over exactly one source.
fn check_for_sources(
    line_no: usize,
    line: &str,
    tag: &TagToken,
    attrs: &[(String, String)],
    findings: &mut Vec<Finding>,
) {
    let present: Vec<&str> = ["list", "string", "times"]
        .into_iter()
        .filter(|name| attrs.iter().any(|(k, _)| k == name))
        .collect();
    match present.len() {
        0 => findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Attribute,
            "wr-for must have one of: list, string, times",
            line,
        )),
        1 => {}
        _ => findings.push(Finding::new(
            line_no,
            tag.column,
            Category::Attribute,
            format!("wr-for cannot combine: {}", present.join(", ")),
            line,
        )),
    }
}
