//! Context Validation
//!
//! Some elements are only legal inside a particular ancestor: `wr-case`
//! inside `wr-switch`, `wr-break` inside `wr-for`, and so on. The check
//! walks the whole open-element stack, so any enclosing frame satisfies the
//! requirement, not just the immediate parent.

use super::engine::StackEntry;
use super::finding::{Category, Finding};
use crate::registry::ElementSpec;
use crate::scanner::TagToken;

pub(crate) fn check_context(
    line_no: usize,
    line: &str,
    tag: &TagToken,
    spec: &ElementSpec,
    stack: &[StackEntry],
    findings: &mut Vec<Finding>,
) {
    if let Some(ancestor) = spec.required_ancestor {
        if !stack.iter().any(|entry| entry.name == ancestor) {
            findings.push(Finding::new(
                line_no,
                tag.column,
                Category::Structure,
                format!(
                    "{element} can only be used inside {ancestor}",
                    element = spec.name
                ),
                line,
            ));
        }
    }
}
