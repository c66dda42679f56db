//! Validation Engine
//!
//! Drives a single pass over the template: each line is scanned, every
//! token is checked, and structural state is carried across lines in an
//! open-element stack. The engine never stops early; it collects every
//! finding it can and reports them sorted by position, so repeated runs over
//! the same text produce identical output.
//!
//! Error recovery is deliberately simple. A mismatched closing tag is
//! reported but does not pop the stack, so a single stray tag tends to
//! produce a cluster of findings rather than silently resynchronizing. An
//! unknown element is reported at its open tag only; its close tag is
//! skipped.

use std::fs;
use std::path::Path;

use log::debug;

use super::attributes;
use super::context;
use super::expression;
use super::finding::{Category, Finding};
use crate::registry;
use crate::scanner::{self, scan_line, DefectKind, ScannedLine, TagForm, TagToken};

/// Optional checks for [`validate_with_options`].
#[derive(Debug, Clone, Default)]
pub struct ValidatorOptions {
    /// Require `wr-switch` to hold only `wr-case`/`wr-default` children and
    /// `wr-conditional` only `wr-cond`. Off by default: markup between
    /// branches is common in existing templates and is ignored at
    /// generation time.
    pub content_model: bool,
}

/// One frame of the open-element stack.
#[derive(Debug, Clone)]
pub(crate) struct StackEntry {
    pub name: String,
    /// Line the element was opened on.
    pub line: usize,
    /// Direct children with their lines, tracked only for the content-model
    /// check.
    children: Vec<(String, usize)>,
}

impl StackEntry {
    pub(crate) fn new(name: String, line: usize) -> Self {
        Self {
            name,
            line,
            children: Vec::new(),
        }
    }
}

/// Validate template text with default options.
///
/// Findings come back sorted by line, then column. An empty result means
/// the template passed every check.
///
/// ```
/// use wrlint::validate;
///
/// let findings = validate(r#"<wr-if condition="visible">shown</wr-if>"#);
/// assert!(findings.is_empty());
///
/// let findings = validate("<wr-bogus>");
/// assert_eq!(findings.len(), 1);
/// ```
pub fn validate(content: &str) -> Vec<Finding> {
    validate_with_options(content, &ValidatorOptions::default())
}

/// Validate template text with explicit options.
pub fn validate_with_options(content: &str, options: &ValidatorOptions) -> Vec<Finding> {
    ValidationRun::new(content, options).run()
}

/// Validate a template file.
///
/// An unreadable file yields a single document-level Syntax finding at line
/// 0 rather than an error, so callers can treat every path uniformly.
pub fn validate_file(path: &Path) -> Vec<Finding> {
    validate_file_with_options(path, &ValidatorOptions::default())
}

/// Validate a template file with explicit options.
pub fn validate_file_with_options(path: &Path, options: &ValidatorOptions) -> Vec<Finding> {
    match fs::read_to_string(path) {
        Ok(content) => validate_with_options(&content, options),
        Err(err) => vec![Finding::new(
            0,
            0,
            Category::Syntax,
            format!("Failed to read file: {err}"),
            "",
        )],
    }
}

struct ValidationRun<'a> {
    options: &'a ValidatorOptions,
    lines: Vec<&'a str>,
    stack: Vec<StackEntry>,
    findings: Vec<Finding>,
}

impl<'a> ValidationRun<'a> {
    fn new(content: &'a str, options: &'a ValidatorOptions) -> Self {
        Self {
            options,
            lines: content.lines().collect(),
            stack: Vec::new(),
            findings: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Finding> {
        for index in 0..self.lines.len() {
            let line = self.lines[index];
            self.check_line(index + 1, line);
        }
        while let Some(entry) = self.stack.pop() {
            let context_line = self.line_text(entry.line);
            self.findings.push(Finding::new(
                entry.line,
                0,
                Category::Structure,
                format!("Unclosed element: '{}'", entry.name),
                context_line,
            ));
        }
        debug!(
            "validated {} lines, {} findings",
            self.lines.len(),
            self.findings.len()
        );
        self.findings.sort_by_key(|finding| (finding.line, finding.column));
        self.findings
    }

    fn line_text(&self, line_no: usize) -> &'a str {
        if line_no == 0 {
            ""
        } else {
            self.lines.get(line_no - 1).copied().unwrap_or("")
        }
    }

    fn check_line(&mut self, line_no: usize, line: &str) {
        let scanned = scan_line(line);
        if scanned.is_plain() {
            return;
        }

        for token in &scanned.expressions {
            expression::check_expression(line_no, line, token, &mut self.findings);
        }
        if let Some(column) = scanned.stray_percent {
            self.findings.push(Finding::new(
                line_no,
                column,
                Category::Syntax,
                "Unmatched '%' delimiter",
                line,
            ));
        }

        self.check_comments(line_no, line, &scanned);

        for defect in &scanned.defects {
            let message = match defect.kind {
                DefectKind::MissingClose => "Malformed tag: missing '>' before end of line",
                DefectKind::InvalidComment => {
                    "Invalid comment syntax: expected '<wr-->' or '<wr--comment>'"
                }
                DefectKind::MalformedTag => "Malformed wr- tag",
            };
            self.findings.push(Finding::new(
                line_no,
                defect.column,
                Category::Syntax,
                message,
                line,
            ));
        }

        // Tags arrive in document order, so same-line nesting works.
        for tag in &scanned.tags {
            match tag.form {
                TagForm::Open => self.handle_open(line_no, line, tag),
                TagForm::SelfClose => self.handle_self_close(line_no, line, tag),
                TagForm::Close => self.handle_close(line_no, line, tag),
            }
        }
    }

    fn check_comments(&mut self, line_no: usize, line: &str, scanned: &ScannedLine) {
        let markers = &scanned.comments;
        if markers.opens.len() != markers.closes.len() {
            let column = first_marker_column(&markers.opens, &markers.closes);
            self.findings.push(Finding::new(
                line_no,
                column,
                Category::Syntax,
                format!(
                    "Unbalanced template comment: '{}' and '{}' must pair on the same line",
                    scanner::COMMENT_OPEN,
                    scanner::COMMENT_CLOSE
                ),
                line,
            ));
        }
        if markers.legacy_opens.len() != markers.legacy_closes.len() {
            let column = first_marker_column(&markers.legacy_opens, &markers.legacy_closes);
            self.findings.push(Finding::new(
                line_no,
                column,
                Category::Syntax,
                format!(
                    "Unbalanced template comment: '{}' and '{}' must pair on the same line",
                    scanner::LEGACY_COMMENT_OPEN,
                    scanner::LEGACY_COMMENT_CLOSE
                ),
                line,
            ));
        }
    }

    fn handle_open(&mut self, line_no: usize, line: &str, tag: &TagToken) {
        let Some(spec) = registry::lookup(&tag.name) else {
            self.findings.push(Finding::new(
                line_no,
                tag.column,
                Category::Syntax,
                format!("Unknown WebRelease2 element: {}", tag.name),
                line,
            ));
            return;
        };
        attributes::check_attributes(line_no, line, tag, spec, &mut self.findings);
        context::check_context(line_no, line, tag, spec, &self.stack, &mut self.findings);
        self.record_child(&tag.name, line_no);
        // A self-closing-only element written without the slash still never
        // takes a body, so it does not enter the stack.
        if spec.is_container() {
            self.stack.push(StackEntry::new(tag.name.clone(), line_no));
        }
    }

    fn handle_self_close(&mut self, line_no: usize, line: &str, tag: &TagToken) {
        let Some(spec) = registry::lookup(&tag.name) else {
            self.findings.push(Finding::new(
                line_no,
                tag.column,
                Category::Syntax,
                format!("Unknown WebRelease2 element: {}", tag.name),
                line,
            ));
            return;
        };
        self.record_child(&tag.name, line_no);
        if spec.is_container() {
            self.findings.push(Finding::new(
                line_no,
                tag.column,
                Category::Structure,
                format!("{} should not be self-closing", tag.name),
                line,
            ));
            return;
        }
        attributes::check_attributes(line_no, line, tag, spec, &mut self.findings);
        context::check_context(line_no, line, tag, spec, &self.stack, &mut self.findings);
    }

    fn handle_close(&mut self, line_no: usize, line: &str, tag: &TagToken) {
        let Some(spec) = registry::lookup(&tag.name) else {
            // Unknown names are reported at their open tag; a close with no
            // matching open is skipped rather than guessed at.
            return;
        };
        if spec.is_self_closing() {
            self.findings.push(Finding::new(
                line_no,
                tag.column,
                Category::Structure,
                format!("{} should not have closing tag", tag.name),
                line,
            ));
            return;
        }
        match self.stack.last() {
            Some(top) if top.name == tag.name => {
                if let Some(entry) = self.stack.pop() {
                    self.check_content_model(&entry);
                }
            }
            Some(top) => {
                let message = format!(
                    "Mismatched closing tag: expected '</{}>', found '</{}>'",
                    top.name, tag.name
                );
                self.findings.push(Finding::new(
                    line_no,
                    tag.column,
                    Category::Structure,
                    message,
                    line,
                ));
            }
            None => {
                self.findings.push(Finding::new(
                    line_no,
                    tag.column,
                    Category::Structure,
                    format!("Unexpected closing tag: '</{}>'", tag.name),
                    line,
                ));
            }
        }
    }

    fn record_child(&mut self, name: &str, line_no: usize) {
        if !self.options.content_model {
            return;
        }
        if let Some(top) = self.stack.last_mut() {
            top.children.push((name.to_string(), line_no));
        }
    }

    fn check_content_model(&mut self, entry: &StackEntry) {
        if !self.options.content_model {
            return;
        }
        let allowed: &[&str] = match entry.name.as_str() {
            "wr-switch" => &["wr-case", "wr-default"],
            "wr-conditional" => &["wr-cond"],
            _ => return,
        };
        for (child, child_line) in &entry.children {
            if !allowed.contains(&child.as_str()) {
                let context_line = self.line_text(*child_line);
                self.findings.push(Finding::new(
                    *child_line,
                    0,
                    Category::Structure,
                    format!(
                        "Invalid child element for {}: {} (allowed: {})",
                        entry.name,
                        child,
                        allowed.join(", ")
                    ),
                    context_line,
                ));
            }
        }
    }
}

fn first_marker_column(opens: &[usize], closes: &[usize]) -> usize {
    opens
        .first()
        .or_else(|| closes.first())
        .copied()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_template_passes() {
        let template = concat!(
            "<html>\n",
            "<body>\n",
            r#"<wr-variable name="greeting" value="hello"/>"#,
            "\n",
            r#"<wr-if condition="count > 0">"#,
            "\n",
            "  <wr-then>%greeting%, %member.name%</wr-then>\n",
            "  <wr-else>nobody here</wr-else>\n",
            "</wr-if>\n",
            "</body>\n",
            "</html>\n",
        );
        assert_eq!(validate(template), vec![]);
    }

    #[test]
    fn test_missing_condition_is_the_only_finding() {
        let findings = validate("<wr-if><wr-then>%x%</wr-then></wr-if>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Attribute);
        assert_eq!(
            findings[0].message,
            "Missing required attributes for 'wr-if': condition"
        );
    }

    #[test]
    fn test_unknown_element_reported_once() {
        let findings = validate("<wr-bogus></wr-bogus>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Syntax);
        assert_eq!(findings[0].message, "Unknown WebRelease2 element: wr-bogus");
    }

    #[test]
    fn test_unknown_element_inside_known_structure() {
        let findings = validate(r#"<wr-if condition="x"><wr-bogus></wr-bogus></wr-if>"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Unknown WebRelease2 element: wr-bogus");
    }

    #[test]
    fn test_case_outside_switch() {
        let findings = validate(r#"<wr-case value="1">x</wr-case>"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Structure);
        assert_eq!(findings[0].message, "wr-case can only be used inside wr-switch");
    }

    #[test]
    fn test_switch_with_cases_passes() {
        let template = concat!(
            r#"<wr-switch value="member.rank">"#,
            "\n",
            r#"  <wr-case value="gold">Gold</wr-case>"#,
            "\n",
            "  <wr-default>Standard</wr-default>\n",
            "</wr-switch>\n",
        );
        assert_eq!(validate(template), vec![]);
    }

    #[test]
    fn test_unclosed_element_reported_at_open_line() {
        let findings = validate("<html>\n<wr-if condition=\"x\">\n</html>\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
        assert_eq!(findings[0].column, 0);
        assert_eq!(findings[0].message, "Unclosed element: 'wr-if'");
        assert_eq!(findings[0].context, "<wr-if condition=\"x\">");
    }

    #[test]
    fn test_every_unclosed_element_reported() {
        let findings = validate("<wr-if condition=\"x\">\n<wr-then>\n");
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].message, "Unclosed element: 'wr-if'");
        assert_eq!(findings[1].message, "Unclosed element: 'wr-then'");
    }

    #[test]
    fn test_mismatched_close_does_not_pop() {
        let findings = validate("<wr-if condition=\"x\">\n<wr-then>\n</wr-if>\n");
        // The stray close is reported and both frames stay open.
        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].message, "Unclosed element: 'wr-if'");
        assert_eq!(findings[1].message, "Unclosed element: 'wr-then'");
        assert_eq!(
            findings[2].message,
            "Mismatched closing tag: expected '</wr-then>', found '</wr-if>'"
        );
        assert_eq!(findings[2].line, 3);
    }

    #[test]
    fn test_unexpected_close() {
        let findings = validate("</wr-if>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Unexpected closing tag: '</wr-if>'");
    }

    #[test]
    fn test_unknown_close_alone_is_ignored() {
        // No finding for an unknown close, whether or not anything else
        // was open earlier on.
        assert_eq!(validate("</wr-bogus>"), vec![]);
        assert_eq!(
            validate("<wr-if condition=\"x\">y</wr-if>\n</wr-bogus>\n"),
            vec![]
        );
    }

    #[test]
    fn test_close_of_self_closing_element() {
        let findings = validate("<wr-variable name=\"x\" value=\"1\"/></wr-variable>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "wr-variable should not have closing tag");
    }

    #[test]
    fn test_container_must_not_self_close() {
        let findings = validate("<wr-if/>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Structure);
        assert_eq!(findings[0].message, "wr-if should not be self-closing");
    }

    #[test]
    fn test_bare_open_of_self_closing_element() {
        // Written without the slash; attributes are still validated and no
        // close tag is expected.
        assert_eq!(validate("<wr-variable name=\"x\" value=\"1\">"), vec![]);
        let findings = validate("<wr-variable>");
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Missing required attributes for 'wr-variable': name"
        );
    }

    #[test]
    fn test_break_outside_for() {
        let findings = validate("<wr-break/>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "wr-break can only be used inside wr-for");
    }

    #[test]
    fn test_break_inside_for_passes() {
        let template = concat!(
            r#"<wr-for variable="i" times="10">"#,
            "\n",
            r#"  <wr-break condition="i > 5"/>"#,
            "\n",
            "</wr-for>\n",
        );
        assert_eq!(validate(template), vec![]);
    }

    #[test]
    fn test_return_with_value_passes() {
        assert_eq!(validate(r#"<wr-return value="status.code"/>"#), vec![]);
        assert_eq!(validate("<wr-return/>"), vec![]);
    }

    #[test]
    fn test_same_line_nesting_leaves_no_residue() {
        let line = r#"<wr-if condition="a">x</wr-if><wr-if condition="b">y</wr-if>"#;
        assert_eq!(validate(line), vec![]);
        let repeated = format!("{line}\n{line}\n{line}\n");
        assert_eq!(validate(&repeated), vec![]);
    }

    #[test]
    fn test_unbalanced_call_reports_once() {
        let findings = validate("%foo(%");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Function);
    }

    #[test]
    fn test_stray_percent() {
        let findings = validate("50% of members\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Syntax);
        assert_eq!(findings[0].message, "Unmatched '%' delimiter");
        assert_eq!(findings[0].column, 2);
    }

    #[test]
    fn test_expression_and_stray_percent_together() {
        let findings = validate("%a% %");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, 4);
    }

    #[test]
    fn test_comment_must_close_on_same_line() {
        let findings = validate("<wr--> left open\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Syntax);
        assert!(findings[0].message.contains("must pair on the same line"));
    }

    #[test]
    fn test_paired_comment_hides_nothing_from_scanner() {
        // Template comments do not mask their body; broken markup inside a
        // comment is still reported.
        let findings = validate("<wr--> <wr-bogus> </wr-->");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Unknown WebRelease2 element: wr-bogus");
    }

    #[test]
    fn test_legacy_comment_pairing() {
        assert_eq!(validate("<wr--comment> note </wr--comment>"), vec![]);
        let findings = validate("<wr--comment> note");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("wr--comment"));
    }

    #[test]
    fn test_html_comment_suppresses_checks() {
        assert_eq!(validate("<!-- <wr-bogus> 50% off -->"), vec![]);
    }

    #[test]
    fn test_malformed_tag_missing_gt() {
        let findings = validate("<wr-if condition=\"x\"\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Syntax);
        assert_eq!(findings[0].message, "Malformed tag: missing '>' before end of line");
    }

    #[test]
    fn test_findings_sorted_by_position() {
        let template = "<wr-bogus>\n%a% <wr-bogus>\n";
        let findings = validate(template);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].line < findings[1].line);

        let same_line = validate("<wr-bogus> <wr-bogus>");
        assert_eq!(same_line.len(), 2);
        assert!(same_line[0].column < same_line[1].column);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let template = "<wr-if>\n<wr-case value=\"1\"></wr-case>\n%a(%\n";
        let first = validate(template);
        let second = validate(template);
        assert_eq!(first, second);
    }

    #[test]
    fn test_finding_context_carries_line_text() {
        let findings = validate("text before <wr-bogus> after");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].context, "text before <wr-bogus> after");
        assert_eq!(findings[0].column, 12);
    }

    #[test]
    fn test_content_model_off_by_default() {
        let template = "<wr-switch value=\"x\">\n<wr-if condition=\"y\"></wr-if>\n</wr-switch>\n";
        assert_eq!(validate(template), vec![]);
    }

    #[test]
    fn test_content_model_flags_foreign_children() {
        let template = "<wr-switch value=\"x\">\n<wr-if condition=\"y\"></wr-if>\n</wr-switch>\n";
        let options = ValidatorOptions {
            content_model: true,
        };
        let findings = validate_with_options(template, &options);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
        assert_eq!(
            findings[0].message,
            "Invalid child element for wr-switch: wr-if (allowed: wr-case, wr-default)"
        );
    }

    #[test]
    fn test_content_model_accepts_proper_children() {
        let template = concat!(
            "<wr-conditional>\n",
            "<wr-cond condition=\"a\">first</wr-cond>\n",
            "<wr-cond condition=\"b\">second</wr-cond>\n",
            "</wr-conditional>\n",
        );
        let options = ValidatorOptions {
            content_model: true,
        };
        assert_eq!(validate_with_options(template, &options), vec![]);
    }

    #[test]
    fn test_validate_file_unreadable() {
        let findings = validate_file(Path::new("/nonexistent/never.wrt"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 0);
        assert_eq!(findings[0].column, 0);
        assert_eq!(findings[0].category, Category::Syntax);
        assert!(findings[0].message.starts_with("Failed to read file"));
        assert_eq!(findings[0].context, "");
    }

    #[test]
    fn test_validate_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.wrt");
        std::fs::write(&path, "<wr-if condition=\"x\">ok</wr-if>\n").unwrap();
        assert_eq!(validate_file(&path), vec![]);
    }
}
