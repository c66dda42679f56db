//! Line Scanner
//!
//! Regex-driven extraction of WebRelease2 markup from one line of template
//! text. The scanner finds `%...%` expressions, `<wr-*>` tags in their three
//! forms, the template comment markers, and any `<wr-` text that fails to
//! scan. HTML comments that open and close on the same line are blanked out
//! with spaces first, so their contents are ignored while every byte offset
//! in the line stays valid.
//!
//! The scanner is deliberately line-local. Tags, expressions and comments
//! that span lines are the validator's problem, reported through the nesting
//! stack or as scan defects.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::tokens::{
    DefectKind, ExpressionToken, ScanDefect, ScannedLine, TagForm, TagToken,
};

/// Opens a template comment.
pub const COMMENT_OPEN: &str = "<wr-->";
/// Closes a template comment.
pub const COMMENT_CLOSE: &str = "</wr-->";
/// Long form of the comment opener, kept for older templates.
pub const LEGACY_COMMENT_OPEN: &str = "<wr--comment>";
/// Long form of the comment closer.
pub const LEGACY_COMMENT_CLOSE: &str = "</wr--comment>";

static HTML_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--.*?-->").unwrap());

static EXPRESSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%[^%]*%").unwrap());

// The attribute region accepts anything but an unquoted `>`, so quoted
// values may contain `>`, `<` and escaped quotes without ending the tag.
static SELF_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<(wr-\w+)((?:[^>"]|"(?:[^"\\]|\\.)*")*?)/>"#).unwrap());

static OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<(wr-\w+)((?:[^>"]|"(?:[^"\\]|\\.)*")*?)>"#).unwrap());

static CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</(wr-\w+)\s*>").unwrap());

static TAG_START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?wr-").unwrap());

/// Scan one line of template text.
///
/// Returns every expression, tag and comment marker on the line, in document
/// order for tags, together with any `<wr-` text that could not be scanned.
/// Columns are byte offsets into the original line.
///
/// ```
/// use wrlint::scanner::{scan_line, TagForm};
///
/// let scanned = scan_line(r#"<wr-if condition="%count% > 0">yes</wr-if>"#);
/// assert_eq!(scanned.tags.len(), 2);
/// assert_eq!(scanned.tags[0].name, "wr-if");
/// assert_eq!(scanned.tags[0].form, TagForm::Open);
/// assert_eq!(scanned.tags[1].form, TagForm::Close);
/// assert_eq!(scanned.expressions.len(), 1);
/// ```
pub fn scan_line(line: &str) -> ScannedLine {
    let masked = blank_html_comments(line);
    let masked = masked.as_ref();

    let mut scanned = ScannedLine::default();
    // Spans of everything recognized, used to suppress defect reports for
    // `<wr-` text that already belongs to a token.
    let mut covered: Vec<(usize, usize)> = Vec::new();

    for m in EXPRESSION_RE.find_iter(masked) {
        let body = &masked[m.start() + 1..m.end() - 1];
        scanned.expressions.push(ExpressionToken {
            body: body.to_string(),
            column: m.start(),
        });
        covered.push((m.start(), m.end()));
    }

    if masked.bytes().filter(|&b| b == b'%').count() % 2 == 1 {
        scanned.stray_percent = masked.rfind('%');
    }

    // The four marker literals never overlap each other, so independent
    // substring scans cannot double-count.
    for (at, _) in masked.match_indices(COMMENT_OPEN) {
        scanned.comments.opens.push(at);
        covered.push((at, at + COMMENT_OPEN.len()));
    }
    for (at, _) in masked.match_indices(COMMENT_CLOSE) {
        scanned.comments.closes.push(at);
        covered.push((at, at + COMMENT_CLOSE.len()));
    }
    for (at, _) in masked.match_indices(LEGACY_COMMENT_OPEN) {
        scanned.comments.legacy_opens.push(at);
        covered.push((at, at + LEGACY_COMMENT_OPEN.len()));
    }
    for (at, _) in masked.match_indices(LEGACY_COMMENT_CLOSE) {
        scanned.comments.legacy_closes.push(at);
        covered.push((at, at + LEGACY_COMMENT_CLOSE.len()));
    }

    // Self-closing tags first, otherwise the open pattern claims them.
    let mut tag_spans: Vec<(usize, usize)> = Vec::new();
    for caps in SELF_CLOSE_RE.captures_iter(masked) {
        if let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) {
            scanned.tags.push(TagToken {
                name: name.as_str().to_string(),
                form: TagForm::SelfClose,
                attributes: caps.get(2).map_or("", |m| m.as_str()).to_string(),
                column: whole.start(),
            });
            tag_spans.push((whole.start(), whole.end()));
        }
    }
    for caps in OPEN_RE.captures_iter(masked) {
        if let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) {
            if within_any(whole.start(), &tag_spans) {
                continue;
            }
            scanned.tags.push(TagToken {
                name: name.as_str().to_string(),
                form: TagForm::Open,
                attributes: caps.get(2).map_or("", |m| m.as_str()).to_string(),
                column: whole.start(),
            });
            tag_spans.push((whole.start(), whole.end()));
        }
    }
    for caps in CLOSE_RE.captures_iter(masked) {
        if let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) {
            if within_any(whole.start(), &tag_spans) {
                continue;
            }
            scanned.tags.push(TagToken {
                name: name.as_str().to_string(),
                form: TagForm::Close,
                attributes: String::new(),
                column: whole.start(),
            });
            tag_spans.push((whole.start(), whole.end()));
        }
    }
    scanned.tags.sort_by_key(|tag| tag.column);
    covered.extend_from_slice(&tag_spans);

    for m in TAG_START_RE.find_iter(masked) {
        let at = m.start();
        if within_any(at, &covered) {
            continue;
        }
        let rest = &masked[at..];
        let kind = if rest.starts_with("<wr--") || rest.starts_with("</wr--") {
            DefectKind::InvalidComment
        } else if !has_unquoted_gt(rest) {
            DefectKind::MissingClose
        } else {
            DefectKind::MalformedTag
        };
        scanned.defects.push(ScanDefect { kind, column: at });
    }

    scanned
}

/// Replace every complete `<!--...-->` span with spaces of the same byte
/// length. Comments that do not close on the line are left untouched.
fn blank_html_comments(line: &str) -> Cow<'_, str> {
    if !line.contains("<!--") {
        return Cow::Borrowed(line);
    }
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for m in HTML_COMMENT_RE.find_iter(line) {
        out.push_str(&line[last..m.start()]);
        for _ in 0..m.len() {
            out.push(' ');
        }
        last = m.end();
    }
    out.push_str(&line[last..]);
    Cow::Owned(out)
}

fn within_any(at: usize, spans: &[(usize, usize)]) -> bool {
    spans.iter().any(|&(start, end)| at >= start && at < end)
}

/// Scan for a `>` outside double quotes, honoring backslash escapes.
fn has_unquoted_gt(text: &str) -> bool {
    let mut in_quotes = false;
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '>' if !in_quotes => return true,
            _ => {}
        }
    }
    false
}
