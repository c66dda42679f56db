//! Findings
//!
//! The diagnostic record produced by validation. Field names in the JSON
//! form are part of the output contract and consumed by external tooling.

use std::fmt;

use serde::Serialize;

/// Broad classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Category {
    /// Malformed markup: stray `%`, bad comments, unknown elements,
    /// unterminated tags.
    Syntax,
    /// Attribute problems: unknown names, missing required attributes,
    /// rejected values.
    Attribute,
    /// Ill-formed `object.member` or `array[index]` expressions.
    Reference,
    /// Nesting problems: mismatched, unexpected or missing closing tags,
    /// elements outside their required ancestor.
    Structure,
    /// Function-call problems inside expressions.
    Function,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Syntax => "Syntax",
            Category::Attribute => "Attribute",
            Category::Reference => "Reference",
            Category::Structure => "Structure",
            Category::Function => "Function",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem found in a template.
///
/// Lines are 1-based; column is a 0-based byte offset into the line and
/// best-effort. A finding about the document as a whole (an unreadable
/// file) uses line 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    #[serde(rename = "line_number")]
    pub line: usize,
    pub column: usize,
    #[serde(rename = "error_type")]
    pub category: Category,
    pub message: String,
    /// The offending line's text, for display. Empty for document-level
    /// findings.
    pub context: String,
}

impl Finding {
    pub fn new(
        line: usize,
        column: usize,
        category: Category,
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            category,
            message: message.into(),
            context: context.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}:{}: [{}] {}",
            self.line, self.column, self.category, self.message
        )
    }
}
