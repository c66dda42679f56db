//! Scanner Tokens
//!
//! Data extracted from a single template line. The scanner only recognizes
//! shapes; deciding whether a token is legal is the validation layer's job.

/// A `%...%` expression found on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionToken {
    /// Text between the delimiters, untrimmed.
    pub body: String,
    /// Byte offset of the opening `%` in the line.
    pub column: usize,
}

/// How a tag is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagForm {
    /// `<wr-name ...>`
    Open,
    /// `</wr-name>`
    Close,
    /// `<wr-name .../>`
    SelfClose,
}

/// A `<wr-*>` tag found on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    /// Full tag name, e.g. "wr-if".
    pub name: String,
    pub form: TagForm,
    /// Raw text between the tag name and the closing delimiter. Empty for
    /// close tags.
    pub attributes: String,
    /// Byte offset of the `<` in the line.
    pub column: usize,
}

/// Columns of the template comment markers found on one line, one list per
/// marker literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMarkers {
    /// `<wr-->`
    pub opens: Vec<usize>,
    /// `</wr-->`
    pub closes: Vec<usize>,
    /// `<wr--comment>`
    pub legacy_opens: Vec<usize>,
    /// `</wr--comment>`
    pub legacy_closes: Vec<usize>,
}

impl CommentMarkers {
    pub fn is_empty(&self) -> bool {
        self.opens.is_empty()
            && self.closes.is_empty()
            && self.legacy_opens.is_empty()
            && self.legacy_closes.is_empty()
    }
}

/// Classification of `<wr-` text that did not scan as a tag or a comment
/// marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefectKind {
    /// No `>` outside quotes between the tag start and the end of the line.
    MissingClose,
    /// A `<wr--` prefix that is not one of the comment markers.
    InvalidComment,
    /// Terminated by `>` but not parseable as a tag.
    MalformedTag,
}

/// A piece of `<wr-` text the scanner could not turn into a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanDefect {
    pub kind: DefectKind,
    /// Byte offset of the `<` in the line.
    pub column: usize,
}

/// Everything the scanner extracted from one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedLine {
    /// `%...%` expressions, left to right.
    pub expressions: Vec<ExpressionToken>,
    /// Tags in document order.
    pub tags: Vec<TagToken>,
    pub comments: CommentMarkers,
    pub defects: Vec<ScanDefect>,
    /// Column of the last `%` when the line holds an odd number of them,
    /// after HTML comments are blanked.
    pub stray_percent: Option<usize>,
}

impl ScannedLine {
    /// True when the line holds nothing the validator cares about.
    pub fn is_plain(&self) -> bool {
        self.expressions.is_empty()
            && self.tags.is_empty()
            && self.comments.is_empty()
            && self.defects.is_empty()
            && self.stray_percent.is_none()
    }
}
