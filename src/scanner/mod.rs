//! Line Scanner
//!
//! Turns raw template lines into tokens for the validation layer. See
//! [`line::scan_line`] for the entry point.

pub mod line;
pub mod tokens;

pub use line::{
    scan_line, COMMENT_CLOSE, COMMENT_OPEN, LEGACY_COMMENT_CLOSE, LEGACY_COMMENT_OPEN,
};
pub use tokens::{
    CommentMarkers, DefectKind, ExpressionToken, ScanDefect, ScannedLine, TagForm, TagToken,
};
