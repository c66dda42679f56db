//! Element Registry
//!
//! Compile-time knowledge about the WebRelease2 template language: the set of
//! known elements, their attribute requirements, their nesting constraints,
//! and the fixed word lists shared by the validators.

pub mod spec;
pub mod table;

pub use spec::{ElementKind, ElementSpec};
pub use table::{
    is_reserved_keyword, lookup, CONDITION_FUNCTIONS, CONDITION_OPERATORS, RESERVED_KEYWORDS,
};
