//! Validation
//!
//! The checks that turn scanned tokens into findings. [`engine`] owns the
//! document pass and the open-element stack; [`expression`], [`attributes`]
//! and [`context`] hold the per-token rules; [`finding`] defines the
//! diagnostic record.

pub mod attributes;
pub mod context;
pub mod engine;
pub mod expression;
pub mod finding;

pub use engine::{
    validate, validate_file, validate_file_with_options, validate_with_options, ValidatorOptions,
};
pub use finding::{Category, Finding};

/// A bare identifier: a letter or underscore, then letters, digits or
/// underscores.
pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

pub(crate) fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
