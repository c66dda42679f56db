//! WebRelease2 Template Validator
//!
//! A static checker for WebRelease2 template markup: `%expression%`
//! interpolations and the `wr-*` control elements (`wr-if`, `wr-for`,
//! `wr-switch` and friends).
//!
//! This library provides:
//! - Line-oriented scanning of template markup
//! - Expression, attribute, nesting and context validation
//! - A registry of element definitions
//! - Text and JSON reporting for the command-line tool
//!
//! Validation is purely lexical and structural. Nothing is executed and no
//! site configuration is consulted, so a clean report means the template is
//! well-formed, not that it renders correctly.

pub mod config;
pub mod registry;
pub mod report;
pub mod scanner;
pub mod validation;

pub use config::Config;
pub use registry::{ElementKind, ElementSpec};
pub use scanner::{scan_line, ScannedLine};
pub use validation::{
    validate, validate_file, validate_file_with_options, validate_with_options, Category, Finding,
    ValidatorOptions,
};
