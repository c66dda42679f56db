//! Configuration management for the template validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Output format selection

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How findings are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per finding, plus a per-file summary.
    Text,
    /// One JSON document per file.
    Json,
}

/// Command-line arguments for the template validator
#[derive(Debug, Parser)]
#[command(name = "wrlint")]
#[command(about = "Static validator for WebRelease2 template files")]
#[command(version)]
pub struct Args {
    /// Template files to validate
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only print the per-file summary, not individual findings
    #[arg(long)]
    pub quiet: bool,

    /// Check that wr-switch and wr-conditional hold only their branch
    /// elements
    #[arg(long)]
    pub strict_children: bool,

    /// Log level for the validator
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Files to validate, in command-line order
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub quiet: bool,
    pub strict_children: bool,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Config {
            files: args.files,
            format: args.format,
            quiet: args.quiet,
            strict_children: args.strict_children,
            log_level: args.log_level,
        })
    }
}

