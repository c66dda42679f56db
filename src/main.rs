use std::process::ExitCode;

use anyhow::Result;
use log::debug;

use wrlint::config::{Config, OutputFormat};
use wrlint::report;
use wrlint::validation::{validate_file_with_options, ValidatorOptions};

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("wrlint: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Validate every file named on the command line. Returns whether all of
/// them came back clean.
fn run() -> Result<bool> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let options = ValidatorOptions {
        content_model: config.strict_children,
    };

    let mut clean = true;
    for path in &config.files {
        debug!("validating {}", path.display());
        let findings = validate_file_with_options(path, &options);
        if !findings.is_empty() {
            clean = false;
        }
        match config.format {
            OutputFormat::Text => {
                if !config.quiet {
                    print!("{}", report::render_text(path, &findings));
                }
                println!("{}", report::render_summary(path, &findings));
            }
            OutputFormat::Json => {
                println!("{}", report::render_json(path, &findings));
            }
        }
    }
    Ok(clean)
}
