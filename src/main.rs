//! Comptoir CLI

use std::process::ExitCode;

use crate::config::AppConfig;

mod cli;
mod config;
mod observability;

/// Comptoir CLI entry point
pub fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            // Prints help and version to stdout, usage errors to stderr
            _ = err.print();

            return ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2));
        }
    };

    if let Err(err) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {err}");
        }

        return ExitCode::FAILURE;
    }

    match cli::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(?err, "command failed");

            #[expect(
                clippy::print_stderr,
                reason = "user-facing error message for the failed command"
            )]
            {
                eprintln!("Error: {err}");
            }

            ExitCode::FAILURE
        }
    }
}
