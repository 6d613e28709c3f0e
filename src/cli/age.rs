use std::io::Write;

use clap::{Args, Subcommand};

use comptoir::storage::{AgeGate, FileStore};

use crate::cli::CliError;

#[derive(Debug, Clone, Copy, Args)]
pub(crate) struct AgeCommand {
    #[command(subcommand)]
    command: AgeSubcommand,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum AgeSubcommand {
    /// Show whether this session is verified
    Status,

    /// Confirm being 18 or over
    Verify,
}

pub(crate) fn run(
    command: AgeCommand,
    gate: &AgeGate<FileStore>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command.command {
        AgeSubcommand::Status => {
            let status = if gate.is_verified()? {
                "verified"
            } else {
                "not verified"
            };

            writeln!(out, "Age {status} for this session.")?;
        }
        AgeSubcommand::Verify => {
            gate.verify()?;

            writeln!(out, "Welcome! Age verified for this session.")?;
        }
    }

    Ok(())
}
