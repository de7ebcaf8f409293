//! logsift -- firewall/system log tallies and filtered reports
//!
//! Entry point: parse arguments, initialise logging, resolve the log file,
//! dispatch to the command handler and map errors to exit codes.

mod cli;
mod commands;
mod error;
mod input;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::logging::LoggingConfig;
use crate::output::OutputWriter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: cli.log_level.clone(),
        format: cli.log_format,
    };
    if let Err(e) = logging::init_tracing(&logging) {
        eprintln!("Error: {e:#}");
        return ExitCode::from(CliError::Config(e.to_string()).exit_code());
    }

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let CliError::Usage(_) = e {
                println!("{e}");
            } else {
                tracing::error!(error = %e, "command failed");
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        None => {
            let log_path = input::resolve_input_path(cli.run.log_file.as_deref())?;
            commands::run::execute(cli.run, &log_path, &writer)
        }
        Some(Commands::Search(args)) => {
            let log_path = input::resolve_input_path(args.log_file.as_deref())?;
            commands::search::execute(args, &log_path, &writer)
        }
        Some(Commands::Tally(args)) => {
            let log_path = input::resolve_input_path(args.log_file.as_deref())?;
            commands::tally::execute(args, &log_path, &writer)
        }
    }
}
