//! Command-line front end for `provider_docs_check`.
//!
//! The binary walks a provider checkout, loads optional TOML configuration and the provider
//! schema, runs the rule engine, and renders the report. Process concerns stay here so the
//! library remains free of filesystem walking and flag handling.

pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod schema;
pub mod walk;

use std::process::ExitCode;

use crate::error::CliResult;

/// Print the error, if any, and map the outcome to a process exit code.
pub fn exit_code(result: CliResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
