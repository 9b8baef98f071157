//! Core library entry for the `strictdeps` CLI.
//!
//! Merges the per-unit dependency manifests a mixed-language compilation
//! produces and enforces strict-deps / unused-deps policy on the result.

pub mod adapters;
pub mod alias;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod enforce;
pub mod error;
pub mod labels;
pub mod manifest;
pub mod ports;
pub mod store;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}
