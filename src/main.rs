//! Binary entrypoint for the `strictdeps` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // STRICTDEPS_CONFIG may come from a .env file.
    let _ = dotenvy::dotenv();
    match strictdeps::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
