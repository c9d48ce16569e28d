//! Entry point for the gotest binary.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use env_logger::Env;
use gotest_cli::CliError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    match gotest_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        // Clap renders help, version and usage errors with its own exit codes.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("gotest: {err}");
            ExitCode::FAILURE
        }
    }
}
