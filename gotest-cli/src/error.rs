//! Error types emitted by the gotest CLI.
//!
//! Every variant ends the process with status 1; only `main` decides that.

use std::process::ExitStatus;
use std::sync::Arc;

use gotest_core::{EmptyFilterError, ScanError};
use thiserror::Error;

/// Errors emitted by the gotest CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env}); usage: gotest [-v] -run=testfile")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The `run` list held only separators or whitespace.
    #[error("no Go source files listed in {raw:?}")]
    NoSourceFiles { raw: String },
    /// Scanning a Go source file failed.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// No names reached the run filter.
    #[error(transparent)]
    EmptyFilter(#[from] EmptyFilterError),
    /// Writing the verbose command echo failed.
    #[error("failed to write command echo: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// The go tool could not be started.
    #[error("failed to start {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// Waiting on the go tool failed.
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The go tool ran but did not succeed.
    #[error("{program} test failed: {status}")]
    TestsFailed { program: String, status: ExitStatus },
}
