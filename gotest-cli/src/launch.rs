//! Launching the go tool as a child process.

use std::process::{Command, ExitStatus, Stdio};

use log::{debug, info};

use crate::CliError;

/// Default go tool executable.
pub const DEFAULT_GO_BINARY: &str = "go";

/// Runs the assembled command for the current invocation.
pub trait TestLauncher {
    /// Run `program` with `args` and report failure as an error.
    fn launch(&self, program: &str, args: &[String]) -> Result<(), CliError>;
}

/// Spawns a real child process sharing this process's standard streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl TestLauncher for ProcessLauncher {
    fn launch(&self, program: &str, args: &[String]) -> Result<(), CliError> {
        info!("running {program} {}", args.join(" "));
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| CliError::Launch {
                program: program.to_owned(),
                source,
            })?;
        let status = child.wait().map_err(|source| CliError::Wait {
            program: program.to_owned(),
            source,
        })?;
        check_status(program, status)
    }
}

pub(crate) fn check_status(program: &str, status: ExitStatus) -> Result<(), CliError> {
    if status.success() {
        return Ok(());
    }
    debug!("{program} exited unsuccessfully: {status}");
    Err(CliError::TestsFailed {
        program: program.to_owned(),
        status,
    })
}
