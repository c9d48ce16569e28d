//! Process launcher coverage against real executables.

#![cfg(unix)]

use super::*;
use crate::launch::check_status;
use log::{Level, LevelFilter, Log, Metadata, Record};
use rstest::rstest;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::{Mutex, Once};

/// Collects every log record emitted by the test binary.
struct CapturedRecords(Mutex<Vec<(Level, String)>>);

impl Log for CapturedRecords {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.0
            .lock()
            .expect("log buffer")
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURED: CapturedRecords = CapturedRecords(Mutex::new(Vec::new()));

fn captured_logs() -> &'static CapturedRecords {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        if log::set_logger(&CAPTURED).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    &CAPTURED
}

impl CapturedRecords {
    fn levels_mentioning(&self, needle: &str) -> Vec<Level> {
        self.0
            .lock()
            .expect("log buffer")
            .iter()
            .filter(|(_, message)| message.contains(needle))
            .map(|(level, _)| *level)
            .collect()
    }
}

#[rstest]
fn successful_status_passes() {
    assert!(check_status("go", ExitStatus::from_raw(0)).is_ok());
}

#[rstest]
fn failing_status_is_an_error() {
    let err = check_status("go", ExitStatus::from_raw(1 << 8)).expect_err("exit 1");
    match err {
        CliError::TestsFailed { program, status } => {
            assert_eq!(program, "go");
            assert_eq!(status.code(), Some(1));
        }
        other => panic!("expected TestsFailed, found {other:?}"),
    }
}

#[rstest]
fn failing_status_leaves_the_diagnostic_to_main() {
    let logs = captured_logs();
    let program = "go-quiet-failure";
    check_status(program, ExitStatus::from_raw(1 << 8)).expect_err("exit 1");
    let levels = logs.levels_mentioning(program);
    assert_eq!(levels, vec![Level::Debug]);
}

#[rstest]
fn child_success_is_reported() {
    ProcessLauncher
        .launch("true", &["test".to_owned()])
        .expect("true should succeed");
}

#[rstest]
fn child_failure_is_propagated() {
    let err = ProcessLauncher
        .launch("false", &["test".to_owned()])
        .expect_err("false should fail");
    assert!(matches!(err, CliError::TestsFailed { .. }));
}

#[rstest]
fn missing_binary_is_a_launch_error() {
    let err = ProcessLauncher
        .launch("gotest-missing-go-binary", &[])
        .expect_err("binary should not exist");
    match err {
        CliError::Launch { program, source } => {
            assert_eq!(program, "gotest-missing-go-binary");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Launch, found {other:?}"),
    }
}
