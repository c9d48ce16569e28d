//! Test helpers for composing Go source workspaces and fake launchers.

use super::*;
use std::cell::RefCell;
use tempfile::TempDir;

pub(super) const XY_SOURCE: &str = "package sample

import \"testing\"

func TestX(t *testing.T) {}

func helperFunc() {}

func TestY(t *testing.T) {}
";

pub(super) const Z_SOURCE: &str = "package sample

import \"testing\"

func TestZ(t *testing.T) {}

func ExampleZ() {}
";

pub(super) const HELPERS_SOURCE: &str = "package sample

func helperFunc() {}
";

/// Temporary directory holding Go sources for one test.
#[derive(Debug)]
pub(super) struct GoWorkspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl GoWorkspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).expect("write Go source");
        path
    }
}

pub(super) fn config_for(sources: Vec<Utf8PathBuf>, options: TestOptions) -> GotestConfig {
    GotestConfig {
        sources,
        prefix: DEFAULT_FUNCTION_PREFIX.to_owned(),
        go_binary: DEFAULT_GO_BINARY.to_owned(),
        options,
    }
}

/// Launcher that records invocations instead of spawning processes.
#[derive(Debug, Default)]
pub(super) struct RecordingLauncher {
    calls: RefCell<Vec<(String, Vec<String>)>>,
    refuse: bool,
}

impl RecordingLauncher {
    pub(super) fn refusing() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            refuse: true,
        }
    }

    pub(super) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.borrow().clone()
    }

    pub(super) fn single_call(&self) -> (String, Vec<String>) {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one launch, got {calls:?}");
        calls.into_iter().next().expect("one call")
    }
}

impl TestLauncher for RecordingLauncher {
    fn launch(&self, program: &str, args: &[String]) -> Result<(), CliError> {
        self.calls
            .borrow_mut()
            .push((program.to_owned(), args.to_vec()));
        if self.refuse {
            return Err(CliError::Launch {
                program: program.to_owned(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            });
        }
        Ok(())
    }
}
