//! Facade crate for the gotest wrapper.
//!
//! This crate re-exports the scanning and planning API of `gotest-core`. The
//! `gotest` binary itself lives in `gotest-cli`.

#![forbid(unsafe_code)]

pub use gotest_core::{
    DEFAULT_FUNCTION_PREFIX, DeclarationScanner, EmptyFilterError, FunctionName,
    FunctionNameError, RUN_FLAG_PREFIX, RunFilter, ScanError, SourceError, TEST_SUBCOMMAND,
    TestOptions, TestPlan, assemble_args, shuffle_names, time_seeded_rng,
};
