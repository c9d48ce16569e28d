//! Core logic for the `gotest` wrapper.
//!
//! The crate turns Go source files into a `go test` invocation in two steps:
//! [`DeclarationScanner`] collects top-level functions whose names carry a
//! prefix, then [`TestPlan`] builds the `-run=` filter and the argument list
//! from those names plus [`TestOptions`]. Nothing here spawns processes.

#![forbid(unsafe_code)]

pub mod command;
pub mod filter;
pub mod scanner;
pub mod shuffle;

pub use command::{TEST_SUBCOMMAND, TestOptions, TestPlan, assemble_args};
pub use filter::{EmptyFilterError, RUN_FLAG_PREFIX, RunFilter};
pub use scanner::{
    DEFAULT_FUNCTION_PREFIX, DeclarationScanner, FunctionName, FunctionNameError, ScanError,
    SourceError,
};
pub use shuffle::{shuffle_names, time_seeded_rng};
