//! Command-line interface for the gotest wrapper.
//!
//! `gotest -run=a_test.go,b_test.go` scans the listed files for `Test*`
//! functions and runs `go test -run=TestA$|TestB$` with the remaining flags
//! forwarded.
#![forbid(unsafe_code)]

use std::ffi::OsString;
use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use gotest_core::{DEFAULT_FUNCTION_PREFIX, DeclarationScanner, TestOptions, TestPlan};
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

mod error;
mod go_flags;
mod launch;

pub use error::CliError;
pub use launch::{DEFAULT_GO_BINARY, ProcessLauncher, TestLauncher};

use go_flags::normalise_go_style_flags;

const ARG_RUN: &str = "run";
const ARG_TAGS: &str = "tags";
const ARG_SHUFFLE: &str = "shuffle";
const ARG_RACE: &str = "race";
const ARG_COVERPROFILE: &str = "coverprofile";
const ARG_COVERPKG: &str = "coverpkg";
const ARG_PREFIX: &str = "prefix";
const ARG_GO: &str = "go";
const ENV_RUN: &str = "GOTEST_CMDS_GOTEST_RUN";
const RUN_SEPARATOR: char = ',';

/// Run gotest with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let args = parse_args(std::env::args_os())?;
    let config = resolve_config(args)?;
    let mut stdout = std::io::stdout().lock();
    run_with(&config, &ProcessLauncher, &mut stdout)
}

fn parse_args<I, T>(argv: I) -> Result<GotestArgs, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    GotestArgs::try_parse_from(normalise_go_style_flags(argv)).map_err(CliError::ArgumentParsing)
}

fn resolve_config(args: GotestArgs) -> Result<GotestConfig, CliError> {
    args.into_config()
}

fn run_with(
    config: &GotestConfig,
    launcher: &dyn TestLauncher,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let plan = plan_tests(config)?;
    if config.options.verbose {
        echo_command(writer, &config.go_binary, plan.args())?;
    }
    launcher.launch(&config.go_binary, plan.args())
}

fn plan_tests(config: &GotestConfig) -> Result<TestPlan, CliError> {
    let scanner = DeclarationScanner::new(config.prefix.as_str())?;
    let names = scanner.scan_files(&config.sources)?;
    debug!(
        "discovered {} functions across {} files",
        names.len(),
        config.sources.len()
    );
    Ok(TestPlan::build(names, &config.options)?)
}

fn echo_command(writer: &mut dyn Write, program: &str, args: &[String]) -> Result<(), CliError> {
    writeln!(writer, "gotest version {}", env!("CARGO_PKG_VERSION"))
        .and_then(|()| writeln!(writer, "{program} {}\n", args.join(" ")))
        .and_then(|()| writer.flush())
        .map_err(CliError::WriteOutput)
}

/// Top-level gotest arguments.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "gotest",
    about = "Run the Test* functions declared in specific Go files",
    long_about = "Scan Go test files for top-level Test* functions and run \
                 exactly those with `go test -run`. Single-dash spellings \
                 such as -run=a_test.go are accepted. Arguments after the \
                 flags (or after --) are forwarded to go test.",
    version
)]
#[ortho_config(prefix = "GOTEST")]
struct GotestArgs {
    /// Go test files to scan, separated by commas.
    #[arg(long = ARG_RUN, value_name = "files")]
    #[serde(default)]
    run: Option<String>,
    /// Forward -v to go test and echo the command before running it.
    #[arg(short = 'v', long = "verbose")]
    #[serde(default)]
    verbose: bool,
    /// Build tags forwarded as -tags.
    #[arg(long = ARG_TAGS, value_name = "tags")]
    #[serde(default)]
    tags: Option<String>,
    /// Run the discovered tests in random order.
    #[arg(long = ARG_SHUFFLE)]
    #[serde(default)]
    shuffle: bool,
    /// Forward -race to go test.
    #[arg(long = ARG_RACE)]
    #[serde(default)]
    race: bool,
    /// Parallelism forwarded as -p when non-zero.
    #[arg(short = 'p', value_name = "n")]
    #[serde(default)]
    parallel: Option<u32>,
    /// Coverage profile forwarded as -coverprofile.
    #[arg(long = ARG_COVERPROFILE, value_name = "path")]
    #[serde(default)]
    coverprofile: Option<Utf8PathBuf>,
    /// Coverage packages forwarded as -coverpkg.
    #[arg(long = ARG_COVERPKG, value_name = "packages")]
    #[serde(default)]
    coverpkg: Option<String>,
    /// Function name prefix to select (defaults to Test).
    #[arg(long = ARG_PREFIX, value_name = "prefix")]
    #[serde(default)]
    prefix: Option<String>,
    /// Go executable to run (defaults to go).
    #[arg(long = ARG_GO, value_name = "path")]
    #[serde(default)]
    go: Option<String>,
    /// Arguments forwarded verbatim to go test, ahead of the run filter.
    #[arg(value_name = "args", trailing_var_arg = true, allow_hyphen_values = true)]
    #[serde(default)]
    passthrough: Vec<String>,
}

impl GotestArgs {
    fn into_config(self) -> Result<GotestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GotestConfig::try_from(merged)
    }
}

/// Resolved configuration for one gotest invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GotestConfig {
    /// Files to scan, in command-line order.
    sources: Vec<Utf8PathBuf>,
    /// Function name prefix.
    prefix: String,
    /// Go executable.
    go_binary: String,
    /// Flags forwarded to go test.
    options: TestOptions,
}

impl TryFrom<GotestArgs> for GotestConfig {
    type Error = CliError;

    fn try_from(args: GotestArgs) -> Result<Self, Self::Error> {
        let raw = args.run.ok_or(CliError::MissingArgument {
            field: ARG_RUN,
            env: ENV_RUN,
        })?;
        let sources = split_sources(&raw);
        if sources.is_empty() {
            return Err(CliError::NoSourceFiles { raw });
        }
        let options = TestOptions {
            verbose: args.verbose,
            tags: args.tags,
            race: args.race,
            parallelism: args.parallel.unwrap_or_default(),
            coverprofile: args.coverprofile,
            coverpkg: args.coverpkg,
            shuffle: args.shuffle,
            passthrough: args.passthrough,
        };
        Ok(Self {
            sources,
            prefix: args
                .prefix
                .unwrap_or_else(|| DEFAULT_FUNCTION_PREFIX.to_owned()),
            go_binary: args.go.unwrap_or_else(|| DEFAULT_GO_BINARY.to_owned()),
            options,
        })
    }
}

fn split_sources(raw: &str) -> Vec<Utf8PathBuf> {
    raw.split(RUN_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(Utf8PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests;
