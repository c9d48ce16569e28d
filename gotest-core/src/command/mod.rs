//! Assembly of the `go test` argument list.

use camino::Utf8PathBuf;
use log::debug;
use rand::Rng;

use crate::filter::{EmptyFilterError, RunFilter};
use crate::scanner::FunctionName;
use crate::shuffle::{shuffle_names, time_seeded_rng};

/// Subcommand passed to the go tool.
pub const TEST_SUBCOMMAND: &str = "test";

/// Settings forwarded to `go test`.
///
/// Built once from resolved configuration and passed by reference to the
/// assembler; nothing reads process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestOptions {
    /// Forward `-v`.
    pub verbose: bool,
    /// Build tags forwarded as `-tags=<value>` when non-empty.
    pub tags: Option<String>,
    /// Forward `-race`.
    pub race: bool,
    /// Parallelism forwarded as `-p=<n>` when non-zero.
    pub parallelism: u32,
    /// Coverage profile path forwarded as `-coverprofile=<path>`.
    pub coverprofile: Option<Utf8PathBuf>,
    /// Coverage package pattern forwarded as `-coverpkg=<value>`.
    pub coverpkg: Option<String>,
    /// Randomise the discovered test order before building the filter.
    pub shuffle: bool,
    /// Extra arguments forwarded verbatim ahead of the run filter.
    pub passthrough: Vec<String>,
}

/// Build the ordered `go test` arguments for `filter`.
///
/// The result is `test`, the translated flags, the pass-through arguments and
/// finally the `-run=` filter.
///
/// # Examples
///
/// ```
/// use gotest_core::{RunFilter, TestOptions, assemble_args};
///
/// # fn main() -> Result<(), gotest_core::EmptyFilterError> {
/// let filter = RunFilter::from_names(&["TestX", "TestY"])?;
/// let options = TestOptions { verbose: true, ..TestOptions::default() };
/// assert_eq!(
///     assemble_args(&filter, &options),
///     vec!["test", "-v", "-run=TestX$|TestY$"],
/// );
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn assemble_args(filter: &RunFilter, options: &TestOptions) -> Vec<String> {
    let mut args = vec![TEST_SUBCOMMAND.to_owned()];
    if options.verbose {
        args.push("-v".to_owned());
    }
    if let Some(tags) = non_empty(options.tags.as_deref()) {
        args.push(format!("-tags={tags}"));
    }
    if options.race {
        args.push("-race".to_owned());
    }
    if options.parallelism != 0 {
        args.push(format!("-p={}", options.parallelism));
    }
    if let Some(profile) = non_empty(options.coverprofile.as_ref().map(|path| path.as_str())) {
        args.push(format!("-coverprofile={profile}"));
    }
    if let Some(packages) = non_empty(options.coverpkg.as_deref()) {
        args.push(format!("-coverpkg={packages}"));
    }
    args.extend(options.passthrough.iter().cloned());
    args.push(filter.to_arg());
    args
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|inner| !inner.is_empty())
}

/// Everything needed to launch one `go test` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPlan {
    names: Vec<FunctionName>,
    filter: RunFilter,
    args: Vec<String>,
}

impl TestPlan {
    /// Plan a run, shuffling with a time-seeded source when requested.
    pub fn build(
        names: Vec<FunctionName>,
        options: &TestOptions,
    ) -> Result<Self, EmptyFilterError> {
        Self::build_with_rng(names, options, &mut time_seeded_rng())
    }

    /// Plan a run, drawing any shuffle from `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(
        mut names: Vec<FunctionName>,
        options: &TestOptions,
        rng: &mut R,
    ) -> Result<Self, EmptyFilterError> {
        if options.shuffle {
            shuffle_names(&mut names, rng);
        }
        let filter = RunFilter::from_names(&names)?;
        let args = assemble_args(&filter, options);
        debug!("assembled go {}", args.join(" "));
        Ok(Self {
            names,
            filter,
            args,
        })
    }

    /// Function names in the order they appear in the filter.
    #[must_use]
    pub fn names(&self) -> &[FunctionName] {
        &self.names
    }

    /// The run filter selecting [`Self::names`].
    #[must_use]
    pub const fn filter(&self) -> &RunFilter {
        &self.filter
    }

    /// Arguments for the go tool, starting with `test`.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Consume the plan, returning the arguments.
    #[must_use]
    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}
