//! Run-filter construction for `go test -run`.

use std::fmt;

use thiserror::Error;

/// Flag prefix under which the filter expression is passed.
pub const RUN_FLAG_PREFIX: &str = "-run=";

/// Anchor appended to every name so `TestA` does not also select `TestAB`.
const NAME_ANCHOR: char = '$';
const ALTERNATION: char = '|';

/// Returned when a filter is requested for an empty name list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a run filter needs at least one function name")]
pub struct EmptyFilterError;

/// Alternation of anchored function names, e.g. `TestA$|TestB$`.
///
/// # Examples
///
/// ```
/// use gotest_core::RunFilter;
///
/// # fn main() -> Result<(), gotest_core::EmptyFilterError> {
/// let filter = RunFilter::from_names(&["TestA", "TestB"])?;
/// assert_eq!(filter.to_arg(), "-run=TestA$|TestB$");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFilter(String);

impl RunFilter {
    /// Build a filter selecting exactly `names`, in the given order.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, EmptyFilterError> {
        if names.is_empty() {
            return Err(EmptyFilterError);
        }
        let mut expression = String::new();
        for (index, name) in names.iter().enumerate() {
            if index != 0 {
                expression.push(ALTERNATION);
            }
            expression.push_str(name.as_ref());
            expression.push(NAME_ANCHOR);
        }
        Ok(Self(expression))
    }

    /// The bare expression without the flag prefix.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.0
    }

    /// Render as the `-run=` argument handed to `go test`.
    #[must_use]
    pub fn to_arg(&self) -> String {
        format!("{RUN_FLAG_PREFIX}{}", self.0)
    }
}

impl fmt::Display for RunFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
