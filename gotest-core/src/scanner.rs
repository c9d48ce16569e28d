//! Discovery of top-level Go test functions.
//!
//! Parsing is delegated to the `tree-sitter-go` grammar. Only
//! `function_declaration` nodes that sit directly under the source file root
//! are considered, so methods, function literals and nested declarations never
//! match.
//!
//! The grammar accepts more than the Go compiler does: statements at file
//! level, a `package` clause in any position, several `package` clauses. The
//! top-level layout is therefore checked as well. A file is a single `package`
//! clause, then imports, then declarations, with comments anywhere.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

/// Prefix matched when no other prefix is configured.
pub const DEFAULT_FUNCTION_PREFIX: &str = "Test";

const FUNCTION_DECLARATION: &str = "function_declaration";
const PACKAGE_CLAUSE: &str = "package_clause";
const IMPORT_DECLARATION: &str = "import_declaration";
const COMMENT: &str = "comment";
const DECLARATIONS: [&str; 5] = [
    FUNCTION_DECLARATION,
    "method_declaration",
    "type_declaration",
    "const_declaration",
    "var_declaration",
];

/// Identifier of a top-level function selected for execution.
///
/// # Examples
///
/// ```
/// use gotest_core::FunctionName;
///
/// # fn main() -> Result<(), gotest_core::FunctionNameError> {
/// let name = FunctionName::new("TestAlpha")?;
/// assert_eq!(name.as_str(), "TestAlpha");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionName(String);

/// Errors returned by [`FunctionName::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FunctionNameError {
    /// The identifier was empty.
    #[error("function name must not be empty")]
    Empty,
}

impl FunctionName {
    /// Validates and wraps a function identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, FunctionNameError> {
        let value = name.into();
        if value.is_empty() {
            return Err(FunctionNameError::Empty);
        }
        Ok(Self(value))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, returning the identifier.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for FunctionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a Go source text could not be turned into a declaration list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The Go grammar could not be loaded into the parser.
    #[error("Go grammar is incompatible with the parser: {message}")]
    Grammar {
        /// Description reported by `tree-sitter`.
        message: String,
    },
    /// The parser returned no syntax tree.
    #[error("parser produced no syntax tree")]
    NoTree,
    /// The source contains a syntax error.
    #[error("syntax error at line {line}, column {column}")]
    Syntax {
        /// One-based line of the first erroneous node.
        line: usize,
        /// One-based column of the first erroneous node.
        column: usize,
    },
    /// The source lacks the mandatory `package` clause.
    #[error("missing package clause")]
    MissingPackageClause,
    /// A `package` clause follows an import or declaration.
    #[error("package clause must come first, found one at line {line}, column {column}")]
    MisplacedPackageClause {
        /// One-based line of the clause.
        line: usize,
        /// One-based column of the clause.
        column: usize,
    },
    /// A second `package` clause was found.
    #[error("duplicate package clause at line {line}, column {column}")]
    DuplicatePackageClause {
        /// One-based line of the repeated clause.
        line: usize,
        /// One-based column of the repeated clause.
        column: usize,
    },
    /// An import follows a non-import declaration.
    #[error("imports must appear before other declarations (line {line}, column {column})")]
    LateImport {
        /// One-based line of the import.
        line: usize,
        /// One-based column of the import.
        column: usize,
    },
    /// Something other than a declaration sits at file level.
    #[error("non-declaration {kind} outside function body at line {line}, column {column}")]
    UnexpectedTopLevel {
        /// Grammar node kind, such as `short_var_declaration`.
        kind: String,
        /// One-based line of the node.
        line: usize,
        /// One-based column of the node.
        column: usize,
    },
}

/// Errors raised while scanning Go source files.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The configured prefix was empty.
    #[error("function prefix must not be empty")]
    EmptyPrefix,
    /// The file could not be read as UTF-8 text.
    #[error("cannot read {path}: {source}")]
    Read {
        /// File that failed to load.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid Go.
    #[error("cannot parse {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        #[source]
        source: SourceError,
    },
    /// The file parsed but declares no function with the prefix.
    #[error("{path} doesn't contain any {prefix}* functions")]
    NoMatches {
        /// File that was scanned.
        path: Utf8PathBuf,
        /// Prefix that was searched for.
        prefix: String,
    },
}

/// Extracts prefixed top-level function names from Go sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationScanner {
    prefix: String,
}

impl Default for DeclarationScanner {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_FUNCTION_PREFIX.to_owned(),
        }
    }
}

impl DeclarationScanner {
    /// Build a scanner matching names that start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Result<Self, ScanError> {
        let value = prefix.into();
        if value.is_empty() {
            return Err(ScanError::EmptyPrefix);
        }
        Ok(Self { prefix: value })
    }

    /// Prefix this scanner matches against.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// List matching top-level function names in `source`, in declaration order.
    ///
    /// An empty list is a valid result here; [`Self::scan_file`] is where a
    /// missing match becomes an error.
    pub fn list_source(&self, source: &str) -> Result<Vec<FunctionName>, SourceError> {
        let tree = parse_go(source)?;
        let root = tree.root_node();
        if let Some(node) = first_syntax_error(root) {
            let (line, column) = position(node);
            return Err(SourceError::Syntax { line, column });
        }
        check_layout(root)?;

        let mut cursor = root.walk();
        let names = root
            .named_children(&mut cursor)
            .filter(|node| node.kind() == FUNCTION_DECLARATION)
            .filter_map(|node| self.matching_name(node, source))
            .collect();
        Ok(names)
    }

    /// Scan a single file, failing when it declares no matching function.
    pub fn scan_file(&self, path: &Utf8Path) -> Result<Vec<FunctionName>, ScanError> {
        let source = gotest_fs::read_utf8_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let names = self
            .list_source(&source)
            .map_err(|source| ScanError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if names.is_empty() {
            return Err(ScanError::NoMatches {
                path: path.to_path_buf(),
                prefix: self.prefix.clone(),
            });
        }
        debug!("{path}: found {} {}* functions", names.len(), self.prefix);
        Ok(names)
    }

    /// Scan files in order and concatenate their names.
    ///
    /// Stops at the first failing file. Duplicates across files are kept.
    pub fn scan_files<I, P>(&self, paths: I) -> Result<Vec<FunctionName>, ScanError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Utf8Path>,
    {
        let mut names = Vec::new();
        for path in paths {
            names.extend(self.scan_file(path.as_ref())?);
        }
        Ok(names)
    }

    fn matching_name(&self, declaration: Node<'_>, source: &str) -> Option<FunctionName> {
        let identifier = declaration.child_by_field_name("name")?;
        let text = identifier.utf8_text(source.as_bytes()).ok()?;
        if text.starts_with(self.prefix.as_str()) {
            FunctionName::new(text).ok()
        } else {
            None
        }
    }
}

fn parse_go(source: &str) -> Result<Tree, SourceError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|err| SourceError::Grammar {
            message: err.to_string(),
        })?;
    parser.parse(source, None).ok_or(SourceError::NoTree)
}

/// Enforce the file layout `go/parser` accepts: one leading `package` clause,
/// imports, then declarations.
fn check_layout(root: Node<'_>) -> Result<(), SourceError> {
    let mut cursor = root.walk();
    let mut seen_package = false;
    let mut seen_import = false;
    let mut seen_declaration = false;
    for node in root.named_children(&mut cursor) {
        let (line, column) = position(node);
        match node.kind() {
            COMMENT => {}
            PACKAGE_CLAUSE if seen_package => {
                return Err(SourceError::DuplicatePackageClause { line, column });
            }
            PACKAGE_CLAUSE if seen_import || seen_declaration => {
                return Err(SourceError::MisplacedPackageClause { line, column });
            }
            PACKAGE_CLAUSE => seen_package = true,
            IMPORT_DECLARATION if seen_declaration => {
                return Err(SourceError::LateImport { line, column });
            }
            IMPORT_DECLARATION => seen_import = true,
            kind if DECLARATIONS.contains(&kind) => seen_declaration = true,
            kind => {
                return Err(SourceError::UnexpectedTopLevel {
                    kind: kind.to_owned(),
                    line,
                    column,
                });
            }
        }
    }
    if seen_package {
        Ok(())
    } else {
        Err(SourceError::MissingPackageClause)
    }
}

fn position(node: Node<'_>) -> (usize, usize) {
    let point = node.start_position();
    (point.row + 1, point.column + 1)
}

fn first_syntax_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_syntax_error)
}
