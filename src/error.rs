//! Error handling for tmpl.
//! Defines the crate error type, the aggregate build error and the
//! per-node failure records collected while a template tree is built.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for tmpl operations.
///
/// Everything except [`Error::BuildError`] is fatal and stops the command
/// before any file is generated.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The spec document could not be decoded.
    #[error("Failed to parse spec: {0}.")]
    SpecParseError(#[from] serde_yaml::Error),

    /// A `key=value` argument did not contain exactly one `=`.
    #[error("Could not parse '{arg}': expected a single 'key=value' pair.")]
    KeyValueError { arg: String },

    /// Variable overrides read from stdin were not a flat JSON object.
    #[error("Failed to read variables from stdin: {0}.")]
    AnswersError(String),

    #[error("Template '{name}' does not exist, create it with \"tmpl new {name}\".")]
    TemplateDoesNotExistError { name: String },

    #[error("Template '{name}' already exists.")]
    TemplateExistsError { name: String },

    /// A template name that is not a plain file name.
    #[error("Invalid template name '{name}': {reason}.")]
    InvalidNameError { name: String, reason: String },

    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    #[error("Editor error: {0}.")]
    EditorError(String),

    /// One or more nodes of the template tree failed to build.
    #[error("{0}")]
    BuildError(#[from] BuildError),
}

/// Convenience type alias for Results with tmpl's [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The step of a node build that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Node name is not a single normal path segment.
    InvalidName,
    CreateDir,
    /// Template source is not valid MiniJinja syntax.
    Parse,
    /// Template parsed but failed while rendering.
    Execute,
    CreateFile,
    WriteFile,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailureKind::InvalidName => "invalid name",
            FailureKind::CreateDir => "failed to create directory",
            FailureKind::Parse => "template failed to parse",
            FailureKind::Execute => "template failed to render",
            FailureKind::CreateFile => "failed to create file",
            FailureKind::WriteFile => "failed to write file",
        };
        f.write_str(text)
    }
}

/// A single node failure recorded during a tree walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Path of the node that failed, joined onto the build root.
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new<P: Into<PathBuf>, M: Into<String>>(path: P, kind: FailureKind, message: M) -> Self {
        Self { path: path.into(), kind, message: message.into() }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.path.display(), self.kind, self.message)
    }
}

/// Aggregate of every failure met while building a tree, in traversal order.
///
/// Building never stops at the first failing node, so this error carries
/// all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildError {
    failures: Vec<Failure>,
}

impl BuildError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    /// Appends every failure of `other`, keeping its order.
    pub fn extend(&mut self, other: BuildError) {
        self.failures.extend(other.failures);
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Turns the collected failures into a result: `Ok` when nothing failed.
    pub fn into_result(self) -> std::result::Result<(), BuildError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Failure> for BuildError {
    fn from(failure: Failure) -> Self {
        Self { failures: vec![failure] }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} node(s) failed to build:", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n\t{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BuildError {}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
