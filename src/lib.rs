//! tmpl generates project trees from YAML template specs.
//! A spec declares variables and a nested tree of files and directories;
//! building it renders every file with MiniJinja and writes the tree to disk.

/// Command-line interface module for the tmpl application
pub mod cli;

/// Subcommand implementations
pub mod commands;

/// Common constants, including the example spec
pub mod constants;

/// Editor invocation for `tmpl new --edit` and `tmpl edit`
pub mod editor;

/// Error types and handling for the tmpl application
pub mod error;

/// Logger setup
pub mod logger;

/// User input and interaction handling
pub mod prompt;

/// Template rendering with MiniJinja and the transform registry
pub mod renderer;

/// Spec decoding and the build entry point
pub mod spec;

/// The template store directory
pub mod store;

/// The file/directory tree and its build walk
pub mod template;

/// Template variables: merging and parsing overrides
pub mod vars;
