//! Command-line interface implementation for tmpl.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::TEMPLATES_DIR_ENV;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for tmpl.
#[derive(Parser, Debug)]
#[command(author, version, about = "tmpl: generate projects from YAML template specs", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the template specs (default: ~/.tmpl/templates)
    #[arg(long, global = true, value_name = "DIR", env = TEMPLATES_DIR_ENV)]
    pub templates_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the templates in the store
    Ls {
        /// Also print each template's default variables
        #[arg(long)]
        vars: bool,
    },

    /// Create a new template from an example spec
    New {
        /// Template name
        name: String,

        /// Open the new template in your editor
        #[arg(short, long)]
        edit: bool,
    },

    /// Generate a project from a template
    #[command(alias = "generate")]
    Gen {
        /// Template name; picked interactively when omitted
        #[arg(value_name = "TEMPLATE")]
        name: Option<String>,

        /// Variable overrides as key=value pairs
        #[arg(value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Directory where the project is generated
        #[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".")]
        output: PathBuf,

        /// Read variable overrides from stdin as a JSON object
        #[arg(short, long)]
        stdin: bool,
    },

    /// Open a template in your editor
    Edit {
        /// Template name
        name: String,
    },

    /// Delete templates
    Rm {
        /// Templates to delete
        #[arg(required = true)]
        names: Vec<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Copy a template
    Cp {
        source: String,
        dest: String,

        /// Overwrite the destination without asking
        #[arg(short, long)]
        yes: bool,
    },
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
