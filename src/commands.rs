//! Subcommand implementations.
//! Each command works on a template store and writes its report to `out`,
//! so the binary passes stdout and tests pass a buffer.

use crate::cli::Command;
use crate::constants::BLANK_SPEC;
use crate::editor;
use crate::error::Result;
use crate::prompt::{pick_template, Prompter};
use crate::store::Store;
use crate::vars::{self, VariableMap};
use log::{debug, warn};
use std::io::Write;
use std::path::Path;

/// Dispatches a parsed subcommand.
pub fn run<W: Write>(
    command: Command,
    store: &Store,
    prompt: &dyn Prompter,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Ls { vars } => list(store, vars, out),
        Command::New { name, edit } => new(store, &name, edit, out),
        Command::Gen { name, overrides, output, stdin } => {
            let answers = if stdin {
                vars::load_from_reader(std::io::stdin().lock())?
            } else {
                VariableMap::new()
            };
            generate(store, prompt, name, overrides, answers, &output, out)
        }
        Command::Edit { name } => editor::open(store.path_of(&name)?),
        Command::Rm { names, yes } => remove(store, prompt, &names, yes, out),
        Command::Cp { source, dest, yes } => copy(store, prompt, &source, &dest, yes, out),
    }
}

/// Lists template names, optionally with their default variables.
pub fn list<W: Write>(store: &Store, with_vars: bool, out: &mut W) -> Result<()> {
    let names = store.names()?;
    if names.is_empty() {
        writeln!(
            out,
            "You don't have any templates yet, create one with \"tmpl new <template name>\"."
        )?;
        return Ok(());
    }

    if !with_vars {
        for name in names {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    for name in names {
        match store.read_spec(&name) {
            Ok(spec) => {
                writeln!(out, "{name:<width$}\t{}", vars::describe(&spec.variables))?
            }
            Err(e) => writeln!(out, "{name:<width$}\t(unreadable: {e})")?,
        }
    }
    Ok(())
}

/// Writes the example spec under `name`, then optionally opens it.
pub fn new<W: Write>(store: &Store, name: &str, edit: bool, out: &mut W) -> Result<()> {
    let path = store.write_new(name, BLANK_SPEC)?;
    writeln!(out, "Created {}", path.display())?;
    writeln!(out, "Generate it in the current directory with: tmpl gen {name}")?;
    if edit {
        editor::open(&path)?;
    }
    Ok(())
}

/// Generates the template `name` into `output`.
///
/// Without a name the user picks one. Overrides apply on top of the spec's
/// variables: first `answers` (stdin), then the `key=value` arguments.
pub fn generate<W: Write>(
    store: &Store,
    prompt: &dyn Prompter,
    name: Option<String>,
    mut overrides: Vec<String>,
    answers: VariableMap,
    output: &Path,
    out: &mut W,
) -> Result<()> {
    // `tmpl gen key=value` means no template name was given.
    let name = match name {
        Some(name) if name.contains('=') => {
            overrides.insert(0, name);
            None
        }
        name => name,
    };

    let arguments = vars::parse_key_values(&overrides)?;

    let name = match name {
        Some(name) => name,
        None => pick_template(prompt, &store.names()?)?,
    };

    let mut spec = store.read_spec(&name)?;
    spec.merge_variables(&vars::merge(&answers, &arguments));

    std::fs::create_dir_all(output)?;
    debug!("Generating '{}' into '{}'", name, output.display());
    spec.build(output)?;

    writeln!(out, "Template generation completed successfully in {}.", output.display())?;
    Ok(())
}

/// Deletes every named template; a failure is reported and the rest go on.
pub fn remove<W: Write>(
    store: &Store,
    prompt: &dyn Prompter,
    names: &[String],
    yes: bool,
    out: &mut W,
) -> Result<()> {
    for name in names {
        if !prompt.confirm(yes, format!("Delete {name}?"))? {
            continue;
        }
        match store.remove(name) {
            Ok(()) => writeln!(out, "Deleted {name}")?,
            Err(e) => {
                warn!("Failed to delete {name}: {e}");
                writeln!(out, "Failed to delete {name}: {e}")?;
            }
        }
    }
    Ok(())
}

/// Copies a template, asking before overwriting an existing destination.
pub fn copy<W: Write>(
    store: &Store,
    prompt: &dyn Prompter,
    source: &str,
    dest: &str,
    yes: bool,
    out: &mut W,
) -> Result<()> {
    if store.exists(dest) && !prompt.confirm(yes, format!("{dest} exists, overwrite it?"))? {
        return Ok(());
    }
    store.copy(source, dest)?;
    writeln!(out, "Copied {source} to {dest}")?;
    Ok(())
}
