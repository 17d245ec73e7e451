//! tmpl's main application entry point.
//! Parses the command line, sets up logging and the template store, then
//! hands over to the subcommand.

use tmpl::{
    cli::{get_args, Args},
    commands,
    error::{default_error_handler, Result},
    logger::init_logger,
    prompt::DialoguerPrompter,
    store::{templates_dir, Store},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves and opens the template store
/// 2. Runs the subcommand against it, reporting on stdout
fn run(args: Args) -> Result<()> {
    let prompt = DialoguerPrompter::new();
    let store = Store::open(templates_dir(args.templates_dir)?)?;

    let stdout = std::io::stdout();
    commands::run(args.command, &store, &prompt, &mut stdout.lock())
}
