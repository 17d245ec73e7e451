//! Opens template specs in the user's editor.

use crate::error::{Error, Result};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Opens `path` in `$VISUAL` or `$EDITOR` and waits for the editor to exit.
///
/// # Errors
/// * `Error::EditorError` if neither variable is set, the editor cannot be
///   launched, or it exits with a non-zero status
pub fn open<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let editor = std::env::var_os("VISUAL")
        .or_else(|| std::env::var_os("EDITOR"))
        .ok_or_else(|| {
            Error::EditorError(
                "neither VISUAL nor EDITOR is set, set one to your preferred editor".to_string(),
            )
        })?;

    debug!("Opening '{}' with {}", path.display(), editor.to_string_lossy());
    let status = Command::new(&editor).arg(path).status().map_err(|e| {
        Error::EditorError(format!("failed to launch {}: {e}", editor.to_string_lossy()))
    })?;

    if !status.success() {
        return Err(Error::EditorError(format!("editor exited with {status}")));
    }
    Ok(())
}
