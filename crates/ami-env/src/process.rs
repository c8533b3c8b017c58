use std::process::Command;

use crate::error::EnvError;

/// Runs a blocking external command with the caller's stdio inherited,
/// mapping a non-zero exit to a typed failure. No retry: transient and
/// permanent failures cannot be told apart generically.
pub(crate) fn run_forwarded(command: &mut Command, label: &str) -> Result<(), EnvError> {
    let status = command.status().map_err(|source| EnvError::Launch {
        command: label.to_string(),
        source,
    })?;
    if status.success() {
        return Ok(());
    }
    Err(EnvError::CommandFailed {
        command: label.to_string(),
        status,
    })
}
