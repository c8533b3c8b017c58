use std::path::PathBuf;
use std::process::Command;

use crate::error::EnvError;
use crate::layout::{interpreter_candidates, ProjectLayout, DEFAULT_VENV_DIR};
use crate::locate::{checked_probe, Environment};
use crate::process::run_forwarded;

/// Ordered system interpreter names tried on PATH.
pub const SYSTEM_INTERPRETERS: [&str; 3] = ["python3", "python", "py"];

/// Resolves a system-wide interpreter from the fixed candidate names.
pub fn find_system_interpreter() -> Result<PathBuf, EnvError> {
    for name in SYSTEM_INTERPRETERS {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }
    Err(EnvError::InterpreterNotFound)
}

/// Materializes a fresh `.venv` under the project root via the system
/// interpreter's venv module. Interpreter output goes straight to the
/// caller's console. On failure a half-created directory may remain;
/// no rollback is attempted.
pub fn provision(layout: &ProjectLayout) -> Result<Environment, EnvError> {
    let interpreter = find_system_interpreter()?;

    let mut command = Command::new(&interpreter);
    command
        .arg("-m")
        .arg("venv")
        .arg(DEFAULT_VENV_DIR)
        .current_dir(layout.root());
    let label = format!("{} -m venv {DEFAULT_VENV_DIR}", interpreter.display());
    run_forwarded(&mut command, &label)?;

    let root = layout.default_venv_path();
    for candidate in interpreter_candidates(&root) {
        if checked_probe(&candidate)? {
            return Ok(Environment {
                root,
                interpreter: candidate,
            });
        }
    }

    // venv reported success but left no interpreter behind
    Err(EnvError::EnvironmentNotFound)
}
