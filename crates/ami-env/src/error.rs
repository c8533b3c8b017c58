use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failures raised while locating, provisioning, or driving a virtual
/// environment. Absence of an environment or of pip during discovery is
/// not an error (the locators return `None`); these variants cover the
/// cases where an operation actually needed the missing piece, or where
/// an external process misbehaved.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("python interpreter not found on PATH (tried python3, python, py)")]
    InterpreterNotFound,
    #[error("pip not found in the virtual environment; run `ami init` first")]
    PipNotFound,
    #[error("virtual environment not found; run `ami init` first")]
    EnvironmentNotFound,
    #[error("failed to inspect {}: {}", .path.display(), .source)]
    Probe {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to launch {}: {}", .command, .source)]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("{} exited with {}", .command, .status)]
    CommandFailed { command: String, status: ExitStatus },
}
