use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use ami_core::{probe, probe_dir};

use crate::error::EnvError;
use crate::layout::{interpreter_candidates, pip_candidates, ProjectLayout};
use crate::pip::PipInvocation;

/// A resolved virtual environment: its root directory and the
/// interpreter found beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub root: PathBuf,
    pub interpreter: PathBuf,
}

impl Environment {
    /// Runs a script through the environment's interpreter with the
    /// caller's stdio. The child's exit status is handed back so the
    /// dispatcher can mirror it as the process exit code.
    pub fn run_script(&self, script: &str, args: &[String]) -> Result<ExitStatus, EnvError> {
        let mut command = Command::new(&self.interpreter);
        command.arg(script).args(args);
        command.status().map_err(|source| EnvError::Launch {
            command: self.interpreter.display().to_string(),
            source,
        })
    }
}

/// Walks the candidate directories in fixed order and returns the first
/// one that exists as a directory and contains an interpreter. No match
/// is a normal `None`, never an error.
pub fn locate(layout: &ProjectLayout) -> Result<Option<Environment>, EnvError> {
    for venv in layout.venv_candidates() {
        if !checked_probe_dir(&venv)? {
            continue;
        }
        for interpreter in interpreter_candidates(&venv) {
            if checked_probe(&interpreter)? {
                return Ok(Some(Environment {
                    root: venv,
                    interpreter,
                }));
            }
        }
    }
    Ok(None)
}

/// Same directory-order walk, but for pip. Independent of [`locate`]:
/// an environment may carry an interpreter without pip or vice versa.
/// When only an interpreter is present, pip is still reachable through
/// `python -m pip`.
pub fn locate_pip(layout: &ProjectLayout) -> Result<Option<PipInvocation>, EnvError> {
    for venv in layout.venv_candidates() {
        if !checked_probe_dir(&venv)? {
            continue;
        }
        for pip in pip_candidates(&venv) {
            if checked_probe(&pip)? {
                return Ok(Some(PipInvocation::Direct(pip)));
            }
        }
        for interpreter in interpreter_candidates(&venv) {
            if checked_probe(&interpreter)? {
                return Ok(Some(PipInvocation::Module(interpreter)));
            }
        }
    }
    Ok(None)
}

pub(crate) fn checked_probe(path: &Path) -> Result<bool, EnvError> {
    probe(path).map_err(|source| EnvError::Probe {
        path: path.to_path_buf(),
        source,
    })
}

fn checked_probe_dir(path: &Path) -> Result<bool, EnvError> {
    probe_dir(path).map_err(|source| EnvError::Probe {
        path: path.to_path_buf(),
        source,
    })
}
