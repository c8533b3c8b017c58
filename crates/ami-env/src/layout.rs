use std::path::{Path, PathBuf};

use ami_core::MANIFEST_FILE;

/// Ordered directory names probed for an existing virtual environment.
/// First existing-and-valid match wins, so a `venv` directory shadows a
/// `.venv` one in the same project.
pub const VENV_CANDIDATES: [&str; 3] = ["venv", ".venv", "env"];

/// Directory name used when provisioning a fresh environment.
pub const DEFAULT_VENV_DIR: &str = ".venv";

/// Explicit project root threaded through every component, so nothing
/// depends on ambient working-directory state. Recomputed per command;
/// there is no persisted "current environment" pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn venv_candidates(&self) -> Vec<PathBuf> {
        VENV_CANDIDATES
            .iter()
            .map(|name| self.root.join(name))
            .collect()
    }

    pub fn default_venv_path(&self) -> PathBuf {
        self.root.join(DEFAULT_VENV_DIR)
    }
}

/// Interpreter locations recognized inside an environment. Both the
/// POSIX `bin/` and Windows `Scripts/` shapes are probed on every OS;
/// existence on disk decides, not the host platform.
pub fn interpreter_candidates(venv: &Path) -> [PathBuf; 2] {
    [
        venv.join("bin").join("python"),
        venv.join("Scripts").join("python.exe"),
    ]
}

/// Pip locations recognized inside an environment, in preference order.
pub fn pip_candidates(venv: &Path) -> [PathBuf; 4] {
    [
        venv.join("bin").join("pip"),
        venv.join("bin").join("pip3"),
        venv.join("Scripts").join("pip.exe"),
        venv.join("Scripts").join("pip3.exe"),
    ]
}

/// Shell activation script for the host platform.
pub fn activate_script(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join("activate.bat")
    } else {
        venv.join("bin").join("activate")
    }
}
