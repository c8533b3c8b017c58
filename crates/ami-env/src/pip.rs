use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::EnvError;
use crate::layout::ProjectLayout;
use crate::process::run_forwarded;

/// How pip is reached inside an environment: its own executable, or the
/// environment interpreter's `-m pip` fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipInvocation {
    Direct(PathBuf),
    Module(PathBuf),
}

impl PipInvocation {
    pub fn command(&self) -> Command {
        match self {
            PipInvocation::Direct(pip) => Command::new(pip),
            PipInvocation::Module(interpreter) => {
                let mut command = Command::new(interpreter);
                command.arg("-m").arg("pip");
                command
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            PipInvocation::Direct(pip) => pip.display().to_string(),
            PipInvocation::Module(interpreter) => {
                format!("{} -m pip", interpreter.display())
            }
        }
    }
}

/// Outcome of asking pip whether a package is installed. "Not
/// installed" is a normal negative result, never an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PackageProbe {
    Installed,
    NotInstalled,
}

pub fn install_packages(pip: &PipInvocation, names: &[String]) -> Result<(), EnvError> {
    let mut command = pip.command();
    command.arg("install").args(names);
    run_forwarded(&mut command, &pip.describe())
}

pub fn install_from_manifest(pip: &PipInvocation, layout: &ProjectLayout) -> Result<(), EnvError> {
    let mut command = pip.command();
    command.arg("install").arg("-r").arg(layout.manifest_path());
    run_forwarded(&mut command, &pip.describe())
}

pub fn uninstall_packages(pip: &PipInvocation, names: &[String]) -> Result<(), EnvError> {
    let mut command = pip.command();
    command.arg("uninstall").arg("-y").args(names);
    run_forwarded(&mut command, &pip.describe())
}

pub fn list_packages(pip: &PipInvocation) -> Result<(), EnvError> {
    let mut command = pip.command();
    command.arg("list");
    run_forwarded(&mut command, &pip.describe())
}

/// `pip show <name>` with output discarded; only the exit status
/// matters here.
pub fn probe_installed(pip: &PipInvocation, name: &str) -> Result<PackageProbe, EnvError> {
    let mut command = pip.command();
    command
        .arg("show")
        .arg(name)
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    let status = command.status().map_err(|source| EnvError::Launch {
        command: pip.describe(),
        source,
    })?;
    probe_outcome(pip.describe(), status)
}

/// pip reserves exit code 1 of `show` for "package not installed"; any
/// other non-zero exit is an operational failure that must propagate.
/// The convention is pip's, and this is the one place that encodes it.
pub(crate) fn probe_outcome(command: String, status: ExitStatus) -> Result<PackageProbe, EnvError> {
    if status.success() {
        return Ok(PackageProbe::Installed);
    }
    if status.code() == Some(1) {
        return Ok(PackageProbe::NotInstalled);
    }
    Err(EnvError::CommandFailed { command, status })
}
