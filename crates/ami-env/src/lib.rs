mod error;
mod layout;
mod locate;
mod pip;
mod process;
mod provision;

pub use error::EnvError;
pub use layout::{
    activate_script, interpreter_candidates, pip_candidates, ProjectLayout, DEFAULT_VENV_DIR,
    VENV_CANDIDATES,
};
pub use locate::{locate, locate_pip, Environment};
pub use pip::{
    install_from_manifest, install_packages, list_packages, probe_installed, uninstall_packages,
    PackageProbe, PipInvocation,
};
pub use provision::{find_system_interpreter, provision, SYSTEM_INTERPRETERS};
