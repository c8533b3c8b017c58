mod error;
mod manifest;
mod paths;

pub use error::ManifestError;
pub use manifest::{identity_key, ManifestStore, MANIFEST_FILE};
pub use paths::{probe, probe_dir, resolve_in};

#[cfg(test)]
mod tests;
