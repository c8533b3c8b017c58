use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Stats a path, treating "not found" as a normal negative result.
/// Any other filesystem failure (permissions, I/O) is an error.
pub fn probe(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Like [`probe`], but only reports `true` for directories.
pub fn probe_dir(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Resolves `name` against `root` and reports whether the result exists.
pub fn resolve_in(root: &Path, name: &str) -> io::Result<(PathBuf, bool)> {
    let path = root.join(name);
    let exists = probe(&path)?;
    Ok((path, exists))
}
