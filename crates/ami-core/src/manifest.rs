use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ManifestError;

/// Manifest file name at the project root.
pub const MANIFEST_FILE: &str = "requirements.txt";

/// Lowercased, trimmed form of a package name. Two entries are the same
/// package exactly when their identity keys are equal.
pub fn identity_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Sole owner of the manifest file. Every mutating operation upholds the
/// write-time invariants: no two entries share an identity key, and blank
/// or `#`-comment lines are never written as entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty manifest. Not idempotent: callers detect first,
    /// then create, and a pre-existing file is a `Create` failure.
    pub fn create(&self) -> Result<(), ManifestError> {
        File::create_new(&self.path).map_err(|source| ManifestError::Create {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Returns entries in file order, trimmed, with blank and comment
    /// lines dropped. Casing and duplicates are preserved as stored;
    /// deduplication is a write-time guarantee, so hand-edited files
    /// with duplicates read back verbatim.
    pub fn read_all(&self) -> Result<Vec<String>, ManifestError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ManifestError::NotFound(self.path.clone())
            } else {
                ManifestError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    /// Raw overwrite primitive: joins entries with newlines and replaces
    /// the file contents. No deduplication happens here. The manifest
    /// must already exist; callers create it first.
    pub fn write_all(&self, entries: &[String]) -> Result<(), ManifestError> {
        if !self.path.exists() {
            return Err(ManifestError::NotFound(self.path.clone()));
        }

        let mut payload = entries.join("\n");
        if !payload.is_empty() {
            payload.push('\n');
        }
        fs::write(&self.path, payload).map_err(|source| ManifestError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Install-time reconciliation: appends each new package whose
    /// identity key is not already present. Existing entries keep their
    /// order and first-seen casing; duplicates within `new_packages`
    /// collapse to the first occurrence. Nothing new means no write.
    /// Returns the entries actually appended.
    pub fn merge<S: AsRef<str>>(&self, new_packages: &[S]) -> Result<Vec<String>, ManifestError> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(ManifestError::NotFound(_)) => Vec::new(),
            Err(err) => return Err(err),
        };

        let mut seen: HashSet<String> = entries.iter().map(|entry| identity_key(entry)).collect();
        let mut appended = Vec::new();
        for package in new_packages {
            let package = package.as_ref().trim();
            if package.is_empty() {
                continue;
            }
            if seen.insert(identity_key(package)) {
                appended.push(package.to_string());
            }
        }

        if appended.is_empty() {
            return Ok(appended);
        }

        entries.extend(appended.iter().cloned());
        self.write_all(&entries)?;
        Ok(appended)
    }

    /// Drops every entry whose identity key matches a removal request,
    /// preserving survivor order. Names not present are silently
    /// skipped. Returns the entries actually removed (original casing).
    pub fn remove<S: AsRef<str>>(&self, packages: &[S]) -> Result<Vec<String>, ManifestError> {
        let entries = self.read_all()?;

        let removal_keys: HashSet<String> = packages
            .iter()
            .map(|package| identity_key(package.as_ref()))
            .collect();

        let mut removed = Vec::new();
        let mut survivors = Vec::new();
        for entry in entries {
            if removal_keys.contains(&identity_key(&entry)) {
                removed.push(entry);
            } else {
                survivors.push(entry);
            }
        }

        if removed.is_empty() {
            return Ok(removed);
        }

        self.write_all(&survivors)?;
        Ok(removed)
    }
}
