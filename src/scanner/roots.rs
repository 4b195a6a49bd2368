use std::path::{Path, PathBuf};

use crate::common::errors::{Result, TidyError};

/// Ordered set of directories a run manages: the primary root first,
/// then any additional roots in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySet {
    roots: Vec<PathBuf>,
}

impl DirectorySet {
    /// Validate and canonicalize the roots
    ///
    /// Every root must exist and be a directory. Canonical paths make files
    /// reachable from overlapping roots compare equal. A root given twice is
    /// kept once, at its first position.
    pub fn new(primary: &Path, additional: &[PathBuf]) -> Result<Self> {
        let mut roots: Vec<PathBuf> = Vec::with_capacity(additional.len() + 1);
        for path in std::iter::once(primary).chain(additional.iter().map(PathBuf::as_path)) {
            let root = canonical_dir(path)?;
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        Ok(Self { roots })
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }
}

fn canonical_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(TidyError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    std::fs::canonicalize(path).map_err(|e| TidyError::io(path, e))
}
