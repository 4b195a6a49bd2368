use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::common::errors::{Result, TidyError};

/// Walk a directory tree and yield every file under it
///
/// A symlink is reported when it resolves to a regular file. Symlinked
/// directories are never descended into, and dangling links are skipped.
/// Traversal errors are yielded rather than skipped, so a caller collecting
/// into a `Result` stops at the first unreadable entry.
pub fn walk_files(root: &Path) -> impl Iterator<Item = Result<PathBuf>> + '_ {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if is_file_entry(&entry) => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(source) => Some(Err(TidyError::Walk {
                root: root.to_path_buf(),
                source,
            })),
        })
}

fn is_file_entry(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
    } else {
        entry.file_type().is_file()
    }
}

/// Collect all files under a single root
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    walk_files(root).collect()
}

/// Collect files under several roots, in root order
///
/// A file reachable from more than one root (overlapping roots) is listed
/// once, at its first occurrence.
pub fn collect_all(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for root in roots {
        for path in walk_files(root) {
            let path = path?;
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    tracing::debug!(roots = roots.len(), files = files.len(), "enumerated files");
    Ok(files)
}
