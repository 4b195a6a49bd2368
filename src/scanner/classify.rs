use std::path::PathBuf;

use super::record::FileRecord;
use crate::common::config::Config;
use crate::common::errors::Result;

/// A file whose permission bits differ from the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeMismatch {
    pub path: PathBuf,
    pub current: u32,
}

/// Files whose name contains an invalid symbol
pub fn find_invalid_names(files: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    select(files, |record| Ok(config.has_invalid_symbol(record.name())))
}

/// Files whose name ends with a temporary suffix
pub fn find_temporary(files: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    select(files, |record| Ok(config.is_temporary(record.name())))
}

/// Zero-length files
pub fn find_empty(files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    select(files, |record| record.is_empty())
}

/// Files whose permission bits are not exactly `target`
pub fn find_permission_mismatches(files: &[PathBuf], target: u32) -> Result<Vec<ModeMismatch>> {
    let mut mismatches = Vec::new();
    for path in files {
        let record = FileRecord::new(path);
        let current = record.mode()?;
        if current != target {
            mismatches.push(ModeMismatch {
                path: record.into_path(),
                current,
            });
        }
    }
    Ok(mismatches)
}

fn select<F>(files: &[PathBuf], mut keep: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&FileRecord) -> Result<bool>,
{
    let mut matched = Vec::new();
    for path in files {
        let record = FileRecord::new(path);
        if keep(&record)? {
            tracing::debug!(path = %record.path().display(), "matched");
            matched.push(record.into_path());
        }
    }
    Ok(matched)
}
