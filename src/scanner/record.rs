use std::ffi::OsStr;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::common::errors::{Result, TidyError};
use crate::common::permissions;

/// A file found by the walker
///
/// Attributes are read from disk on every call, never cached, so a record
/// always reflects the file as it is now.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRecord {
    path: PathBuf,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// Base file name, raw bytes intact
    pub fn name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }

    pub fn metadata(&self) -> Result<Metadata> {
        std::fs::metadata(&self.path).map_err(|e| TidyError::io(&self.path, e))
    }

    pub fn modified(&self) -> Result<SystemTime> {
        self.metadata()?
            .modified()
            .map_err(|e| TidyError::io(&self.path, e))
    }

    pub fn len(&self) -> Result<u64> {
        Ok(self.metadata()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Permission bits (no file type bits)
    pub fn mode(&self) -> Result<u32> {
        Ok(permissions::mode_bits(&self.metadata()?))
    }
}
