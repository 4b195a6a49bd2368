use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::common::errors::{Result, TidyError};

/// Size of the quick hash prefix (first 4KB)
const QUICK_HASH_SIZE: usize = 4096;

/// Compute SHA-256 of the first 4KB of a file (quick hash)
pub fn quick_hash(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| TidyError::io(path, e))?;
    let mut reader = BufReader::new(file).take(QUICK_HASH_SIZE as u64);
    let mut buffer = Vec::with_capacity(QUICK_HASH_SIZE);
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| TidyError::io(path, e))?;

    let mut hasher = Sha256::new();
    hasher.update(&buffer);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute full SHA-256 hash of a file
pub fn full_hash(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| TidyError::io(path, e))?;
    let mut reader = BufReader::with_capacity(1024 * 1024, file);
    let mut hasher = Sha256::new();

    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| TidyError::io(path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Group file paths by their file size
/// Files with a unique size cannot have a content twin, so they drop out
/// before any bytes are read.
pub fn group_by_size(files: &[PathBuf]) -> Result<HashMap<u64, Vec<PathBuf>>> {
    group_by(files, |path| {
        std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| TidyError::io(path, e))
    })
}

/// Group files by quick hash (first 4KB)
pub fn group_by_quick_hash(files: &[PathBuf]) -> Result<HashMap<String, Vec<PathBuf>>> {
    group_by(files, |path| quick_hash(path))
}

/// Group files by full SHA-256 hash
pub fn group_by_full_hash(files: &[PathBuf]) -> Result<HashMap<String, Vec<PathBuf>>> {
    group_by(files, |path| full_hash(path))
}

/// Bucket files by a key, keeping only buckets with 2+ members.
/// Members stay in input order.
fn group_by<K, F>(files: &[PathBuf], mut key: F) -> Result<HashMap<K, Vec<PathBuf>>>
where
    K: std::hash::Hash + Eq,
    F: FnMut(&Path) -> Result<K>,
{
    let mut groups: HashMap<K, Vec<PathBuf>> = HashMap::new();
    for path in files {
        groups.entry(key(path)?).or_default().push(path.clone());
    }
    groups.retain(|_, v| v.len() > 1);
    Ok(groups)
}
