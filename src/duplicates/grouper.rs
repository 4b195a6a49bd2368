use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::PathBuf;

use super::hasher;
use crate::common::errors::Result;

/// A set of files that share content or a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Shared key: content digest or base file name
    pub key: String,
    /// Members in enumeration order
    pub members: Vec<PathBuf>,
}

/// Find groups of byte-identical files
///
/// Narrows candidates by size, then by a hash of the first 4KB, and only
/// then hashes whole files.
pub fn find_content_duplicates(
    files: &[PathBuf],
    show_progress: bool,
) -> Result<Vec<DuplicateGroup>> {
    let size_groups = hasher::group_by_size(files)?;
    if size_groups.is_empty() {
        return Ok(Vec::new());
    }

    let pb = make_progress(show_progress, size_groups.len() as u64, "Hashing...");
    let mut groups = Vec::new();

    for paths in size_groups.values() {
        for candidates in hasher::group_by_quick_hash(paths)?.into_values() {
            for (digest, members) in hasher::group_by_full_hash(&candidates)? {
                groups.push(DuplicateGroup {
                    key: digest,
                    members,
                });
            }
        }
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    finish_progress(pb, &format!("{} duplicate groups", groups.len()));

    sort_groups(&mut groups);
    tracing::debug!(files = files.len(), groups = groups.len(), "content duplicate groups");
    Ok(groups)
}

/// Find groups of files sharing a base name
pub fn find_name_duplicates(files: &[PathBuf]) -> Result<Vec<DuplicateGroup>> {
    let mut by_name: HashMap<&OsStr, Vec<PathBuf>> = HashMap::new();
    for path in files {
        if let Some(name) = path.file_name() {
            by_name.entry(name).or_default().push(path.clone());
        }
    }

    let mut groups: Vec<DuplicateGroup> = by_name
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(name, members)| DuplicateGroup {
            key: name.to_string_lossy().into_owned(),
            members,
        })
        .collect();

    sort_groups(&mut groups);
    tracing::debug!(groups = groups.len(), "name duplicate groups");
    Ok(groups)
}

/// Order groups by their first member so output is stable across runs
fn sort_groups(groups: &mut [DuplicateGroup]) {
    groups.sort_by(|a, b| a.members.first().cmp(&b.members.first()));
}

// ── Progress helpers ──────────────────────────────────────────────────────────

fn make_progress(show: bool, total: u64, msg: &str) -> Option<ProgressBar> {
    if !show {
        return None;
    }
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("━━░"));
    }
    pb.set_message(msg.to_string());
    Some(pb)
}

fn finish_progress(pb: Option<ProgressBar>, msg: &str) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
        tracing::debug!("{}", msg);
    }
}
