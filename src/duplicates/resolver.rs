use std::cmp::Reverse;
use std::path::PathBuf;
use std::time::SystemTime;

use super::grouper::DuplicateGroup;
use crate::common::errors::Result;
use crate::scanner::record::FileRecord;

/// Strategy for resolving which file to keep in a duplicate group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// Keep the most recently modified file
    KeepNewest,
    /// Keep the least recently modified file (the original)
    KeepOldest,
}

/// Result of resolving a duplicate group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    /// The file to keep
    pub keep: PathBuf,
    /// Files to remove, in group order
    pub remove: Vec<PathBuf>,
}

/// Resolve a duplicate group using the given strategy
///
/// Members are stably sorted by modification time, so among files with the
/// same extreme timestamp the one listed first in the group is kept.
/// Returns `None` for an empty group.
pub fn resolve_group(
    group: &DuplicateGroup,
    strategy: ResolveStrategy,
) -> Result<Option<ResolvedGroup>> {
    let mut dated: Vec<(SystemTime, &PathBuf)> = group
        .members
        .iter()
        .map(|path| Ok((FileRecord::new(path.clone()).modified()?, path)))
        .collect::<Result<_>>()?;

    match strategy {
        ResolveStrategy::KeepOldest => dated.sort_by_key(|(modified, _)| *modified),
        ResolveStrategy::KeepNewest => dated.sort_by_key(|(modified, _)| Reverse(*modified)),
    }

    let Some((_, keep)) = dated.first() else {
        return Ok(None);
    };
    let keep = (*keep).clone();

    let remove = group
        .members
        .iter()
        .filter(|path| **path != keep)
        .cloned()
        .collect();

    Ok(Some(ResolvedGroup { keep, remove }))
}
