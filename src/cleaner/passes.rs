use serde::Serialize;
use std::path::PathBuf;

use super::engine::Cleaner;
use super::naming;
use crate::common::config::Config;
use crate::common::errors::Result;
use crate::duplicates::{self, DuplicateGroup, ResolveStrategy};
use crate::scanner::{classify, walker};

/// A remediation pass
///
/// Declaration order is execution order: when several passes are enabled
/// they always run content, name, symbols, empty, permissions, temporary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    SameContent,
    SameName,
    InvalidSymbols,
    Empty,
    Permissions,
    Temporary,
}

impl Pass {
    pub const ALL: [Pass; 6] = [
        Pass::SameContent,
        Pass::SameName,
        Pass::InvalidSymbols,
        Pass::Empty,
        Pass::Permissions,
        Pass::Temporary,
    ];
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::SameContent => write!(f, "Files with the same content"),
            Pass::SameName => write!(f, "Files with the same name"),
            Pass::InvalidSymbols => write!(f, "Names with invalid symbols"),
            Pass::Empty => write!(f, "Empty files"),
            Pass::Permissions => write!(f, "Non-standard permissions"),
            Pass::Temporary => write!(f, "Temporary files"),
        }
    }
}

/// Files under all roots that earlier passes have not removed or renamed
fn live_files(roots: &[PathBuf], cleaner: &Cleaner) -> Result<Vec<PathBuf>> {
    let mut files = walker::collect_all(roots)?;
    files.retain(|path| !cleaner.is_gone(path));
    Ok(files)
}

/// Delete every member of `groups` except the one `strategy` keeps
fn delete_duplicates(
    pass: Pass,
    groups: &[DuplicateGroup],
    strategy: ResolveStrategy,
    cleaner: &mut Cleaner,
) -> Result<()> {
    for group in groups {
        let Some(resolved) = duplicates::resolve_group(group, strategy)? else {
            continue;
        };
        tracing::debug!(
            group = %group.key,
            keep = %resolved.keep.display(),
            remove = resolved.remove.len(),
            "resolved duplicates"
        );
        for path in &resolved.remove {
            cleaner.remove(pass, path)?;
        }
    }
    Ok(())
}

/// Keep the oldest copy of each set of identical files, delete the rest
pub fn delete_same_content(
    roots: &[PathBuf],
    cleaner: &mut Cleaner,
    show_progress: bool,
) -> Result<()> {
    let files = live_files(roots, cleaner)?;
    let groups = duplicates::find_content_duplicates(&files, show_progress)?;
    delete_duplicates(Pass::SameContent, &groups, ResolveStrategy::KeepOldest, cleaner)
}

/// Keep the newest of each set of same-named files, delete the rest
pub fn delete_same_name(roots: &[PathBuf], cleaner: &mut Cleaner) -> Result<()> {
    let files = live_files(roots, cleaner)?;
    let groups = duplicates::find_name_duplicates(&files)?;
    delete_duplicates(Pass::SameName, &groups, ResolveStrategy::KeepNewest, cleaner)
}

/// Rename files whose names contain invalid symbols
///
/// Collisions resolve one file at a time, so two files that sanitize to the
/// same name end up as `name.ext` and `name_1.ext`. Bytes other than the
/// symbols are kept as they are, valid UTF-8 or not.
pub fn rename_invalid_symbols(
    roots: &[PathBuf],
    config: &Config,
    cleaner: &mut Cleaner,
) -> Result<()> {
    let files = live_files(roots, cleaner)?;
    for path in classify::find_invalid_names(&files, config)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let clean = naming::sanitize_name(name, &config.invalid_symbols, config.replacement);
        let target = naming::resolve_free_path(
            &path.with_file_name(clean),
            config.replacement,
            |p| cleaner.is_taken(p),
        )?;
        cleaner.rename(Pass::InvalidSymbols, &path, &target)?;
    }
    Ok(())
}

/// Delete zero-length files
pub fn delete_empty(roots: &[PathBuf], cleaner: &mut Cleaner) -> Result<()> {
    let files = live_files(roots, cleaner)?;
    for path in classify::find_empty(&files)? {
        cleaner.remove(Pass::Empty, &path)?;
    }
    Ok(())
}

/// Set every file's permission bits to `mode`
pub fn fix_permissions(roots: &[PathBuf], mode: u32, cleaner: &mut Cleaner) -> Result<()> {
    let files = live_files(roots, cleaner)?;
    for mismatch in classify::find_permission_mismatches(&files, mode)? {
        cleaner.set_mode(Pass::Permissions, &mismatch.path, mismatch.current, mode)?;
    }
    Ok(())
}

/// Delete files whose name ends with a temporary suffix
pub fn delete_temporary(roots: &[PathBuf], config: &Config, cleaner: &mut Cleaner) -> Result<()> {
    let files = live_files(roots, cleaner)?;
    for path in classify::find_temporary(&files, config)? {
        cleaner.remove(Pass::Temporary, &path)?;
    }
    Ok(())
}
