use colored::Colorize;
use serde::Serialize;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::passes::Pass;
use crate::common::errors::{Result, TidyError};
use crate::common::permissions;

/// Clean mode determines whether the file system is touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanMode {
    /// Delete, rename and chmod for real
    Apply,
    /// Report what would be done without doing it
    DryRun,
}

impl std::fmt::Display for CleanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanMode::Apply => write!(f, "apply"),
            CleanMode::DryRun => write!(f, "dry_run"),
        }
    }
}

/// One file-system change, done or planned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Removed {
        pass: Pass,
        path: PathBuf,
        size_bytes: u64,
    },
    Renamed {
        pass: Pass,
        from: PathBuf,
        to: PathBuf,
    },
    ModeChanged {
        pass: Pass,
        path: PathBuf,
        from: String,
        to: String,
    },
}

impl Action {
    pub fn pass(&self) -> Pass {
        match self {
            Action::Removed { pass, .. }
            | Action::Renamed { pass, .. }
            | Action::ModeChanged { pass, .. } => *pass,
        }
    }
}

/// Everything a cleaner did, in order
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    pub mode: CleanMode,
    pub actions: Vec<Action>,
}

impl CleanReport {
    pub fn files_removed(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Removed { .. }))
            .count()
    }

    pub fn files_renamed(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Renamed { .. }))
            .count()
    }

    pub fn modes_changed(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::ModeChanged { .. }))
            .count()
    }

    pub fn bytes_freed(&self) -> u64 {
        self.actions
            .iter()
            .map(|a| match a {
                Action::Removed { size_bytes, .. } => *size_bytes,
                _ => 0,
            })
            .sum()
    }
}

/// Performs every mutation of a run
///
/// In dry-run mode nothing on disk changes, but actions are recorded and
/// echoed exactly as they would be applied. Rename targets are tracked so a
/// dry run resolves name collisions the same way a real run would, and
/// files already planned away are not acted on again.
#[derive(Debug)]
pub struct Cleaner {
    mode: CleanMode,
    echo: bool,
    claimed: HashSet<PathBuf>,
    gone: HashSet<PathBuf>,
    actions: Vec<Action>,
}

impl Cleaner {
    pub fn new(mode: CleanMode, echo: bool) -> Self {
        Self {
            mode,
            echo,
            claimed: HashSet::new(),
            gone: HashSet::new(),
            actions: Vec::new(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.mode == CleanMode::DryRun
    }

    /// Announce the start of a pass on the console
    pub fn begin_pass(&self, pass: Pass) {
        tracing::debug!(pass = %pass, "starting pass");
        if self.echo {
            println!();
            println!("  {} {}", "▸".cyan(), pass.to_string().bold());
        }
    }

    /// Delete a file
    pub fn remove(&mut self, pass: Pass, path: &Path) -> Result<()> {
        if self.gone.contains(path) {
            return Ok(());
        }
        let size_bytes = std::fs::metadata(path)
            .map_err(|e| TidyError::io(path, e))?
            .len();

        if !self.is_dry_run() {
            std::fs::remove_file(path).map_err(|e| TidyError::io(path, e))?;
        }
        self.gone.insert(path.to_path_buf());

        tracing::info!(path = %path.display(), size_bytes, dry_run = self.is_dry_run(), "removed file");
        if self.echo {
            let verb = if self.is_dry_run() { "would remove file" } else { "removed file" };
            println!("    {} {} {}", "✗".red(), verb, path.display());
        }

        self.actions.push(Action::Removed {
            pass,
            path: path.to_path_buf(),
            size_bytes,
        });
        Ok(())
    }

    /// Move a file, creating the destination's parent directories
    pub fn rename(&mut self, pass: Pass, from: &Path, to: &Path) -> Result<()> {
        if self.gone.contains(from) {
            return Ok(());
        }
        if !self.is_dry_run() {
            if let Some(parent) = to.parent() {
                std::fs::create_dir_all(parent).map_err(|e| TidyError::io(parent, e))?;
            }
            std::fs::rename(from, to).map_err(|e| TidyError::io(from, e))?;
        }
        self.gone.insert(from.to_path_buf());
        self.gone.remove(to);
        self.claimed.insert(to.to_path_buf());

        tracing::info!(from = %from.display(), to = %to.display(), dry_run = self.is_dry_run(), "renamed file");
        if self.echo {
            let verb = if self.is_dry_run() { "would rename" } else { "renamed" };
            println!(
                "    {} {} {} -> {}",
                "↻".yellow(),
                verb,
                from.display(),
                to.display()
            );
        }

        self.actions.push(Action::Renamed {
            pass,
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        Ok(())
    }

    /// Set a file's permission bits
    pub fn set_mode(&mut self, pass: Pass, path: &Path, from: u32, to: u32) -> Result<()> {
        if self.gone.contains(path) {
            return Ok(());
        }
        if !self.is_dry_run() {
            permissions::set_mode(path, to)?;
        }

        let (from, to) = (permissions::format_mode(from), permissions::format_mode(to));
        tracing::info!(path = %path.display(), %from, %to, dry_run = self.is_dry_run(), "changed mode");
        if self.echo {
            let verb = if self.is_dry_run() { "would chmod" } else { "chmod" };
            println!("    {} {} {} -> {} {}", "⚙".blue(), verb, from, to, path.display());
        }

        self.actions.push(Action::ModeChanged {
            pass,
            path: path.to_path_buf(),
            from,
            to,
        });
        Ok(())
    }

    /// Whether a file was removed or renamed away earlier in this run
    ///
    /// In a dry run such files are still on disk, so every pass drops them
    /// from its input before classifying or grouping.
    pub fn is_gone(&self, path: &Path) -> bool {
        self.gone.contains(path)
    }

    /// Whether a path is occupied on disk or by an earlier rename in this run
    ///
    /// Dangling symlinks count as occupied. A path whose status cannot be read
    /// is treated as occupied too.
    pub fn is_taken(&self, path: &Path) -> bool {
        if self.claimed.contains(path) {
            return true;
        }
        if self.gone.contains(path) {
            return false;
        }
        match std::fs::symlink_metadata(path) {
            Ok(_) => true,
            Err(e) => e.kind() != ErrorKind::NotFound,
        }
    }

    pub fn finish(self) -> CleanReport {
        CleanReport {
            mode: self.mode,
            actions: self.actions,
        }
    }
}
