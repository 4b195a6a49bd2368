use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::Instant;

use crate::cleaner::{self, Action, CleanMode, Cleaner, Pass};
use crate::common::config::Config;
use crate::common::errors::Result;
use crate::scanner::DirectorySet;

/// What a run should do
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Enabled passes; order here does not matter
    pub passes: Vec<Pass>,
    pub mode: CleanMode,
    /// Echo each action to stdout as it happens
    pub echo: bool,
    /// Show spinners on stderr while hashing
    pub show_progress: bool,
}

impl RunPlan {
    /// Enabled passes in execution order, each once
    pub fn ordered_passes(&self) -> Vec<Pass> {
        Pass::ALL
            .into_iter()
            .filter(|p| self.passes.contains(p))
            .collect()
    }
}

/// Outcome of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: CleanMode,
    pub started_at: DateTime<Local>,
    pub duration_secs: f64,
    pub directories: Vec<std::path::PathBuf>,
    pub passes: Vec<Pass>,
    pub files_removed: usize,
    pub files_renamed: usize,
    pub permissions_changed: usize,
    pub bytes_freed: u64,
    pub actions: Vec<Action>,
}

/// Run the enabled passes over the directory set
///
/// Passes run one after another in fixed order, each re-walking the tree, so
/// a file removed by an earlier pass is simply absent from later ones. The
/// first file-system error stops the run; earlier changes stay in place.
pub fn run(dirs: &DirectorySet, config: &Config, plan: &RunPlan) -> Result<RunReport> {
    let started_at = Local::now();
    let start = Instant::now();
    let passes = plan.ordered_passes();
    let roots = dirs.roots();
    let mut engine = Cleaner::new(plan.mode, plan.echo);

    tracing::info!(
        roots = roots.len(),
        passes = passes.len(),
        mode = %plan.mode,
        "starting run"
    );

    for &pass in &passes {
        engine.begin_pass(pass);
        match pass {
            Pass::SameContent => {
                cleaner::delete_same_content(roots, &mut engine, plan.show_progress)?
            }
            Pass::SameName => cleaner::delete_same_name(roots, &mut engine)?,
            Pass::InvalidSymbols => cleaner::rename_invalid_symbols(roots, config, &mut engine)?,
            Pass::Empty => cleaner::delete_empty(roots, &mut engine)?,
            Pass::Permissions => {
                let mode = config.permission_mode()?;
                cleaner::fix_permissions(roots, mode, &mut engine)?
            }
            Pass::Temporary => cleaner::delete_temporary(roots, config, &mut engine)?,
        }
    }

    let report = engine.finish();
    Ok(RunReport {
        mode: report.mode,
        started_at,
        duration_secs: start.elapsed().as_secs_f64(),
        directories: roots.to_vec(),
        passes,
        files_removed: report.files_removed(),
        files_renamed: report.files_renamed(),
        permissions_changed: report.modes_changed(),
        bytes_freed: report.bytes_freed(),
        actions: report.actions,
    })
}
