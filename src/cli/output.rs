use anyhow::Result;
use colored::*;

use crate::cleaner::CleanMode;
use crate::common::format::{self, format_count, format_path, format_size};
use crate::runner::RunReport;
use crate::scanner::DirectorySet;

/// Print the run banner before any pass starts
pub fn print_run_header(dirs: &DirectorySet, mode: CleanMode) {
    println!();
    println!("{}  tidydir", "🧹");
    println!("{}", "─".repeat(60).dimmed());
    for root in dirs.iter() {
        println!("  {} {}", "📁", format_path(root).cyan());
    }
    if mode == CleanMode::DryRun {
        println!("  {} {}", "ℹ️", "Dry run: nothing will be modified".yellow());
    }
    println!("{}", "─".repeat(60).dimmed());
}

/// Print the summary footer in human-readable format
pub fn print_run_summary(report: &RunReport) {
    println!();
    println!("{}", "─".repeat(60).dimmed());

    if report.passes.is_empty() {
        println!(
            "  {} Nothing to do. Enable a pass, e.g. {}",
            "💡",
            "--temporary y".cyan()
        );
        println!();
        return;
    }

    if report.actions.is_empty() {
        println!("  {} Already tidy!", "✨");
    } else {
        let (removed, renamed, chmod) = if report.mode == CleanMode::DryRun {
            ("would remove", "would rename", "would chmod")
        } else {
            ("removed", "renamed", "chmod")
        };
        println!(
            "  {} {} ({})",
            removed,
            format_count(report.files_removed, "file").bold(),
            format_size(report.bytes_freed).green()
        );
        println!("  {} {}", renamed, format_count(report.files_renamed, "file").bold());
        println!("  {} {}", chmod, format_count(report.permissions_changed, "file").bold());

        println!();
        for &pass in &report.passes {
            let count = report.actions.iter().filter(|a| a.pass() == pass).count();
            println!(
                "  {} {:<28} {}",
                "▸".dimmed(),
                pass.to_string(),
                format_count(count, "action").dimmed()
            );
        }
    }

    println!(
        "  {} {} in {}",
        "⏱".dimmed(),
        report.started_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
        format::format_duration(report.duration_secs).cyan()
    );
    println!();
}

/// Print the full report as JSON
pub fn print_run_json(report: &RunReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// One line: removed, renamed, chmod counts and bytes freed
pub fn print_run_quiet(report: &RunReport) {
    println!(
        "{}  {}  {}  {}",
        report.files_removed,
        report.files_renamed,
        report.permissions_changed,
        format_size(report.bytes_freed)
    );
}
