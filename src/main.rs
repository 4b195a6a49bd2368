use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use tidydir::cleaner::CleanMode;
use tidydir::cli::args::{Cli, CompletionShell, OutputFormat};
use tidydir::cli::output;
use tidydir::common::config::Config;
use tidydir::runner::{self, RunPlan};
use tidydir::scanner::DirectorySet;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let shell = match shell {
            CompletionShell::Bash => clap_complete::Shell::Bash,
            CompletionShell::Zsh => clap_complete::Shell::Zsh,
            CompletionShell::Fish => clap_complete::Shell::Fish,
        };
        clap_complete::generate(shell, &mut Cli::command(), "tidydir", &mut std::io::stdout());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose);

    let primary = cli.dir.as_deref().context("--dir is required")?;
    let dirs = DirectorySet::new(primary, &cli.also).context("Invalid directory")?;
    let config = Config::load(cli.config.as_deref());

    let human = matches!(cli.format, OutputFormat::Human);
    let plan = RunPlan {
        passes: cli.enabled_passes(),
        mode: if cli.dry_run {
            CleanMode::DryRun
        } else {
            CleanMode::Apply
        },
        echo: human,
        show_progress: human,
    };

    if human {
        output::print_run_header(&dirs, plan.mode);
    }

    let report = runner::run(&dirs, &config, &plan)?;

    match cli.format {
        OutputFormat::Human => output::print_run_summary(&report),
        OutputFormat::Json => output::print_run_json(&report)?,
        OutputFormat::Quiet => output::print_run_quiet(&report),
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for JSON
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tidydir=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
