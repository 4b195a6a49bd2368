use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::cleaner::Pass;

/// tidydir: keep directories free of duplicates, bad names and junk files
#[derive(Parser, Debug)]
#[command(
    name = "tidydir",
    version,
    about = "Directory hygiene utility",
    long_about = "tidydir finds and fixes duplicate files, files sharing a name, names with\n\
                  invalid symbols, empty files, non-standard permissions and temporary files.\n\
                  Every fix is off unless its switch is set to y.",
    after_help = "EXAMPLES:\n  \
        tidydir -d ~/inbox --temporary y             Remove *.tmp files\n  \
        tidydir -d ~/inbox --same-content            Keep the oldest of identical files\n  \
        tidydir -d ~/a -a ~/b --same-name y          Keep the newest of same-named files\n  \
        tidydir -d ~/inbox --symbols y -c cfg.json   Rename with custom symbols\n  \
        tidydir -d ~/inbox --empty y --dry-run       Preview empty-file removal\n  \
        tidydir -d ~/inbox --permissions y --format json"
)]
pub struct Cli {
    /// Directory to manage
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        required_unless_present = "completions"
    )]
    pub dir: Option<PathBuf>,

    /// Additional directory to manage (repeatable)
    #[arg(short = 'a', long = "also", value_name = "DIR")]
    pub also: Vec<PathBuf>,

    /// JSON config file overriding the built-in defaults
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Delete files with the same content, keeping the oldest
    #[arg(long, value_enum, value_name = "Y/N", default_value = "n", num_args = 0..=1, default_missing_value = "y")]
    pub same_content: YesNo,

    /// Delete files with the same name, keeping the newest
    #[arg(long, value_enum, value_name = "Y/N", default_value = "n", num_args = 0..=1, default_missing_value = "y")]
    pub same_name: YesNo,

    /// Rename files whose names contain invalid symbols
    #[arg(long, value_enum, value_name = "Y/N", default_value = "n", num_args = 0..=1, default_missing_value = "y")]
    pub symbols: YesNo,

    /// Delete empty files
    #[arg(long, value_enum, value_name = "Y/N", default_value = "n", num_args = 0..=1, default_missing_value = "y")]
    pub empty: YesNo,

    /// Reset file permissions to the configured mode
    #[arg(long, value_enum, value_name = "Y/N", default_value = "n", num_args = 0..=1, default_missing_value = "y")]
    pub permissions: YesNo,

    /// Delete temporary files
    #[arg(long, value_enum, value_name = "Y/N", default_value = "n", num_args = 0..=1, default_missing_value = "y")]
    pub temporary: YesNo,

    /// Show what would change without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<CompletionShell>,
}

impl Cli {
    /// Passes switched on, in execution order
    pub fn enabled_passes(&self) -> Vec<Pass> {
        Pass::ALL
            .into_iter()
            .filter(|pass| self.toggle(*pass).is_yes())
            .collect()
    }

    fn toggle(&self, pass: Pass) -> YesNo {
        match pass {
            Pass::SameContent => self.same_content,
            Pass::SameName => self.same_name,
            Pass::InvalidSymbols => self.symbols,
            Pass::Empty => self.empty,
            Pass::Permissions => self.permissions,
            Pass::Temporary => self.temporary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum YesNo {
    #[value(name = "y", alias = "yes")]
    Yes,
    #[value(name = "n", alias = "no")]
    No,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
