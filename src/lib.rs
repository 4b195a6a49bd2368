//! # tidydir
//!
//! A directory hygiene utility. Given one or more directories, tidydir finds
//! and optionally fixes:
//!
//! - **Duplicate content**: byte-identical files, keeping the oldest copy
//! - **Duplicate names**: files sharing a base name, keeping the newest
//! - **Invalid names**: names with forbidden symbols, renamed without collisions
//! - **Empty files**: zero-length files are removed
//! - **Permissions**: permission bits reset to one configured mode
//! - **Temporary files**: names ending with a configured suffix are removed
//!
//! Every pass re-walks the directories and runs in a fixed order. A
//! `--dry-run` records and prints the same actions without touching disk.

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod duplicates;
pub mod runner;
pub mod scanner;
