//! Command-line interface for ext-restorer.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **shell**: Interactive shell to browse, select and rename (the default)
//! - **detect**: Print the signature and detected type of one or more files
//! - **rename**: Restore the extension of a single file
//! - **signatures**: List the embedded signature table
//!
//! ## Usage
//!
//! ```text
//! # Browse and fix files interactively, starting in ~/Downloads
//! ext-restorer shell --dir ~/Downloads
//!
//! # What is this file?
//! ext-restorer detect attachment
//!
//! # JSON output for scripting
//! ext-restorer detect attachment --format json
//!
//! # Preview, then apply
//! ext-restorer rename attachment --dry-run
//! ext-restorer rename attachment
//! ```

use clap::{Parser, Subcommand};

use crate::detection::resolver::ResolverOptions;
use crate::signatures::SignatureTable;

pub mod detect;
pub mod rename;
pub mod shell;
pub mod signatures;

#[derive(Parser)]
#[command(name = "ext-restorer")]
#[command(version)]
#[command(about = "Identify files by magic number and restore missing extensions")]
#[command(
    long_about = "ext-restorer reads the first bytes of a file, matches them against a table of known signatures and renames the file with the extension it should have.\n\nZIP archives are opened to tell Word, PowerPoint and Excel documents apart from plain archives."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive shell
    Shell(shell::ShellArgs),

    /// Detect the type of files from their leading bytes
    Detect(detect::DetectArgs),

    /// Restore the extension of a file
    Rename(rename::RenameArgs),

    /// List the embedded signature table
    Signatures,
}

/// Options shared by every command that resolves file types
#[derive(clap::Args, Clone, Copy, Debug, Default)]
pub struct DetectionArgs {
    /// Fail on unreadable ZIP archives instead of treating them as plain zip
    #[arg(long)]
    pub strict_archives: bool,
}

impl DetectionArgs {
    #[must_use]
    pub fn resolver_options(self) -> ResolverOptions {
        ResolverOptions {
            strict_archives: self.strict_archives,
            ..ResolverOptions::default()
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the embedded signature table for a CLI command
///
/// # Errors
///
/// Returns an error if the embedded table is invalid.
pub fn load_table() -> anyhow::Result<&'static SignatureTable> {
    SignatureTable::embedded().map_err(|e| anyhow::anyhow!("{e}"))
}
