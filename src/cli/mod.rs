//! cli
//!
//! Command-line interface layer for buildstamp.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT query the repository directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, turns flags and
//! configuration into directives, and hands them to
//! [`crate::core::assemble`]. Only rendered output reaches stdout.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::ui::output::Verbosity;

/// Execution context shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Directory override.
    pub cwd: Option<PathBuf>,
    /// Diagnostic verbosity.
    pub verbosity: Verbosity,
}

impl Context {
    /// The directory to collect metadata from.
    pub fn dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir().context("failed to determine current directory"),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    commands::dispatch(cli.command.unwrap_or_default(), &ctx)
}
