//! CLI module for docsync
//!
//! This module provides the command-line interface.
//!
//! ## Commands
//!
//! - `check` - Compare sources against docs and print the mismatch report
//! - `sync` - Report, then regenerate the editor syntax files (`--check` / `--diff` to preview)
//! - `keywords` - Print the canonical keyword list of one family
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::Diagnostic;

use docsync_core::vocab::family::Family;

use crate::error::SyncError;
use crate::reconcile::report::ReportFormat;
use crate::version::DOCSYNC_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<SyncError> for CliError {
    fn from(err: SyncError) -> Self {
        let mut message = format!("Error: {err}");
        if let Some(help) = err.help() {
            message.push_str(&format!("\n  help: {help}"));
        }
        CliError::failure(message)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Keep conky's sources, documentation and editor syntax files in sync
#[derive(Parser, Debug)]
#[command(name = "docsync")]
#[command(version = DOCSYNC_VERSION)]
#[command(about = "Cross-check declared and documented identifiers and regenerate syntax keyword lists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Repository root that configured paths are relative to
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Configuration file (default: <root>/docsync.toml if present)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare sources against docs and print the mismatch report
    Check {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Print the report, then regenerate the editor syntax files
    Sync {
        #[command(flatten)]
        report: ReportArgs,
        /// Check whether the syntax files are up to date without modifying them
        #[arg(long)]
        check: bool,
        /// Show diff of regeneration changes
        #[arg(long)]
        diff: bool,
        /// Fail if a syntax file lacks one of its anchor lines
        #[arg(long)]
        strict: bool,
    },

    /// Print the canonical keyword list of a family, one per line
    Keywords {
        /// Identifier family to print
        #[arg(long, value_enum, default_value_t = FamilyArg::Objects)]
        family: FamilyArg,
    },
}

/// Report options shared by `check` and `sync`.
#[derive(Args, Debug, Clone, Copy)]
pub struct ReportArgs {
    /// Report output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
    /// Exit with failure when any inconsistency is found
    #[arg(long)]
    pub deny_drift: bool,
}

/// Identifier family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FamilyArg {
    Objects,
    Configs,
}

impl From<FamilyArg> for Family {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Objects => Family::Objects,
            FamilyArg::Configs => Family::Configs,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let ctx = commands::Context::load(cli.root, cli.config)?;

    match cli.command {
        Command::Check { report } => commands::check(&ctx, report),
        Command::Sync {
            report,
            check,
            diff,
            strict,
        } => commands::sync(
            &ctx,
            report,
            commands::SyncFlags {
                check,
                diff,
                strict,
            },
        ),
        Command::Keywords { family } => commands::keywords(&ctx, family.into()),
    }
}

// ============================================================================
// Tests
// ============================================================================
