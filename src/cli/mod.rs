//! CLI module for klsense
//!
//! This module provides the command-line interface to the KL source engine.
//!
//! ## Commands
//!
//! - `dump <file>...` - Print the declarations of one or more KL files
//! - `lex <file>` - Print the symbol stream of a KL file
//! - `type <file> --offset N` - Print the inferred type of the symbol at a byte offset
//! - `ports <file> --entry NAME` - Print the ports of an entry operator
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

use clap::{Parser, Subcommand};

use crate::config::EngineConfig;

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

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// KL source inspection tool
#[derive(Parser, Debug)]
#[command(name = "klsense")]
#[command(version = VERSION)]
#[command(about = "Inspect KL source: declarations, symbols, types and operator ports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Extra extension search folder (repeatable; searched before KL_EXTS_PATH)
    #[arg(long = "ext-path", value_name = "DIR", global = true)]
    pub ext_paths: Vec<PathBuf>,

    /// Do not register the built-in array, dict and String units
    #[arg(long = "no-intrinsics", global = true)]
    pub no_intrinsics: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the declarations of KL files
    Dump {
        /// Source files; later files see the declarations of earlier ones
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the symbol stream of a KL file
    Lex {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the inferred type of the symbol at a byte offset
    Type {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Byte offset into the file
        #[arg(long, value_name = "N")]
        offset: usize,
    },

    /// Print the ports of an entry operator
    Ports {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Name of the entry operator
        #[arg(long, value_name = "NAME")]
        entry: String,
    },
}

impl Cli {
    /// Engine settings from the environment, overridden by flags.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::from_env()
            .with_seed_intrinsics(!self.no_intrinsics)
            .with_leading_extension_paths(self.ext_paths.iter().cloned())
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
    let config = cli.engine_config();
    match cli.command {
        Command::Dump { files } => commands::dump_files(&config, &files),
        Command::Lex { file } => commands::lex_file(&file),
        Command::Type { file, offset } => commands::type_at(&config, &file, offset),
        Command::Ports { file, entry } => commands::ports(&file, &entry),
    }
}

// ============================================================================
// Tests
// ============================================================================
