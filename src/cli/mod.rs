//! CLI module for the ts2go source generator
//!
//! This module provides the command-line interface for the generator.
//!
//! ## Commands
//!
//! - `build <file> [output_dir]` - Generate Go and write `main.go` into the output directory
//! - `emit <file>` - Generate Go and print it to stdout
//! - `<file>` - Type check only (default action when no subcommand given)
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `report` - Diagnostic rendering with source context
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
pub mod report;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::backend::EmitOptions;

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

/// TypeScript-subset to Go source generator
#[derive(Parser, Debug)]
#[command(name = "ts2go")]
#[command(version = VERSION)]
#[command(about = "Generate Go source from a TypeScript subset", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to type check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "file")]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "file")]
    pub parse_file: Option<PathBuf>,

    /// Type check only (debug)
    #[arg(long = "check", value_name = "FILE", conflicts_with = "file")]
    pub check_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate Go and write it to <OUTPUT_DIR>/main.go
    Build {
        /// Entry source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output directory (default: ts2go_output)
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
        #[command(flatten)]
        emit: EmitArgs,
    },

    /// Generate Go and print it to stdout
    Emit {
        /// Entry source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        emit: EmitArgs,
    },
}

/// Emission settings shared by `build` and `emit`.
#[derive(Args, Debug, Clone, Default)]
pub struct EmitArgs {
    /// Name of the generated package
    #[arg(long = "package", value_name = "NAME")]
    pub package: Option<String>,

    /// Indent with N spaces instead of tabs
    #[arg(long = "indent-width", value_name = "N")]
    pub indent_width: Option<usize>,

    /// Only import runtime modules the generated code uses
    #[arg(long = "prune-imports")]
    pub prune_imports: bool,
}

impl EmitArgs {
    pub fn to_options(&self) -> EmitOptions {
        let mut options = EmitOptions::new().with_prune_unused_imports(self.prune_imports);
        if let Some(package) = &self.package {
            options = options.with_package_name(package.clone());
        }
        if let Some(width) = self.indent_width {
            options = options.with_indent_width(width);
        }
        options
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
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file);
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file);
    }
    if let Some(file) = cli.check_file {
        return commands::check_file(&file);
    }

    match cli.command {
        Some(Command::Build { file, output_dir, emit }) => {
            commands::build_file(&file, output_dir.as_deref(), &emit.to_options())
        }
        Some(Command::Emit { file, emit }) => commands::emit_file(&file, &emit.to_options()),
        None => {
            // Default: type check the file if provided
            if let Some(file) = cli.file {
                commands::check_file(&file)
            } else {
                Err(CliError::failure("Error: expected a subcommand or a file to check (see --help)"))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_build() {
        let cli = Cli::try_parse_from(["ts2go", "build", "main.ts", "out"]).unwrap();
        if let Some(Command::Build { file, output_dir, .. }) = cli.command {
            assert_eq!(file, PathBuf::from("main.ts"));
            assert_eq!(output_dir, Some(PathBuf::from("out")));
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_cli_parse_emit_flags() {
        let cli = Cli::try_parse_from([
            "ts2go",
            "emit",
            "main.ts",
            "--package",
            "demo",
            "--indent-width",
            "4",
            "--prune-imports",
        ])
        .unwrap();
        if let Some(Command::Emit { emit, .. }) = cli.command {
            let options = emit.to_options();
            assert_eq!(options.package_name, "demo");
            assert_eq!(options.indent_unit, "    ");
            assert!(options.prune_unused_imports);
        } else {
            panic!("Expected Emit command");
        }
    }

    #[test]
    fn test_emit_args_default_to_emit_options_default() {
        assert_eq!(EmitArgs::default().to_options(), EmitOptions::default());
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["ts2go", "--lex", "main.ts"]).unwrap();
        assert!(cli.lex_file.is_some());

        let cli = Cli::try_parse_from(["ts2go", "--parse", "main.ts"]).unwrap();
        assert!(cli.parse_file.is_some());

        let cli = Cli::try_parse_from(["ts2go", "--check", "main.ts"]).unwrap();
        assert!(cli.check_file.is_some());
    }

    #[test]
    fn test_cli_default_action_is_check() {
        let cli = Cli::try_parse_from(["ts2go", "main.ts"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("main.ts")));
    }
}
