//! CLI module for the Wabbit toolchain
//!
//! ## Commands
//!
//! - `run <file>` / `run -c <code>` - Interpret a program
//! - `build <file>` - Compile to LLVM IR and link a native executable
//! - `fmt <file|dir>` - Format Wabbit source files
//! - `--lex`, `--parse`, `--check`, `--emit-llvm <file>` - Inspect one pipeline stage
//! - `<file>` - Check a file (lex, parse, resolve)
//!
//! ## Design
//!
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.
//!
//! Every command runs on a worker thread with a large stack: the parser, resolver, formatter and code generator
//! recurse once per nesting level, and the main thread's stack is too small for machine-generated source.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::stack;

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

pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Wabbit language interpreter and compiler
#[derive(Parser, Debug)]
#[command(name = "wabbit")]
#[command(version = VERSION)]
#[command(about = "The Wabbit language interpreter and compiler", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print the token stream
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "file")]
    pub lex_file: Option<PathBuf>,

    /// Print the syntax tree
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "file")]
    pub parse_file: Option<PathBuf>,

    /// Resolve and type check only
    #[arg(long = "check", value_name = "FILE", conflicts_with = "file")]
    pub check_file: Option<PathBuf>,

    /// Print the generated LLVM IR
    #[arg(long = "emit-llvm", value_name = "FILE", conflicts_with = "file")]
    pub emit_llvm_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interpret a program
    Run {
        /// Source file to run
        #[arg(value_name = "FILE", conflicts_with = "command", required_unless_present = "command")]
        file: Option<PathBuf>,
        /// Run inline source code
        #[arg(short = 'c', long = "command", value_name = "CODE")]
        command: Option<String>,
    },

    /// Compile to a native executable
    Build {
        /// Source file to compile
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Executable to write (default: the source path without its extension)
        #[arg(short = 'o', long = "output", value_name = "OUT")]
        output: Option<PathBuf>,
        /// Keep the generated `.ll` file next to the executable
        #[arg(long)]
        keep_ir: bool,
    },

    /// Format Wabbit source files
    Fmt {
        /// File or directory to format
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
        /// Show diff of formatting changes
        #[arg(long)]
        diff: bool,
    },
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

    let outcome = stack::with_large_stack(|| execute(cli))
        .unwrap_or_else(|e| Err(CliError::failure(format!("Error: cannot start worker thread: {e}"))));
    match outcome {
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
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file);
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file);
    }
    if let Some(file) = cli.check_file {
        return commands::check_file(&file);
    }
    if let Some(file) = cli.emit_llvm_file {
        return commands::emit_llvm(&file);
    }

    match cli.command {
        Some(Command::Run { file, command }) => match (command, file) {
            (Some(code), _) if code.is_empty() => Err(CliError::failure(
                "Error: -c/--command requires source code string",
            )),
            (Some(code), _) => commands::run_code(&code),
            (None, Some(file)) => commands::run_file(&file),
            (None, None) => Err(CliError::failure("Error: run requires a file path or -c \"code\"")),
        },
        Some(Command::Build { file, output, keep_ir }) => commands::build_file(&file, output.as_deref(), keep_ir),
        Some(Command::Fmt { path, check, diff }) => commands::format_files(&path, check, diff),
        None => match cli.file {
            Some(file) => commands::check_file(&file),
            None => Err(CliError::failure("Error: no input file (see --help)")),
        },
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
        let cli = Cli::try_parse_from(["wabbit", "build", "prog.wb", "-o", "prog", "--keep-ir"]).unwrap();
        if let Some(Command::Build { file, output, keep_ir }) = cli.command {
            assert_eq!(file, PathBuf::from("prog.wb"));
            assert_eq!(output, Some(PathBuf::from("prog")));
            assert!(keep_ir);
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::try_parse_from(["wabbit", "run", "prog.wb"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Run { .. })));
    }

    #[test]
    fn test_cli_parse_run_with_code() {
        let cli = Cli::try_parse_from(["wabbit", "run", "-c", "print 1;"]).unwrap();
        if let Some(Command::Run { command, file }) = cli.command {
            assert_eq!(command.as_deref(), Some("print 1;"));
            assert!(file.is_none());
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_run_requires_input() {
        assert!(Cli::try_parse_from(["wabbit", "run"]).is_err());
        assert!(Cli::try_parse_from(["wabbit", "run", "a.wb", "-c", "print 1;"]).is_err());
    }

    #[test]
    fn test_cli_parse_fmt() {
        let cli = Cli::try_parse_from(["wabbit", "fmt", "src/", "--check"]).unwrap();
        if let Some(Command::Fmt { check, diff, .. }) = cli.command {
            assert!(check);
            assert!(!diff);
        } else {
            panic!("Expected Fmt command");
        }
    }

    #[test]
    fn test_cli_parse_stage_flags() {
        let cli = Cli::try_parse_from(["wabbit", "--lex", "a.wb"]).unwrap();
        assert!(cli.lex_file.is_some());

        let cli = Cli::try_parse_from(["wabbit", "--parse", "a.wb"]).unwrap();
        assert!(cli.parse_file.is_some());

        let cli = Cli::try_parse_from(["wabbit", "--check", "a.wb"]).unwrap();
        assert!(cli.check_file.is_some());

        let cli = Cli::try_parse_from(["wabbit", "--emit-llvm", "a.wb"]).unwrap();
        assert!(cli.emit_llvm_file.is_some());
    }

    #[test]
    fn test_cli_bare_file() {
        let cli = Cli::try_parse_from(["wabbit", "a.wb"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("a.wb")));
        assert!(cli.command.is_none());
    }
}
