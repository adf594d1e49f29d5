//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::backend::{self, ToolchainConfig};
use crate::format::{format_diff, format_source};
use crate::frontend::diagnostics::{self, CompileError};
use crate::frontend::typed_ast::Program;
use crate::frontend::{check_source, lexer, parser};
use crate::interpreter;

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during compilation.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Source file extension.
const SOURCE_EXTENSION: &str = "wb";

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

/// Render a front-end error against its source.
fn compile_failure(file_name: &str, source: &str, err: &CompileError) -> CliError {
    CliError::failure(diagnostics::format_error(file_name, source, err).trim_end())
}

fn check(file_name: &str, source: &str) -> CliResult<Program> {
    check_source(source).map_err(|e| compile_failure(file_name, source, &e))
}

/// Tokenize and display tokens.
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let name = file_path.display().to_string();
    let tokens = lexer::lex(&source).map_err(|e| compile_failure(&name, &source, &e))?;

    let mut out = io::stdout().lock();
    for tok in &tokens {
        writeln!(out, "{tok}").map_err(output_error)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display AST.
pub fn parse_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let name = file_path.display().to_string();
    let program = parser::parse_source(&source).map_err(|e| compile_failure(&name, &source, &e))?;
    println!("{program:#?}");
    Ok(ExitCode::SUCCESS)
}

/// Resolve and type check a file.
pub fn check_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    check(&file_path.display().to_string(), &source)?;
    println!("✓ {} checked", file_path.display());
    Ok(ExitCode::SUCCESS)
}

/// Emit the generated LLVM IR.
pub fn emit_llvm(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let name = file_path.display().to_string();
    let program = check(&name, &source)?;
    let ir = backend::generate(&program, &name).map_err(|e| CliError::failure(format!("Code generation error: {e}")))?;
    print!("{ir}");
    Ok(ExitCode::SUCCESS)
}

/// Interpret a source file.
pub fn run_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    run_source(&file_path.display().to_string(), &source)
}

/// Interpret inline source code.
pub fn run_code(code: &str) -> CliResult<ExitCode> {
    run_source("<command>", code)
}

fn run_source(file_name: &str, source: &str) -> CliResult<ExitCode> {
    let program = check(file_name, source)?;
    match interpreter::interpret(&program, BufWriter::new(io::stdout())) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => Err(CliError::failure(e.to_string())),
    }
}

/// Compile a file to a native executable.
pub fn build_file(file_path: &Path, output: Option<&Path>, keep_ir: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let name = file_path.display().to_string();
    let program = check(&name, &source)?;
    let ir = backend::generate(&program, &name).map_err(|e| CliError::failure(format!("Code generation error: {e}")))?;

    let output = output.map_or_else(|| default_output(file_path), Path::to_path_buf);
    let config = ToolchainConfig::from_env();
    let built = backend::build_executable(&ir, &output, &config, keep_ir)
        .map_err(|e| CliError::failure(format!("Build failed: {e}")))?;

    if !built.stderr.is_empty() {
        eprint!("{}", built.stderr);
    }
    println!("✓ Built {}", built.executable.display());
    if let Some(ir_path) = &built.ir_path {
        println!("  IR: {}", ir_path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// `prog.wb` builds `prog`; a path without an extension gets `.out` so the source is never overwritten.
fn default_output(file_path: &Path) -> PathBuf {
    if file_path.extension().is_some() {
        file_path.with_extension("")
    } else {
        file_path.with_extension("out")
    }
}

/// Format Wabbit source files.
pub fn format_files(path: &Path, check_mode: bool, diff_mode: bool) -> CliResult<ExitCode> {
    let files = collect_wb_files(path);

    if files.is_empty() {
        return Err(CliError::failure(format!("No .{SOURCE_EXTENSION} files found")));
    }

    let mut needs_formatting = false;
    let mut formatted_count = 0;
    let mut error_count = 0;

    for file_path in &files {
        let source = match read_source(file_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                error_count += 1;
                continue;
            }
        };

        let formatted = match format_source(&source) {
            Ok(formatted) => formatted,
            Err(e) => {
                eprintln!("{}", diagnostics::format_error(&file_path.display().to_string(), &source, &e).trim_end());
                error_count += 1;
                continue;
            }
        };
        let changed = source != formatted;

        if diff_mode && changed {
            println!("--- {}", file_path.display());
            if let Ok(Some(diff)) = format_diff(&source) {
                print!("{diff}");
            }
            println!();
        }

        if check_mode {
            if changed {
                println!("Would reformat: {}", file_path.display());
                needs_formatting = true;
            }
        } else if diff_mode {
            needs_formatting |= changed;
        } else if changed {
            if let Err(e) = fs::write(file_path, &formatted) {
                eprintln!("Error writing {}: {}", file_path.display(), e);
                error_count += 1;
            } else {
                println!("Formatted: {}", file_path.display());
                formatted_count += 1;
            }
        }
    }

    if check_mode || diff_mode {
        if needs_formatting {
            let msg = if diff_mode { "need formatting" } else { "would be reformatted" };
            return Err(CliError::failure(format!("\n{} file(s) {}", files.len(), msg)));
        }
        println!("✓ {} file(s) already formatted", files.len());
    } else {
        println!("✓ {formatted_count} file(s) formatted, {error_count} error(s)");
    }

    if error_count > 0 {
        return Err(CliError::new("", ExitCode::FAILURE));
    }

    Ok(ExitCode::SUCCESS)
}

/// `path` itself if it is a source file, otherwise every source file below it, skipping hidden and `target`
/// directories. Sorted so output order is stable.
fn collect_wb_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if path.is_file() {
        if path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                let entry_path = entry.path();
                if entry_path.is_dir() {
                    let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                    if !name.starts_with('.') && name != "target" {
                        files.extend(collect_wb_files(&entry_path));
                    }
                } else if entry_path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
                    files.push(entry_path);
                }
            }
        }
    }

    files.sort();
    files
}

fn output_error(e: io::Error) -> CliError {
    CliError::failure(format!("Error writing output: {e}"))
}
