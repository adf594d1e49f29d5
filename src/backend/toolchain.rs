//! Native executable builds.
//!
//! `wabbit build` writes the generated module to a `.ll` file and hands it to a C compiler together with the
//! `wabbit_runtime` static library:
//!
//! ```text
//! clang program.ll libwabbit_runtime.a -o program <system libs>
//! ```
//!
//! ## Configuration
//!
//! - `WABBIT_CC`: compiler to invoke (default `clang`).
//! - `WABBIT_RUNTIME`: path to `libwabbit_runtime.a`. Without it the library is searched for next to the running
//!   executable, which is where cargo puts it.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// File name of the runtime static library.
pub const RUNTIME_LIB: &str = "libwabbit_runtime.a";

/// System libraries a Rust static library needs at link time.
#[cfg(target_os = "macos")]
const SYSTEM_LIBS: &[&str] = &["-lSystem", "-lc", "-lm"];
#[cfg(not(target_os = "macos"))]
const SYSTEM_LIBS: &[&str] = &["-lgcc_s", "-lutil", "-lrt", "-lpthread", "-lm", "-ldl", "-lc"];

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("failed to write '{}': {source}", .path.display())]
    WriteIr { path: PathBuf, source: io::Error },

    #[error("could not run C compiler '{}': {source} (set WABBIT_CC to choose another)", .cc.to_string_lossy())]
    CompilerNotFound { cc: OsString, source: io::Error },

    #[error(
        "could not find libwabbit_runtime.a; looked in {} (build the workspace or set WABBIT_RUNTIME)",
        format_paths(.searched)
    )]
    RuntimeNotFound { searched: Vec<PathBuf> },

    #[error("C compiler failed{}:\n{stderr}", .exit_code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    CompilerFailed { exit_code: Option<i32>, stderr: String },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| format!("'{}'", p.display())).collect::<Vec<_>>().join(", ")
}

/// Which compiler to run and which runtime library to link.
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    pub cc: OsString,
    /// Explicit runtime library; `None` searches next to the current executable.
    pub runtime: Option<PathBuf>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            cc: OsString::from("clang"),
            runtime: None,
        }
    }
}

impl ToolchainConfig {
    /// Read `WABBIT_CC` and `WABBIT_RUNTIME`, falling back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(cc) = env::var_os("WABBIT_CC").filter(|v| !v.is_empty()) {
            config.cc = cc;
        }
        config.runtime = env::var_os("WABBIT_RUNTIME").filter(|v| !v.is_empty()).map(PathBuf::from);
        config
    }

    /// Locate the runtime static library.
    pub fn runtime_library(&self) -> Result<PathBuf, ToolchainError> {
        if let Some(path) = &self.runtime {
            return if path.is_file() {
                Ok(path.clone())
            } else {
                Err(ToolchainError::RuntimeNotFound {
                    searched: vec![path.clone()],
                })
            };
        }

        let searched = runtime_search_dirs();
        for dir in &searched {
            let candidate = dir.join(RUNTIME_LIB);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        Err(ToolchainError::RuntimeNotFound { searched })
    }
}

/// The executable's directory and its parent; test binaries live one level below the library in `target/<profile>/deps`.
fn runtime_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            dirs.push(dir.to_path_buf());
            if let Some(parent) = dir.parent() {
                dirs.push(parent.to_path_buf());
            }
        }
    }
    dirs
}

/// Result of a successful native build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub executable: PathBuf,
    /// Where the IR was written; `None` if it was removed after linking.
    pub ir_path: Option<PathBuf>,
    /// Compiler diagnostics (warnings) from a successful run.
    pub stderr: String,
}

/// Compile an IR module into the executable `output`.
///
/// The IR goes to `output` with an `.ll` extension and is removed afterwards unless `keep_ir` is set.
#[tracing::instrument(skip(ir, config), fields(cc = ?config.cc))]
pub fn build_executable(
    ir: &str,
    output: &Path,
    config: &ToolchainConfig,
    keep_ir: bool,
) -> Result<BuildOutput, ToolchainError> {
    let runtime = config.runtime_library()?;
    let ir_path = output.with_extension("ll");
    fs::write(&ir_path, ir).map_err(|source| ToolchainError::WriteIr {
        path: ir_path.clone(),
        source,
    })?;

    let mut command = Command::new(&config.cc);
    command.arg(&ir_path).arg(&runtime).arg("-o").arg(output).args(SYSTEM_LIBS);
    tracing::debug!(?command, "invoking C compiler");

    let result = command.output();
    if !keep_ir {
        let _ = fs::remove_file(&ir_path);
    }
    let result = result.map_err(|source| ToolchainError::CompilerNotFound {
        cc: config.cc.clone(),
        source,
    })?;

    let stderr = String::from_utf8_lossy(&result.stderr).to_string();
    if !result.status.success() {
        return Err(ToolchainError::CompilerFailed {
            exit_code: result.status.code(),
            stderr,
        });
    }

    Ok(BuildOutput {
        executable: output.to_path_buf(),
        ir_path: keep_ir.then_some(ir_path),
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_compiler_is_clang() {
        let config = ToolchainConfig::default();
        assert_eq!(config.cc, OsString::from("clang"));
        assert!(config.runtime.is_none());
    }

    #[test]
    fn test_missing_explicit_runtime_is_reported() {
        let config = ToolchainConfig {
            runtime: Some(PathBuf::from("/nonexistent/libwabbit_runtime.a")),
            ..ToolchainConfig::default()
        };
        let err = match config.runtime_library() {
            Err(e) => e,
            Ok(path) => panic!("found runtime at {}", path.display()),
        };
        assert!(matches!(err, ToolchainError::RuntimeNotFound { .. }));
        assert!(err.to_string().contains("/nonexistent/libwabbit_runtime.a"), "{err}");
    }

    #[test]
    fn test_compiler_failure_message_includes_exit_code() {
        let err = ToolchainError::CompilerFailed {
            exit_code: Some(1),
            stderr: "error: bad IR".to_string(),
        };
        assert_eq!(err.to_string(), "C compiler failed with exit code 1:\nerror: bad IR");
    }
}
