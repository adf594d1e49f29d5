#![forbid(unsafe_code)]
//! Wabbit Language Toolchain
//!
//! Wabbit is a small statically typed imperative language. This crate provides the frontend (lexer, parser,
//! resolver), a tree-walking interpreter, a compiler to LLVM IR, and tooling (formatter, CLI).
//!
//! ```text
//! source → lexer → parser → resolver ─┬→ interpreter
//!                                     └→ backend::ir → clang + wabbit_runtime → executable
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: a shape the resolver should have rejected is reported as an `Internal` error by the
//!   interpreter and the code generator, never as a panic.

pub mod backend;
pub mod cli;
pub mod format;
pub mod frontend;
pub mod interpreter;
pub mod stack;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::resolver;
pub use frontend::symbols;
pub use frontend::typed_ast;

pub use backend::IrCodegen;

pub use format::{FormatConfig, check_formatted, format_diff, format_program, format_source, format_source_with_config};
