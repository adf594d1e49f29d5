//! Wabbit Compiler Backend
//!
//! This module lowers the resolved program to native code.
//!
//! The pipeline is:
//! 1. Typed program from the frontend → [`IrCodegen`] → LLVM IR text (`.ll`)
//! 2. The IR is handed to an external C compiler (`clang`) together with the `wabbit_runtime` static library
//! 3. The result is a native executable whose output matches the interpreter's
//!
//! ## Module Organization
//!
//! - `ir/` - Code generation from the typed program to LLVM IR text
//!   - `codegen.rs` - Module assembly and the [`IrCodegen`] entry point
//!   - `builder.rs` - Per-function instruction buffer (temporaries, labels, terminators)
//!   - `types.rs` - IR spellings of types, constants and comparison predicates
//!   - `stmt.rs` - Statement lowering
//!   - `expr.rs` - Expression lowering
//! - `toolchain.rs` - Native compiler invocation

#![deny(clippy::unwrap_used)]

pub mod ir;
pub mod toolchain;

pub use ir::{CodegenError, IrCodegen, generate};
pub use toolchain::{ToolchainConfig, ToolchainError, build_executable};
