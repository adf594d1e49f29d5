//! Shared syntax frontend for the Wabbit language: lexer, parser, AST, diagnostics.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not do name resolution or type checking.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `wabbit_core::lang` registries.
//! - Every stage is fail-fast: the first error aborts the stage and is returned as a single [`CompileError`].
//!
//! ## Examples
//! ```rust
//! use wabbit_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("print 1 + 2;").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.statements.len(), 1);
//! ```
//!
//! [`CompileError`]: diagnostics::CompileError

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
