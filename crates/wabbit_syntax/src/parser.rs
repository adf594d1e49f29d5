//! Parser for the Wabbit programming language
//!
//! Converts a token stream into an AST. One method per grammar production; the expression grammar is a precedence
//! ladder, loosest first:
//!
//! ```text
//! assignment (right-assoc) → || → && → comparison (non-chaining) → + - → * / → unary + - ! → primary
//! ```
//!
//! The parser is fail-fast: the first unexpected token aborts parsing with a single `ParseError` that names what was
//! expected and what was found.
//!
//! ## Examples
//!
//! ```rust
//! use wabbit_syntax::{lexer, parser};
//!
//! let source = "func square(x int) int { return x * x; } print square(4);";
//! let tokens = lexer::lex(source).unwrap();
//! let ast = parser::parse(&tokens).unwrap();
//! assert_eq!(ast.statements.len(), 2);
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind, int_out_of_range};
use wabbit_core::lang::keywords::KeywordId;
use wabbit_core::lang::operators::{self, OperatorId};
use wabbit_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
