//! Wabbit Compiler Frontend
//!
//! This module contains all frontend components:
//! - `lexer`: tokenization of source code
//! - `parser`: parsing tokens into AST
//! - `ast`: abstract syntax tree definitions
//! - `diagnostics`: error reporting
//! - `symbols`: symbol table and scope management
//! - `resolver`: name resolution and type checking, producing the typed program
//! - `typed_ast`: the typed program consumed by the interpreter and the IR backend

// Syntax components are provided by the shared wabbit_syntax crate.
pub use wabbit_syntax::{ast, diagnostics, lexer, parser};

// Compiler-specific pieces remain local.
pub mod resolver;
pub mod symbols;
pub mod typed_ast;

use diagnostics::CompileError;

/// Run the whole frontend on a source string: lex, parse, resolve.
///
/// ## Errors
/// Returns the first LexError, ParseError, NameError or TypeError.
pub fn check_source(source: &str) -> Result<typed_ast::Program, CompileError> {
    let tokens = lexer::lex(source)?;
    let ast = parser::parse(&tokens)?;
    resolver::resolve(&ast)
}
