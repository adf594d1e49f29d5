//! Name resolution and type checking for Wabbit.
//!
//! Turns a parsed [`Program`] into a [`typed_ast::Program`]: every name bound to its declaration, every expression
//! typed, every function body checked to return on every path. The resolver is the only stage that reports NameError
//! and TypeError; the interpreter and the IR backend trust its output.
//!
//! ## Notes
//!
//! - **Two-pass model**: [`collect`] registers every function signature first, so calls may precede the callee's
//!   declaration and functions may recurse. Everything else is resolved in one walk in source order.
//! - **Fail-fast**: the first error aborts resolution.
//! - **Storage**: top-level `var`/`const` become globals; every other variable gets a fresh slot in the frame of its
//!   function (or of the top-level body). Slots are never reused, so nested shadowing needs no renaming.
//! - **Context**: the enclosing function, loop depth and block-expression depth are carried in the resolver rather
//!   than looked up through the tree.
//!
//! ## Examples
//!
//! ```rust
//! use wabbit::frontend::{parser, resolver};
//!
//! let ast = parser::parse_source("var x int = 1; print x + 2;").unwrap();
//! let program = resolver::resolve(&ast).unwrap();
//! assert_eq!(program.globals.len(), 1);
//! assert_eq!(program.body.len(), 2);
//! ```
//!
//! ## See also
//!
//! - [`symbols`](super::symbols) – symbol table and scope management
//! - [`typed_ast`](super::typed_ast) – the output representation

mod check_expr;
mod check_stmt;
mod collect;
mod returns;


use crate::frontend::ast::{self, Program, Span, Spanned};
use crate::frontend::diagnostics::{CompileError, errors};
use crate::frontend::symbols::*;
use crate::frontend::typed_ast::{self, Global, Local, Place, Type};
use wabbit_core::lang::types;

/// The function whose body is being resolved.
#[derive(Debug, Clone)]
pub(crate) struct FunctionContext {
    pub(crate) name: String,
    pub(crate) return_type: Type,
}

/// Resolver state.
///
/// Create with [`Resolver::new`], then call [`resolve_program`](Self::resolve_program). A resolver is single-use.
pub struct Resolver {
    pub(crate) symbols: SymbolTable,
    pub(crate) globals: Vec<Global>,
    pub(crate) functions: Vec<typed_ast::Function>,
    /// Locals of the frame currently being filled.
    pub(crate) frame: Vec<Local>,
    pub(crate) function: Option<FunctionContext>,
    /// Number of `while` bodies enclosing the current statement (reset inside block expressions).
    pub(crate) loop_depth: usize,
    pub(crate) block_expr_depth: usize,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            globals: Vec::new(),
            functions: Vec::new(),
            frame: Vec::new(),
            function: None,
            loop_depth: 0,
            block_expr_depth: 0,
        }
    }

    /// Resolve a whole program.
    ///
    /// ## Errors
    /// Returns the first NameError or TypeError.
    pub fn resolve_program(mut self, program: &Program) -> Result<typed_ast::Program, CompileError> {
        self.collect_functions(program)?;

        let mut body = Vec::new();
        for stmt in &program.statements {
            match &stmt.node {
                ast::Statement::Func(decl) => {
                    let function = self.resolve_function(decl, stmt.span)?;
                    self.functions.push(function);
                }
                _ => body.push(self.resolve_stmt(stmt)?),
            }
        }

        Ok(typed_ast::Program {
            globals: self.globals,
            functions: self.functions,
            body,
            body_locals: self.frame,
        })
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Resolve a type name written in the source.
    pub(crate) fn resolve_type_name(&self, name: &Spanned<ast::Ident>) -> Result<Type, CompileError> {
        types::from_str(&name.node)
            .map(Type::from_primitive)
            .ok_or_else(|| errors::unknown_type(&name.node, name.span))
    }

    /// Bind a new variable in the current scope and allocate its storage.
    pub(crate) fn declare(
        &mut self,
        name: &Spanned<ast::Ident>,
        ty: Type,
        is_mutable: bool,
    ) -> Result<Place, CompileError> {
        let place = if self.symbols.at_global_scope() {
            Place::Global(self.globals.len())
        } else {
            Place::Local(self.frame.len())
        };
        let info = VariableInfo { ty, is_mutable, place };
        self.symbols
            .define_variable(&name.node, info, name.span)
            .map_err(|first| self.redeclared(&name.node, name.span, first))?;

        match place {
            Place::Global(_) => self.globals.push(Global {
                name: name.node.clone(),
                ty,
                is_const: !is_mutable,
            }),
            Place::Local(_) => self.frame.push(Local {
                name: name.node.clone(),
                ty,
            }),
        }
        Ok(place)
    }

    /// A redeclaration of `name`, noting where symbol `first` declared it.
    pub(crate) fn redeclared(&self, name: &str, span: Span, first: SymbolId) -> CompileError {
        let first_span = self.symbols.get(first).map_or(span, |symbol| symbol.span);
        errors::duplicate_definition(name, span, first_span)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to resolve an AST
#[tracing::instrument(skip_all, fields(stmt_count = program.statements.len()))]
pub fn resolve(program: &Program) -> Result<typed_ast::Program, CompileError> {
    Resolver::new().resolve_program(program)
}
