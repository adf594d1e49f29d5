//! Statement checking: declarations, control flow, returns, print.

use crate::frontend::ast::{self, Block, Spanned, Statement};
use crate::frontend::diagnostics::{CompileError, errors};
use crate::frontend::symbols::ScopeKind;
use crate::frontend::typed_ast::{Expr, Stmt, StmtKind, Type};

use super::Resolver;

impl Resolver {
    // ========================================================================
    // Statements
    // ========================================================================

    /// Resolve a statement sequence in the current scope.
    pub(crate) fn resolve_stmts(&mut self, stmts: &[Spanned<Statement>]) -> Result<Vec<Stmt>, CompileError> {
        stmts.iter().map(|stmt| self.resolve_stmt(stmt)).collect()
    }

    /// Resolve a `{ }` block in a new scope.
    pub(crate) fn resolve_block(&mut self, block: &Block) -> Result<Vec<Stmt>, CompileError> {
        self.symbols.enter_scope(ScopeKind::Block);
        let stmts = self.resolve_stmts(&block.statements);
        self.symbols.exit_scope();
        stmts
    }

    pub(crate) fn resolve_stmt(&mut self, stmt: &Spanned<Statement>) -> Result<Stmt, CompileError> {
        let span = stmt.span;
        let kind = match &stmt.node {
            Statement::Var(decl) => {
                self.resolve_declaration(&decl.name, decl.ty.as_ref(), decl.init.as_ref(), true)?
            }
            Statement::Const(decl) => self.resolve_declaration(&decl.name, decl.ty.as_ref(), Some(&decl.init), false)?,
            Statement::Func(decl) => {
                return Err(CompileError::type_error(
                    format!("function '{}' must be declared at the top level", decl.name.node),
                    decl.name.span,
                ));
            }
            Statement::If(if_stmt) => {
                let condition = self.resolve_condition(&if_stmt.condition, "if")?;
                let then_branch = self.resolve_block(&if_stmt.then_branch.node)?;
                let else_branch = match &if_stmt.else_branch {
                    Some(block) => self.resolve_block(&block.node)?,
                    None => Vec::new(),
                };
                StmtKind::If {
                    condition,
                    then_branch,
                    else_branch,
                }
            }
            Statement::While(while_stmt) => {
                let condition = self.resolve_condition(&while_stmt.condition, "while")?;
                self.loop_depth += 1;
                let body = self.resolve_block(&while_stmt.body.node);
                self.loop_depth -= 1;
                StmtKind::While { condition, body: body? }
            }
            Statement::Break => {
                self.require_loop("break", span)?;
                StmtKind::Break
            }
            Statement::Continue => {
                self.require_loop("continue", span)?;
                StmtKind::Continue
            }
            Statement::Return(value) => self.resolve_return(value.as_ref(), span)?,
            Statement::Print(value) => {
                let value = self.resolve_expr(value)?;
                if value.ty == Type::Void {
                    return Err(CompileError::type_error(
                        "cannot print an expression that has no value",
                        value.span,
                    )
                    .with_note("the called function has no return type"));
                }
                StmtKind::Print(value)
            }
            Statement::Block(block) => StmtKind::Block(self.resolve_block(block)?),
            Statement::Expr(expr) => StmtKind::Expr(self.resolve_expr(expr)?),
        };
        Ok(Stmt { kind, span })
    }

    /// `var`/`const`: the initializer is resolved before the name is bound, so it sees any outer binding of the
    /// same name.
    fn resolve_declaration(
        &mut self,
        name: &Spanned<ast::Ident>,
        declared: Option<&Spanned<ast::Ident>>,
        init: Option<&Spanned<ast::Expr>>,
        is_mutable: bool,
    ) -> Result<StmtKind, CompileError> {
        let declared = declared.map(|ty| self.resolve_type_name(ty)).transpose()?;
        let value = init.map(|expr| self.resolve_value(expr)).transpose()?;

        let ty = match (declared, &value) {
            (Some(declared), Some(value)) => {
                if value.ty != declared {
                    return Err(errors::type_mismatch(declared.name(), value.ty.name(), value.span));
                }
                declared
            }
            (Some(declared), None) => declared,
            (None, Some(value)) => value.ty,
            (None, None) => {
                return Err(CompileError::type_error(
                    format!("cannot infer a type for '{}' without an initializer", name.node),
                    name.span,
                ));
            }
        };

        let place = self.declare(name, ty, is_mutable)?;
        Ok(StmtKind::Declare { place, value })
    }

    fn resolve_condition(&mut self, condition: &Spanned<ast::Expr>, keyword: &str) -> Result<Expr, CompileError> {
        let condition = self.resolve_value(condition)?;
        if condition.ty != Type::Bool {
            return Err(errors::type_mismatch("bool", condition.ty.name(), condition.span)
                .with_note(format!("the condition of '{keyword}' must be a bool")));
        }
        Ok(condition)
    }

    fn require_loop(&self, keyword: &str, span: ast::Span) -> Result<(), CompileError> {
        if self.loop_depth > 0 {
            return Ok(());
        }
        let mut error = errors::outside_loop(keyword, span);
        if self.block_expr_depth > 0 {
            error = error.with_note("a block used as a value cannot leave a loop that encloses it");
        }
        Err(error)
    }

    fn resolve_return(&mut self, value: Option<&Spanned<ast::Expr>>, span: ast::Span) -> Result<StmtKind, CompileError> {
        if self.block_expr_depth > 0 {
            return Err(CompileError::type_error(
                "'return' cannot be used inside a block used as a value",
                span,
            ));
        }
        let Some(function) = self.function.clone() else {
            return Err(CompileError::type_error("'return' outside of a function", span));
        };

        match (function.return_type, value) {
            (Type::Void, None) => Ok(StmtKind::Return(None)),
            (Type::Void, Some(value)) => Err(CompileError::type_error(
                format!("function '{}' has no return type, so 'return' cannot carry a value", function.name),
                value.span,
            )),
            (expected, None) => Err(CompileError::type_error(
                format!("function '{}' must return a value of type '{expected}'", function.name),
                span,
            )),
            (expected, Some(value)) => {
                let value = self.resolve_value(value)?;
                if value.ty != expected {
                    return Err(errors::type_mismatch(expected.name(), value.ty.name(), value.span));
                }
                Ok(StmtKind::Return(Some(value)))
            }
        }
    }
}
