//! Expression checking: operators, calls, assignment, block expressions.

use crate::frontend::ast::{self, BinaryOp, Literal, Spanned, UnaryOp};
use crate::frontend::diagnostics::{CompileError, errors};
use crate::frontend::symbols::ScopeKind;
use crate::frontend::typed_ast::{Expr, ExprKind, LogicalOp, StmtKind, Type};

use super::Resolver;

impl Resolver {
    /// Resolve an expression that must produce a value (anything but a call to a void function).
    pub(crate) fn resolve_value(&mut self, expr: &Spanned<ast::Expr>) -> Result<Expr, CompileError> {
        let resolved = self.resolve_expr(expr)?;
        if resolved.ty == Type::Void {
            return Err(CompileError::type_error("this expression has no value", resolved.span)
                .with_note("the called function has no return type"));
        }
        Ok(resolved)
    }

    /// Resolve any expression. The result may have type `void` (a call to a function without a return type).
    pub(crate) fn resolve_expr(&mut self, expr: &Spanned<ast::Expr>) -> Result<Expr, CompileError> {
        let span = expr.span;
        let (kind, ty) = match &expr.node {
            ast::Expr::Literal(literal) => (ExprKind::Literal(*literal), literal_type(literal)),
            ast::Expr::Location(name) => {
                let info = self
                    .symbols
                    .variable(name)
                    .ok_or_else(|| errors::undefined_variable(name, span))?;
                (ExprKind::Load(info.place), info.ty)
            }
            ast::Expr::Assign(target, value) => self.resolve_assign(target, value)?,
            ast::Expr::Binary(left, op, right) => self.resolve_binary(left, *op, right, span)?,
            ast::Expr::Unary(op, operand) => self.resolve_unary(*op, operand)?,
            ast::Expr::Call(name, args) => self.resolve_call(name, args)?,
            ast::Expr::Block(block) => self.resolve_block_expr(block, span)?,
        };
        Ok(Expr { kind, ty, span })
    }

    fn resolve_assign(
        &mut self,
        target: &Spanned<ast::Ident>,
        value: &Spanned<ast::Expr>,
    ) -> Result<(ExprKind, Type), CompileError> {
        let info = self
            .symbols
            .variable(&target.node)
            .cloned()
            .ok_or_else(|| errors::undefined_variable(&target.node, target.span))?;
        if !info.is_mutable {
            return Err(errors::assign_to_const(&target.node, target.span));
        }

        let value = self.resolve_value(value)?;
        if value.ty != info.ty {
            return Err(errors::type_mismatch(info.ty.name(), value.ty.name(), value.span));
        }
        Ok((
            ExprKind::Assign {
                place: info.place,
                value: Box::new(value),
            },
            info.ty,
        ))
    }

    fn resolve_binary(
        &mut self,
        left: &Spanned<ast::Expr>,
        op: BinaryOp,
        right: &Spanned<ast::Expr>,
        span: ast::Span,
    ) -> Result<(ExprKind, Type), CompileError> {
        let left = Box::new(self.resolve_value(left)?);
        let right = Box::new(self.resolve_value(right)?);

        if op.is_logical() {
            for operand in [&left, &right] {
                if operand.ty != Type::Bool {
                    return Err(errors::type_mismatch("bool", operand.ty.name(), operand.span)
                        .with_note(format!("operator '{op}' takes bool operands")));
                }
            }
            let op = if op == BinaryOp::And { LogicalOp::And } else { LogicalOp::Or };
            return Ok((ExprKind::Logical { op, left, right }, Type::Bool));
        }

        if left.ty != right.ty {
            let mut error = CompileError::type_error(
                format!(
                    "operator '{op}' needs operands of the same type, found '{}' and '{}'",
                    left.ty, right.ty
                ),
                span,
            );
            if left.ty.is_numeric() && right.ty.is_numeric() {
                error = error.with_note("Wabbit never converts between int and float implicitly");
            }
            return Err(error);
        }

        let ty = if op.is_comparison() {
            Type::Bool
        } else {
            if !left.ty.is_numeric() {
                return Err(CompileError::type_error(
                    format!("operator '{op}' is not defined for '{}'", left.ty),
                    span,
                )
                .with_note("arithmetic operators take int or float operands"));
            }
            left.ty
        };
        Ok((ExprKind::Binary { op, left, right }, ty))
    }

    fn resolve_unary(&mut self, op: UnaryOp, operand: &Spanned<ast::Expr>) -> Result<(ExprKind, Type), CompileError> {
        let operand = Box::new(self.resolve_value(operand)?);
        let ok = match op {
            UnaryOp::Pos | UnaryOp::Neg => operand.ty.is_numeric(),
            UnaryOp::Not => operand.ty == Type::Bool,
        };
        if !ok {
            return Err(CompileError::type_error(
                format!("unary '{op}' is not defined for '{}'", operand.ty),
                operand.span,
            ));
        }
        let ty = operand.ty;
        Ok((ExprKind::Unary { op, operand }, ty))
    }

    fn resolve_call(
        &mut self,
        name: &Spanned<ast::Ident>,
        args: &[Spanned<ast::Expr>],
    ) -> Result<(ExprKind, Type), CompileError> {
        let info = self
            .symbols
            .function(&name.node)
            .cloned()
            .ok_or_else(|| errors::undefined_function(&name.node, name.span))?;
        if args.len() != info.params.len() {
            return Err(errors::arity_mismatch(&name.node, info.params.len(), args.len(), name.span));
        }

        let mut resolved = Vec::with_capacity(args.len());
        for (arg, (param, expected)) in args.iter().zip(&info.params) {
            let arg = self.resolve_value(arg)?;
            if arg.ty != *expected {
                return Err(errors::type_mismatch(expected.name(), arg.ty.name(), arg.span)
                    .with_note(format!("for parameter '{param}' of '{}'", name.node)));
            }
            resolved.push(arg);
        }
        Ok((
            ExprKind::Call {
                func: info.id,
                args: resolved,
            },
            info.return_type,
        ))
    }

    /// A block used as a value. `break`/`continue` inside it may only target loops it contains, and `return` is
    /// rejected outright.
    fn resolve_block_expr(&mut self, block: &ast::Block, span: ast::Span) -> Result<(ExprKind, Type), CompileError> {
        let saved_loop_depth = std::mem::replace(&mut self.loop_depth, 0);
        self.block_expr_depth += 1;
        self.symbols.enter_scope(ScopeKind::Block);
        let stmts = self.resolve_stmts(&block.statements);
        self.symbols.exit_scope();
        self.block_expr_depth -= 1;
        self.loop_depth = saved_loop_depth;

        let mut stmts = stmts?;
        let value = match stmts.pop() {
            Some(last) => match last.kind {
                StmtKind::Expr(value) => value,
                _ => return Err(block_without_value(last.span)),
            },
            None => return Err(block_without_value(span)),
        };
        let ty = value.ty;
        Ok((
            ExprKind::Block {
                stmts,
                value: Box::new(value),
            },
            ty,
        ))
    }
}

fn literal_type(literal: &Literal) -> Type {
    match literal {
        Literal::Int(_) => Type::Int,
        Literal::Float(_) => Type::Float,
        Literal::Char(_) => Type::Char,
        Literal::Bool(_) => Type::Bool,
    }
}

fn block_without_value(span: ast::Span) -> CompileError {
    CompileError::parse("a block used as a value must end with an expression statement", span)
}
