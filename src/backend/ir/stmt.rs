//! Statement lowering.

use wabbit_core::lang::runtime;

use crate::frontend::typed_ast::{Expr, Stmt, StmtKind, Type};

use super::codegen::{CodegenError, FunctionLowering, LoopTargets};
use super::types::{ir_type, zero};

impl FunctionLowering<'_> {
    pub(super) fn lower_stmts(&mut self, stmts: &[Stmt]) -> Result<(), CodegenError> {
        for stmt in stmts {
            self.lower_stmt(stmt)?;
        }
        Ok(())
    }

    fn lower_stmt(&mut self, stmt: &Stmt) -> Result<(), CodegenError> {
        match &stmt.kind {
            StmtKind::Declare { place, value } => {
                let (ptr, ty) = self.place(*place)?;
                let value = match value {
                    Some(expr) => self.lower_expr(expr)?,
                    None => zero(ty)?.to_string(),
                };
                self.builder.emit(format!("store {} {value}, ptr {ptr}", ir_type(ty)));
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => self.lower_if(condition, then_branch, else_branch)?,
            StmtKind::While { condition, body } => self.lower_while(condition, body)?,
            StmtKind::Break => {
                let target = self.innermost_loop()?.break_label.clone();
                self.builder.terminate(format!("br label %{target}"));
            }
            StmtKind::Continue => {
                let target = self.innermost_loop()?.continue_label.clone();
                self.builder.terminate(format!("br label %{target}"));
            }
            StmtKind::Return(value) => match value {
                Some(expr) => {
                    let value = self.lower_expr(expr)?;
                    self.builder.terminate(format!("ret {} {value}", ir_type(expr.ty)));
                }
                None => self.builder.terminate("ret void"),
            },
            StmtKind::Print(expr) => self.lower_print(expr)?,
            StmtKind::Expr(expr) => {
                self.lower_expr(expr)?;
            }
            StmtKind::Block(stmts) => self.lower_stmts(stmts)?,
        }
        Ok(())
    }

    fn lower_if(&mut self, condition: &Expr, then_branch: &[Stmt], else_branch: &[Stmt]) -> Result<(), CodegenError> {
        let cond = self.lower_expr(condition)?;
        let then_label = self.builder.label("if.then");
        let end_label = self.builder.label("if.end");

        if else_branch.is_empty() {
            self.builder
                .terminate(format!("br i1 {cond}, label %{then_label}, label %{end_label}"));
            self.builder.start_block(&then_label);
            self.lower_stmts(then_branch)?;
        } else {
            let else_label = self.builder.label("if.else");
            self.builder
                .terminate(format!("br i1 {cond}, label %{then_label}, label %{else_label}"));
            self.builder.start_block(&then_label);
            self.lower_stmts(then_branch)?;
            self.builder.branch(&end_label);
            self.builder.start_block(&else_label);
            self.lower_stmts(else_branch)?;
        }

        self.builder.start_block(&end_label);
        Ok(())
    }

    fn lower_while(&mut self, condition: &Expr, body: &[Stmt]) -> Result<(), CodegenError> {
        let cond_label = self.builder.label("while.cond");
        let body_label = self.builder.label("while.body");
        let end_label = self.builder.label("while.end");

        self.builder.start_block(&cond_label);
        let cond = self.lower_expr(condition)?;
        self.builder
            .terminate(format!("br i1 {cond}, label %{body_label}, label %{end_label}"));

        self.builder.start_block(&body_label);
        self.loops.push(LoopTargets {
            continue_label: cond_label.clone(),
            break_label: end_label.clone(),
        });
        let lowered = self.lower_stmts(body);
        self.loops.pop();
        lowered?;
        self.builder.branch(&cond_label);

        self.builder.start_block(&end_label);
        Ok(())
    }

    /// Call the runtime print function selected by the value's static type. `bool` is widened to the ABI's `i32`.
    fn lower_print(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        let primitive = expr
            .ty
            .primitive()
            .ok_or_else(|| CodegenError::Internal("print of a void expression".to_string()))?;
        let info = runtime::info_for(runtime::for_type(primitive));

        let mut value = self.lower_expr(expr)?;
        if expr.ty == Type::Bool {
            let widened = self.builder.temp();
            self.builder.emit(format!("{widened} = zext i1 {value} to i32"));
            value = widened;
        }
        self.builder
            .emit(format!("call void @{}({} {value})", info.symbol, info.param_ir_type));
        Ok(())
    }

    fn innermost_loop(&self) -> Result<&LoopTargets, CodegenError> {
        self.loops
            .last()
            .ok_or_else(|| CodegenError::Internal("break or continue outside a loop".to_string()))
    }
}
