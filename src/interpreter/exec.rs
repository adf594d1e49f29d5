//! Statement execution.

use std::io::Write;

use crate::frontend::typed_ast::{Stmt, StmtKind};

use super::{Flow, Frame, Interpreter, RuntimeError, Value};

impl<'p, W: Write> Interpreter<'p, W> {
    /// Execute statements in order until one produces a non-`Normal` flow.
    pub(crate) fn exec_stmts(&mut self, stmts: &'p [Stmt], frame: &mut Frame<'p>) -> Result<Flow, RuntimeError> {
        for stmt in stmts {
            let flow = self.exec_stmt(stmt, frame)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &'p Stmt, frame: &mut Frame<'p>) -> Result<Flow, RuntimeError> {
        match &stmt.kind {
            StmtKind::Declare { place, value } => {
                let value = match value {
                    Some(expr) => self.eval(expr, frame)?,
                    None => Value::default_for(self.place_type(*place, frame)?),
                };
                self.store(*place, value, frame)?;
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let branch = if self.eval_bool(condition, frame)? {
                    then_branch
                } else {
                    else_branch
                };
                return self.exec_stmts(branch, frame);
            }
            StmtKind::While { condition, body } => {
                while self.eval_bool(condition, frame)? {
                    match self.exec_stmts(body, frame)? {
                        Flow::Break => break,
                        Flow::Normal | Flow::Continue => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
            }
            StmtKind::Break => return Ok(Flow::Break),
            StmtKind::Continue => return Ok(Flow::Continue),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(expr, frame)?,
                    None => Value::Void,
                };
                return Ok(Flow::Return(value));
            }
            StmtKind::Print(expr) => {
                let value = self.eval(expr, frame)?;
                self.print_value(value)?;
            }
            StmtKind::Expr(expr) => {
                self.eval(expr, frame)?;
            }
            StmtKind::Block(stmts) => return self.exec_stmts(stmts, frame),
        }
        Ok(Flow::Normal)
    }
}
