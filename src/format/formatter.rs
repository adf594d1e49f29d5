//! Core formatting logic for Wabbit source code
//!
//! Walks the AST and emits canonically formatted source code.

use wabbit_core::lang::operators::{ASSIGN_PRECEDENCE, PREFIX_PRECEDENCE};

use super::config::FormatConfig;
use super::writer::FormatWriter;
use crate::frontend::ast::*;

/// Binding power of literals, names, calls and blocks: never parenthesized.
const ATOM_PRECEDENCE: u8 = u8::MAX;

/// Formatter that transforms AST back to formatted source code
pub struct Formatter {
    writer: FormatWriter,
}

impl Formatter {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            writer: FormatWriter::new(config),
        }
    }

    /// Format a program and return the formatted source
    pub fn format(mut self, program: &Program) -> String {
        self.format_program(program);
        self.writer.finish()
    }

    // ========================================================================
    // Program
    // ========================================================================

    /// Top-level functions are set off from their neighbours by one blank line.
    fn format_program(&mut self, program: &Program) {
        let mut prev_was_func = false;
        for stmt in &program.statements {
            let is_func = matches!(stmt.node, Statement::Func(_));
            if is_func || prev_was_func {
                self.writer.blank_line();
            }
            self.format_statement(&stmt.node);
            prev_was_func = is_func;
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn format_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Var(decl) => {
                self.writer.write("var ");
                self.writer.write(&decl.name.node);
                if let Some(ty) = &decl.ty {
                    self.writer.write(" ");
                    self.writer.write(&ty.node);
                }
                if let Some(init) = &decl.init {
                    self.writer.write(" = ");
                    self.format_expr(&init.node);
                }
                self.writer.writeln(";");
            }
            Statement::Const(decl) => {
                self.writer.write("const ");
                self.writer.write(&decl.name.node);
                if let Some(ty) = &decl.ty {
                    self.writer.write(" ");
                    self.writer.write(&ty.node);
                }
                self.writer.write(" = ");
                self.format_expr(&decl.init.node);
                self.writer.writeln(";");
            }
            Statement::Func(func) => self.format_func(func),
            Statement::If(if_stmt) => {
                self.format_if(if_stmt);
                self.writer.newline();
            }
            Statement::While(while_stmt) => {
                self.writer.write("while ");
                self.format_expr(&while_stmt.condition.node);
                self.writer.write(" ");
                self.format_block(&while_stmt.body.node);
                self.writer.newline();
            }
            Statement::Break => self.writer.writeln("break;"),
            Statement::Continue => self.writer.writeln("continue;"),
            Statement::Return(value) => {
                self.writer.write("return");
                if let Some(value) = value {
                    self.writer.write(" ");
                    self.format_expr(&value.node);
                }
                self.writer.writeln(";");
            }
            Statement::Print(value) => {
                self.writer.write("print ");
                self.format_expr(&value.node);
                self.writer.writeln(";");
            }
            Statement::Block(block) => {
                self.format_block(block);
                self.writer.newline();
            }
            Statement::Expr(expr) => {
                // A leading `{` would be read back as a block statement.
                if starts_with_block(&expr.node) {
                    self.writer.write("(");
                    self.format_expr(&expr.node);
                    self.writer.write(")");
                } else {
                    self.format_expr(&expr.node);
                }
                self.writer.writeln(";");
            }
        }
    }

    fn format_func(&mut self, func: &FuncDecl) {
        self.writer.write("func ");
        self.writer.write(&func.name.node);
        self.writer.write("(");
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.writer.write(&param.node.name);
            self.writer.write(" ");
            self.writer.write(&param.node.ty.node);
        }
        self.writer.write(") ");
        if let Some(ty) = &func.return_type {
            self.writer.write(&ty.node);
            self.writer.write(" ");
        }
        self.format_block(&func.body.node);
        self.writer.newline();
    }

    /// `if` without its trailing newline, so an `else if` chain stays on the closing-brace line.
    fn format_if(&mut self, if_stmt: &IfStmt) {
        self.writer.write("if ");
        self.format_expr(&if_stmt.condition.node);
        self.writer.write(" ");
        self.format_block(&if_stmt.then_branch.node);

        let Some(else_branch) = &if_stmt.else_branch else {
            return;
        };
        self.writer.write(" else ");
        match else_branch.node.statements.as_slice() {
            [
                Spanned {
                    node: Statement::If(nested),
                    ..
                },
            ] => self.format_if(nested),
            _ => self.format_block(&else_branch.node),
        }
    }

    /// `{ ... }` without a trailing newline. An empty block stays on one line.
    fn format_block(&mut self, block: &Block) {
        if block.statements.is_empty() {
            self.writer.write("{}");
            return;
        }
        self.writer.writeln("{");
        self.writer.indent();
        for stmt in &block.statements {
            self.format_statement(&stmt.node);
        }
        self.writer.dedent();
        self.writer.write("}");
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn format_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(lit) => self.writer.write(&lit.to_string()),
            Expr::Location(name) => self.writer.write(name),
            Expr::Assign(target, value) => {
                self.writer.write(&target.node);
                self.writer.write(" = ");
                // Right-associative: `a = b = c` needs no parentheses.
                self.format_operand(&value.node, ASSIGN_PRECEDENCE);
            }
            Expr::Binary(left, op, right) => {
                let prec = op.precedence();
                // Comparisons do not chain, so an equal-precedence operand on either side needs parentheses.
                let left_min = if op.is_comparison() { prec + 1 } else { prec };
                self.format_operand(&left.node, left_min);
                self.writer.write(" ");
                self.writer.write(&op.to_string());
                self.writer.write(" ");
                self.format_operand(&right.node, prec + 1);
            }
            Expr::Unary(op, operand) => {
                self.writer.write(&op.to_string());
                self.format_operand(&operand.node, PREFIX_PRECEDENCE);
            }
            Expr::Call(name, args) => {
                self.writer.write(&name.node);
                self.writer.write("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.writer.write(", ");
                    }
                    self.format_expr(&arg.node);
                }
                self.writer.write(")");
            }
            Expr::Block(block) => self.format_block(block),
        }
    }

    /// Format `expr`, parenthesized if it binds more loosely than `min_precedence`.
    fn format_operand(&mut self, expr: &Expr, min_precedence: u8) {
        if precedence(expr) < min_precedence {
            self.writer.write("(");
            self.format_expr(expr);
            self.writer.write(")");
        } else {
            self.format_expr(expr);
        }
    }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Assign(..) => ASSIGN_PRECEDENCE,
        Expr::Binary(_, op, _) => op.precedence(),
        Expr::Unary(..) => PREFIX_PRECEDENCE,
        Expr::Literal(_) | Expr::Location(_) | Expr::Call(..) | Expr::Block(_) => ATOM_PRECEDENCE,
    }
}

/// Whether the formatted text of `expr` begins with `{`.
fn starts_with_block(expr: &Expr) -> bool {
    match expr {
        Expr::Block(_) => true,
        Expr::Binary(left, op, _) => {
            let left_min = if op.is_comparison() { op.precedence() + 1 } else { op.precedence() };
            precedence(&left.node) >= left_min && starts_with_block(&left.node)
        }
        _ => false,
    }
}
