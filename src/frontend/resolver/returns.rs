//! All-paths-return analysis for non-void functions.
//!
//! A statement list returns if any statement in it returns:
//! - `return`;
//! - an `if` whose branches both return;
//! - a `while true` loop that no `break` leaves;
//! - a block statement whose contents return.
//!
//! Anything else (including loops with other conditions) is assumed to fall through.

use crate::frontend::ast::Literal;
use crate::frontend::typed_ast::{Expr, ExprKind, Stmt, StmtKind};

pub(crate) fn always_returns(stmts: &[Stmt]) -> bool {
    stmts.iter().any(stmt_returns)
}

fn stmt_returns(stmt: &Stmt) -> bool {
    match &stmt.kind {
        StmtKind::Return(_) => true,
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => always_returns(then_branch) && always_returns(else_branch),
        StmtKind::While { condition, body } => is_literal_true(condition) && !breaks_out(body),
        StmtKind::Block(stmts) => always_returns(stmts),
        _ => false,
    }
}

/// Whether a `break` in `stmts` targets the loop that owns them. Nested loops own their own breaks, and a block
/// expression cannot break out of itself.
fn breaks_out(stmts: &[Stmt]) -> bool {
    stmts.iter().any(|stmt| match &stmt.kind {
        StmtKind::Break => true,
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => breaks_out(then_branch) || breaks_out(else_branch),
        StmtKind::Block(stmts) => breaks_out(stmts),
        _ => false,
    })
}

fn is_literal_true(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Literal(Literal::Bool(true)))
}

#[cfg(test)]
mod tests {
    use crate::frontend::parser;
    use crate::frontend::resolver::resolve;

    fn function_returns(source: &str) -> bool {
        let ast = parser::parse_source(source).unwrap();
        resolve(&ast).is_ok()
    }

    #[test]
    fn test_if_needs_both_branches() {
        assert!(function_returns("func f(a bool) int { if a { return 1; } else { return 2; } }"));
        assert!(!function_returns("func f(a bool) int { if a { return 1; } }"));
    }

    #[test]
    fn test_infinite_loop_counts_as_returning() {
        assert!(function_returns("func f() int { while true { } }"));
        assert!(!function_returns("func f() int { while true { break; } }"));
        assert!(function_returns("func f() int { while true { while true { break; } } }"));
    }

    #[test]
    fn test_block_statement_that_returns() {
        assert!(function_returns("func f() int { { return 3; } }"));
    }
}
