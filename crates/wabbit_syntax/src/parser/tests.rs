#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on the shape of the tree for each production and on the wording of the single error a
/// failed parse returns.
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;

    fn parse_str(source: &str) -> Result<Program, CompileError> {
        parse_source(source)
    }

    fn single_stmt(source: &str) -> Statement {
        let mut program = parse_str(source).unwrap();
        assert_eq!(program.statements.len(), 1, "expected one statement in {source:?}");
        program.statements.remove(0).node
    }

    fn expr_of(source: &str) -> Expr {
        match single_stmt(source) {
            Statement::Expr(e) | Statement::Print(e) => e.node,
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    fn parse_err(source: &str) -> CompileError {
        let err = parse_str(source).expect_err("expected a parse error");
        assert_eq!(err.kind, ErrorKind::Parse, "{err}");
        err
    }

    /// Render an expression fully parenthesized to make tree shape easy to assert.
    fn shape(expr: &Expr) -> String {
        match expr {
            Expr::Literal(l) => l.to_string(),
            Expr::Location(n) => n.clone(),
            Expr::Assign(n, v) => format!("({} = {})", n.node, shape(&v.node)),
            Expr::Binary(l, op, r) => format!("({} {} {})", shape(&l.node), op, shape(&r.node)),
            Expr::Unary(op, e) => format!("({}{})", op, shape(&e.node)),
            Expr::Call(n, args) => {
                let args: Vec<_> = args.iter().map(|a| shape(&a.node)).collect();
                format!("{}({})", n.node, args.join(", "))
            }
            Expr::Block(b) => format!("{{{} stmts}}", b.statements.len()),
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_precedence_ladder() {
        assert_eq!(shape(&expr_of("print 1 + 2 * 3;")), "(1 + (2 * 3))");
        assert_eq!(shape(&expr_of("print (1 + 2) * 3;")), "((1 + 2) * 3)");
        assert_eq!(shape(&expr_of("print 1 - 2 - 3;")), "((1 - 2) - 3)");
        assert_eq!(shape(&expr_of("print a < b + 1 && c || d;")), "(((a < (b + 1)) && c) || d)");
        assert_eq!(shape(&expr_of("print -a * !b;")), "((-a) * (!b))");
        assert_eq!(shape(&expr_of("print - -1;")), "(-(-1))");
    }

    #[test]
    fn test_most_negative_int_literal() {
        assert_eq!(expr_of("print -2147483648;"), Expr::Literal(Literal::Int(i32::MIN)));
        assert_eq!(shape(&expr_of("print -2147483648 / 2;")), "(-2147483648 / 2)");
        assert_eq!(shape(&expr_of("print - -2147483648;")), "(--2147483648)");

        let err = parse_str("print 1 - 2147483648;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert!(err.message.contains("out of range"), "{}", err.message);
        assert_eq!(err.span.column, 11);
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(shape(&expr_of("a = b = 3;")), "(a = (b = 3))");
        assert_eq!(shape(&expr_of("x = x + 1;")), "(x = (x + 1))");
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = parse_err("1 + 2 = 3;");
        assert!(err.message.contains("invalid assignment target"), "{}", err.message);
        let err = parse_err("f() = 3;");
        assert!(err.message.contains("invalid assignment target"), "{}", err.message);
    }

    #[test]
    fn test_comparisons_do_not_chain() {
        let err = parse_err("print 1 < 2 < 3;");
        assert!(err.message.contains("cannot be chained"), "{}", err.message);
        assert_eq!(err.span.column, 13);
    }

    #[test]
    fn test_call_arguments() {
        assert_eq!(shape(&expr_of("print add(1, x * 2, f());")), "add(1, (x * 2), f())");
        assert!(parse_err("print add(1,);").message.contains("expected an expression"));
    }

    #[test]
    fn test_block_expression() {
        match expr_of("print { var t int = 2; t * t; };") {
            Expr::Block(block) => {
                assert_eq!(block.statements.len(), 2);
                assert!(matches!(block.statements[1].node, Statement::Expr(_)));
            }
            other => panic!("expected block expression, got {other:?}"),
        }
        assert_eq!(shape(&expr_of("print 1 + { 2; };")), "(1 + {1 stmts})");
    }

    #[test]
    fn test_block_expression_must_end_in_expression() {
        assert!(parse_err("print {};").message.contains("cannot be empty"));
        let err = parse_err("print { var x int = 1; };");
        assert!(err.message.contains("must end with an expression"), "{}", err.message);
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_var_and_const_declarations() {
        match single_stmt("var x int = 1;") {
            Statement::Var(VarDecl { name, ty, init }) => {
                assert_eq!(name.node, "x");
                assert_eq!(ty.map(|t| t.node).as_deref(), Some("int"));
                assert!(init.is_some());
            }
            other => panic!("expected var, got {other:?}"),
        }
        assert!(matches!(single_stmt("var y float;"), Statement::Var(VarDecl { init: None, .. })));
        assert!(matches!(single_stmt("const pi = 3.14;"), Statement::Const(ConstDecl { ty: None, .. })));
    }

    #[test]
    fn test_declaration_errors() {
        let err = parse_err("var x;");
        assert!(err.message.contains("expected a type or '='"), "{}", err.message);
        let err = parse_err("const c int;");
        assert!(err.message.contains("expected '='"), "{}", err.message);
        let err = parse_err("var x int = 1");
        assert_eq!(err.message, "expected ';' after variable declaration, found end of file");
    }

    #[test]
    fn test_function_declaration() {
        match single_stmt("func add(a int, b int) int { return a + b; }") {
            Statement::Func(f) => {
                assert_eq!(f.name.node, "add");
                assert_eq!(f.params.len(), 2);
                assert_eq!(f.params[1].node.ty.node, "int");
                assert_eq!(f.return_type.map(|t| t.node).as_deref(), Some("int"));
                assert_eq!(f.body.node.statements.len(), 1);
            }
            other => panic!("expected func, got {other:?}"),
        }
        match single_stmt("func hello() { print 'h'; }") {
            Statement::Func(f) => {
                assert!(f.params.is_empty());
                assert!(f.return_type.is_none());
            }
            other => panic!("expected func, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_function_is_rejected() {
        let err = parse_err("func outer() { func inner() { } }");
        assert!(err.message.contains("top level"), "{}", err.message);
        assert_eq!((err.span.line, err.span.column), (1, 16));
    }

    #[test]
    fn test_if_else_if_chain() {
        let stmt = single_stmt("if a { print 1; } else if b { print 2; } else { print 3; }");
        let Statement::If(outer) = stmt else {
            panic!("expected if");
        };
        let else_block = outer.else_branch.expect("else branch");
        assert_eq!(else_block.node.statements.len(), 1);
        let Statement::If(inner) = &else_block.node.statements[0].node else {
            panic!("expected nested if");
        };
        assert!(inner.else_branch.is_some());
    }

    #[test]
    fn test_while_break_continue() {
        let stmt = single_stmt("while i < 10 { if i == 3 { continue; } break; }");
        let Statement::While(w) = stmt else {
            panic!("expected while");
        };
        assert_eq!(w.body.node.statements.len(), 2);
        assert!(matches!(w.body.node.statements[1].node, Statement::Break));
    }

    #[test]
    fn test_return_forms() {
        let Statement::Func(f) = single_stmt("func f() { return; }") else {
            panic!("expected func");
        };
        assert!(matches!(f.body.node.statements[0].node, Statement::Return(None)));
    }

    #[test]
    fn test_block_statement() {
        let program = parse_str("var x int = 1; { var x int = 2; print x; } print x;").unwrap();
        assert_eq!(program.statements.len(), 3);
        assert!(matches!(program.statements[1].node, Statement::Block(_)));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_err("while true { print 1;");
        assert_eq!(err.message, "expected '}' to close block, found end of file");
    }

    #[test]
    fn test_factorial_program() {
        let source = "func factorial(n int) int {\n    var f int = 1;\n    while n > 0 {\n        f = f * n;\n        n = n - 1;\n    }\n    return f;\n}\nprint factorial(5);\n";
        let program = parse_str(source).unwrap();
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.statements[1].span.line, 9);
    }

    #[test]
    fn test_token_stream_must_end_with_eof() {
        assert!(parse(&[]).is_err());
    }
}
