/// Statement parsing.
///
/// Statements are parsed in sequence until a closing `}` (inside a block) or `Eof` (at the top level).
///
/// ## Notes
/// - A `{` at the start of a statement is a block statement; in any expression position it is a block expression.
/// - `func` is only accepted at the top level.
impl<'a> Parser<'a> {
    fn statement(&mut self) -> Result<Spanned<Statement>, CompileError> {
        if let Some(keyword) = self.peek().keyword_id() {
            match keyword {
                KeywordId::Var => return self.var_decl(),
                KeywordId::Const => return self.const_decl(),
                KeywordId::Func => return self.func_decl(),
                KeywordId::If => return self.if_stmt(),
                KeywordId::While => return self.while_stmt(),
                KeywordId::Break => return self.simple_stmt(Statement::Break, "expected ';' after 'break'"),
                KeywordId::Continue => {
                    return self.simple_stmt(Statement::Continue, "expected ';' after 'continue'");
                }
                KeywordId::Return => return self.return_stmt(),
                KeywordId::Print => return self.print_stmt(),
                KeywordId::Else | KeywordId::True | KeywordId::False => {}
            }
        }

        if self.check_punct(PunctuationId::LBrace) {
            let block = self.block()?;
            return Ok(Spanned::new(Statement::Block(block.node), block.span));
        }

        let expr = self.expression()?;
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after expression")?;
        let span = expr.span.merge(self.previous_span());
        Ok(Spanned::new(Statement::Expr(expr), span))
    }

    /// `var NAME [TYPE] [= EXPR];`
    fn var_decl(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.advance().span;
        let name = self.expect_ident("expected a variable name after 'var'")?;
        let ty = self.optional_type()?;
        let init = if self.match_op(OperatorId::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        if ty.is_none() && init.is_none() {
            return Err(self.error_here(&format!("expected a type or '=' after 'var {}'", name.node)));
        }
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after variable declaration")?;
        let span = start.merge(self.previous_span());
        Ok(Spanned::new(Statement::Var(VarDecl { name, ty, init }), span))
    }

    /// `const NAME [TYPE] = EXPR;`
    fn const_decl(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.advance().span;
        let name = self.expect_ident("expected a constant name after 'const'")?;
        let ty = self.optional_type()?;
        self.expect_op(OperatorId::Eq, "expected '=' in constant declaration")?;
        let init = self.expression()?;
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after constant declaration")?;
        let span = start.merge(self.previous_span());
        Ok(Spanned::new(Statement::Const(ConstDecl { name, ty, init }), span))
    }

    /// `func NAME(PARAM, ...) [TYPE] BLOCK`
    fn func_decl(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.peek().span;
        if self.block_depth > 0 {
            return Err(CompileError::parse("functions can only be declared at the top level", start));
        }
        self.advance();
        let name = self.expect_ident("expected a function name after 'func'")?;
        self.expect_punct(PunctuationId::LParen, "expected '(' after function name")?;

        let mut params = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                let param_name = self.expect_ident("expected a parameter name")?;
                let ty = self.expect_ident(&format!("expected a type for parameter '{}'", param_name.node))?;
                let span = param_name.span.merge(ty.span);
                params.push(Spanned::new(
                    Param {
                        name: param_name.node,
                        ty,
                    },
                    span,
                ));
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen, "expected ')' after parameters")?;

        let return_type = self.optional_type()?;
        let body = self.block()?;
        let span = start.merge(body.span);
        Ok(Spanned::new(
            Statement::Func(FuncDecl {
                name,
                params,
                return_type,
                body,
            }),
            span,
        ))
    }

    /// `if EXPR BLOCK [else (BLOCK | IF)]`
    fn if_stmt(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.advance().span;
        let condition = self.expression()?;
        let then_branch = self.block()?;
        let else_branch = if self.match_keyword(KeywordId::Else) {
            if self.check_keyword(KeywordId::If) {
                let nested = self.if_stmt()?;
                let span = nested.span;
                Some(Spanned::new(
                    Block {
                        statements: vec![nested],
                    },
                    span,
                ))
            } else {
                Some(self.block()?)
            }
        } else {
            None
        };
        let span = start.merge(self.previous_span());
        Ok(Spanned::new(
            Statement::If(IfStmt {
                condition,
                then_branch,
                else_branch,
            }),
            span,
        ))
    }

    /// `while EXPR BLOCK`
    fn while_stmt(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.advance().span;
        let condition = self.expression()?;
        let body = self.block()?;
        let span = start.merge(body.span);
        Ok(Spanned::new(Statement::While(WhileStmt { condition, body }), span))
    }

    /// `return [EXPR];`
    fn return_stmt(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.advance().span;
        let value = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after return value")?;
        let span = start.merge(self.previous_span());
        Ok(Spanned::new(Statement::Return(value), span))
    }

    /// `print EXPR;`
    fn print_stmt(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.advance().span;
        let value = self.expression()?;
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after print value")?;
        let span = start.merge(self.previous_span());
        Ok(Spanned::new(Statement::Print(value), span))
    }

    /// A keyword followed by `;` (`break;`, `continue;`).
    fn simple_stmt(&mut self, statement: Statement, msg: &str) -> Result<Spanned<Statement>, CompileError> {
        let start = self.advance().span;
        self.expect_punct(PunctuationId::Semicolon, msg)?;
        Ok(Spanned::new(statement, start.merge(self.previous_span())))
    }

    /// `{ STATEMENT* }`
    fn block(&mut self) -> Result<Spanned<Block>, CompileError> {
        let start = self.expect_punct(PunctuationId::LBrace, "expected '{'")?;
        self.block_depth += 1;
        let mut statements = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            statements.push(self.statement()?);
        }
        self.expect_punct(PunctuationId::RBrace, "expected '}' to close block")?;
        self.block_depth -= 1;
        Ok(Spanned::new(Block { statements }, start.merge(self.previous_span())))
    }

    /// A type name in declaration position, if one is present.
    fn optional_type(&mut self) -> Result<Option<Spanned<Ident>>, CompileError> {
        if self.check_ident() {
            Ok(Some(self.expect_ident("expected a type name")?))
        } else {
            Ok(None)
        }
    }
}
