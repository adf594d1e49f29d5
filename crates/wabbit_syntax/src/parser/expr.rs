/// Expression parsing (precedence ladder).
///
/// ## Notes
/// - Parentheses only group; they leave no node in the tree.
/// - Comparisons do not chain: `a < b < c` is a ParseError rather than `(a < b) < c`.
/// - A block expression must be non-empty and end with an expression statement.
impl<'a> Parser<'a> {
    fn expression(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.assignment()
    }

    /// `logic_or ['=' assignment]`; the left side must be a bare location.
    fn assignment(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let target = self.or_expr()?;
        if !self.check_op(OperatorId::Eq) {
            return Ok(target);
        }
        self.advance();
        let value = self.assignment()?;
        match target.node {
            Expr::Location(name) => {
                let span = target.span.merge(value.span);
                Ok(Spanned::new(
                    Expr::Assign(Spanned::new(name, target.span), Box::new(value)),
                    span,
                ))
            }
            _ => Err(CompileError::parse(
                "invalid assignment target: only a variable can be assigned",
                target.span,
            )),
        }
    }

    fn or_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.and_expr()?;
        while self.match_op(OperatorId::OrOr) {
            let right = self.and_expr()?;
            left = binary(left, BinaryOp::Or, right);
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.comparison()?;
        while self.match_op(OperatorId::AndAnd) {
            let right = self.comparison()?;
            left = binary(left, BinaryOp::And, right);
        }
        Ok(left)
    }

    fn comparison(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let left = self.additive()?;
        let Some(op) = self.comparison_op() else {
            return Ok(left);
        };
        self.advance();
        let right = self.additive()?;
        if self.comparison_op().is_some() {
            return Err(self.error_here("comparison operators cannot be chained; combine comparisons with '&&'"));
        }
        Ok(binary(left, op, right))
    }

    fn comparison_op(&self) -> Option<BinaryOp> {
        self.peek()
            .operator_id()
            .filter(|id| operators::is_comparison(*id))
            .and_then(BinaryOp::from_operator)
    }

    fn additive(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.multiplicative()?;
        loop {
            let op = if self.match_op(OperatorId::Plus) {
                BinaryOp::Add
            } else if self.match_op(OperatorId::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.multiplicative()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.unary()?;
        loop {
            let op = if self.match_op(OperatorId::Star) {
                BinaryOp::Mul
            } else if self.match_op(OperatorId::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            let right = self.unary()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let Some(op) = self.peek().operator_id().and_then(UnaryOp::from_operator) else {
            return self.primary();
        };
        let start = self.advance().span;
        if op == UnaryOp::Neg && self.peek().kind == TokenKind::Int(i32::MIN) {
            let span = start.merge(self.advance().span);
            return Ok(Spanned::new(Expr::Literal(Literal::Int(i32::MIN)), span));
        }
        let operand = self.unary()?;
        let span = start.merge(operand.span);
        Ok(Spanned::new(Expr::Unary(op, Box::new(operand)), span))
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        if self.check_punct(PunctuationId::LBrace) {
            return self.block_expr();
        }

        let literal = match self.peek().kind {
            // Only valid as the operand of a unary minus, which `unary` folds.
            TokenKind::Int(i32::MIN) => return Err(int_out_of_range(&self.peek().lexeme, self.peek().span)),
            TokenKind::Int(v) => Some(Literal::Int(v)),
            TokenKind::Float(v) => Some(Literal::Float(v)),
            TokenKind::Char(c) => Some(Literal::Char(c)),
            TokenKind::Keyword(KeywordId::True) => Some(Literal::Bool(true)),
            TokenKind::Keyword(KeywordId::False) => Some(Literal::Bool(false)),
            _ => None,
        };
        if let Some(literal) = literal {
            let span = self.advance().span;
            return Ok(Spanned::new(Expr::Literal(literal), span));
        }

        if self.check_ident() {
            let name = self.expect_ident("expected a name")?;
            if !self.match_punct(PunctuationId::LParen) {
                return Ok(Spanned::new(Expr::Location(name.node), name.span));
            }
            let mut args = Vec::new();
            if !self.check_punct(PunctuationId::RParen) {
                loop {
                    args.push(self.expression()?);
                    if !self.match_punct(PunctuationId::Comma) {
                        break;
                    }
                }
            }
            self.expect_punct(PunctuationId::RParen, "expected ')' after arguments")?;
            let span = name.span.merge(self.previous_span());
            return Ok(Spanned::new(Expr::Call(name, args), span));
        }

        if self.match_punct(PunctuationId::LParen) {
            let inner = self.expression()?;
            self.expect_punct(PunctuationId::RParen, "expected ')' after expression")?;
            return Ok(inner);
        }

        Err(self.error_here("expected an expression (literal, name, call, '(' or '{')"))
    }

    /// `{ STATEMENT* EXPR; }` used as a value.
    fn block_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let block = self.block()?;
        match block.node.statements.last() {
            Some(Spanned {
                node: Statement::Expr(_),
                ..
            }) => Ok(Spanned::new(Expr::Block(block.node), block.span)),
            Some(last) => Err(CompileError::parse(
                "a block used as a value must end with an expression statement",
                last.span,
            )),
            None => Err(CompileError::parse("a block used as a value cannot be empty", block.span)),
        }
    }
}

fn binary(left: Spanned<Expr>, op: BinaryOp, right: Spanned<Expr>) -> Spanned<Expr> {
    let span = left.span.merge(right.span);
    Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span)
}
