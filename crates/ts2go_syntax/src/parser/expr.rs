/// Expression parsing methods.
///
/// This chunk implements the expression grammar using a precedence ladder:
/// assignment (right-assoc) → conditional → binary operators by registry precedence
/// (`||` → `&&` → equality → relational/`as` → additive → multiplicative) → prefix unary →
/// postfix update → call/member/index → primary.
///
/// ## Notes
/// - Binary precedence comes from `ts2go_core::lang::operators`, so the table lives in one place.
/// - Template interpolations arrive pre-lexed; each is parsed with a nested [`Parser`].
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let target = self.conditional()?;

        let op = self
            .peek()
            .operator_id()
            .and_then(BinaryOp::from_operator)
            .filter(|op| op.is_assignment());

        let Some(op) = op else {
            return Ok(target);
        };

        let op_span = self.advance();
        let value = self.assignment()?;
        let span = target.span.merge(value.span);
        Ok(Spanned::new(
            Expr::Binary(Box::new(target), Spanned::new(op, op_span), Box::new(value)),
            span,
        ))
    }

    fn conditional(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let condition = self.binary(0)?;
        if !self.match_punct(PunctuationId::Question) {
            return Ok(condition);
        }
        let when_true = self.assignment()?;
        self.expect_punct(PunctuationId::Colon, "Expected ':' in conditional expression")?;
        let when_false = self.assignment()?;
        let span = condition.span.merge(when_false.span);
        Ok(Spanned::new(
            Expr::Conditional(Box::new(condition), Box::new(when_true), Box::new(when_false)),
            span,
        ))
    }

    /// Precedence climbing over the infix operators (assignment excluded).
    fn binary(&mut self, min_precedence: u8) -> Result<Spanned<Expr>, CompileError> {
        let relational = operators::info_for(OperatorId::Lt).precedence;
        let mut left = self.unary()?;

        loop {
            if self.check_keyword(KeywordId::As) && relational >= min_precedence {
                self.advance();
                let ty = self.type_annotation()?;
                let span = left.span.merge(ty.span);
                left = Spanned::new(Expr::As(Box::new(left), ty), span);
                continue;
            }

            let Some(id) = self.peek().operator_id() else {
                break;
            };
            let Some(op) = BinaryOp::from_operator(id) else {
                break;
            };
            let precedence = operators::info_for(id).precedence;
            if op.is_assignment() || precedence < min_precedence {
                break;
            }

            let op_span = self.advance();
            let right = self.binary(precedence + 1)?;
            let span = left.span.merge(right.span);
            left = Spanned::new(
                Expr::Binary(Box::new(left), Spanned::new(op, op_span), Box::new(right)),
                span,
            );
        }

        Ok(left)
    }

    fn unary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let op = match self.peek().operator_id() {
            Some(OperatorId::Bang) => UnaryOp::Not,
            Some(OperatorId::Minus) => UnaryOp::Neg,
            Some(OperatorId::Plus) => UnaryOp::Plus,
            Some(OperatorId::PlusPlus) => UnaryOp::Increment,
            Some(OperatorId::MinusMinus) => UnaryOp::Decrement,
            _ => return self.postfix(),
        };

        let op_span = self.advance();
        let operand = self.unary()?;
        let span = op_span.merge(operand.span);
        Ok(Spanned::new(Expr::Prefix(Spanned::new(op, op_span), Box::new(operand)), span))
    }

    fn postfix(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut expr = self.call_member()?;

        loop {
            let op = match self.peek().operator_id() {
                Some(OperatorId::PlusPlus) => UnaryOp::Increment,
                Some(OperatorId::MinusMinus) => UnaryOp::Decrement,
                _ => break,
            };
            let op_span = self.advance();
            let span = expr.span.merge(op_span);
            expr = Spanned::new(Expr::Postfix(Box::new(expr), Spanned::new(op, op_span)), span);
        }

        Ok(expr)
    }

    fn call_member(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut expr = self.primary()?;

        loop {
            if self.match_punct(PunctuationId::LParen) {
                let args = self.comma_list(PunctuationId::RParen, "Expected ')' after arguments")?;
                let span = expr.span.merge(self.previous_span());
                expr = Spanned::new(Expr::Call(Box::new(expr), args), span);
            } else if self.match_punct(PunctuationId::Dot) {
                let name = self.property_name()?;
                let span = expr.span.merge(name.span);
                expr = Spanned::new(Expr::Member(Box::new(expr), name), span);
            } else if self.match_punct(PunctuationId::LBracket) {
                let index = self.expression()?;
                self.expect_punct(PunctuationId::RBracket, "Expected ']' after index")?;
                let span = expr.span.merge(self.previous_span());
                expr = Spanned::new(Expr::Index(Box::new(expr), Box::new(index)), span);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Property names after `.` may be reserved words (`x.default`, `obj.type`).
    fn property_name(&mut self) -> Result<Spanned<Ident>, CompileError> {
        if let Some(id) = self.peek().keyword_id() {
            let span = self.advance();
            return Ok(Spanned::new(ts2go_core::lang::keywords::as_str(id).to_string(), span));
        }
        self.expect_ident("Expected property name after '.'")
    }

    /// Parse `expr, expr, ...` up to and including `close`; trailing commas are allowed.
    fn comma_list(&mut self, close: PunctuationId, msg: &str) -> Result<Vec<Spanned<Expr>>, CompileError> {
        let mut items = Vec::new();
        while !self.check_punct(close) {
            items.push(self.assignment()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(close, msg)?;
        Ok(items)
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span().start;

        let expr = match &self.peek().kind {
            TokenKind::Number(text) => {
                let text = text.clone();
                self.advance();
                Expr::Number(text)
            }
            TokenKind::String(body) => {
                let body = body.clone();
                self.advance();
                Expr::String(body)
            }
            TokenKind::Template(parts) => {
                let parts = parts.clone();
                self.advance();
                Expr::Template(self.template(parts)?)
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Expr::Ident(name)
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Expr::Bool(true)
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Expr::Bool(false)
            }
            TokenKind::Keyword(KeywordId::Null) => {
                self.advance();
                Expr::Null
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression()?;
                self.expect_punct(PunctuationId::RParen, "Expected ')' after expression")?;
                Expr::Paren(Box::new(inner))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                Expr::Array(self.comma_list(PunctuationId::RBracket, "Expected ']' after array elements")?)
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => {
                self.advance();
                Expr::Object(self.object_properties()?)
            }
            _ => return Err(self.unexpected("Expected expression")),
        };

        Ok(Spanned::new(expr, self.span_from(start)))
    }

    /// Parse object literal members after the opening `{`.
    fn object_properties(&mut self) -> Result<Vec<Spanned<ObjectProperty>>, CompileError> {
        let mut properties = Vec::new();

        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            let start = self.current_span().start;
            let property = if self.match_punct(PunctuationId::Ellipsis) {
                ObjectProperty::Spread(self.assignment()?)
            } else {
                let name = self.expect_ident("Expected property name")?;
                if self.match_punct(PunctuationId::Colon) {
                    let value = self.assignment()?;
                    ObjectProperty::Assignment { name, value }
                } else {
                    ObjectProperty::Shorthand(name)
                }
            };
            properties.push(Spanned::new(property, self.span_from(start)));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }

        self.expect_punct(PunctuationId::RBrace, "Expected '}' after object literal")?;
        Ok(properties)
    }

    /// Build a template literal from lexed parts, parsing each interpolation.
    fn template(&mut self, parts: Vec<TemplatePart>) -> Result<TemplateLiteral, CompileError> {
        let mut parts = parts.into_iter();
        let head = match parts.next() {
            Some(TemplatePart::Literal(text)) => text,
            _ => String::new(),
        };

        let mut spans = Vec::new();
        while let Some(part) = parts.next() {
            let TemplatePart::Expr { tokens, span } = part else {
                continue;
            };
            if tokens.is_empty() {
                return Err(CompileError::syntax("Invalid template expression".to_string(), span));
            }
            let expr = Parser::new(&tokens).parse_fragment()?;
            let literal = match parts.next() {
                Some(TemplatePart::Literal(text)) => text,
                _ => String::new(),
            };
            spans.push(TemplateSpan { expr, literal });
        }

        Ok(TemplateLiteral { head, spans })
    }
}
