/// Type annotation parsing methods.
///
/// Supported forms: named types with `<...>` arguments, `T[]` suffixes, string/number/boolean
/// literal types, `null`, object type literals, and parenthesized types.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    fn type_annotation(&mut self) -> Result<Spanned<TypeAnnotation>, CompileError> {
        let start = self.current_span().start;
        let mut ty = self.primary_type()?;

        while self.check_punct(PunctuationId::LBracket) && self.peek_next().kind.is_punctuation(PunctuationId::RBracket)
        {
            self.advance();
            self.advance();
            ty = Spanned::new(TypeAnnotation::Array(Box::new(ty)), self.span_from(start));
        }

        Ok(ty)
    }

    fn primary_type(&mut self) -> Result<Spanned<TypeAnnotation>, CompileError> {
        let start = self.current_span().start;

        let ty = match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                let args = if self.match_op(OperatorId::Lt) {
                    self.type_arguments()?
                } else {
                    Vec::new()
                };
                TypeAnnotation::Named { name, args }
            }
            TokenKind::String(body) => {
                let body = body.clone();
                self.advance();
                TypeAnnotation::StringLiteral(body)
            }
            TokenKind::Number(text) => {
                let text = text.clone();
                self.advance();
                TypeAnnotation::NumberLiteral(text)
            }
            TokenKind::Operator(OperatorId::Minus) => {
                self.advance();
                match &self.peek().kind {
                    TokenKind::Number(text) => {
                        let text = format!("-{}", text);
                        self.advance();
                        TypeAnnotation::NumberLiteral(text)
                    }
                    _ => return Err(self.unexpected("Expected number after '-' in type")),
                }
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                TypeAnnotation::BooleanLiteral(true)
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                TypeAnnotation::BooleanLiteral(false)
            }
            TokenKind::Keyword(KeywordId::Null) => {
                self.advance();
                TypeAnnotation::Null
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => TypeAnnotation::Object(self.object_type_members()?),
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.type_annotation()?;
                self.expect_punct(PunctuationId::RParen, "Expected ')' after type")?;
                inner.node
            }
            _ => return Err(self.unexpected("Expected type")),
        };

        Ok(Spanned::new(ty, self.span_from(start)))
    }

    /// Parse `T, U>` after the opening `<`.
    fn type_arguments(&mut self) -> Result<Vec<Spanned<TypeAnnotation>>, CompileError> {
        let mut args = vec![self.type_annotation()?];
        while self.match_punct(PunctuationId::Comma) {
            args.push(self.type_annotation()?);
        }
        self.expect_op(OperatorId::Gt, "Expected '>' after type arguments")?;
        Ok(args)
    }

    /// Parse `{ name: T; other?: U, ... }`, shared by interfaces and object type literals.
    fn object_type_members(&mut self) -> Result<Vec<Spanned<PropertySignature>>, CompileError> {
        self.expect_punct(PunctuationId::LBrace, "Expected '{'")?;
        let mut members = Vec::new();

        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            let name = self.expect_ident("Expected property name")?;
            let optional = self.match_punct(PunctuationId::Question);
            self.expect_punct(PunctuationId::Colon, "Expected ':' after property name")?;
            let ty = self.type_annotation()?;
            members.push(Spanned::new(
                PropertySignature {
                    name: name.node,
                    optional,
                    ty,
                },
                self.span_from(name.span.start),
            ));
            if !self.match_punct(PunctuationId::Semicolon) && !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }

        self.expect_punct(PunctuationId::RBrace, "Expected '}' after members")?;
        Ok(members)
    }
}
