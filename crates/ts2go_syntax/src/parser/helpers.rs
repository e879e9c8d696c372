/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Optional statement terminators (`skip_semicolon`)
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    /// Advance to the next token and return the span of the token we just consumed.
    fn advance(&mut self) -> Span {
        let span = self.peek().span;
        if !self.is_at_end() {
            self.pos += 1;
        }
        span
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    /// Span from `start` to the end of the most recently consumed token.
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.previous_span().end.max(start))
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, msg: &str) -> CompileError {
        CompileError::syntax(
            format!("{}, found {}", msg, self.peek().kind.describe()),
            self.current_span(),
        )
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<Span, CompileError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(msg))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<Span, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(msg))
        }
    }

    fn expect_op(&mut self, id: OperatorId, msg: &str) -> Result<Span, CompileError> {
        if self.check_op(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(msg))
        }
    }

    fn expect_ident(&mut self, msg: &str) -> Result<Spanned<Ident>, CompileError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            let span = self.advance();
            Ok(Spanned::new(name, span))
        } else {
            Err(self.unexpected(msg))
        }
    }

    /// Consume a string literal token and return its body.
    fn expect_string(&mut self, msg: &str) -> Result<Spanned<String>, CompileError> {
        if let TokenKind::String(body) = &self.peek().kind {
            let body = body.clone();
            let span = self.advance();
            Ok(Spanned::new(body, span))
        } else {
            Err(self.unexpected(msg))
        }
    }

    /// Consume an optional `;` statement terminator.
    fn skip_semicolon(&mut self) {
        self.match_punct(PunctuationId::Semicolon);
    }

    /// Skip tokens until a likely statement boundary.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            // `advance` moved past at least one token, so `pos >= 1` here.
            let prev = &self.tokens[self.pos - 1].kind;
            if prev.is_punctuation(PunctuationId::Semicolon) || prev.is_punctuation(PunctuationId::RBrace) {
                return;
            }
            if [
                KeywordId::Function,
                KeywordId::Import,
                KeywordId::Export,
                KeywordId::Interface,
                KeywordId::Type,
                KeywordId::Const,
                KeywordId::Let,
                KeywordId::Var,
                KeywordId::For,
                KeywordId::If,
                KeywordId::While,
                KeywordId::Do,
                KeywordId::Return,
            ]
            .into_iter()
            .any(|id| self.check_keyword(id))
            {
                return;
            }
            self.advance();
        }
    }
}
