/// Statement parsing methods.
///
/// This chunk parses statement forms (blocks, `for`, `if`, `while`, `do ... while`, `return`,
/// variable statements, expression statements) and dispatches declaration forms to `decl.rs`.
///
/// ## Notes
/// - The same `statement()` entry serves the top level and block bodies; which forms are
///   meaningful where is decided by the consumers of the AST, not here.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.current_span().start;

        let stmt = match self.peek().kind.keyword_id() {
            Some(KeywordId::Import) => self.import_decl()?,
            Some(KeywordId::Export) => self.export_decl()?,
            Some(KeywordId::Function) => self.function_decl(false, false)?,
            Some(KeywordId::Interface) => self.interface_decl(false)?,
            Some(KeywordId::Type) => self.type_alias_decl(false)?,
            Some(KeywordId::For) => self.for_stmt()?,
            Some(KeywordId::Return) => self.return_stmt()?,
            Some(KeywordId::If) => self.if_stmt()?,
            Some(KeywordId::While) => self.while_stmt()?,
            Some(KeywordId::Do) => self.do_while_stmt()?,
            Some(KeywordId::Const | KeywordId::Let | KeywordId::Var) => {
                let list = self.variable_decl_list()?;
                self.skip_semicolon();
                Statement::Variable(list)
            }
            _ if self.check_punct(PunctuationId::LBrace) => Statement::Block(self.block()?),
            _ if self.match_punct(PunctuationId::Semicolon) => Statement::Empty,
            _ => {
                let expr = self.expression()?;
                self.skip_semicolon();
                Statement::Expression(expr)
            }
        };

        Ok(Spanned::new(stmt, self.span_from(start)))
    }

    /// Parse `{ statements }`.
    fn block(&mut self) -> Result<Block, CompileError> {
        self.expect_punct(PunctuationId::LBrace, "Expected '{'")?;
        let mut statements = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            statements.push(self.statement()?);
        }
        self.expect_punct(PunctuationId::RBrace, "Expected '}' to close block")?;
        Ok(Block { statements })
    }

    fn return_stmt(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Return, "Expected 'return'")?;
        let value = if self.check_punct(PunctuationId::Semicolon)
            || self.check_punct(PunctuationId::RBrace)
            || self.is_at_end()
        {
            None
        } else {
            Some(self.expression()?)
        };
        self.skip_semicolon();
        Ok(Statement::Return(value))
    }

    /// Parse `const|let|var name[: T][ = init], ...` (no terminator).
    fn variable_decl_list(&mut self) -> Result<VariableDeclList, CompileError> {
        let kind = if self.match_keyword(KeywordId::Const) {
            DeclarationKind::Const
        } else if self.match_keyword(KeywordId::Let) {
            DeclarationKind::Let
        } else {
            self.expect_keyword(KeywordId::Var, "Expected 'const', 'let' or 'var'")?;
            DeclarationKind::Var
        };

        let mut declarations = Vec::new();
        loop {
            let name = self.expect_ident("Expected variable name")?;
            let start = name.span.start;
            let ty = if self.match_punct(PunctuationId::Colon) {
                Some(self.type_annotation()?)
            } else {
                None
            };
            let initializer = if self.match_op(OperatorId::Eq) {
                Some(self.assignment()?)
            } else {
                None
            };
            declarations.push(Spanned::new(VariableDeclarator { name, ty, initializer }, self.span_from(start)));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }

        Ok(VariableDeclList { kind, declarations })
    }

    fn for_stmt(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::For, "Expected 'for'")?;
        self.expect_punct(PunctuationId::LParen, "Expected '(' after 'for'")?;

        let initializer = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else if self.check_keyword(KeywordId::Const) || self.check_keyword(KeywordId::Let) || self.check_keyword(KeywordId::Var)
        {
            let start = self.current_span().start;
            let list = self.variable_decl_list()?;
            Some(ForInit::Variables(Spanned::new(list, self.span_from(start))))
        } else {
            Some(ForInit::Expression(self.expression()?))
        };
        self.expect_punct(PunctuationId::Semicolon, "Expected ';' after loop initializer")?;

        let condition = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(PunctuationId::Semicolon, "Expected ';' after loop condition")?;

        let incrementor = if self.check_punct(PunctuationId::RParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(PunctuationId::RParen, "Expected ')' after loop clauses")?;

        let body = Box::new(self.statement()?);
        Ok(Statement::For(ForStmt {
            initializer,
            condition,
            incrementor,
            body,
        }))
    }

    fn if_stmt(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::If, "Expected 'if'")?;
        let condition = self.paren_condition("if")?;
        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.match_keyword(KeywordId::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        Ok(Statement::If(IfStmt {
            condition,
            then_branch,
            else_branch,
        }))
    }

    fn while_stmt(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::While, "Expected 'while'")?;
        let condition = self.paren_condition("while")?;
        let body = Box::new(self.statement()?);
        Ok(Statement::While(WhileStmt { condition, body }))
    }

    fn do_while_stmt(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Do, "Expected 'do'")?;
        let body = Box::new(self.statement()?);
        self.expect_keyword(KeywordId::While, "Expected 'while' after 'do' body")?;
        let condition = self.paren_condition("while")?;
        self.skip_semicolon();
        Ok(Statement::DoWhile(DoWhileStmt { body, condition }))
    }

    /// Parse `( expr )` after a control-flow keyword.
    fn paren_condition(&mut self, keyword: &str) -> Result<Spanned<Expr>, CompileError> {
        self.expect_punct(PunctuationId::LParen, &format!("Expected '(' after '{}'", keyword))?;
        let condition = self.expression()?;
        self.expect_punct(PunctuationId::RParen, "Expected ')' after condition")?;
        Ok(condition)
    }
}
