/// Declaration parsing methods.
///
/// This chunk parses the declaration forms: `import`, `function` (including `export` and
/// `export default` prefixes and bodiless overload signatures), `interface`, and `type` aliases.
impl<'a> Parser<'a> {
    // ========================================================================
    // Imports
    // ========================================================================

    /// Parse `import ... from "m"` / `import "m"` (the `import` keyword is current).
    fn import_decl(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Import, "Expected 'import'")?;

        let mut import = ImportDecl {
            default: None,
            named: Vec::new(),
            namespace: None,
            specifier: Spanned::new(String::new(), Span::default()),
        };

        // Side-effect import: `import "m"`.
        if matches!(self.peek().kind, TokenKind::String(_)) {
            import.specifier = self.expect_string("Expected module specifier")?;
            self.skip_semicolon();
            return Ok(Statement::Import(import));
        }

        if matches!(self.peek().kind, TokenKind::Ident(_)) {
            import.default = Some(self.expect_ident("Expected default import name")?);
            if !self.match_punct(PunctuationId::Comma) {
                return self.finish_import(import);
            }
        }

        if self.check_op(OperatorId::Star) {
            let start = self.advance().start;
            self.expect_keyword(KeywordId::As, "Expected 'as' after '*' in import")?;
            let name = self.expect_ident("Expected namespace name")?;
            import.namespace = Some(Spanned::new(name.node, self.span_from(start)));
        } else if self.match_punct(PunctuationId::LBrace) {
            while !self.check_punct(PunctuationId::RBrace) {
                let imported = self.expect_ident("Expected imported name")?;
                let local = if self.match_keyword(KeywordId::As) {
                    self.expect_ident("Expected local name after 'as'")?.node
                } else {
                    imported.node.clone()
                };
                let span = self.span_from(imported.span.start);
                import.named.push(Spanned::new(
                    ImportSpecifier {
                        imported: imported.node,
                        local,
                    },
                    span,
                ));
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            self.expect_punct(PunctuationId::RBrace, "Expected '}' after import list")?;
        } else if import.default.is_some() {
            return Err(self.unexpected("Expected '{' or '*' after ',' in import"));
        } else {
            return Err(self.unexpected("Expected import clause or module specifier"));
        }

        self.finish_import(import)
    }

    fn finish_import(&mut self, mut import: ImportDecl) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::From, "Expected 'from' after import clause")?;
        import.specifier = self.expect_string("Expected module specifier")?;
        self.skip_semicolon();
        Ok(Statement::Import(import))
    }

    // ========================================================================
    // Exports
    // ========================================================================

    /// Parse an `export`-prefixed declaration.
    fn export_decl(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Export, "Expected 'export'")?;
        let is_default = self.match_keyword(KeywordId::Default);

        if self.check_keyword(KeywordId::Function) {
            return self.function_decl(true, is_default);
        }
        if is_default {
            return Err(self.unexpected("Expected 'function' after 'export default'"));
        }
        if self.check_keyword(KeywordId::Interface) {
            return self.interface_decl(true);
        }
        if self.check_keyword(KeywordId::Type) {
            return self.type_alias_decl(true);
        }
        Err(self.unexpected("Expected 'function', 'interface' or 'type' after 'export'"))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn function_decl(&mut self, exported: bool, is_default: bool) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Function, "Expected 'function'")?;

        let name = if matches!(self.peek().kind, TokenKind::Ident(_)) {
            Some(self.expect_ident("Expected function name")?)
        } else if is_default {
            None
        } else {
            return Err(self.unexpected("Expected function name"));
        };

        self.expect_punct(PunctuationId::LParen, "Expected '(' after function name")?;
        let params = self.params()?;
        self.expect_punct(PunctuationId::RParen, "Expected ')' after parameters")?;

        let return_type = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_annotation()?)
        } else {
            None
        };

        let body = if self.check_punct(PunctuationId::LBrace) {
            let start = self.current_span().start;
            let block = self.block()?;
            Some(Spanned::new(block, self.span_from(start)))
        } else {
            self.skip_semicolon();
            None
        };

        Ok(Statement::Function(FunctionDecl {
            exported,
            is_default,
            name,
            params,
            return_type,
            body,
        }))
    }

    fn params(&mut self) -> Result<Vec<Spanned<Param>>, CompileError> {
        let mut params = Vec::new();
        while !self.check_punct(PunctuationId::RParen) {
            let name = self.expect_ident("Expected parameter name")?;
            let start = name.span.start;
            let ty = if self.match_punct(PunctuationId::Colon) {
                Some(self.type_annotation()?)
            } else {
                None
            };
            params.push(Spanned::new(Param { name, ty }, self.span_from(start)));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(params)
    }

    // ========================================================================
    // Interfaces and type aliases
    // ========================================================================

    fn interface_decl(&mut self, exported: bool) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Interface, "Expected 'interface'")?;
        let name = self.expect_ident("Expected interface name")?;
        let members = self.object_type_members()?;
        Ok(Statement::Interface(InterfaceDecl { exported, name, members }))
    }

    fn type_alias_decl(&mut self, exported: bool) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Type, "Expected 'type'")?;
        let name = self.expect_ident("Expected type alias name")?;
        self.expect_op(OperatorId::Eq, "Expected '=' after type alias name")?;
        let ty = self.type_annotation()?;
        self.skip_semicolon();
        Ok(Statement::TypeAlias(TypeAliasDecl { exported, name, ty }))
    }
}
