//! Statement checking: blocks, loops, returns and variable declarations.

use crate::frontend::ast::*;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::symbols::*;
use crate::frontend::types::Type;

use super::TypeChecker;

impl<'g> TypeChecker<'g> {
    pub(crate) fn check_statement(&mut self, stmt: &Spanned<Statement>) {
        match &stmt.node {
            Statement::Block(block) => self.check_block(block),
            Statement::Expression(expr) => {
                self.check_expr(expr);
            }
            Statement::For(for_stmt) => self.check_for(for_stmt),
            Statement::Return(value) => self.check_return(value.as_ref(), stmt.span),
            Statement::Variable(list) => self.check_variable_list(list),
            Statement::If(if_stmt) => {
                self.check_expr(&if_stmt.condition);
                self.check_nested(&if_stmt.then_branch);
                if let Some(else_branch) = &if_stmt.else_branch {
                    self.check_nested(else_branch);
                }
            }
            Statement::While(while_stmt) => {
                self.check_expr(&while_stmt.condition);
                self.check_nested(&while_stmt.body);
            }
            Statement::DoWhile(do_while) => {
                self.check_nested(&do_while.body);
                self.check_expr(&do_while.condition);
            }
            Statement::Function(decl) => {
                self.collect_function(decl);
                self.check_function_body(decl);
            }
            Statement::Import(_) => self.error(CompileError::type_error(
                "An import declaration can only be used at the top level of a module.".to_string(),
                stmt.span,
            )),
            Statement::Interface(_) | Statement::TypeAlias(_) => self.error(CompileError::type_error(
                format!(
                    "A nested {} is not supported; declare it at the top level of a module.",
                    stmt.node.kind_name()
                ),
                stmt.span,
            )),
            Statement::Empty => {}
        }
    }

    fn check_block(&mut self, block: &Block) {
        self.symbols.enter_scope(ScopeKind::Block);
        for stmt in &block.statements {
            self.check_statement(stmt);
        }
        self.symbols.exit_scope();
    }

    /// Loop and branch bodies get their own scope even without braces.
    fn check_nested(&mut self, stmt: &Spanned<Statement>) {
        match &stmt.node {
            Statement::Block(_) => self.check_statement(stmt),
            _ => {
                self.symbols.enter_scope(ScopeKind::Block);
                self.check_statement(stmt);
                self.symbols.exit_scope();
            }
        }
    }

    fn check_for(&mut self, for_stmt: &ForStmt) {
        self.symbols.enter_scope(ScopeKind::Block);
        match &for_stmt.initializer {
            Some(ForInit::Variables(list)) => self.check_variable_list(&list.node),
            Some(ForInit::Expression(expr)) => {
                self.check_expr(expr);
            }
            None => {}
        }
        if let Some(condition) = &for_stmt.condition {
            self.check_expr(condition);
        }
        if let Some(incrementor) = &for_stmt.incrementor {
            self.check_expr(incrementor);
        }
        self.check_nested(&for_stmt.body);
        self.symbols.exit_scope();
    }

    fn check_return(&mut self, value: Option<&Spanned<Expr>>, span: Span) {
        let Some(expected) = self.symbols.current_return_type().cloned() else {
            self.error(CompileError::type_error(
                "A 'return' statement can only be used within a function body.".to_string(),
                span,
            ));
            if let Some(value) = value {
                self.check_expr(value);
            }
            return;
        };
        if let Some(value) = value {
            self.check_expr_expecting(value, Some(&expected));
        }
    }

    /// Check a `const`/`let`/`var` list and bind each declarator in the current scope.
    ///
    /// An annotation decides the declared type. Without one, `const` keeps the initializer's literal
    /// type and `let`/`var` widen it.
    pub(crate) fn check_variable_list(&mut self, list: &VariableDeclList) {
        for decl in &list.declarations {
            let VariableDeclarator { name, ty, initializer } = &decl.node;

            let annotated = ty.as_ref().map(|annotation| self.resolve_annotation(annotation));
            let inferred = initializer
                .as_ref()
                .map(|init| self.check_expr_expecting(init, annotated.as_ref()));

            if list.kind == DeclarationKind::Const && initializer.is_none() {
                self.error(CompileError::type_error(
                    "'const' declarations must be initialized.".to_string(),
                    name.span,
                ));
            }

            let declared = match (annotated, inferred) {
                (Some(annotated), _) => annotated,
                (None, Some(inferred)) if list.kind == DeclarationKind::Const => inferred,
                (None, Some(inferred)) => inferred.widened(),
                (None, None) => Type::Any,
            };

            self.record(decl.span, declared.clone());
            self.define_binding(name, declared, Some(list.kind));
        }
    }
}
