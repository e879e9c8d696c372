//! Top-level dispatch: function declarations and inlined imports.

use ts2go_core::lang::target;

use crate::frontend::ast::*;

use super::{Dispatcher, EmitError, NodeEmitter};

impl<'a> NodeEmitter<'a> {
    pub(crate) fn emit_top_level_statement(&mut self, stmt: &Spanned<Statement>) -> Result<(), EmitError> {
        match &stmt.node {
            Statement::Function(decl) => self.emit_function(decl, stmt.span),
            Statement::Import(decl) => self.emit_import(decl, stmt.span),
            other => Err(self.dispatch_miss(other.kind_name(), Dispatcher::TopLevelStatement, stmt.span)),
        }
    }

    /// `func name(a T, b U) R {` ... `}` followed by a blank line.
    fn emit_function(&mut self, decl: &FunctionDecl, span: Span) -> Result<(), EmitError> {
        let name = decl
            .name
            .as_ref()
            .ok_or_else(|| self.precondition("Cannot emit a function declaration without a name.", span))?;
        let func_name = self.identifier(&name.node, name.span)?;
        let return_type = decl.return_type.as_ref().ok_or_else(|| {
            self.precondition(
                format!("Cannot emit function '{}' without a declared return type.", name.node),
                name.span,
            )
        })?;
        let body = decl.body.as_ref().ok_or_else(|| {
            self.precondition(
                format!("Cannot emit function '{}' without a body.", name.node),
                name.span,
            )
        })?;

        let mut params = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let param_name = self.identifier(&param.node.name.node, param.node.name.span)?;
            let what = format!("parameter '{}'", param_name);
            let ty = self.session.type_name(param.span, &what)?;
            params.push(format!("{} {}", param_name, ty));
        }
        let return_name = self
            .session
            .type_name(return_type.span, &format!("the return type of '{}'", name.node))?;

        let mut signature = format!("{} {}({})", target::FUNC, func_name, params.join(", "));
        if return_name != target::VOID {
            signature.push(' ');
            signature.push_str(&return_name);
        }
        signature.push(' ');
        self.out().append(&signature);
        self.emit_block(&body.node)?;
        self.out().new_line();
        self.out().new_line();
        Ok(())
    }

    /// Inline the imported module's top-level statements at this position.
    ///
    /// Repeated imports are not deduplicated. A module already being inlined further up the import
    /// chain (an import cycle) is skipped.
    fn emit_import(&mut self, decl: &ImportDecl, span: Span) -> Result<(), EmitError> {
        let graph = self.session.graph();
        let target = graph
            .resolve_import(self.session.source_file(), &decl.specifier.node)
            .ok_or_else(|| EmitError::UnresolvedModule {
                location: self.session.location(span),
                specifier: decl.specifier.node.clone(),
            })?;

        if self.session.is_emitting(target.id) {
            tracing::debug!(module = %target.display_name(), "skipping cyclic import");
            return Ok(());
        }

        tracing::debug!(module = %target.display_name(), "inlining import");
        self.session.push_source_file(target.id);
        for stmt in &target.program.statements {
            self.emit_top_level_statement(stmt)?;
        }
        self.session.pop_source_file();
        Ok(())
    }

    /// `{`, the indented statements, `}`; the closing brace's line is left open for the caller.
    pub(crate) fn emit_block(&mut self, block: &Block) -> Result<(), EmitError> {
        self.out().append_line("{");
        self.out().indent();
        for stmt in &block.statements {
            self.emit_block_level_statement(stmt)?;
        }
        self.out().unindent();
        self.out().append("}");
        Ok(())
    }
}
