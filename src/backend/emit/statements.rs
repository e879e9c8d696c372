//! Block-level dispatch: blocks, expression statements, counted loops, returns, variables.

use ts2go_core::lang::target;

use crate::frontend::ast::*;

use super::{Dispatcher, EmitError, NodeEmitter};

impl<'a> NodeEmitter<'a> {
    /// Emit one statement inside a function body; every statement ends its own line.
    pub(crate) fn emit_block_level_statement(&mut self, stmt: &Spanned<Statement>) -> Result<(), EmitError> {
        match &stmt.node {
            Statement::Block(block) => {
                self.emit_block(block)?;
                self.out().new_line();
            }
            Statement::Expression(expr) => {
                self.emit_expression(expr)?;
                self.out().new_line();
            }
            Statement::For(for_stmt) => self.emit_for(for_stmt)?,
            Statement::Return(value) => {
                self.out().append("return");
                if let Some(value) = value {
                    self.out().append(" ");
                    self.emit_expression(value)?;
                }
                self.out().new_line();
            }
            Statement::Variable(list) => {
                for decl in &list.declarations {
                    self.emit_variable_declaration(decl)?;
                    self.out().new_line();
                }
            }
            other => {
                return Err(self.dispatch_miss(other.kind_name(), Dispatcher::BlockLevelStatement, stmt.span));
            }
        }
        Ok(())
    }

    /// `for init; cond; incr {` ... `}`; each clause is optional.
    fn emit_for(&mut self, for_stmt: &ForStmt) -> Result<(), EmitError> {
        self.out().append("for ");
        match &for_stmt.initializer {
            Some(ForInit::Variables(list)) => {
                let [decl] = list.node.declarations.as_slice() else {
                    return Err(self.precondition(
                        "Cannot emit a for-loop initializer that declares more than one variable.",
                        list.span,
                    ));
                };
                self.emit_variable_declaration(decl)?;
            }
            Some(ForInit::Expression(expr)) => self.emit_expression(expr)?,
            None => {}
        }
        self.out().append("; ");
        if let Some(condition) = &for_stmt.condition {
            self.emit_expression(condition)?;
        }
        self.out().append("; ");
        if let Some(incrementor) = &for_stmt.incrementor {
            self.emit_expression(incrementor)?;
        }
        self.out().append(" ");

        match &for_stmt.body.node {
            Statement::Block(block) => self.emit_block(block)?,
            _ => {
                // The target only has braced loop bodies.
                self.out().append_line("{");
                self.out().indent();
                self.emit_block_level_statement(&for_stmt.body)?;
                self.out().unindent();
                self.out().append("}");
            }
        }
        self.out().new_line();
        Ok(())
    }

    /// `name := expr` (numeric initializers wrapped in a conversion) or `var name T`.
    ///
    /// Leaves the line open so a `for` clause can continue it.
    fn emit_variable_declaration(&mut self, decl: &Spanned<VariableDeclarator>) -> Result<(), EmitError> {
        let VariableDeclarator { name, initializer, .. } = &decl.node;
        let name = self.identifier(&name.node, name.span)?;
        match initializer {
            Some(init) => {
                self.out().append(&format!("{} {} ", name, target::SHORT_DECL));
                if self.session.is_number(decl.span) {
                    let ty = self.session.type_name(decl.span, &format!("variable '{}'", name))?;
                    self.out().append(&format!("{}(", ty));
                    self.emit_expression(init)?;
                    self.out().append(")");
                } else {
                    self.emit_expression(init)?;
                }
            }
            None => {
                let ty = self.session.type_name(decl.span, &format!("variable '{}'", name))?;
                self.out().append(&format!("{} {} {}", target::VAR, name, ty));
            }
        }
        Ok(())
    }
}
