//! Expression dispatch.
//!
//! Expressions are written straight into the current output buffer. Encoding rules that depend on
//! types (string coercion, `.length`, composite literal types) query the session.

use ts2go_core::lang::{target, types as source_types};
use ts2go_core::strings::first_letter_to_upper;

use crate::frontend::ast::*;
use crate::frontend::types::Type;

use super::{Dispatcher, EmitError, NodeEmitter};

/// Infix text for each supported binary operator; anything else is a dispatch failure.
fn binary_operator_text(op: BinaryOp) -> Option<&'static str> {
    Some(match op {
        BinaryOp::Mul => " * ",
        BinaryOp::MulAssign => " *= ",
        BinaryOp::Assign => " = ",
        BinaryOp::Gt => " > ",
        BinaryOp::GtEq => " >= ",
        BinaryOp::Lt => " < ",
        BinaryOp::LtEq => " <= ",
        BinaryOp::Sub => " - ",
        BinaryOp::SubAssign => " -= ",
        BinaryOp::Add => " + ",
        BinaryOp::AddAssign => " += ",
        BinaryOp::Div => " / ",
        BinaryOp::DivAssign => " /= ",
        _ => return None,
    })
}

/// Escape static template text for use inside a format string.
fn escape_format_text(text: &str) -> String {
    text.replace('%', "%%")
}

impl<'a> NodeEmitter<'a> {
    pub(crate) fn emit_expression(&mut self, expr: &Spanned<Expr>) -> Result<(), EmitError> {
        match &expr.node {
            Expr::Array(elements) => {
                let ty = self.session.type_name(expr.span, "an array literal")?;
                self.out().append(&ty);
                self.out().append("{");
                self.emit_comma_separated(elements)?;
                self.out().append("}");
            }
            Expr::Binary(left, op, right) => self.emit_binary_expression(expr.node.kind_name(), left, op, right)?,
            Expr::Call(callee, args) => {
                self.emit_expression(callee)?;
                self.out().append("(");
                self.emit_comma_separated(args)?;
                self.out().append(")");
            }
            Expr::Index(object, index) => {
                self.emit_expression(object)?;
                self.out().append("[");
                self.emit_expression(index)?;
                self.out().append("]");
            }
            Expr::Ident(name) => {
                let name = self.identifier(name, expr.span)?;
                self.note_runtime_global(name, expr.span);
                self.out().append(name);
            }
            Expr::Number(text) => self.out().append(text),
            Expr::Object(properties) => self.emit_object_literal_expression(properties, expr.span)?,
            Expr::Paren(inner) => {
                self.out().append("(");
                self.emit_expression(inner)?;
                self.out().append(")");
            }
            Expr::Prefix(op, operand) => self.emit_prefix_unary_expression(op, operand)?,
            Expr::Postfix(operand, op) => self.emit_postfix_unary_expression(operand, op)?,
            Expr::Member(object, property) => self.emit_property_access(object, property)?,
            Expr::String(body) => self.out().append(&format!("\"{}\"", body)),
            Expr::Template(template) => self.emit_template(template)?,
            Expr::Bool(value) => self.out().append(if *value { "true" } else { "false" }),
            other => return Err(self.dispatch_miss(other.kind_name(), Dispatcher::Expression, expr.span)),
        }
        Ok(())
    }

    fn emit_comma_separated(&mut self, exprs: &[Spanned<Expr>]) -> Result<(), EmitError> {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.out().append(", ");
            }
            self.emit_expression(expr)?;
        }
        Ok(())
    }

    /// Record the runtime import behind a reference to a runtime global such as `console`.
    fn note_runtime_global(&mut self, name: &str, span: Span) {
        let Some(global) = source_types::runtime_global(name) else {
            return;
        };
        if let Some(Type::Reference { name: type_name, .. }) = self.session.type_at(span) {
            if type_name == global.type_name {
                self.session.require_import(global.import_path);
            }
        }
    }

    // ========================================================================
    // Operators
    // ========================================================================

    /// `left OP right`; a non-string right side of a string left side is formatted first.
    fn emit_binary_expression(
        &mut self,
        kind: &'static str,
        left: &Spanned<Expr>,
        op: &Spanned<BinaryOp>,
        right: &Spanned<Expr>,
    ) -> Result<(), EmitError> {
        let text = binary_operator_text(op.node)
            .ok_or_else(|| self.unsupported_operator(op.node.kind_name(), Some(kind), Dispatcher::BinaryExpression, op.span))?;

        let left_is_string = self.session.try_type_name(left.span).as_deref() == Some(target::STRING);
        let right_is_string = self.session.try_type_name(right.span).as_deref() == Some(target::STRING);

        self.emit_expression(left)?;
        self.out().append(text);
        if left_is_string && !right_is_string {
            self.session.require_import(target::FMT_MODULE);
            self.out()
                .append(&format!("{}(\"{}\", ", target::SPRINTF, target::FORMAT_VERB));
            self.emit_expression(right)?;
            self.out().append(")");
        } else {
            self.emit_expression(right)?;
        }
        Ok(())
    }

    fn emit_prefix_unary_expression(&mut self, op: &Spanned<UnaryOp>, operand: &Spanned<Expr>) -> Result<(), EmitError> {
        match op.node {
            UnaryOp::Not | UnaryOp::Neg | UnaryOp::Increment | UnaryOp::Decrement => {
                self.out().append(&op.node.to_string());
                self.emit_expression(operand)
            }
            UnaryOp::Plus => Err(self.unsupported_operator(
                op.node.kind_name(),
                None,
                Dispatcher::PrefixUnaryExpression,
                op.span,
            )),
        }
    }

    fn emit_postfix_unary_expression(&mut self, operand: &Spanned<Expr>, op: &Spanned<UnaryOp>) -> Result<(), EmitError> {
        match op.node {
            UnaryOp::Increment | UnaryOp::Decrement => {
                self.emit_expression(operand)?;
                self.out().append(&op.node.to_string());
                Ok(())
            }
            _ => Err(self.unsupported_operator(
                op.node.kind_name(),
                None,
                Dispatcher::PostfixUnaryExpression,
                op.span,
            )),
        }
    }

    // ========================================================================
    // Members and literals
    // ========================================================================

    /// `len(x)` for `.length` on arrays; otherwise `x.Member`.
    fn emit_property_access(&mut self, object: &Spanned<Expr>, property: &Spanned<Ident>) -> Result<(), EmitError> {
        if property.node == "length" && self.session.is_array(object.span) {
            self.out().append(&format!("{}(", target::LEN));
            self.emit_expression(object)?;
            self.out().append(")");
            return Ok(());
        }
        let member = first_letter_to_upper(self.identifier(&property.node, property.span)?);
        self.emit_expression(object)?;
        self.out().append(".");
        self.out().append(&member);
        Ok(())
    }

    /// `struct{ A int }{A: 1}`: the struct type comes from the literal's checked type.
    fn emit_object_literal_expression(
        &mut self,
        properties: &[Spanned<ObjectProperty>],
        span: Span,
    ) -> Result<(), EmitError> {
        let ty = self.session.type_name(span, "an object literal")?;
        self.out().append(&ty);
        self.out().append("{");
        for (i, property) in properties.iter().enumerate() {
            if i > 0 {
                self.out().append(", ");
            }
            match &property.node {
                ObjectProperty::Assignment { name, value } => {
                    let field = first_letter_to_upper(self.identifier(&name.node, name.span)?);
                    self.out().append(&format!("{}: ", field));
                    self.emit_expression(value)?;
                }
                ObjectProperty::Shorthand(name) => {
                    let local = self.identifier(&name.node, name.span)?;
                    self.note_runtime_global(local, name.span);
                    self.out()
                        .append(&format!("{}: {}", first_letter_to_upper(local), local));
                }
                other => {
                    return Err(self.dispatch_miss(
                        other.kind_name(),
                        Dispatcher::ObjectLiteralExpression,
                        property.span,
                    ));
                }
            }
        }
        self.out().append("}");
        Ok(())
    }

    /// `fmt.Sprintf("text%v...", exprs...)`, one generic verb per interpolation.
    fn emit_template(&mut self, template: &TemplateLiteral) -> Result<(), EmitError> {
        self.session.require_import(target::FMT_MODULE);

        let mut format = escape_format_text(&template.head);
        for span in &template.spans {
            format.push_str(target::FORMAT_VERB);
            format.push_str(&escape_format_text(&span.literal));
        }
        self.out().append(&format!("{}(\"{}\"", target::SPRINTF, format));
        for span in &template.spans {
            self.out().append(", ");
            self.emit_expression(&span.expr)?;
        }
        self.out().append(")");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_table() {
        assert_eq!(binary_operator_text(BinaryOp::Add), Some(" + "));
        assert_eq!(binary_operator_text(BinaryOp::DivAssign), Some(" /= "));
        assert_eq!(binary_operator_text(BinaryOp::Mod), None);
        assert_eq!(binary_operator_text(BinaryOp::StrictEq), None);
        assert_eq!(binary_operator_text(BinaryOp::And), None);
    }

    #[test]
    fn test_escape_format_text() {
        assert_eq!(escape_format_text("100%"), "100%%");
        assert_eq!(escape_format_text("plain"), "plain");
    }
}
