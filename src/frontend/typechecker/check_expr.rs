//! Expression checking.
//!
//! Every checked expression has its type recorded at its span; the backend relies on this for
//! variable initializers, array literals, string concatenation and property access.

use ts2go_core::lang::types as source_types;

use crate::frontend::ast::*;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::symbols::*;
use crate::frontend::types::{FunctionSig, Type};

use super::TypeChecker;

/// Which syntactic position an assignment target appears in, for error wording.
#[derive(Clone, Copy)]
enum TargetUse {
    Assignment,
    IncrementDecrement,
}

impl<'g> TypeChecker<'g> {
    pub(crate) fn check_expr(&mut self, expr: &Spanned<Expr>) -> Type {
        self.check_expr_expecting(expr, None)
    }

    /// Check `expr` with an optional contextual type (declared annotation, parameter, return type).
    ///
    /// The contextual type only steers literal inference; it is never enforced.
    pub(crate) fn check_expr_expecting(&mut self, expr: &Spanned<Expr>, expected: Option<&Type>) -> Type {
        let ty = self.infer_expr(expr, expected);
        self.record(expr.span, ty.clone());
        ty
    }

    fn infer_expr(&mut self, expr: &Spanned<Expr>, expected: Option<&Type>) -> Type {
        match &expr.node {
            Expr::Ident(name) => self.check_ident(name, expr.span),
            Expr::Number(text) => Type::NumberLiteral(text.clone()),
            Expr::String(body) => Type::StringLiteral(body.clone()),
            Expr::Bool(value) => Type::BooleanLiteral(*value),
            Expr::Null => Type::Null,
            Expr::Template(template) => {
                for span in &template.spans {
                    self.check_expr(&span.expr);
                }
                Type::String
            }
            Expr::Array(elements) => self.check_array(elements, expected),
            Expr::Object(properties) => self.check_object(properties),
            Expr::Paren(inner) => self.check_expr_expecting(inner, expected),
            Expr::Prefix(op, operand) => self.check_prefix(op.node, operand),
            Expr::Postfix(operand, _) => {
                self.check_assignment_target(operand, TargetUse::IncrementDecrement);
                Type::Number
            }
            Expr::Binary(left, op, right) => self.check_binary(left, op.node, right),
            Expr::Call(callee, args) => self.check_call(callee, args, expr.span),
            Expr::Member(object, property) => {
                let object_ty = self.check_expr(object);
                self.member_type(&object_ty, property)
            }
            Expr::Index(object, index) => {
                let object_ty = self.check_expr(object);
                self.check_expr(index);
                match object_ty.resolved() {
                    Type::Array(element) => (**element).clone(),
                    ty if ty.is_string_like() => Type::String,
                    ty if ty.is_dynamic() => ty.clone(),
                    _ => Type::Any,
                }
            }
            Expr::Conditional(condition, then_expr, else_expr) => {
                self.check_expr(condition);
                let then_ty = self.check_expr_expecting(then_expr, expected);
                self.check_expr_expecting(else_expr, expected);
                then_ty.widened()
            }
            Expr::As(inner, annotation) => {
                self.check_expr(inner);
                self.resolve_annotation(annotation)
            }
        }
    }

    // ========================================================================
    // Names
    // ========================================================================

    fn check_ident(&mut self, name: &str, span: Span) -> Type {
        match self.lookup_kind(name) {
            Some(SymbolKind::Variable(info)) => info.ty,
            Some(SymbolKind::Function(info)) => Type::Function(info.sig),
            Some(SymbolKind::Global(global)) => Type::Reference {
                name: global.type_name.to_string(),
                args: Vec::new(),
            },
            Some(SymbolKind::Type(_)) => {
                self.error(CompileError::type_error(
                    format!("'{}' only refers to a type, but is being used as a value here.", name),
                    span,
                ));
                Type::Unknown
            }
            None => {
                self.error(CompileError::type_error(format!("Cannot find name '{}'.", name), span));
                Type::Unknown
            }
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn check_array(&mut self, elements: &[Spanned<Expr>], expected: Option<&Type>) -> Type {
        let expected_element = expected.and_then(|ty| ty.array_element()).cloned();
        let element_types: Vec<Type> = elements
            .iter()
            .map(|element| self.check_expr_expecting(element, expected_element.as_ref()))
            .collect();

        match expected {
            Some(ty) if ty.is_array_like() => ty.clone(),
            _ => match element_types.first() {
                Some(first) => Type::array_of(first.widened()),
                None => Type::array_of(Type::Any),
            },
        }
    }

    fn check_object(&mut self, properties: &[Spanned<ObjectProperty>]) -> Type {
        let mut fields: Vec<(String, Type)> = Vec::new();
        for property in properties {
            match &property.node {
                ObjectProperty::Assignment { name, value } => {
                    let ty = self.check_expr(value).widened();
                    set_field(&mut fields, &name.node, ty);
                }
                ObjectProperty::Shorthand(name) => {
                    let ty = self.check_ident(&name.node, name.span).widened();
                    self.record(name.span, ty.clone());
                    set_field(&mut fields, &name.node, ty);
                }
                ObjectProperty::Spread(inner) => {
                    let ty = self.check_expr(inner);
                    match self.object_fields(&ty) {
                        Some(spread) => {
                            for (name, ty) in spread {
                                set_field(&mut fields, &name, ty);
                            }
                        }
                        None if ty.is_dynamic() => {}
                        None => self.error(CompileError::type_error(
                            "Spread types may only be created from object types.".to_string(),
                            inner.span,
                        )),
                    }
                }
            }
        }
        Type::Object(fields)
    }

    /// Fields of an object type or an interface reference.
    fn object_fields(&self, ty: &Type) -> Option<Vec<(String, Type)>> {
        match ty.resolved() {
            Type::Object(fields) => Some(fields.clone()),
            Type::Reference { name, .. } => match self.lookup_kind(name) {
                Some(SymbolKind::Type(TypeInfo::Interface(info))) => Some(info.members),
                _ => None,
            },
            _ => None,
        }
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn check_prefix(&mut self, op: UnaryOp, operand: &Spanned<Expr>) -> Type {
        match op {
            UnaryOp::Not => {
                self.check_expr(operand);
                Type::Boolean
            }
            UnaryOp::Neg => match self.check_expr(operand) {
                Type::NumberLiteral(text) => match text.strip_prefix('-') {
                    Some(positive) => Type::NumberLiteral(positive.to_string()),
                    None => Type::NumberLiteral(format!("-{}", text)),
                },
                ty if ty.is_dynamic() => ty,
                _ => Type::Number,
            },
            UnaryOp::Plus => {
                self.check_expr(operand);
                Type::Number
            }
            UnaryOp::Increment | UnaryOp::Decrement => {
                self.check_assignment_target(operand, TargetUse::IncrementDecrement);
                Type::Number
            }
        }
    }

    fn check_binary(&mut self, left: &Spanned<Expr>, op: BinaryOp, right: &Spanned<Expr>) -> Type {
        if op.is_assignment() {
            let target = self.check_assignment_target(left, TargetUse::Assignment);
            let value = self.check_expr_expecting(right, Some(&target));
            return match op {
                BinaryOp::Assign => value,
                BinaryOp::AddAssign if target.is_string_like() || value.is_string_like() => Type::String,
                _ => target,
            };
        }

        let left_ty = self.check_expr(left);
        let right_ty = self.check_expr(right);
        match op {
            BinaryOp::Add => {
                if left_ty.is_string_like() || right_ty.is_string_like() {
                    Type::String
                } else if left_ty.is_dynamic() || right_ty.is_dynamic() {
                    Type::Any
                } else {
                    Type::Number
                }
            }
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => Type::Number,
            _ => Type::Boolean,
        }
    }

    /// Check the left side of an assignment or the operand of `++`/`--`.
    fn check_assignment_target(&mut self, target: &Spanned<Expr>, usage: TargetUse) -> Type {
        match &target.node {
            Expr::Ident(name) => {
                let ty = self.check_expr(target);
                match self.lookup_kind(name) {
                    Some(SymbolKind::Variable(info)) if info.is_const() => {
                        self.error(CompileError::type_error(
                            format!("Cannot assign to '{}' because it is a constant.", name),
                            target.span,
                        ));
                    }
                    Some(SymbolKind::Function(_)) => {
                        self.error(CompileError::type_error(
                            format!("Cannot assign to '{}' because it is a function.", name),
                            target.span,
                        ));
                    }
                    _ => {}
                }
                ty
            }
            Expr::Member(..) | Expr::Index(..) => self.check_expr(target),
            Expr::Paren(inner) => {
                let ty = self.check_assignment_target(inner, usage);
                self.record(target.span, ty.clone());
                ty
            }
            _ => {
                self.check_expr(target);
                let message = match usage {
                    TargetUse::Assignment => {
                        "The left-hand side of an assignment expression must be a variable or a property access."
                    }
                    TargetUse::IncrementDecrement => {
                        "The operand of an increment or decrement operator must be a variable or a property access."
                    }
                };
                self.error(CompileError::type_error(message.to_string(), target.span));
                Type::Unknown
            }
        }
    }

    // ========================================================================
    // Calls and members
    // ========================================================================

    fn check_call(&mut self, callee: &Spanned<Expr>, args: &[Spanned<Expr>], span: Span) -> Type {
        let callee_ty = self.check_expr(callee);
        let runtime_method = self.is_runtime_method(callee);

        match callee_ty.resolved() {
            Type::Function(sig) => {
                let sig = sig.clone();
                if !runtime_method && args.len() != sig.params.len() {
                    self.error(CompileError::type_error(
                        format!("Expected {} arguments, but got {}.", sig.params.len(), args.len()),
                        span,
                    ));
                }
                for (index, arg) in args.iter().enumerate() {
                    let expected = sig.params.get(index).map(|(_, ty)| ty);
                    self.check_expr_expecting(arg, expected);
                }
                *sig.return_type
            }
            ty => {
                let ty = ty.clone();
                for arg in args {
                    self.check_expr(arg);
                }
                if ty.is_dynamic() {
                    ty
                } else {
                    self.error(CompileError::type_error(
                        "This expression is not callable.".to_string(),
                        callee.span,
                    ));
                    Type::Unknown
                }
            }
        }
    }

    /// `console.info` and friends accept any number of arguments.
    fn is_runtime_method(&self, callee: &Spanned<Expr>) -> bool {
        let Expr::Member(object, _) = &callee.node else {
            return false;
        };
        match self.recorded(object.span) {
            Some(Type::Reference { name, .. }) => {
                source_types::RUNTIME_GLOBALS.iter().any(|global| global.type_name == name)
            }
            _ => false,
        }
    }

    fn member_type(&mut self, object_ty: &Type, property: &Spanned<Ident>) -> Type {
        let name = property.node.as_str();
        let resolved = object_ty.resolved();
        if resolved.is_dynamic() {
            return resolved.clone();
        }
        if name == "length" && (resolved.is_array_like() || resolved.is_string_like()) {
            return Type::Number;
        }
        if let Some(fields) = self.object_fields(resolved) {
            if let Some((_, ty)) = fields.iter().find(|(field, _)| field == name) {
                return ty.clone();
            }
        }
        if let Type::Reference { name: type_name, .. } = resolved {
            let is_method = source_types::RUNTIME_GLOBALS
                .iter()
                .any(|global| global.type_name == type_name && global.methods.contains(&name));
            if is_method {
                return Type::Function(FunctionSig::new(Vec::new(), Type::Void));
            }
        }

        self.error(CompileError::type_error(
            format!("Property '{}' does not exist on type '{}'.", name, object_ty),
            property.span,
        ));
        Type::Unknown
    }
}

/// Insert or overwrite a field, keeping first-seen order.
fn set_field(fields: &mut Vec<(String, Type)>, name: &str, ty: Type) {
    match fields.iter_mut().find(|(field, _)| field == name) {
        Some(slot) => slot.1 = ty,
        None => fields.push((name.to_string(), ty)),
    }
}
