//! Top-level checking (functions, imports) and type annotation resolution.

use ts2go_core::lang::types as source_types;

use crate::frontend::ast::*;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::module::SourceUnit;
use crate::frontend::symbols::*;
use crate::frontend::types::{FunctionSig, Type};

use super::TypeChecker;

/// What an import specifier names inside the imported module.
enum ExportTarget<'p> {
    Function(&'p FunctionDecl),
    Type(&'p str),
}

impl<'g> TypeChecker<'g> {
    // ========================================================================
    // Top-level statements
    // ========================================================================

    pub(crate) fn check_top_level(&mut self, stmt: &Spanned<Statement>) {
        match &stmt.node {
            Statement::Function(decl) => self.check_function_body(decl),
            Statement::Import(decl) => self.check_import(decl),
            // Collected (and their annotations recorded) in the first pass.
            Statement::Interface(_) | Statement::TypeAlias(_) => {}
            _ => self.check_statement(stmt),
        }
    }

    /// Check a function body against the signature recorded during collection.
    pub(crate) fn check_function_body(&mut self, decl: &FunctionDecl) {
        let sig = self.recorded_signature(decl);

        self.symbols.enter_scope(ScopeKind::Function);
        self.symbols.set_return_type(*sig.return_type);
        for (param, (_, ty)) in decl.params.iter().zip(sig.params) {
            self.define_binding(&param.node.name, ty, None);
        }
        if let Some(body) = &decl.body {
            for stmt in &body.node.statements {
                self.check_statement(stmt);
            }
        }
        self.symbols.exit_scope();
    }

    // ========================================================================
    // Imports
    // ========================================================================

    fn check_import(&mut self, decl: &ImportDecl) {
        let graph = self.graph;
        let specifier = &decl.specifier;
        let Some(target) = graph.resolve_import(self.current_file, &specifier.node) else {
            self.error(CompileError::type_error(
                format!("Cannot find module '{}'.", specifier.node),
                specifier.span,
            ));
            return;
        };

        if let Some(namespace) = &decl.namespace {
            self.error(
                CompileError::type_error("Namespace imports are not supported.".to_string(), namespace.span)
                    .with_hint(format!(
                        "Import the declarations you need by name: import {{ ... }} from \"{}\"",
                        specifier.node
                    )),
            );
        }

        if let Some(local) = &decl.default {
            match default_export(target) {
                Some(function) => {
                    let sig = self.in_file(target.id, |this| this.recorded_signature(function));
                    self.bind_imported_function(local, sig, function);
                }
                None => self.error(CompileError::type_error(
                    format!("Module '\"{}\"' has no default export.", specifier.node),
                    local.span,
                )),
            }
        }

        for named in &decl.named {
            let ImportSpecifier { imported, local } = &named.node;
            match named_export(target, imported) {
                Some(ExportTarget::Function(function)) => {
                    let sig = self.in_file(target.id, |this| this.recorded_signature(function));
                    let local = Spanned::new(local.clone(), named.span);
                    self.bind_imported_function(&local, sig, function);
                }
                Some(ExportTarget::Type(name)) => {
                    if local.as_str() != name {
                        if let Some(kind) = self.lookup_kind(name) {
                            self.symbols
                                .define(Symbol::new(local.clone(), kind, named.span, self.current_file));
                        }
                    }
                }
                None => self.error(CompileError::type_error(
                    format!(
                        "Module '\"{}\"' has no exported member '{}'.",
                        specifier.node, imported
                    ),
                    named.span,
                )),
            }
        }
    }

    fn bind_imported_function(&mut self, local: &Spanned<Ident>, sig: FunctionSig, decl: &FunctionDecl) {
        let info = FunctionInfo {
            sig,
            exported: decl.exported,
            is_default: decl.is_default,
            has_body: decl.body.is_some(),
        };
        self.symbols.define(Symbol::new(
            local.node.clone(),
            SymbolKind::Function(info),
            local.span,
            self.current_file,
        ));
    }

    // ========================================================================
    // Bindings
    // ========================================================================

    /// Define a parameter (`declared_with == None`) or variable in the current scope.
    pub(crate) fn define_binding(&mut self, name: &Spanned<Ident>, ty: Type, declared_with: Option<DeclarationKind>) {
        if self.symbols.lookup_local(&name.node).is_some() {
            let message = match declared_with {
                None => format!("Duplicate identifier '{}'.", name.node),
                Some(_) => format!("Cannot redeclare block-scoped variable '{}'.", name.node),
            };
            self.error(CompileError::type_error(message, name.span));
            return;
        }
        let info = VariableInfo { ty, declared_with };
        self.symbols.define(Symbol::new(
            name.node.clone(),
            SymbolKind::Variable(info),
            name.span,
            self.current_file,
        ));
    }

    // ========================================================================
    // Type annotations
    // ========================================================================

    /// Resolve an annotation and record its type at the annotation's span.
    pub(crate) fn resolve_annotation(&mut self, annotation: &Spanned<TypeAnnotation>) -> Type {
        let ty = self.annotation_type(annotation);
        self.record(annotation.span, ty.clone());
        ty
    }

    fn annotation_type(&mut self, annotation: &Spanned<TypeAnnotation>) -> Type {
        match &annotation.node {
            TypeAnnotation::Named { name, args } => self.named_type(name, args, annotation.span),
            TypeAnnotation::Array(element) => Type::array_of(self.annotation_type(element)),
            TypeAnnotation::StringLiteral(body) => Type::StringLiteral(body.clone()),
            TypeAnnotation::NumberLiteral(text) => Type::NumberLiteral(text.clone()),
            TypeAnnotation::BooleanLiteral(value) => Type::BooleanLiteral(*value),
            TypeAnnotation::Null => Type::Null,
            TypeAnnotation::Object(members) => Type::Object(
                members
                    .iter()
                    .map(|member| (member.node.name.clone(), self.annotation_type(&member.node.ty)))
                    .collect(),
            ),
        }
    }

    fn named_type(&mut self, name: &str, args: &[Spanned<TypeAnnotation>], span: Span) -> Type {
        let mut arg_types: Vec<Type> = args.iter().map(|arg| self.annotation_type(arg)).collect();

        // Single-argument generics known to the runtime.
        let is_array = name == source_types::ARRAY;
        if is_array || source_types::pointer_from_str(name).is_some() {
            if arg_types.len() != 1 {
                self.error(CompileError::type_error(
                    format!("Generic type '{}<T>' requires 1 type argument(s).", name),
                    span,
                ));
                return Type::Unknown;
            }
            if is_array {
                return Type::array_of(arg_types.remove(0));
            }
            return Type::Reference {
                name: name.to_string(),
                args: arg_types,
            };
        }

        match self.lookup_kind(name) {
            Some(SymbolKind::Type(TypeInfo::Builtin(ty))) => {
                if !args.is_empty() {
                    self.error(CompileError::type_error(format!("Type '{}' is not generic.", name), span));
                }
                ty
            }
            Some(SymbolKind::Type(TypeInfo::Interface(_))) => Type::Reference {
                name: name.to_string(),
                args: arg_types,
            },
            Some(SymbolKind::Type(TypeInfo::Alias(_))) => self.resolve_alias(name, span),
            Some(_) => {
                self.error(CompileError::type_error(
                    format!("'{}' refers to a value, but is being used as a type here.", name),
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

    /// Resolve a type alias, caching its target on the symbol.
    ///
    /// The target is resolved in the alias's own file so its errors and recorded types land there.
    pub(crate) fn resolve_alias(&mut self, name: &str, span: Span) -> Type {
        let Some(id) = self.symbols.lookup(name) else {
            return Type::Unknown;
        };
        let (file, annotation, cached) = match self.symbols.get(id) {
            Some(Symbol {
                file,
                kind: SymbolKind::Type(TypeInfo::Alias(info)),
                ..
            }) => (*file, info.annotation.clone(), info.target.clone()),
            _ => return Type::Unknown,
        };

        let target = match cached {
            Some(target) => target,
            None => {
                if !self.resolving_aliases.insert(name.to_string()) {
                    self.error(CompileError::type_error(
                        format!("Type alias '{}' circularly references itself.", name),
                        span,
                    ));
                    return Type::Unknown;
                }
                let file = file.unwrap_or(self.current_file);
                let target = self.in_file(file, |this| this.resolve_annotation(&annotation));
                self.resolving_aliases.remove(name);
                if let Some(Symbol {
                    kind: SymbolKind::Type(TypeInfo::Alias(info)),
                    ..
                }) = self.symbols.get_mut(id)
                {
                    info.target = Some(target.clone());
                }
                target
            }
        };

        Type::Alias {
            name: name.to_string(),
            target: Box::new(target),
        }
    }
}

// ============================================================================
// Export lookup
// ============================================================================

fn default_export(unit: &SourceUnit) -> Option<&FunctionDecl> {
    unit.program.statements.iter().find_map(|stmt| match &stmt.node {
        Statement::Function(decl) if decl.exported && decl.is_default => Some(decl),
        _ => None,
    })
}

fn named_export<'p>(unit: &'p SourceUnit, name: &str) -> Option<ExportTarget<'p>> {
    unit.program.statements.iter().find_map(|stmt| match &stmt.node {
        Statement::Function(decl)
            if decl.exported && !decl.is_default && decl.name.as_ref().is_some_and(|n| n.node == name) =>
        {
            Some(ExportTarget::Function(decl))
        }
        Statement::Interface(decl) if decl.exported && decl.name.node == name => {
            Some(ExportTarget::Type(decl.name.node.as_str()))
        }
        Statement::TypeAlias(decl) if decl.exported && decl.name.node == name => {
            Some(ExportTarget::Type(decl.name.node.as_str()))
        }
        _ => None,
    })
}
