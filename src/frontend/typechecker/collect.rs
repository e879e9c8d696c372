//! First-pass collection: register interfaces, type aliases and function signatures of every unit.
//!
//! Runs in two sweeps over the graph. The first only registers type names, so the second can resolve
//! interface members and signatures that refer to types declared later or in another file.

use crate::frontend::ast::*;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::symbols::*;
use crate::frontend::types::{FunctionSig, Type};

use super::TypeChecker;

impl<'g> TypeChecker<'g> {
    // ========================================================================
    // Entry
    // ========================================================================

    pub(crate) fn collect(&mut self) {
        let graph = self.graph;

        for unit in graph.units() {
            self.in_file(unit.id, |this| {
                for stmt in &unit.program.statements {
                    this.collect_type_name(stmt);
                }
            });
        }

        for unit in graph.units() {
            self.in_file(unit.id, |this| {
                for stmt in &unit.program.statements {
                    this.collect_declaration(stmt);
                }
            });
        }
    }

    fn collect_type_name(&mut self, stmt: &Spanned<Statement>) {
        match &stmt.node {
            Statement::Interface(decl) => {
                let info = InterfaceInfo {
                    exported: decl.exported,
                    members: Vec::new(),
                };
                self.define_global(&decl.name, SymbolKind::Type(TypeInfo::Interface(info)));
            }
            Statement::TypeAlias(decl) => {
                let info = AliasInfo {
                    exported: decl.exported,
                    annotation: decl.ty.clone(),
                    target: None,
                };
                self.define_global(&decl.name, SymbolKind::Type(TypeInfo::Alias(info)));
            }
            _ => {}
        }
    }

    fn collect_declaration(&mut self, stmt: &Spanned<Statement>) {
        match &stmt.node {
            Statement::Interface(decl) => self.collect_interface_members(decl),
            Statement::TypeAlias(decl) => {
                if self.owns_global(&decl.name) {
                    self.resolve_alias(&decl.name.node, decl.name.span);
                }
            }
            Statement::Function(decl) => self.collect_function(decl),
            _ => {}
        }
    }

    // ========================================================================
    // Registration helpers
    // ========================================================================

    /// Define a top-level name in the global scope.
    ///
    /// A second declaration of the same name in the same file is an error; across files the first
    /// declaration wins.
    fn define_global(&mut self, name: &Spanned<Ident>, kind: SymbolKind) {
        if let Some(id) = self.symbols.lookup_local(&name.node) {
            let existing_file = self.symbols.get(id).and_then(|sym| sym.file);
            if existing_file.is_none() || existing_file == Some(self.current_file) {
                self.error(CompileError::type_error(
                    format!("Duplicate identifier '{}'.", name.node),
                    name.span,
                ));
            }
            return;
        }
        self.symbols
            .define(Symbol::new(name.node.clone(), kind, name.span, self.current_file));
    }

    /// `true` when the global symbol for `name` is the declaration at `name.span` in this file.
    fn owns_global(&self, name: &Spanned<Ident>) -> bool {
        self.symbols
            .lookup_local(&name.node)
            .and_then(|id| self.symbols.get(id))
            .is_some_and(|sym| sym.file == Some(self.current_file) && sym.span == name.span)
    }

    fn collect_interface_members(&mut self, decl: &InterfaceDecl) {
        let members: Vec<(String, Type)> = decl
            .members
            .iter()
            .map(|member| (member.node.name.clone(), self.resolve_annotation(&member.node.ty)))
            .collect();

        if !self.owns_global(&decl.name) {
            return;
        }
        let Some(id) = self.symbols.lookup_local(&decl.name.node) else {
            return;
        };
        if let Some(Symbol {
            kind: SymbolKind::Type(TypeInfo::Interface(info)),
            ..
        }) = self.symbols.get_mut(id)
        {
            info.members = members;
        }
    }

    /// Resolve and record a function's parameter and return annotations, then register it.
    ///
    /// Overload signatures (no body) share the name with their implementation; only a second
    /// implementation in the same file is an error.
    pub(crate) fn collect_function(&mut self, decl: &FunctionDecl) {
        let sig = self.resolve_signature(decl);
        let Some(name) = &decl.name else {
            return;
        };
        let has_body = decl.body.is_some();

        if let Some(id) = self.symbols.lookup_local(&name.node) {
            let current_file = self.current_file;
            let duplicate = match self.symbols.get_mut(id) {
                Some(Symbol {
                    kind: SymbolKind::Function(info),
                    file,
                    ..
                }) => {
                    let same_file = *file == Some(current_file);
                    let duplicate = same_file && info.has_body && has_body;
                    if same_file {
                        info.has_body |= has_body;
                    }
                    Some(duplicate)
                }
                _ => None,
            };
            match duplicate {
                Some(true) => self.error(
                    CompileError::type_error("Duplicate function implementation.".to_string(), name.span)
                        .with_note(format!("'{}' is already implemented in this file", name.node)),
                ),
                Some(false) => {}
                None => self.error(CompileError::type_error(
                    format!("Duplicate identifier '{}'.", name.node),
                    name.span,
                )),
            }
            return;
        }

        let info = FunctionInfo {
            sig,
            exported: decl.exported,
            is_default: decl.is_default,
            has_body,
        };
        self.symbols.define(Symbol::new(
            name.node.clone(),
            SymbolKind::Function(info),
            name.span,
            self.current_file,
        ));
    }

    /// Resolve a declaration's annotations into a signature, recording parameter types.
    ///
    /// Missing annotations are `any`.
    fn resolve_signature(&mut self, decl: &FunctionDecl) -> FunctionSig {
        let mut params = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let ty = match &param.node.ty {
                Some(annotation) => self.resolve_annotation(annotation),
                None => Type::Any,
            };
            self.record(param.span, ty.clone());
            params.push((param.node.name.node.clone(), ty));
        }
        let return_type = match &decl.return_type {
            Some(annotation) => self.resolve_annotation(annotation),
            None => Type::Any,
        };
        FunctionSig::new(params, return_type)
    }

    /// Rebuild a signature from types recorded during collection.
    pub(crate) fn recorded_signature(&self, decl: &FunctionDecl) -> FunctionSig {
        let params = decl
            .params
            .iter()
            .map(|param| {
                let ty = self.recorded(param.span).unwrap_or(Type::Any);
                (param.node.name.node.clone(), ty)
            })
            .collect();
        let return_type = decl
            .return_type
            .as_ref()
            .and_then(|annotation| self.recorded(annotation.span))
            .unwrap_or(Type::Any);
        FunctionSig::new(params, return_type)
    }
}
