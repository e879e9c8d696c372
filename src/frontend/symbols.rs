//! Symbol table and scope management for ts2go
//!
//! Tracks all named entities (types, functions, variables, runtime globals) and their scopes.
//! Scope 0 holds the builtins and every top-level declaration of the module graph; each file and
//! each function body gets child scopes during checking.

use std::collections::HashMap;

use ts2go_core::lang::types::{self as source_types, PrimitiveId, RuntimeGlobal};

use super::ast::{DeclarationKind, Span, Spanned, TypeAnnotation};
use super::module::FileId;
use super::types::{FunctionSig, Type};

/// Unique identifier for symbols
pub type SymbolId = usize;

/// Symbol table managing all named entities
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    current_scope: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            symbols: Vec::new(),
            scopes: vec![Scope::new(None, ScopeKind::Global)],
            current_scope: 0,
        };

        table.add_builtins();
        table
    }

    fn add_builtins(&mut self) {
        for info in source_types::PRIMITIVES {
            let ty = match info.id {
                PrimitiveId::Number => Type::Number,
                PrimitiveId::String => Type::String,
                PrimitiveId::Boolean => Type::Boolean,
                PrimitiveId::Void => Type::Void,
                PrimitiveId::Any => Type::Any,
            };
            self.define(Symbol::builtin(info.canonical, SymbolKind::Type(TypeInfo::Builtin(ty))));
        }

        // Runtime numeric aliases keep their own spelling so the emitter sees `int32`, not `number`.
        for alias in source_types::NUMERIC_ALIASES {
            let ty = Type::Alias {
                name: alias.to_string(),
                target: Box::new(Type::Number),
            };
            self.define(Symbol::builtin(alias, SymbolKind::Type(TypeInfo::Builtin(ty))));
        }

        for global in source_types::RUNTIME_GLOBALS {
            self.define(Symbol::builtin(global.name, SymbolKind::Global(global)));
        }
    }

    /// Enter a new scope
    pub fn enter_scope(&mut self, kind: ScopeKind) {
        let new_scope = Scope::new(Some(self.current_scope), kind);
        self.scopes.push(new_scope);
        self.current_scope = self.scopes.len() - 1;
    }

    /// Exit the current scope
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current_scope].parent {
            self.current_scope = parent;
        }
    }

    /// Define a new symbol in the current scope
    pub fn define(&mut self, mut symbol: Symbol) -> SymbolId {
        symbol.scope = self.current_scope;
        let id = self.symbols.len();
        self.scopes[self.current_scope].symbols.insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        id
    }

    /// Look up a symbol by name in the current scope chain
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        let mut scope_idx = self.current_scope;
        loop {
            if let Some(&id) = self.scopes[scope_idx].symbols.get(name) {
                return Some(id);
            }
            scope_idx = self.scopes[scope_idx].parent?;
        }
    }

    /// Look up a symbol only in the current scope (no parent lookup)
    pub fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.scopes[self.current_scope].symbols.get(name).copied()
    }

    /// Get a symbol by ID
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Get a mutable symbol by ID
    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id)
    }

    /// Get the current scope kind
    pub fn current_scope_kind(&self) -> ScopeKind {
        self.scopes[self.current_scope].kind
    }

    /// Get the current function's return type (if in a function)
    pub fn current_return_type(&self) -> Option<&Type> {
        let mut scope_idx = self.current_scope;
        loop {
            if self.scopes[scope_idx].kind == ScopeKind::Function {
                return self.scopes[scope_idx].return_type.as_ref();
            }
            scope_idx = self.scopes[scope_idx].parent?;
        }
    }

    /// Set the return type for the current function scope
    pub fn set_return_type(&mut self, ty: Type) {
        self.scopes[self.current_scope].return_type = Some(ty);
    }
}

/// A scope containing symbol definitions
#[derive(Debug)]
pub struct Scope {
    pub parent: Option<usize>,
    pub kind: ScopeKind,
    pub symbols: HashMap<String, SymbolId>,
    pub return_type: Option<Type>,
}

impl Scope {
    pub fn new(parent: Option<usize>, kind: ScopeKind) -> Self {
        Self {
            parent,
            kind,
            symbols: HashMap::new(),
            return_type: None,
        }
    }
}

/// Kind of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Builtins and top-level declarations of every file.
    Global,
    /// One file's imports and top-level variables.
    Module,
    Function,
    Block,
}

/// A symbol in the symbol table
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub span: Span,
    /// Declaring file; `None` for builtins.
    pub file: Option<FileId>,
    pub scope: usize,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, span: Span, file: FileId) -> Self {
        Self {
            name: name.into(),
            kind,
            span,
            file: Some(file),
            scope: 0,
        }
    }

    fn builtin(name: &str, kind: SymbolKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            span: Span::default(),
            file: None,
            scope: 0,
        }
    }
}

/// Kind of symbol
#[derive(Debug, Clone)]
pub enum SymbolKind {
    Variable(VariableInfo),
    Function(FunctionInfo),
    Type(TypeInfo),
    /// Value provided by the runtime (`console`).
    Global(&'static RuntimeGlobal),
}

/// Variable information
#[derive(Debug, Clone)]
pub struct VariableInfo {
    pub ty: Type,
    /// `None` for parameters.
    pub declared_with: Option<DeclarationKind>,
}

impl VariableInfo {
    pub fn is_const(&self) -> bool {
        self.declared_with == Some(DeclarationKind::Const)
    }
}

/// Function information
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub sig: FunctionSig,
    pub exported: bool,
    pub is_default: bool,
    /// `false` while only overload signatures have been seen.
    pub has_body: bool,
}

/// Type information
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Builtin(Type),
    Interface(InterfaceInfo),
    Alias(AliasInfo),
}

/// Interface information
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    pub exported: bool,
    /// Member types, resolved during collection.
    pub members: Vec<(String, Type)>,
}

/// Type alias information
#[derive(Debug, Clone)]
pub struct AliasInfo {
    pub exported: bool,
    pub annotation: Spanned<TypeAnnotation>,
    /// Filled in the first time the alias is resolved.
    pub target: Option<Type>,
}
