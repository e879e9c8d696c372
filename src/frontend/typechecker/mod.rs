//! Type checker for the ts2go source language.
//!
//! Assigns a [`Type`] to every expression, variable declarator, parameter and top-level type
//! annotation of a [`ModuleGraph`], and reports the errors a reader would expect from the source
//! language's own checker for the supported subset.
//!
//! ## Notes
//!
//! - **Two-pass model**: the first pass ([`collect`]) registers every function signature, interface
//!   and type alias of every unit in the global scope. The second pass checks bodies file by file.
//! - **Output**: types are recorded in a [`TypeCheckInfo`] keyed by `(FileId, Span)`. It implements
//!   [`TypeSystem`], which is all the backend sees.
//! - **Error accumulation**: errors are collected (not fatal) so one run reports as many as possible.
//! - **Literal types**: `const` bindings keep literal types (`"abc"`, `42`); `let`/`var` widen them.
//!
//! ## What is validated
//!
//! - Every referenced name and type is known
//! - Property accesses exist on the receiver type
//! - Only callable values are called
//! - Assignments target a variable or property, and never a `const`
//! - Named and default imports exist in the imported module; namespace imports are rejected
//! - A file implements each function at most once
//!
//! Assignability between declared and actual types is not checked.
//!
//! ## Examples
//!
//! ```rust
//! use std::path::Path;
//! use ts2go::frontend::module::{MemorySources, ModuleGraphLoader};
//! use ts2go::frontend::typechecker::check_graph;
//! use ts2go::frontend::types::TypeSystem;
//!
//! let sources = MemorySources::new().with_file("main.ts", "const x = [1, 2];");
//! let graph = ModuleGraphLoader::new(sources).load(Path::new("main.ts")).unwrap();
//! let info = check_graph(&graph).unwrap();
//! assert!(info.len() > 0);
//! ```

mod check_decl;
mod check_expr;
mod check_stmt;
mod collect;


use std::collections::{HashMap, HashSet};

use crate::frontend::ast::*;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::module::{FileId, ModuleGraph};
use crate::frontend::symbols::*;
use crate::frontend::types::{Type, TypeSystem};

/// Types recorded by the checker, for reuse by the backend.
///
/// ## Notes
/// - Keys are `(file, span)` so the backend can look types up without holding AST node identities.
/// - Recorded nodes: expressions, variable declarators, parameters, and the outermost span of each
///   type annotation.
#[derive(Debug, Default, Clone)]
pub struct TypeCheckInfo {
    types: HashMap<(FileId, Span), Type>,
}

impl TypeCheckInfo {
    pub fn record(&mut self, file: FileId, span: Span, ty: Type) {
        self.types.insert((file, span), ty);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeSystem for TypeCheckInfo {
    fn type_at(&self, file: FileId, span: Span) -> Option<&Type> {
        self.types.get(&(file, span))
    }
}

/// A checker error together with the file it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckError {
    pub file: FileId,
    pub error: CompileError,
}

/// Check every unit of `graph`.
///
/// ## Returns
/// - `Ok(TypeCheckInfo)` when no errors were found.
/// - `Err(Vec<CheckError>)` with every accumulated error, in discovery order of the files.
#[tracing::instrument(skip_all, fields(units = graph.len()))]
pub fn check_graph(graph: &ModuleGraph) -> Result<TypeCheckInfo, Vec<CheckError>> {
    let mut checker = TypeChecker::new(graph);
    checker.collect();
    for unit in graph.units() {
        checker.check_unit(unit.id);
    }

    if checker.errors.is_empty() {
        tracing::debug!(recorded = checker.info.len(), "type check passed");
        Ok(checker.info)
    } else {
        Err(checker.errors)
    }
}

/// Type checker state.
///
/// Holds the symbol table, accumulated errors, and the file currently being checked.
pub(crate) struct TypeChecker<'g> {
    pub(crate) graph: &'g ModuleGraph,
    pub(crate) symbols: SymbolTable,
    pub(crate) errors: Vec<CheckError>,
    pub(crate) info: TypeCheckInfo,
    /// File whose nodes are being checked; recorded types and errors are attributed to it.
    pub(crate) current_file: FileId,
    /// Aliases currently being resolved, for cycle detection.
    pub(crate) resolving_aliases: HashSet<String>,
}

impl<'g> TypeChecker<'g> {
    pub(crate) fn new(graph: &'g ModuleGraph) -> Self {
        Self {
            graph,
            symbols: SymbolTable::new(),
            errors: Vec::new(),
            info: TypeCheckInfo::default(),
            current_file: graph.entry_id(),
            resolving_aliases: HashSet::new(),
        }
    }

    pub(crate) fn error(&mut self, error: CompileError) {
        self.errors.push(CheckError {
            file: self.current_file,
            error,
        });
    }

    pub(crate) fn record(&mut self, span: Span, ty: Type) {
        self.info.record(self.current_file, span, ty);
    }

    /// Type already recorded for `span` in the current file.
    pub(crate) fn recorded(&self, span: Span) -> Option<Type> {
        self.info.type_at(self.current_file, span).cloned()
    }

    /// Run `f` with `file` as the current file, restoring the previous one afterwards.
    pub(crate) fn in_file<R>(&mut self, file: FileId, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.current_file, file);
        let result = f(self);
        self.current_file = saved;
        result
    }

    /// Look up a symbol by name and clone its kind.
    pub(crate) fn lookup_kind(&self, name: &str) -> Option<SymbolKind> {
        let id = self.symbols.lookup(name)?;
        self.symbols.get(id).map(|sym| sym.kind.clone())
    }

    /// Check every top-level statement of one unit inside a fresh module scope.
    fn check_unit(&mut self, file: FileId) {
        let graph = self.graph;
        let unit = graph.unit(file);
        self.in_file(file, |this| {
            this.symbols.enter_scope(ScopeKind::Module);
            for stmt in &unit.program.statements {
                this.check_top_level(stmt);
            }
            this.symbols.exit_scope();
        });
    }
}
