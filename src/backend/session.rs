//! Shared mutable context for one emission run.
//!
//! An [`EmitSession`] owns two floor-guarded stacks: output buffers (all writes go to the top one)
//! and source files (the top one is the file whose AST is being walked). Both are pushed and popped
//! in strict LIFO order by the emitter code that introduced the nesting. Type queries go through a
//! [`TypeNameResolver`] bound to the checked graph.

use std::collections::BTreeSet;

use crate::frontend::ast::Span;
use crate::frontend::diagnostics::line_col;
use crate::frontend::module::{FileId, ModuleGraph, SourceUnit};
use crate::frontend::types::{Type, TypeSystem};

use super::emit::{EmitError, SourceLocation};
use super::options::EmitOptions;
use super::stack::Stack;
use super::text::TextAccumulator;
use super::type_names::TypeNameResolver;

pub struct EmitSession<'a> {
    graph: &'a ModuleGraph,
    options: &'a EmitOptions,
    types: TypeNameResolver<'a>,
    outputs: Stack<TextAccumulator>,
    source_files: Stack<FileId>,
    /// Runtime import paths referenced by emitted code.
    used_imports: BTreeSet<String>,
}

impl<'a> EmitSession<'a> {
    /// Start a session on the graph's entry file with an empty root buffer.
    pub fn new(graph: &'a ModuleGraph, types: &'a dyn TypeSystem, options: &'a EmitOptions) -> Self {
        Self {
            graph,
            options,
            types: TypeNameResolver::new(types),
            outputs: Stack::new("output", TextAccumulator::with_indent_unit(options.indent_unit.clone())),
            source_files: Stack::new("source file", graph.entry_id()),
            used_imports: BTreeSet::new(),
        }
    }

    pub fn graph(&self) -> &'a ModuleGraph {
        self.graph
    }

    pub fn options(&self) -> &'a EmitOptions {
        self.options
    }

    // ========================================================================
    // Output buffers
    // ========================================================================

    /// The buffer all writes currently go to.
    pub fn output(&mut self) -> &mut TextAccumulator {
        self.outputs.top_mut()
    }

    /// Redirect writes to `buffer` until the matching [`pop_output`](Self::pop_output).
    pub fn push_output(&mut self, buffer: TextAccumulator) {
        self.outputs.push(buffer);
    }

    /// ## Panics
    /// - If only the root buffer is left.
    pub fn pop_output(&mut self) -> TextAccumulator {
        self.outputs.pop()
    }

    // ========================================================================
    // Source files
    // ========================================================================

    pub fn source_file(&self) -> FileId {
        *self.source_files.top()
    }

    pub fn source_unit(&self) -> &'a SourceUnit {
        self.graph.unit(self.source_file())
    }

    pub fn push_source_file(&mut self, file: FileId) {
        self.source_files.push(file);
    }

    /// ## Panics
    /// - If only the entry file is left.
    pub fn pop_source_file(&mut self) -> FileId {
        self.source_files.pop()
    }

    /// `true` if `file` is being emitted somewhere up the import chain.
    pub fn is_emitting(&self, file: FileId) -> bool {
        self.source_files.contains(&file)
    }

    /// Position of `span` in the current source file.
    pub fn location(&self, span: Span) -> SourceLocation {
        let unit = self.source_unit();
        let (line, column) = line_col(&unit.source, span.start);
        SourceLocation {
            path: unit.path.clone(),
            line,
            column,
            span,
        }
    }

    // ========================================================================
    // Type queries
    // ========================================================================

    pub fn type_at(&self, span: Span) -> Option<&'a Type> {
        self.types.type_at(self.source_file(), span)
    }

    pub fn is_array(&self, span: Span) -> bool {
        self.types.is_array_at(self.source_file(), span)
    }

    pub fn is_number(&self, span: Span) -> bool {
        self.types.is_number_at(self.source_file(), span)
    }

    /// Target type name of the node at `span`.
    ///
    /// ## Errors
    /// - [`EmitError::Precondition`] when the type is missing or cannot be expressed.
    pub fn type_name(&self, span: Span, what: &str) -> Result<String, EmitError> {
        self.types
            .resolve_at(self.source_file(), span)
            .map_err(|err| EmitError::Precondition {
                location: self.location(span),
                message: format!("Cannot emit the type of {}: {}.", what, err),
            })
    }

    /// Target type name, or `None` when it cannot be resolved.
    pub fn try_type_name(&self, span: Span) -> Option<String> {
        self.types.resolve_at(self.source_file(), span).ok()
    }

    // ========================================================================
    // Imports
    // ========================================================================

    /// Record that emitted code references `path`.
    pub fn require_import(&mut self, path: &str) {
        self.used_imports.insert(path.to_string());
    }

    /// Preamble imports to write: the configured ones, optionally pruned to those referenced.
    pub fn preamble_imports(&self) -> Vec<&'a str> {
        let options = self.options;
        options
            .runtime_imports
            .iter()
            .filter(|path| !options.prune_unused_imports || self.used_imports.contains(path.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Consume the session and return the root buffer.
    ///
    /// ## Panics
    /// - If either stack is unbalanced.
    pub fn finish(self) -> TextAccumulator {
        self.source_files.into_base();
        self.outputs.into_base()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::frontend::module::{MemorySources, ModuleGraphLoader};
    use crate::frontend::typechecker::{TypeCheckInfo, check_graph};

    fn fixture() -> (ModuleGraph, TypeCheckInfo) {
        let sources = MemorySources::new()
            .with_file("main.ts", "import { f } from \"./lib\";\nconst xs = [1];\nlet n = 1;\n")
            .with_file("lib.ts", "export function f(): void {}\n");
        let graph = ModuleGraphLoader::new(sources).load(Path::new("main.ts")).unwrap();
        let info = check_graph(&graph).unwrap();
        (graph, info)
    }

    fn span_of(source: &str, needle: &str) -> Span {
        let start = source.find(needle).unwrap();
        Span::new(start, start + needle.len())
    }

    #[test]
    fn test_output_redirection() {
        let (graph, info) = fixture();
        let options = EmitOptions::default();
        let mut session = EmitSession::new(&graph, &info, &options);

        session.output().append_line("root");
        session.push_output(TextAccumulator::new());
        session.output().append("nested");
        let nested = session.pop_output();
        assert_eq!(nested.to_string(), "nested");
        assert_eq!(session.finish().to_string(), "root\n");
    }

    #[test]
    fn test_source_file_stack() {
        let (graph, info) = fixture();
        let options = EmitOptions::default();
        let mut session = EmitSession::new(&graph, &info, &options);
        let lib = graph.units().nth(1).unwrap().id;

        assert_eq!(session.source_file(), graph.entry_id());
        session.push_source_file(lib);
        assert_eq!(session.source_file(), lib);
        assert!(session.is_emitting(graph.entry_id()));
        assert_eq!(session.pop_source_file(), lib);
        assert_eq!(session.source_file(), graph.entry_id());
        assert!(!session.is_emitting(lib));
    }

    #[test]
    #[should_panic(expected = "INVARIANT: output stack popped below its base")]
    fn test_pop_root_output_panics() {
        let (graph, info) = fixture();
        let options = EmitOptions::default();
        let mut session = EmitSession::new(&graph, &info, &options);
        session.pop_output();
    }

    #[test]
    #[should_panic(expected = "INVARIANT: source file stack popped below its base")]
    fn test_pop_entry_file_panics() {
        let (graph, info) = fixture();
        let options = EmitOptions::default();
        let mut session = EmitSession::new(&graph, &info, &options);
        session.pop_source_file();
    }

    #[test]
    #[should_panic(expected = "unbalanced")]
    fn test_finish_requires_balanced_stacks() {
        let (graph, info) = fixture();
        let options = EmitOptions::default();
        let mut session = EmitSession::new(&graph, &info, &options);
        session.push_output(TextAccumulator::new());
        session.finish();
    }

    #[test]
    fn test_type_queries() {
        let (graph, info) = fixture();
        let options = EmitOptions::default();
        let session = EmitSession::new(&graph, &info, &options);
        let source = &graph.entry().source;

        let array = span_of(source, "[1]");
        assert!(session.is_array(array));
        assert_eq!(session.type_name(array, "an array").unwrap(), "[]int");

        let number = span_of(source, "n = 1");
        assert!(session.is_number(number));
        assert_eq!(session.try_type_name(number).as_deref(), Some("int"));

        let nothing = Span::new(0, 1);
        let err = session.type_name(nothing, "a test node").unwrap_err();
        assert!(matches!(err, EmitError::Precondition { .. }));
        assert_eq!(err.location().line, 1);
    }

    #[test]
    fn test_location_is_one_based() {
        let (graph, info) = fixture();
        let options = EmitOptions::default();
        let session = EmitSession::new(&graph, &info, &options);
        let source = &graph.entry().source;
        let location = session.location(span_of(source, "let n"));
        assert_eq!((location.line, location.column), (3, 1));
        assert!(location.path.ends_with("main.ts"));
    }

    #[test]
    fn test_preamble_imports_pruning() {
        let (graph, info) = fixture();
        let options = EmitOptions::default().with_prune_unused_imports(true);
        let mut session = EmitSession::new(&graph, &info, &options);
        assert!(session.preamble_imports().is_empty());
        session.require_import("fmt");
        assert_eq!(session.preamble_imports(), vec!["fmt"]);

        let options = EmitOptions::default();
        let session = EmitSession::new(&graph, &info, &options);
        assert_eq!(session.preamble_imports(), vec!["fmt", "ts2go/console"]);
    }
}
