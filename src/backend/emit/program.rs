//! Translation-unit emission: preamble, entry module, import block.

use crate::backend::options::EmitOptions;
use crate::backend::session::EmitSession;
use crate::frontend::module::ModuleGraph;
use crate::frontend::types::TypeSystem;

use super::{EmitError, NodeEmitter};

/// Emit one complete translation unit for `graph`.
///
/// The output starts with `package <name>`, a blank line and the import block, followed by the
/// entry module's top-level declarations with imported modules inlined in depth-first order.
///
/// ## Errors
/// - The first [`EmitError`] hit; no partial output is returned.
///
/// ## Examples
/// ```rust
/// use std::path::Path;
/// use ts2go::backend::{EmitOptions, emit_program};
/// use ts2go::frontend::module::{MemorySources, ModuleGraphLoader};
/// use ts2go::frontend::typechecker::check_graph;
///
/// let sources = MemorySources::new().with_file("main.ts", "function main(): void {}");
/// let graph = ModuleGraphLoader::new(sources).load(Path::new("main.ts")).unwrap();
/// let info = check_graph(&graph).unwrap();
/// let options = EmitOptions::default().with_runtime_imports(Vec::<String>::new());
/// let go = emit_program(&graph, &info, &options).unwrap();
/// assert_eq!(go, "package main\n\nfunc main() {\n}\n");
/// ```
#[tracing::instrument(skip_all, fields(entry = %graph.entry().display_name(), units = graph.len()))]
pub fn emit_program(graph: &ModuleGraph, types: &dyn TypeSystem, options: &EmitOptions) -> Result<String, EmitError> {
    let mut emitter = NodeEmitter::new(EmitSession::new(graph, types, options));

    emitter.out().append_line(&format!("package {}", options.package_name));
    emitter.out().new_line();
    let import_slot = emitter.out().insert_placeholder();

    for stmt in &graph.entry().program.statements {
        emitter.emit_top_level_statement(stmt)?;
    }
    // Drop the blank trailer after the last declaration.
    emitter.out().remove_line();

    let mut session = emitter.into_session();
    let imports = session.preamble_imports();
    let buffer = session.output().take_placeholder(import_slot);
    session.push_output(buffer);
    if !imports.is_empty() {
        session.output().append_line("import (");
        session.output().indent();
        for path in imports {
            session.output().append_line(&format!("\"{}\"", path));
        }
        session.output().unindent();
        session.output().append_line(")");
        session.output().new_line();
    }
    let buffer = session.pop_output();
    session.output().fill(import_slot, buffer);

    let text = session.finish().to_string();
    tracing::debug!(bytes = text.len(), "emitted translation unit");
    Ok(text)
}
