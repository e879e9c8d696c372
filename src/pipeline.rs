//! Load → check → emit, as one call.
//!
//! The stages stay independent (see [`crate::frontend`] and [`crate::backend`]); this module only
//! sequences them and keeps the [`ModuleGraph`] alive in failures so the caller can render
//! positioned errors against the right source text.

use std::path::Path;

use thiserror::Error;

use crate::backend::{EmitError, EmitOptions, emit_program};
use crate::frontend::module::{FsSources, LoadError, ModuleGraph, ModuleGraphLoader, SourceProvider};
use crate::frontend::typechecker::{CheckError, TypeCheckInfo, check_graph};

/// A loaded graph that passed type checking.
#[derive(Debug)]
pub struct CheckedProgram {
    pub graph: ModuleGraph,
    pub info: TypeCheckInfo,
}

/// Type errors, with the graph their spans point into.
#[derive(Debug, Error)]
#[error("{} type error(s) in '{}'", .errors.len(), .graph.entry().display_name())]
pub struct CheckFailure {
    pub graph: ModuleGraph,
    pub errors: Vec<CheckError>,
}

/// An emit error, with the graph its location points into.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct EmitFailure {
    pub graph: ModuleGraph,
    #[source]
    pub error: EmitError,
}

/// Why a compilation run failed.
#[derive(Debug, Error)]
pub enum CompileFailure {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Check(#[from] CheckFailure),
    #[error(transparent)]
    Emit(#[from] EmitFailure),
}

/// Load and check `entry` and everything it imports.
pub fn check_with<P: SourceProvider>(provider: P, entry: &Path) -> Result<CheckedProgram, CompileFailure> {
    let graph = ModuleGraphLoader::new(provider).load(entry)?;
    match check_graph(&graph) {
        Ok(info) => Ok(CheckedProgram { graph, info }),
        Err(errors) => Err(CheckFailure { graph, errors }.into()),
    }
}

/// Compile `entry` to one Go translation unit, reading sources from `provider`.
///
/// ## Examples
/// ```rust
/// use std::path::Path;
/// use ts2go::backend::EmitOptions;
/// use ts2go::frontend::module::MemorySources;
/// use ts2go::pipeline::compile_with;
///
/// let sources = MemorySources::new().with_file("main.ts", "function main(): void {\n  let n = 1;\n}\n");
/// let options = EmitOptions::default().with_runtime_imports(Vec::<String>::new());
/// let go = compile_with(sources, Path::new("main.ts"), &options).unwrap();
/// assert_eq!(go, "package main\n\nfunc main() {\n\tn := int(1)\n}\n");
/// ```
pub fn compile_with<P: SourceProvider>(
    provider: P,
    entry: &Path,
    options: &EmitOptions,
) -> Result<String, CompileFailure> {
    let CheckedProgram { graph, info } = check_with(provider, entry)?;
    let result = emit_program(&graph, &info, options);
    match result {
        Ok(text) => Ok(text),
        Err(error) => Err(EmitFailure { graph, error }.into()),
    }
}

/// Compile `entry` from the file system.
pub fn compile(entry: &Path, options: &EmitOptions) -> Result<String, CompileFailure> {
    compile_with(FsSources, entry, options)
}
