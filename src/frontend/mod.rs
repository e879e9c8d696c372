//! ts2go compiler frontend
//!
//! This module contains all frontend components:
//! - `lexer`, `parser`, `ast`, `diagnostics`: the syntax layer, provided by `ts2go_syntax`
//! - `module`: module graph loading for multi-file programs
//! - `types`: the semantic `Type` model and the `TypeSystem` query trait
//! - `symbols`: scope management for the checker
//! - `typechecker`: type checking and per-node type recording

// Syntax components are provided by the shared ts2go_syntax crate.
pub use ts2go_syntax::{ast, diagnostics, lexer, parser};

// Compiler-specific pieces remain local.
pub mod module;
pub mod symbols;
pub mod typechecker;
pub mod types;
