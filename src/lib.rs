#![forbid(unsafe_code)]
//! ts2go: a TypeScript-subset to Go source generator
//!
//! The generator takes a small, statically-typed subset of TypeScript (top-level functions, static
//! imports, counted loops, the usual expressions) and emits one Go translation unit. This crate
//! provides the frontend (module loading, type checking), the backend (Go emission) and the CLI.
//!
//! ## Pipeline
//!
//! 1. [`frontend::module::ModuleGraphLoader`] loads the entry file and everything it imports.
//! 2. [`frontend::typechecker::check_graph`] records a type for every node.
//! 3. [`backend::emit_program`] walks the entry module and renders Go text.
//!
//! [`pipeline`] runs all three with one call.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a generator bug (logic error), panic with an `INVARIANT: reason`
//!   message. Popping the emit session's output or source-file stack below its base is one such bug.

pub mod backend;
pub mod cli;
pub mod frontend;
pub mod pipeline;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::typechecker;

pub use backend::{EmitError, EmitOptions, emit_program};
pub use pipeline::{CompileFailure, compile, compile_with};
