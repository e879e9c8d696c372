//! ts2go backend
//!
//! Turns a checked [`ModuleGraph`](crate::frontend::module::ModuleGraph) into one Go translation
//! unit. The backend only reads the AST and the types recorded by the checker (through
//! [`TypeSystem`](crate::frontend::types::TypeSystem)); it never re-checks anything.
//!
//! ## Module Organization
//!
//! - `text` - line-oriented output buffer with indentation and fill-later placeholders
//! - `type_names` - source types to target type spellings
//! - `stack` - floor-guarded LIFO used for output buffers and source files
//! - `session` - per-run state shared by every emit rule
//! - `options` - emission settings (package name, runtime imports, indentation)
//! - `emit/` - the node emitter: program, declarations, statements, expressions

#![deny(clippy::unwrap_used)]

pub mod emit;
pub mod options;
pub mod session;
pub mod stack;
pub mod text;
pub mod type_names;

pub use emit::{Dispatcher, EmitError, NodeEmitter, SourceLocation, emit_program};
pub use options::EmitOptions;
pub use session::EmitSession;
pub use text::{PlaceholderId, TextAccumulator};
pub use type_names::{TypeExpr, TypeNameError, TypeNameResolver, normalize_type_text};
