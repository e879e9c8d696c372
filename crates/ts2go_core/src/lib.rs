//! Provide the canonical vocabulary shared by the ts2go frontend and backend.
//!
//! This crate is intentionally small and dependency-free. It contains:
//! - the source-language vocabulary (keywords, operators, punctuation, builtin type names), and
//! - the target-language spellings the emitter writes (type names, builtins, preamble defaults).
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no global state, and no AST types.
//! - Callers work with stable IDs (e.g. `KeywordId`, `OperatorId`) and look spellings up through the
//!   registries instead of scattering string literals across the compiler.

pub mod lang;
pub mod strings;
