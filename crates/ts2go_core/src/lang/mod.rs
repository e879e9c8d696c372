//! Language vocabulary registries.
//!
//! This module is the "front door" for vocabulary: reserved keywords, operators, punctuation,
//! builtin source types, and the target-language spellings used by the emitter.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries only provide spellings and metadata.
//!
//! ## Examples
//! ```rust
//! use ts2go_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("function"), Some(KeywordId::Function));
//! assert_eq!(keywords::as_str(KeywordId::Function), "function");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod target;
pub mod types;
