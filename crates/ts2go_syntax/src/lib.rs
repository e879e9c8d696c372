//! Syntax frontend for the ts2go source language: lexer, parser, AST, diagnostics.
//!
//! The supported language is a small, statically-typed subset of TypeScript: top-level functions,
//! static imports, interfaces and type aliases, block statements, counted loops, and the usual
//! expression forms.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not resolve modules or check types.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `ts2go_core::lang` registries.
//! - The AST is a closed set of variants. It deliberately includes constructs the Go emitter does
//!   not handle (`if`, `while`, interfaces, ...) so those reach the emitter and fail with a
//!   positioned error instead of being rejected anonymously here.
//!
//! ## Examples
//! ```rust
//! use ts2go_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("function main(): void {}\n").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.statements.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
