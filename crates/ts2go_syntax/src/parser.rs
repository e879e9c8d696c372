//! Parser for the ts2go source language
//!
//! Converts a token stream into an AST [`Program`].
//!
//! ## Examples
//!
//! ```rust
//! use ts2go_syntax::{lexer, parser};
//!
//! let source = "function sayHello(name: string): string { return \"Hello \" + name }\n";
//! let tokens = lexer::lex(source).unwrap();
//! let ast = parser::parse(&tokens).unwrap();
//! assert_eq!(ast.statements.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{TemplatePart, Token, TokenKind};
use ts2go_core::lang::keywords::KeywordId;
use ts2go_core::lang::operators::{self, OperatorId};
use ts2go_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
