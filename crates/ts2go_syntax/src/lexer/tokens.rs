//! Token types for the ts2go lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - ID-bearing tokens avoid stringly-typed checks in the parser.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use ts2go_core::lang::keywords::{self, KeywordId};
use ts2go_core::lang::operators::OperatorId;
use ts2go_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    /// Numeric literal, verbatim source text (`42`, `3.14`, `0xff`, `1_000`).
    Number(String),
    /// String literal body, escaped for a double-quoted target literal.
    String(String),
    /// Template literal: alternating static text and pre-lexed interpolations.
    Template(Vec<TemplatePart>),

    // ========== Special ==========
    Eof,
}

/// Part of a template literal.
///
/// A template always starts and ends with a `Literal` part (possibly empty), with one `Expr`
/// between each pair of literals.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    /// An interpolation `${ ... }`, already lexed. `tokens` ends with `Eof` and every span points
    /// into the enclosing source file.
    Expr { tokens: Vec<Token>, span: Span },
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
