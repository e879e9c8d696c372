//! Lexer for the ts2go source language
//!
//! Handles tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (kept as verbatim source text)
//! - String literals and template literals with `${...}` interpolation
//! - Operators and punctuation (longest match first, driven by the `ts2go_core` registries)
//! - `//` and `/* */` comments
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, TemplatePart)
//! - `strings` - String/template scanning
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{TemplatePart, Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use ts2go_core::lang::operators;
use ts2go_core::lang::punctuation;

/// Lexer for ts2go source code.
///
/// Converts source text into a stream of tokens. Whitespace (including newlines) and comments
/// are skipped; statement separation is left to the parser.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// Byte offset of `source` within the enclosing file (non-zero for template interpolations).
    base: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self::with_offset(source, 0)
    }

    /// Create a lexer for a fragment that starts at byte `base` of the enclosing file.
    ///
    /// All spans produced are relative to the enclosing file.
    pub fn with_offset(source: &'a str, base: usize) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            base,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        let end = self.current_pos;
        self.tokens.push(Token::new(TokenKind::Eof, self.span(end)));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Span from local offset `start` to the current position, in file coordinates.
    fn span(&self, start: usize) -> Span {
        Span::new(self.base + start, self.base + self.current_pos)
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let span = self.span(start);
        self.tokens.push(Token::new(kind, span));
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        let span = self.span(start);
        self.errors.push(CompileError::syntax(message.into(), span));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' | '\n' => {}

            // Comments
            '/' if self.peek() == Some('/') => {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            }
            '/' if self.peek() == Some('*') => self.scan_block_comment(start),

            // Strings
            '"' | '\'' => self.scan_string(start, c),
            '`' => self.scan_template(start),

            // Numbers
            '0'..='9' => self.scan_number(start),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.scan_number(start),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            // Operators and punctuation
            _ => self.scan_symbol(start),
        }
    }

    fn scan_block_comment(&mut self, start: usize) {
        self.advance(); // '*'
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => {}
                None => {
                    self.error("Unterminated block comment", start);
                    return;
                }
            }
        }
    }

    /// Scan an operator or punctuation token, longest spelling first.
    ///
    /// `start` is the offset of the first (already consumed) character.
    fn scan_symbol(&mut self, start: usize) {
        let source = self.source;
        let rest = &source[start..];

        let op = operators::BY_LENGTH
            .iter()
            .copied()
            .map(|id| (operators::as_str(id), TokenKind::Operator(id)));
        let punct = punctuation::PUNCTUATION
            .iter()
            .map(|p| (p.canonical, TokenKind::Punctuation(p.id)));

        let best = op
            .chain(punct)
            .filter(|(spelling, _)| rest.starts_with(spelling))
            .max_by_key(|(spelling, _)| spelling.len());

        match best {
            Some((spelling, kind)) => {
                // The first character is already consumed.
                for _ in 1..spelling.chars().count() {
                    self.advance();
                }
                self.add_token(kind, start);
            }
            None => {
                let ch = rest.chars().next().unwrap_or_default();
                self.error(format!("Unexpected character '{}'", ch), start);
            }
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}
