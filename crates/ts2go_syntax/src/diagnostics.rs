//! Diagnostics for the syntax frontend and the type checker.
//!
//! [`CompileError`] is the single error shape produced by lexing, parsing and type checking.
//! It is a plain data record; rendering with source context is the CLI's job (see
//! [`CompileError::to_diagnostic`] for the `miette` adapter).

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// A compile-time error with location information
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Error,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Syntax,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn type_error(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Type,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Attach source text and produce a renderable `miette` diagnostic.
    pub fn to_diagnostic(&self, file_name: &str, source: &str) -> SourceDiagnostic {
        let mut help = self.notes.clone();
        help.extend(self.hints.iter().cloned());
        SourceDiagnostic {
            message: format!("{}: {}", self.kind, self.message),
            src: NamedSource::new(file_name, source.to_string()),
            span: source_span(self.span, source),
            help: (!help.is_empty()).then(|| help.join("\n")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Error,
    Syntax,
    Type,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Error => write!(f, "error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Type => write!(f, "type error"),
        }
    }
}

/// A positioned error with its source attached, ready for `miette::Report`.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SourceDiagnostic {
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
    #[help]
    pub help: Option<String>,
}

impl SourceDiagnostic {
    /// Build a diagnostic from a message and a byte span into `source`.
    pub fn new(message: impl Into<String>, file_name: &str, source: &str, span: Span) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(file_name, source.to_string()),
            span: source_span(span, source),
            help: None,
        }
    }
}

/// Clamp a byte span into `source` and convert it to a `miette` span (at least one byte wide when possible).
fn source_span(span: Span, source: &str) -> SourceSpan {
    let start = span.start.min(source.len());
    let end = span.end.clamp(start, source.len());
    let len = if end > start { end - start } else { usize::from(start < source.len()) };
    SourceSpan::new(start.into(), len)
}

/// Return the 1-based line and column of a byte offset.
///
/// Columns count characters, not bytes. Offsets past the end clamp to the end of `source`.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            line_start = i + 1;
        }
    }

    let column = source[line_start..offset].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_first_line() {
        assert_eq!(line_col("abc", 0), (1, 1));
        assert_eq!(line_col("abc", 2), (1, 3));
    }

    #[test]
    fn test_line_col_after_newlines() {
        let source = "a\nbc\n  d";
        assert_eq!(line_col(source, 2), (2, 1));
        assert_eq!(line_col(source, 7), (3, 3));
    }

    #[test]
    fn test_line_col_clamps() {
        assert_eq!(line_col("ab", 99), (1, 3));
    }

    #[test]
    fn test_to_diagnostic_joins_notes_and_hints() {
        let err = CompileError::type_error("Cannot find name 'x'.".to_string(), Span::new(0, 1))
            .with_note("declared later")
            .with_hint("declare it first");
        let diag = err.to_diagnostic("main.ts", "x");
        assert_eq!(diag.message, "type error: Cannot find name 'x'.");
        assert_eq!(diag.help.as_deref(), Some("declared later\ndeclare it first"));
        assert_eq!(diag.span.len(), 1);
    }
}
