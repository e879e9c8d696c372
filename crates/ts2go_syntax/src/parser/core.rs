// Parser core types and entrypoint.
//
// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
//
// ## Notes
// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
//   single module while avoiding a single “god file”.

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at statement
///   boundaries, so one run can report several independent problems.
/// - Semicolons are optional statement terminators; newlines are not tokens.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `ts2go_syntax::lexer` (must end with `Eof`).
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// ## Errors
    /// Returns a list of [`CompileError`]s if parsing fails. The parser attempts
    /// to recover and continue after an error to report multiple issues in one pass.
    pub fn parse(mut self) -> Result<Program, Vec<CompileError>> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok(Program { statements })
        } else {
            Err(self.errors)
        }
    }

    /// Parse a standalone expression that must consume the whole token stream.
    ///
    /// Used for template literal interpolations, which the lexer hands over pre-lexed.
    fn parse_fragment(mut self) -> Result<Spanned<Expr>, CompileError> {
        let expr = self.expression()?;
        if !self.is_at_end() {
            return Err(CompileError::syntax(
                format!("Expected '}}' after template expression, found {}", self.peek().kind.describe()),
                self.current_span(),
            ));
        }
        Ok(expr)
    }
}
