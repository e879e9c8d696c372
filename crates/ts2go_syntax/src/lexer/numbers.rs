//! Number scanning for the ts2go lexer
//!
//! Numeric literals are kept as their verbatim source text; the emitter writes them unchanged.

use super::Lexer;
use super::tokens::TokenKind;

impl<'a> Lexer<'a> {
    /// Scan a numeric literal whose first character (a digit or a leading `.`) is already consumed.
    pub(super) fn scan_number(&mut self, start: usize) {
        let first = self.source[start..].chars().next();

        let radix_prefix = first == Some('0') && matches!(self.peek(), Some('x' | 'X' | 'b' | 'B' | 'o' | 'O'));

        if radix_prefix {
            self.advance();
            self.consume_digits(|c| c.is_ascii_hexdigit());
        } else {
            if first != Some('.') {
                self.consume_digits(|c| c.is_ascii_digit());

                // Fraction: only when a digit follows, so `x.length`-style access on a literal is not eaten.
                if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
            self.consume_digits(|c| c.is_ascii_digit());

            if matches!(self.peek(), Some('e' | 'E')) {
                let signed = matches!(self.peek_next(), Some('+' | '-'));
                self.advance();
                if signed {
                    self.advance();
                }
                if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.error("Exponent requires at least one digit", start);
                    return;
                }
                self.consume_digits(|c| c.is_ascii_digit());
            }
        }

        if self.peek().is_some_and(super::is_ident_start) {
            while self.peek().is_some_and(super::is_ident_continue) {
                self.advance();
            }
            self.error(
                "An identifier or keyword cannot immediately follow a numeric literal",
                start,
            );
            return;
        }

        let text = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Number(text), start);
    }

    fn consume_digits(&mut self, is_digit: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if is_digit(c) || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn number(source: &str) -> String {
        match lex(source).unwrap().remove(0).kind {
            TokenKind::Number(text) => text,
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn test_integer_and_fraction() {
        assert_eq!(number("42"), "42");
        assert_eq!(number("3.14"), "3.14");
        assert_eq!(number(".5"), ".5");
    }

    #[test]
    fn test_exponent_and_separators() {
        assert_eq!(number("1e10"), "1e10");
        assert_eq!(number("2.5E-3"), "2.5E-3");
        assert_eq!(number("1_000_000"), "1_000_000");
    }

    #[test]
    fn test_radix_prefixes() {
        assert_eq!(number("0xff"), "0xff");
        assert_eq!(number("0b1010"), "0b1010");
        assert_eq!(number("0o17"), "0o17");
    }

    #[test]
    fn test_member_access_after_integer_is_not_a_fraction() {
        let kinds: Vec<_> = lex("1.x").unwrap().into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], TokenKind::Number("1".to_string()));
        assert_eq!(kinds[2], TokenKind::Ident("x".to_string()));
    }

    #[test]
    fn test_identifier_after_number_is_an_error() {
        let errors = lex("3px").unwrap_err();
        assert_eq!(
            errors[0].message,
            "An identifier or keyword cannot immediately follow a numeric literal"
        );
    }
}
