//! String scanning for the ts2go lexer
//!
//! Handles quoted strings and template literals.
//!
//! ## Notes
//! - Literal bodies are **not** cooked. They are normalized so they can be placed verbatim between
//!   double quotes in the target language: `\'` becomes `'`, a bare `"` becomes `\"`, a raw newline
//!   inside a template becomes `\n`, and a line continuation is dropped.
//! - Escapes the target has no spelling for are rewritten: `\0` to `\x00`, `\u{X}` and surrogate
//!   pairs to `\uXXXX` or `\UXXXXXXXX`, `\x` above ASCII to `\u00XX`. Identity escapes (`\d`) become
//!   the bare character. Escapes the target shares (`\n`, `\t`, `\\`, ...) are kept as written.

use super::Lexer;
use super::tokens::{TemplatePart, TokenKind};
use crate::ast::Span;

impl<'a> Lexer<'a> {
    /// Push the normalized form of an escape sequence (called after consuming the backslash).
    ///
    /// Malformed escapes are recorded as errors and scanning continues. Returns `false` at end of
    /// input.
    fn push_escape(&mut self, body: &mut String) -> bool {
        let escape_start = self.current_pos - 1;
        match self.advance() {
            // Line continuation.
            Some('\n' | '\u{2028}' | '\u{2029}') => {}
            Some('\r') => {
                self.match_char('\n');
            }
            Some(c @ ('\'' | '`' | '$')) => body.push(c),
            Some(c @ ('\\' | '"' | 'n' | 'r' | 't' | 'b' | 'f' | 'v')) => {
                body.push('\\');
                body.push(c);
            }
            Some('0') if !self.peek().is_some_and(|c| c.is_ascii_digit()) => body.push_str("\\x00"),
            Some('0'..='9') => self.error("Octal escape sequences are not allowed", escape_start),
            Some('x') => match self.scan_hex_digits(2) {
                Some(value) if value < 0x80 => body.push_str(&format!("\\x{:02x}", value)),
                Some(value) => body.push_str(&format!("\\u{:04x}", value)),
                None => self.error("Invalid hexadecimal escape sequence", escape_start),
            },
            Some('u') => match self.scan_unicode_escape() {
                Some(c) => push_code_point(body, c),
                None => self.error("Invalid Unicode escape sequence", escape_start),
            },
            Some(c) => body.push(c),
            None => return false,
        }
        true
    }

    /// Consume exactly `count` hex digits.
    fn scan_hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..count {
            let digit = self.peek().and_then(|c| c.to_digit(16))?;
            self.advance();
            value = value * 16 + digit;
        }
        Some(value)
    }

    /// Scan the rest of a `\u` escape: `{X...}` or four hex digits, joining a following low surrogate.
    fn scan_unicode_escape(&mut self) -> Option<char> {
        if self.match_char('{') {
            let mut value = 0u32;
            let mut digits = 0usize;
            loop {
                match self.peek() {
                    Some('}') if digits > 0 => {
                        self.advance();
                        break;
                    }
                    Some(c) if c.is_ascii_hexdigit() => {
                        self.advance();
                        value = value.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
                        digits += 1;
                    }
                    _ => return None,
                }
            }
            return char::from_u32(value);
        }

        let unit = self.scan_hex_digits(4)?;
        if (0xD800..0xDC00).contains(&unit) {
            if let Some(low) = self.low_surrogate_ahead() {
                for _ in 0..6 {
                    self.advance();
                }
                return char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00));
            }
        }
        char::from_u32(unit)
    }

    /// The code unit of a `\uDC00`..`\uDFFF` escape starting at the current position, if any.
    fn low_surrogate_ahead(&self) -> Option<u32> {
        let hex = self.source[self.current_pos..].strip_prefix("\\u")?.get(..4)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let unit = u32::from_str_radix(hex, 16).ok()?;
        (0xDC00..0xE000).contains(&unit).then_some(unit)
    }

    // ========================================================================
    // String scanning
    // ========================================================================

    pub(super) fn scan_string(&mut self, start: usize, quote: char) {
        let mut body = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => break,
                Some('\\') => {
                    if !self.push_escape(&mut body) {
                        self.error("Unterminated string literal", start);
                        return;
                    }
                }
                Some('"') => body.push_str("\\\""),
                Some('\n') | None => {
                    self.error("Unterminated string literal", start);
                    return;
                }
                Some(c) => body.push(c),
            }
        }

        self.add_token(TokenKind::String(body), start);
    }

    // ========================================================================
    // Template scanning
    // ========================================================================

    pub(super) fn scan_template(&mut self, start: usize) {
        let mut parts = Vec::new();
        let mut text = String::new();

        loop {
            match self.advance() {
                Some('`') => break,
                Some('\\') => {
                    if !self.push_escape(&mut text) {
                        self.error("Unterminated template literal", start);
                        return;
                    }
                }
                Some('$') if self.peek() == Some('{') => {
                    self.advance();
                    parts.push(TemplatePart::Literal(std::mem::take(&mut text)));
                    match self.scan_interpolation(start) {
                        Some(part) => parts.push(part),
                        None => return,
                    }
                }
                Some('"') => text.push_str("\\\""),
                Some('\n') => text.push_str("\\n"),
                Some(c) => text.push(c),
                None => {
                    self.error("Unterminated template literal", start);
                    return;
                }
            }
        }

        parts.push(TemplatePart::Literal(text));
        self.add_token(TokenKind::Template(parts), start);
    }

    /// Scan the body of `${ ... }` (after the `${`) and lex it in place.
    ///
    /// Returns `None` if the interpolation is unterminated (the error is already recorded).
    fn scan_interpolation(&mut self, template_start: usize) -> Option<TemplatePart> {
        let expr_start = self.current_pos;
        let mut depth = 0usize;

        loop {
            match self.peek() {
                None => {
                    self.error("Unterminated template literal", template_start);
                    return None;
                }
                Some('}') if depth == 0 => break,
                Some('}') => depth -= 1,
                Some('{') => depth += 1,
                Some(q @ ('"' | '\'' | '`')) => {
                    self.advance();
                    self.skip_quoted(q);
                    continue;
                }
                Some(_) => {}
            }
            self.advance();
        }

        let expr_end = self.current_pos;
        self.advance(); // '}'

        let source = self.source;
        let fragment = &source[expr_start..expr_end];
        let span = Span::new(self.base + expr_start, self.base + expr_end);

        match Lexer::with_offset(fragment, self.base + expr_start).tokenize() {
            Ok(tokens) => Some(TemplatePart::Expr { tokens, span }),
            Err(errors) => {
                self.errors.extend(errors);
                // Keep scanning the rest of the template so later errors are still reported.
                Some(TemplatePart::Expr { tokens: Vec::new(), span })
            }
        }
    }

    /// Skip to just past the closing `quote` (the opening one is already consumed).
    fn skip_quoted(&mut self, quote: char) {
        while let Some(c) = self.advance() {
            if c == '\\' {
                self.advance();
            } else if c == quote {
                return;
            }
        }
    }
}

/// `\uXXXX` for the basic plane, `\UXXXXXXXX` above it.
fn push_code_point(body: &mut String, c: char) {
    let value = u32::from(c);
    if value <= 0xFFFF {
        body.push_str(&format!("\\u{:04x}", value));
    } else {
        body.push_str(&format!("\\U{:08x}", value));
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Span;
    use crate::lexer::{TemplatePart, TokenKind, lex};

    fn single(source: &str) -> TokenKind {
        lex(source).unwrap().remove(0).kind
    }

    #[test]
    fn test_double_quoted_body_is_verbatim() {
        assert_eq!(single(r#""a\tb""#), TokenKind::String(r"a\tb".to_string()));
    }

    #[test]
    fn test_single_quoted_is_normalized() {
        assert_eq!(single(r#"'it\'s "x"'"#), TokenKind::String(r#"it's \"x\""#.to_string()));
    }

    #[test]
    fn test_line_continuation_is_dropped() {
        assert_eq!(single("\"a\\\nb\""), TokenKind::String("ab".to_string()));
        assert_eq!(single("\"a\\\r\nb\""), TokenKind::String("ab".to_string()));
        assert_eq!(
            single("`line1\nline2 \\\n x`"),
            TokenKind::Template(vec![TemplatePart::Literal(r"line1\nline2  x".to_string())])
        );
    }

    #[test]
    fn test_unicode_escapes_use_fixed_width_forms() {
        assert_eq!(single(r#""\u{41}""#), TokenKind::String(r"\u0041".to_string()));
        assert_eq!(single(r#""\u00e9""#), TokenKind::String(r"\u00e9".to_string()));
        assert_eq!(single(r#""\u{1F600}""#), TokenKind::String(r"\U0001f600".to_string()));
        assert_eq!(single(r#""\uD83D\uDE00""#), TokenKind::String(r"\U0001f600".to_string()));
    }

    #[test]
    fn test_escapes_without_a_target_spelling() {
        assert_eq!(single(r#""a\0b""#), TokenKind::String(r"a\x00b".to_string()));
        assert_eq!(single(r#""\x41\xe9""#), TokenKind::String(r"\x41\u00e9".to_string()));
        assert_eq!(single(r#""\d\q""#), TokenKind::String("dq".to_string()));
        assert_eq!(single(r#""\\ \n""#), TokenKind::String(r"\\ \n".to_string()));
    }

    #[test]
    fn test_malformed_escapes_are_errors() {
        for (source, message) in [
            (r#""\u{110000}""#, "Invalid Unicode escape sequence"),
            (r#""\u{}""#, "Invalid Unicode escape sequence"),
            (r#""\uD800""#, "Invalid Unicode escape sequence"),
            (r#""\xZ1""#, "Invalid hexadecimal escape sequence"),
            (r#""\01""#, "Octal escape sequences are not allowed"),
        ] {
            let errors = lex(source).unwrap_err();
            assert_eq!(errors[0].message, message, "{}", source);
            assert_eq!(errors[0].span.start, 1, "{}", source);
        }
    }

    #[test]
    fn test_unterminated_string() {
        let errors = lex("\"abc\nx").unwrap_err();
        assert_eq!(errors[0].message, "Unterminated string literal");
        assert_eq!(errors[0].span.start, 0);
    }

    #[test]
    fn test_template_parts_and_offsets() {
        let TokenKind::Template(parts) = single("`Hello ${name}!`") else {
            panic!("expected template");
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], TemplatePart::Literal("Hello ".to_string()));
        let TemplatePart::Expr { tokens, span } = &parts[1] else {
            panic!("expected interpolation");
        };
        assert_eq!(*span, Span::new(9, 13));
        assert_eq!(tokens[0].kind, TokenKind::Ident("name".to_string()));
        assert_eq!(tokens[0].span, Span::new(9, 13));
        assert_eq!(parts[2], TemplatePart::Literal("!".to_string()));
    }

    #[test]
    fn test_template_nested_braces_and_strings() {
        let TokenKind::Template(parts) = single("`${ f({a: \"}\"}) }`") else {
            panic!("expected template");
        };
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[1], TemplatePart::Expr { tokens, .. } if tokens.len() > 5));
    }

    #[test]
    fn test_template_without_interpolation() {
        assert_eq!(
            single("`plain`"),
            TokenKind::Template(vec![TemplatePart::Literal("plain".to_string())])
        );
    }

    #[test]
    fn test_unterminated_template() {
        let errors = lex("`abc ${x").unwrap_err();
        assert_eq!(errors[0].message, "Unterminated template literal");
    }
}
