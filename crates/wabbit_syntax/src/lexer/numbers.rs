//! Number scanning for the Wabbit lexer
//!
//! Handles integer and floating-point literals. A literal is a float exactly when it contains a decimal point:
//! `3.14`, `1.` and `.5` are floats, `42` is an int.
//!
//! An int literal must fit in `i32`, with one exception: `2147483648` directly after `-` lexes as `Int(i32::MIN)`.
//! The parser folds `-` and that token into the literal `-2147483648` and rejects the token anywhere else.

use super::tokens::TokenKind;
use super::{Lexer, Mark};
use crate::ast::Span;
use crate::diagnostics::CompileError;

impl<'a> Lexer<'a> {
    /// Scan the rest of a numeric literal whose first character (a digit or `.`) was already consumed.
    pub(super) fn scan_number(&mut self, start: Mark) -> Result<TokenKind, CompileError> {
        let leading_dot = self.lexeme_from(start) == ".";
        self.eat_digits();

        let mut is_float = leading_dot;
        if !leading_dot && self.peek() == Some('.') {
            self.advance();
            self.eat_digits();
            is_float = true;
        }

        // A second '.' or an identifier character glued to the literal (`1.2.3`, `12abc`) is malformed.
        if self.peek().is_some_and(continues_number) {
            while self.peek().is_some_and(continues_number) {
                self.advance();
            }
            return Err(CompileError::lex(
                format!("malformed numeric literal '{}'", self.lexeme_from(start)),
                self.span_from(start),
            ));
        }

        let text = self.lexeme_from(start);
        if is_float {
            text.parse::<f64>().map(TokenKind::Float).map_err(|_| {
                CompileError::lex(format!("malformed numeric literal '{text}'"), self.span_from(start))
            })
        } else if self.after_minus && text == I32_MIN_MAGNITUDE {
            Ok(TokenKind::Int(i32::MIN))
        } else {
            text.parse::<i32>()
                .map(TokenKind::Int)
                .map_err(|_| int_out_of_range(text, self.span_from(start)))
        }
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }
}

/// Digits of `i32::MIN` without the sign.
const I32_MIN_MAGNITUDE: &str = "2147483648";

/// The error for an int literal outside `i32`.
pub(crate) fn int_out_of_range(text: &str, span: Span) -> CompileError {
    CompileError::lex(format!("malformed numeric literal '{text}': out of range"), span)
        .with_note("int is a 32-bit signed integer")
}

fn continues_number(c: char) -> bool {
    c == '.' || c == '_' || c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::ErrorKind;
    use crate::lexer::{TokenKind, lex};

    fn first(source: &str) -> TokenKind {
        lex(source).unwrap().remove(0).kind
    }

    #[test]
    fn test_int_and_float_forms() {
        assert_eq!(first("0"), TokenKind::Int(0));
        assert_eq!(first("2147483647"), TokenKind::Int(i32::MAX));
        assert_eq!(first("3.25"), TokenKind::Float(3.25));
        assert_eq!(first("1."), TokenKind::Float(1.0));
        assert_eq!(first(".5"), TokenKind::Float(0.5));
    }

    #[test]
    fn test_malformed_literals() {
        for source in ["1.2.3", "12abc", "3.x", ".5.5", "7_000"] {
            let err = lex(source).expect_err(source);
            assert_eq!(err.kind, ErrorKind::Lex);
            assert!(err.message.starts_with("malformed numeric literal"), "{source}: {}", err.message);
        }
    }

    #[test]
    fn test_int_out_of_range() {
        let err = lex("print 2147483648;").unwrap_err();
        assert!(err.message.contains("out of range"));
        assert_eq!(err.span.column, 7);
    }

    #[test]
    fn test_min_int_magnitude_only_after_minus() {
        let kinds: Vec<TokenKind> = lex("-2147483648").unwrap().into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds[1], TokenKind::Int(i32::MIN));

        let kinds: Vec<TokenKind> = lex("- /* sign */ 2147483648").unwrap().into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds[1], TokenKind::Int(i32::MIN));

        assert!(lex("(2147483648)").is_err());
        assert!(lex("-2147483649").is_err());
        assert!(lex("-+2147483648").is_err());
    }

    #[test]
    fn test_lone_dot_is_not_a_number() {
        let err = lex("x . y").unwrap_err();
        assert!(err.message.contains("unrecognized character '.'"));
    }
}
