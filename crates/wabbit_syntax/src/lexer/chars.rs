//! Character literal scanning for the Wabbit lexer

use super::tokens::TokenKind;
use super::{Lexer, Mark};
use crate::diagnostics::CompileError;

impl<'a> Lexer<'a> {
    /// Scan a character literal after its opening `'`.
    ///
    /// ## Errors
    /// - Unterminated literal: end of input or end of line before the closing quote.
    /// - Empty literal `''` and unknown escapes.
    pub(super) fn scan_char(&mut self, start: Mark) -> Result<TokenKind, CompileError> {
        let value = match self.advance() {
            None | Some('\n') => return Err(self.unterminated(start)),
            Some('\'') => {
                return Err(CompileError::lex("empty character literal", self.span_from(start)));
            }
            Some('\\') => match self.advance() {
                Some('n') => '\n',
                Some('t') => '\t',
                Some('r') => '\r',
                Some('0') => '\0',
                Some('\\') => '\\',
                Some('\'') => '\'',
                Some('"') => '"',
                None | Some('\n') => return Err(self.unterminated(start)),
                Some(other) => {
                    return Err(CompileError::lex(
                        format!("unknown escape sequence '\\{}'", other.escape_debug()),
                        self.span_from(start),
                    ));
                }
            },
            Some(c) => c,
        };

        if self.match_char('\'') {
            Ok(TokenKind::Char(value))
        } else {
            Err(self.unterminated(start))
        }
    }

    fn unterminated(&self, start: Mark) -> CompileError {
        CompileError::lex("unterminated character literal", self.span_from(start))
            .with_hint("character literals hold exactly one character, e.g. 'a' or '\\n'")
    }
}
