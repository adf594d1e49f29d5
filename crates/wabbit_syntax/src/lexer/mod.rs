//! Lexer for the Wabbit programming language
//!
//! Handles tokenization including:
//! - Keywords (`var`, `func`, `while`, ...) and identifiers
//! - Integer, float and character literals
//! - Operators and punctuation
//! - `//` line comments and `/* */` block comments
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `numbers` - Numeric literal scanning
//! - `chars` - Character literal scanning
//!
//! ## Notes
//!
//! [`Lexer`] is a lazy iterator of `Result<Token, CompileError>`. It ends with exactly one `Eof` token, or with the
//! first error. Lexing is restartable: a `Lexer` is `Clone`, and `Lexer::new` on the same source always yields the same
//! sequence.

mod chars;
mod numbers;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_or_ident};

pub(crate) use numbers::int_out_of_range;

use crate::ast::Span;
use crate::diagnostics::CompileError;
use wabbit_core::lang::operators::OperatorId;
use wabbit_core::lang::punctuation;

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for Wabbit source code.
#[derive(Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: u32,
    column: u32,
    finished: bool,
    /// The previous token was `-`, so the literal `2147483648` is allowed (see `scan_number`).
    after_minus: bool,
}

/// Where the token currently being scanned began.
#[derive(Debug, Clone, Copy)]
struct Mark {
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
            finished: false,
            after_minus: false,
        }
    }

    /// Tokenize the entire source code, stopping at the first error.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(self) -> Result<Vec<Token>, CompileError> {
        self.collect()
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.current_pos,
            line: self.line,
            column: self.column,
        }
    }

    fn span_from(&self, mark: Mark) -> Span {
        Span::new(mark.pos, self.current_pos, mark.line, mark.column)
    }

    fn lexeme_from(&self, mark: Mark) -> &'a str {
        &self.source[mark.pos..self.current_pos]
    }

    fn token(&self, kind: TokenKind, mark: Mark) -> Token {
        Token::new(kind, self.lexeme_from(mark), self.span_from(mark))
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Result<Token, CompileError> {
        self.skip_trivia()?;

        let start = self.mark();
        let Some(c) = self.advance() else {
            return Ok(self.token(TokenKind::Eof, start));
        };

        let kind = match c {
            '+' => TokenKind::Operator(OperatorId::Plus),
            '-' => TokenKind::Operator(OperatorId::Minus),
            '*' => TokenKind::Operator(OperatorId::Star),
            '/' => TokenKind::Operator(OperatorId::Slash),
            '<' => self.operator(OperatorId::Lt, '=', OperatorId::LtEq),
            '>' => self.operator(OperatorId::Gt, '=', OperatorId::GtEq),
            '=' => self.operator(OperatorId::Eq, '=', OperatorId::EqEq),
            '!' => self.operator(OperatorId::Bang, '=', OperatorId::NotEq),
            '&' => self.doubled('&', OperatorId::AndAnd, start)?,
            '|' => self.doubled('|', OperatorId::OrOr, start)?,
            '\'' => self.scan_char(start)?,
            c if c.is_ascii_digit() => self.scan_number(start)?,
            '.' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(start)?,
            c if c.is_ascii_alphabetic() || c == '_' => {
                while self.peek().is_some_and(|n| n.is_ascii_alphanumeric() || n == '_') {
                    self.advance();
                }
                keyword_or_ident(self.lexeme_from(start))
            }
            c => match punctuation::from_char(c) {
                Some(id) => TokenKind::Punctuation(id),
                None => {
                    return Err(CompileError::lex(
                        format!("unrecognized character '{}'", c.escape_debug()),
                        self.span_from(start),
                    ));
                }
            },
        };

        Ok(self.token(kind, start))
    }

    /// Scan a one- or two-character operator: `simple`, or `compound` when followed by `next`.
    fn operator(&mut self, simple: OperatorId, next: char, compound: OperatorId) -> TokenKind {
        if self.match_char(next) {
            TokenKind::Operator(compound)
        } else {
            TokenKind::Operator(simple)
        }
    }

    /// Scan an operator that only exists doubled (`&&`, `||`).
    fn doubled(&mut self, c: char, id: OperatorId, start: Mark) -> Result<TokenKind, CompileError> {
        if self.match_char(c) {
            Ok(TokenKind::Operator(id))
        } else {
            Err(CompileError::lex(format!("unrecognized character '{c}'"), self.span_from(start))
                .with_hint(format!("did you mean '{c}{c}'?")))
        }
    }

    /// Skip whitespace, `// line` comments and `/* block */` comments.
    fn skip_trivia(&mut self) -> Result<(), CompileError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.peek().map(|(_, c)| *c) {
                        Some('/') => {
                            while self.peek().is_some_and(|c| c != '\n') {
                                self.advance();
                            }
                        }
                        Some('*') => self.skip_block_comment()?,
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), CompileError> {
        let start = self.mark();
        self.advance(); // '/'
        self.advance(); // '*'
        loop {
            match self.advance() {
                Some('*') if self.match_char('/') => return Ok(()),
                Some(_) => {}
                None => {
                    return Err(CompileError::lex(
                        "unterminated block comment",
                        Span::new(start.pos, start.pos + 2, start.line, start.column),
                    ));
                }
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.scan_token();
        match &result {
            Ok(token) if token.kind != TokenKind::Eof => {
                self.after_minus = token.kind == TokenKind::Operator(OperatorId::Minus);
            }
            _ => self.finished = true,
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, CompileError> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;
    use wabbit_core::lang::keywords::KeywordId;
    use wabbit_core::lang::punctuation::PunctuationId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn lex_err(source: &str) -> CompileError {
        lex(source).expect_err("expected a lex error")
    }

    #[test]
    fn test_declaration_tokens() {
        assert_eq!(
            kinds("var x int = 42;"),
            vec![
                TokenKind::Keyword(KeywordId::Var),
                TokenKind::Ident("x".into()),
                TokenKind::Ident("int".into()),
                TokenKind::Operator(OperatorId::Eq),
                TokenKind::Int(42),
                TokenKind::Punctuation(PunctuationId::Semicolon),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_character_operators() {
        assert_eq!(
            kinds("<= >= == != && || < > = !"),
            vec![
                TokenKind::Operator(OperatorId::LtEq),
                TokenKind::Operator(OperatorId::GtEq),
                TokenKind::Operator(OperatorId::EqEq),
                TokenKind::Operator(OperatorId::NotEq),
                TokenKind::Operator(OperatorId::AndAnd),
                TokenKind::Operator(OperatorId::OrOr),
                TokenKind::Operator(OperatorId::Lt),
                TokenKind::Operator(OperatorId::Gt),
                TokenKind::Operator(OperatorId::Eq),
                TokenKind::Operator(OperatorId::Bang),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "// leading\nprint /* inline */ 1; /* multi\nline */ // trailing";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Keyword(KeywordId::Print),
                TokenKind::Int(1),
                TokenKind::Punctuation(PunctuationId::Semicolon),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = lex("var a;\n  print a;").unwrap();
        assert_eq!((tokens[0].span.line, tokens[0].span.column), (1, 1));
        assert_eq!((tokens[1].span.line, tokens[1].span.column), (1, 5));
        assert_eq!((tokens[3].span.line, tokens[3].span.column), (2, 3));
        assert_eq!(tokens[3].lexeme, "print");
    }

    #[test]
    fn test_lexer_is_lazy_and_stops_after_error() {
        let mut lexer = Lexer::new("print 1; @ print 2;");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_ok());
        let err = lexer.next().unwrap().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert!(err.message.contains('@'));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_lexer_restarts_from_a_clone() {
        let lexer = Lexer::new("while x { x = x - 1; }");
        let first: Vec<_> = lexer.clone().map(|t| t.unwrap().kind).collect();
        let second: Vec<_> = lexer.map(|t| t.unwrap().kind).collect();
        assert_eq!(first, second);
        assert_eq!(first.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn test_unrecognized_characters() {
        assert_eq!(lex_err("x & y").kind, ErrorKind::Lex);
        assert!(lex_err("x | y").message.contains('|'));
        let err = lex_err("var x = 1;\nx = $;");
        assert_eq!((err.span.line, err.span.column), (2, 5));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = lex_err("print 1; /* never closed");
        assert!(err.message.contains("unterminated block comment"));
    }

    #[test]
    fn test_token_dump() {
        let dump: Vec<String> = lex("var x = 1.5;")
            .unwrap()
            .iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(ToString::to_string)
            .collect();
        insta::assert_snapshot!(dump.join("\n"), @r"
        1:1      KEYWORD    var
        1:5      NAME       x
        1:7      OPERATOR   =
        1:9      FLOAT      1.5
        1:12     DELIMITER  ;
        ");
    }
}
