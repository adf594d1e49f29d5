/// Parse a token stream into an AST [`Program`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `wabbit_syntax::lexer`.
///
/// ## Errors
/// Returns the first [`CompileError`] (a ParseError). A stream that does not end in `Eof` is rejected up front.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Program, CompileError> {
    match tokens.last() {
        Some(Token {
            kind: TokenKind::Eof, ..
        }) => Parser::new(tokens).parse(),
        Some(last) => Err(CompileError::parse("token stream does not end with end of file", last.span)),
        None => Err(CompileError::parse("token stream is empty", Span::default())),
    }
}

/// Lex and parse a source string in one step.
///
/// ## Errors
/// Returns the first LexError or ParseError.
pub fn parse_source(source: &str) -> Result<Program, CompileError> {
    let tokens = crate::lexer::lex(source)?;
    parse(&tokens)
}
