//! Token types for the Wabbit lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for delimiters
//!
//! ## Notes
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use std::fmt;

use crate::ast::Span;
use wabbit_core::lang::keywords::{self, KeywordId};
use wabbit_core::lang::operators::{self, OperatorId};
use wabbit_core::lang::punctuation::{self, PunctuationId};

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
    Int(i32),
    Float(f64),
    Char(char),

    // ========== Special ==========
    Eof,
}

impl TokenKind {
    /// Short human-readable description used in "found ..." diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(id) => format!("keyword '{}'", keywords::as_str(*id)),
            TokenKind::Operator(id) => format!("'{}'", operators::as_str(*id)),
            TokenKind::Punctuation(id) => format!("'{}'", punctuation::as_str(*id)),
            TokenKind::Ident(name) => format!("identifier '{name}'"),
            TokenKind::Int(v) => format!("integer literal {v}"),
            TokenKind::Float(v) => format!("float literal {v}"),
            TokenKind::Char(c) => format!("char literal '{}'", crate::ast::escape_char(*c)),
            TokenKind::Eof => "end of file".to_string(),
        }
    }

    /// Category name shown by the tokenizer dump.
    pub fn category(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "KEYWORD",
            TokenKind::Operator(_) => "OPERATOR",
            TokenKind::Punctuation(_) => "DELIMITER",
            TokenKind::Ident(_) => "NAME",
            TokenKind::Int(_) => "INTEGER",
            TokenKind::Float(_) => "FLOAT",
            TokenKind::Char(_) => "CHAR",
            TokenKind::Eof => "EOF",
        }
    }
}

/// A token with its kind, raw lexeme, and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} {:<10} {}", self.span.to_string(), self.kind.category(), self.lexeme)
    }
}

/// Classify an identifier-shaped word as a keyword or a plain identifier.
pub fn keyword_or_ident(word: &str) -> TokenKind {
    match keywords::from_str(word) {
        Some(id) => TokenKind::Keyword(id),
        None => TokenKind::Ident(word.to_string()),
    }
}
