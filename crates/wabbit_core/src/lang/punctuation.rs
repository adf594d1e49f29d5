//! Punctuation vocabulary.
//!
//! Delimiters and separators that are not operators: parentheses, braces, `,` and `;`.
//!
//! ## Examples
//! ```rust
//! use wabbit_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str(";"), Some(PunctuationId::Semicolon));
//! assert_eq!(punctuation::as_str(PunctuationId::LBrace), "{");
//! ```

/// Stable identifier for every punctuation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub spelling: &'static str,
    /// Human-readable name used in "expected ..." diagnostics.
    pub description: &'static str,
}

/// Registry of all punctuation, ordered by [`PunctuationId`] discriminant.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::LParen, "(", "opening parenthesis"),
    info(PunctuationId::RParen, ")", "closing parenthesis"),
    info(PunctuationId::LBrace, "{", "opening brace"),
    info(PunctuationId::RBrace, "}", "closing brace"),
    info(PunctuationId::Comma, ",", "comma"),
    info(PunctuationId::Semicolon, ";", "semicolon"),
];

pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    &PUNCTUATION[id as usize]
}

pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).spelling
}

pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.spelling == s).map(|p| p.id)
}

/// Map a single character to its punctuation id, if any.
pub fn from_char(c: char) -> Option<PunctuationId> {
    match c {
        '(' => Some(PunctuationId::LParen),
        ')' => Some(PunctuationId::RParen),
        '{' => Some(PunctuationId::LBrace),
        '}' => Some(PunctuationId::RBrace),
        ',' => Some(PunctuationId::Comma),
        ';' => Some(PunctuationId::Semicolon),
        _ => None,
    }
}

const fn info(id: PunctuationId, spelling: &'static str, description: &'static str) -> PunctuationInfo {
    PunctuationInfo {
        id,
        spelling,
        description,
    }
}
