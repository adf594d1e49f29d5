//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with precedence, associativity, and fixity. The parser's
//! precedence ladder and the formatter's parenthesization both read from this one table.
//!
//! ## Notes
//! - `precedence` is a relative ordering where higher binds tighter.
//! - `+` and `-` are both infix and prefix; their infix precedence is recorded here and the prefix form binds at
//!   [`PREFIX_PRECEDENCE`].
//! - Comparisons have [`Associativity::None`]: `a < b < c` is rejected by the parser.
//!
//! ## Examples
//! ```rust
//! use wabbit_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("<="), Some(OperatorId::LtEq));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define whether an operator is infix (binary), prefix (unary), or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    InfixOrPrefix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,
    EqEq,
    NotEq,

    // Logical
    AndAnd,
    OrOr,
    Bang,

    // Assignment
    Eq,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
}

/// Binding power of every prefix operator (`+x`, `-x`, `!x`).
pub const PREFIX_PRECEDENCE: u8 = 70;

/// Binding power of assignment, the loosest operator.
pub const ASSIGN_PRECEDENCE: u8 = 10;

/// Registry of all operators, ordered by [`OperatorId`] discriminant.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Plus, "+", 50, Associativity::Left, Fixity::InfixOrPrefix),
    op(OperatorId::Minus, "-", 50, Associativity::Left, Fixity::InfixOrPrefix),
    op(OperatorId::Star, "*", 60, Associativity::Left, Fixity::Infix),
    op(OperatorId::Slash, "/", 60, Associativity::Left, Fixity::Infix),
    op(OperatorId::Lt, "<", 40, Associativity::None, Fixity::Infix),
    op(OperatorId::LtEq, "<=", 40, Associativity::None, Fixity::Infix),
    op(OperatorId::Gt, ">", 40, Associativity::None, Fixity::Infix),
    op(OperatorId::GtEq, ">=", 40, Associativity::None, Fixity::Infix),
    op(OperatorId::EqEq, "==", 40, Associativity::None, Fixity::Infix),
    op(OperatorId::NotEq, "!=", 40, Associativity::None, Fixity::Infix),
    op(OperatorId::AndAnd, "&&", 30, Associativity::Left, Fixity::Infix),
    op(OperatorId::OrOr, "||", 20, Associativity::Left, Fixity::Infix),
    op(OperatorId::Bang, "!", PREFIX_PRECEDENCE, Associativity::Right, Fixity::Prefix),
    op(OperatorId::Eq, "=", ASSIGN_PRECEDENCE, Associativity::Right, Fixity::Infix),
];

/// Return the full metadata entry for an operator.
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    &OPERATORS[id as usize]
}

/// Canonical spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Infix binding power of an operator.
pub fn precedence(id: OperatorId) -> u8 {
    info_for(id).precedence
}

/// Resolve an operator spelling to its identifier.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`], `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Return `true` for the six comparison operators.
pub fn is_comparison(id: OperatorId) -> bool {
    matches!(
        id,
        OperatorId::Lt | OperatorId::LtEq | OperatorId::Gt | OperatorId::GtEq | OperatorId::EqEq | OperatorId::NotEq
    )
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ladder_order() {
        let ladder = [
            OperatorId::Eq,
            OperatorId::OrOr,
            OperatorId::AndAnd,
            OperatorId::Lt,
            OperatorId::Plus,
            OperatorId::Star,
        ];
        for pair in ladder.windows(2) {
            assert!(precedence(pair[0]) < precedence(pair[1]), "{:?} vs {:?}", pair[0], pair[1]);
        }
        assert!(precedence(OperatorId::Star) < PREFIX_PRECEDENCE);
    }

    #[test]
    fn test_comparisons_do_not_chain() {
        for o in OPERATORS.iter().filter(|o| is_comparison(o.id)) {
            assert_eq!(o.associativity, Associativity::None);
        }
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(info_for(OperatorId::Eq).associativity, Associativity::Right);
        assert_eq!(from_str("="), Some(OperatorId::Eq));
        assert_eq!(from_str("=>"), None);
    }
}
