//! Arithmetic policy shared by the interpreter and the IR code generator.
//!
//! `int` is a 32-bit two's-complement integer. `+`, `-`, `*` and unary `-` wrap, which is exactly what LLVM's
//! `add`/`sub`/`mul` without `nsw` do, so compiled code and the interpreter agree on overflow. Integer division
//! truncates toward zero like `sdiv`; the two inputs `sdiv` leaves undefined are reported as [`ArithError`]s.

use std::fmt;

/// Integer operations that have no defined result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithError {
    DivisionByZero,
    /// `i32::MIN / -1`
    DivisionOverflow,
}

impl fmt::Display for ArithError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithError::DivisionByZero => write!(f, "integer division by zero"),
            ArithError::DivisionOverflow => write!(f, "integer division overflow"),
        }
    }
}

impl std::error::Error for ArithError {}

#[inline]
pub fn int_add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

#[inline]
pub fn int_sub(a: i32, b: i32) -> i32 {
    a.wrapping_sub(b)
}

#[inline]
pub fn int_mul(a: i32, b: i32) -> i32 {
    a.wrapping_mul(b)
}

#[inline]
pub fn int_neg(a: i32) -> i32 {
    a.wrapping_neg()
}

/// Truncating integer division.
///
/// ## Errors
/// - [`ArithError::DivisionByZero`] when `b == 0`.
/// - [`ArithError::DivisionOverflow`] for `i32::MIN / -1`.
pub fn int_div(a: i32, b: i32) -> Result<i32, ArithError> {
    if b == 0 {
        return Err(ArithError::DivisionByZero);
    }
    a.checked_div(b).ok_or(ArithError::DivisionOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_matches_twos_complement() {
        assert_eq!(int_add(i32::MAX, 1), i32::MIN);
        assert_eq!(int_sub(i32::MIN, 1), i32::MAX);
        assert_eq!(int_mul(65536, 65536), 0);
        assert_eq!(int_neg(i32::MIN), i32::MIN);
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        assert_eq!(int_div(7, 2), Ok(3));
        assert_eq!(int_div(-7, 2), Ok(-3));
        assert_eq!(int_div(7, -2), Ok(-3));
    }

    #[test]
    fn test_division_errors() {
        assert_eq!(int_div(1, 0), Err(ArithError::DivisionByZero));
        assert_eq!(int_div(i32::MIN, -1), Err(ArithError::DivisionOverflow));
    }
}
