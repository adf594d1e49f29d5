//! Primitive type vocabulary.
//!
//! Wabbit has exactly four value types. This registry records their source spelling, the LLVM IR type the compiler
//! lowers them to, and the zero value a `var` without an initializer starts with.
//!
//! ## Notes
//! - `char` is carried as an `i32` codepoint in IR so it can be passed straight to `print_char`.
//! - `bool` is an `i1` in IR and is widened to `i32` only at the `print_bool` call boundary.
//!
//! ## Examples
//! ```rust
//! use wabbit_core::lang::types::{self, PrimitiveTypeId};
//!
//! assert_eq!(types::from_str("float"), Some(PrimitiveTypeId::Float));
//! assert_eq!(types::info_for(PrimitiveTypeId::Float).ir_type, "double");
//! ```

/// Stable identifier for every primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTypeId {
    Int,
    Float,
    Char,
    Bool,
}

/// Metadata for a primitive type.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveTypeInfo {
    pub id: PrimitiveTypeId,
    pub canonical: &'static str,
    /// LLVM IR spelling of the lowered type.
    pub ir_type: &'static str,
    /// LLVM IR constant used to zero-initialize globals of this type.
    pub ir_zero: &'static str,
    pub is_numeric: bool,
}

/// Registry of all primitive types, ordered by [`PrimitiveTypeId`] discriminant.
pub const PRIMITIVE_TYPES: &[PrimitiveTypeInfo] = &[
    info(PrimitiveTypeId::Int, "int", "i32", "0", true),
    info(PrimitiveTypeId::Float, "float", "double", "0.0", true),
    info(PrimitiveTypeId::Char, "char", "i32", "0", false),
    info(PrimitiveTypeId::Bool, "bool", "i1", "false", false),
];

pub fn info_for(id: PrimitiveTypeId) -> &'static PrimitiveTypeInfo {
    &PRIMITIVE_TYPES[id as usize]
}

pub fn as_str(id: PrimitiveTypeId) -> &'static str {
    info_for(id).canonical
}

pub fn from_str(s: &str) -> Option<PrimitiveTypeId> {
    PRIMITIVE_TYPES.iter().find(|t| t.canonical == s).map(|t| t.id)
}

/// Return `true` for the types arithmetic operators accept (`int`, `float`).
pub fn is_numeric(id: PrimitiveTypeId) -> bool {
    info_for(id).is_numeric
}

const fn info(
    id: PrimitiveTypeId,
    canonical: &'static str,
    ir_type: &'static str,
    ir_zero: &'static str,
    is_numeric: bool,
) -> PrimitiveTypeInfo {
    PrimitiveTypeInfo {
        id,
        canonical,
        ir_type,
        ir_zero,
        is_numeric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_int_and_float_are_numeric() {
        let numeric: Vec<_> = PRIMITIVE_TYPES.iter().filter(|t| t.is_numeric).map(|t| t.id).collect();
        assert_eq!(numeric, vec![PrimitiveTypeId::Int, PrimitiveTypeId::Float]);
    }

    #[test]
    fn test_unknown_type_name() {
        assert_eq!(from_str("string"), None);
        assert_eq!(from_str("Int"), None);
    }
}
