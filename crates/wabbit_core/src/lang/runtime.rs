//! Print runtime ABI.
//!
//! Compiled programs print by calling one of four external C-ABI symbols. The interpreter prints through the same
//! functions (their writer-generic form in `wabbit_runtime`), selected by the same static type, so the two back ends
//! cannot disagree on which function handles a value.
//!
//! ## Examples
//! ```rust
//! use wabbit_core::lang::runtime::{self, PrintFnId};
//! use wabbit_core::lang::types::PrimitiveTypeId;
//!
//! let f = runtime::for_type(PrimitiveTypeId::Bool);
//! assert_eq!(f, PrintFnId::Bool);
//! assert_eq!(runtime::info_for(f).symbol, "print_bool");
//! assert_eq!(runtime::info_for(f).param_ir_type, "i32");
//! ```

use super::types::PrimitiveTypeId;

/// Stable identifier for every runtime print function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrintFnId {
    Int,
    Float,
    Bool,
    Char,
}

/// Metadata for a runtime print function.
#[derive(Debug, Clone, Copy)]
pub struct PrintFnInfo {
    pub id: PrintFnId,
    /// Linker-visible symbol name.
    pub symbol: &'static str,
    /// LLVM IR type of the single parameter.
    pub param_ir_type: &'static str,
    /// Whether the function terminates its output with `\n`.
    pub newline: bool,
}

/// Registry of runtime print functions, ordered by [`PrintFnId`] discriminant.
pub const PRINT_FUNCTIONS: &[PrintFnInfo] = &[
    info(PrintFnId::Int, "print_int", "i32", true),
    info(PrintFnId::Float, "print_float", "double", true),
    info(PrintFnId::Bool, "print_bool", "i32", true),
    info(PrintFnId::Char, "print_char", "i32", false),
];

pub fn info_for(id: PrintFnId) -> &'static PrintFnInfo {
    &PRINT_FUNCTIONS[id as usize]
}

/// Select the print function for a value of static type `ty`.
pub fn for_type(ty: PrimitiveTypeId) -> PrintFnId {
    match ty {
        PrimitiveTypeId::Int => PrintFnId::Int,
        PrimitiveTypeId::Float => PrintFnId::Float,
        PrimitiveTypeId::Bool => PrintFnId::Bool,
        PrimitiveTypeId::Char => PrintFnId::Char,
    }
}

const fn info(id: PrintFnId, symbol: &'static str, param_ir_type: &'static str, newline: bool) -> PrintFnInfo {
    PrintFnInfo {
        id,
        symbol,
        param_ir_type,
        newline,
    }
}
