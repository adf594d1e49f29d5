//! IR spellings of Wabbit types, constants and operators.

use wabbit_core::lang::types;

use crate::frontend::typed_ast::{BinaryOp, Literal, Type};

use super::CodegenError;

/// The LLVM type a Wabbit type lowers to.
pub fn ir_type(ty: Type) -> &'static str {
    ty.primitive().map_or("void", |id| types::info_for(id).ir_type)
}

/// Zero value of `ty`, used for globals and for `var` declarations without a value.
pub fn zero(ty: Type) -> Result<&'static str, CodegenError> {
    ty.primitive()
        .map(|id| types::info_for(id).ir_zero)
        .ok_or_else(|| CodegenError::Internal("void has no zero value".to_string()))
}

/// A literal as an IR constant operand.
///
/// Floats are written as the hexadecimal bit pattern of the `double`, the only spelling LLVM accepts for every value.
pub fn literal(lit: Literal) -> String {
    match lit {
        Literal::Int(v) => v.to_string(),
        Literal::Float(v) => format!("0x{:016X}", v.to_bits()),
        Literal::Char(c) => u32::from(c).to_string(),
        Literal::Bool(b) => b.to_string(),
    }
}

/// Instruction for an arithmetic operator on `ty`.
pub fn arithmetic(op: BinaryOp, ty: Type) -> Option<&'static str> {
    let float = ty == Type::Float;
    Some(match op {
        BinaryOp::Add if float => "fadd",
        BinaryOp::Sub if float => "fsub",
        BinaryOp::Mul if float => "fmul",
        BinaryOp::Div if float => "fdiv",
        BinaryOp::Add => "add",
        BinaryOp::Sub => "sub",
        BinaryOp::Mul => "mul",
        BinaryOp::Div => "sdiv",
        _ => return None,
    })
}

/// Comparison instruction and predicate for operands of type `ty`, e.g. `icmp slt`.
///
/// `int` and `char` compare signed, `bool` unsigned (`false < true`), floats ordered except `!=`, which is true when
/// either side is NaN.
pub fn comparison(op: BinaryOp, ty: Type) -> Option<&'static str> {
    Some(match ty {
        Type::Float => match op {
            BinaryOp::Lt => "fcmp olt",
            BinaryOp::LtEq => "fcmp ole",
            BinaryOp::Gt => "fcmp ogt",
            BinaryOp::GtEq => "fcmp oge",
            BinaryOp::Eq => "fcmp oeq",
            BinaryOp::NotEq => "fcmp une",
            _ => return None,
        },
        Type::Bool => match op {
            BinaryOp::Lt => "icmp ult",
            BinaryOp::LtEq => "icmp ule",
            BinaryOp::Gt => "icmp ugt",
            BinaryOp::GtEq => "icmp uge",
            BinaryOp::Eq => "icmp eq",
            BinaryOp::NotEq => "icmp ne",
            _ => return None,
        },
        Type::Int | Type::Char => match op {
            BinaryOp::Lt => "icmp slt",
            BinaryOp::LtEq => "icmp sle",
            BinaryOp::Gt => "icmp sgt",
            BinaryOp::GtEq => "icmp sge",
            BinaryOp::Eq => "icmp eq",
            BinaryOp::NotEq => "icmp ne",
            _ => return None,
        },
        Type::Void => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_spellings() {
        assert_eq!(ir_type(Type::Int), "i32");
        assert_eq!(ir_type(Type::Char), "i32");
        assert_eq!(ir_type(Type::Bool), "i1");
        assert_eq!(ir_type(Type::Float), "double");
        assert_eq!(ir_type(Type::Void), "void");
    }

    #[test]
    fn test_float_literals_are_hex() {
        assert_eq!(literal(Literal::Float(1.0)), "0x3FF0000000000000");
        assert_eq!(literal(Literal::Float(0.1)), "0x3FB999999999999A");
        assert_eq!(literal(Literal::Char('A')), "65");
        assert_eq!(literal(Literal::Bool(true)), "true");
    }

    #[test]
    fn test_predicates_follow_signedness() {
        assert_eq!(comparison(BinaryOp::Lt, Type::Int), Some("icmp slt"));
        assert_eq!(comparison(BinaryOp::Lt, Type::Bool), Some("icmp ult"));
        assert_eq!(comparison(BinaryOp::NotEq, Type::Float), Some("fcmp une"));
        assert_eq!(comparison(BinaryOp::Add, Type::Int), None);
        assert_eq!(arithmetic(BinaryOp::Div, Type::Int), Some("sdiv"));
        assert_eq!(arithmetic(BinaryOp::Div, Type::Float), Some("fdiv"));
    }

    #[test]
    fn test_void_has_no_zero() {
        assert!(zero(Type::Void).is_err());
        assert_eq!(zero(Type::Float).ok(), Some("0.0"));
    }
}
