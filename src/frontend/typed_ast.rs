//! Resolved, typed program representation.
//!
//! The resolver turns the parser's [`ast::Program`](crate::frontend::ast::Program) into a [`Program`] here, which is
//! what both back ends consume. Compared to the syntax tree:
//!
//! - every expression carries its [`Type`];
//! - every variable reference is a [`Place`] (a global id or a slot in the current frame), so no back end ever looks a
//!   name up;
//! - every call names its callee by [`FuncId`];
//! - function declarations are hoisted out of the statement list into [`Program::functions`].
//!
//! Nothing in this tree can fail to type-check; passes that find an impossible shape here report an internal error.

use std::fmt;

pub use crate::frontend::ast::{BinaryOp, Literal, Span, UnaryOp};
use wabbit_core::lang::types::{self, PrimitiveTypeId};

pub type GlobalId = usize;
pub type LocalSlot = usize;
pub type FuncId = usize;

/// Static type of an expression.
///
/// `Void` is only ever the type of a call to a function without a return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Char,
    Bool,
    Void,
}

impl Type {
    pub fn from_primitive(id: PrimitiveTypeId) -> Self {
        match id {
            PrimitiveTypeId::Int => Type::Int,
            PrimitiveTypeId::Float => Type::Float,
            PrimitiveTypeId::Char => Type::Char,
            PrimitiveTypeId::Bool => Type::Bool,
        }
    }

    /// The primitive type behind this type, or `None` for `void`.
    pub fn primitive(self) -> Option<PrimitiveTypeId> {
        match self {
            Type::Int => Some(PrimitiveTypeId::Int),
            Type::Float => Some(PrimitiveTypeId::Float),
            Type::Char => Some(PrimitiveTypeId::Char),
            Type::Bool => Some(PrimitiveTypeId::Bool),
            Type::Void => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.primitive().is_some_and(types::is_numeric)
    }

    pub fn name(self) -> &'static str {
        self.primitive().map_or("void", types::as_str)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage location of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Place {
    /// A top-level `var`/`const`.
    Global(GlobalId),
    /// A slot in the frame of the enclosing function (or of the top-level body).
    Local(LocalSlot),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub name: String,
    pub ty: Type,
    pub is_const: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Local {
    pub name: String,
    pub ty: Type,
}

/// A resolved function. Its parameters occupy the first `param_count` slots of `locals`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub param_count: usize,
    pub locals: Vec<Local>,
    pub return_type: Type,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Function {
    pub fn params(&self) -> &[Local] {
        &self.locals[..self.param_count]
    }
}

/// A whole resolved program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub globals: Vec<Global>,
    pub functions: Vec<Function>,
    /// Top-level statements in source order, function declarations removed.
    pub body: Vec<Stmt>,
    /// Slots used by variables declared inside top-level blocks.
    pub body_locals: Vec<Local>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// A `var`/`const` declaration. Without a value the place is reset to its type's default.
    Declare { place: Place, value: Option<Expr> },
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },
    While { condition: Expr, body: Vec<Stmt> },
    Break,
    Continue,
    Return(Option<Expr>),
    Print(Expr),
    Expr(Expr),
    Block(Vec<Stmt>),
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
    pub span: Span,
}

/// Short-circuiting boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Load(Place),
    Assign { place: Place, value: Box<Expr> },
    /// Arithmetic and comparison operators; both operands share one type.
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    Logical { op: LogicalOp, left: Box<Expr>, right: Box<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Call { func: FuncId, args: Vec<Expr> },
    /// A block used as a value: run `stmts` in a fresh scope, then evaluate `value`.
    Block { stmts: Vec<Stmt>, value: Box<Expr> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_follow_the_registry() {
        assert_eq!(Type::Int.to_string(), "int");
        assert_eq!(Type::Char.to_string(), "char");
        assert_eq!(Type::Void.to_string(), "void");
        assert_eq!(Type::from_primitive(PrimitiveTypeId::Bool), Type::Bool);
    }

    #[test]
    fn test_only_int_and_float_are_numeric() {
        assert!(Type::Int.is_numeric());
        assert!(Type::Float.is_numeric());
        assert!(!Type::Bool.is_numeric());
        assert!(!Type::Void.is_numeric());
    }
}
