//! Abstract Syntax Tree definitions for Wabbit
//!
//! The tree is produced once by the parser and never mutated afterwards. Each node exclusively owns its children;
//! there are no parent links. Passes that need upward context (enclosing loop, enclosing function) carry it
//! explicitly.

use std::fmt;

use wabbit_core::lang::operators::{self, OperatorId};

/// Source location span: byte offsets plus the 1-based line/column of `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Smallest span covering both; the position is taken from whichever starts first.
    pub fn merge(self, other: Span) -> Span {
        let (first, _) = if self.start <= other.start { (self, other) } else { (other, self) };
        Span {
            start: first.start,
            end: self.end.max(other.end),
            line: first.line,
            column: first.column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A program is a sequence of statements executed top to bottom.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Spanned<Statement>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Var(VarDecl),
    Const(ConstDecl),
    Func(FuncDecl),
    If(IfStmt),
    While(WhileStmt),
    Break,
    Continue,
    Return(Option<Spanned<Expr>>),
    Print(Spanned<Expr>),
    /// A `{ ... }` block in statement position: a new scope, no value.
    Block(Block),
    /// An expression evaluated for its effect, e.g. `x = 3;` or `f();`.
    Expr(Spanned<Expr>),
}

/// `var name [type] [= value];` (at least one of the type and the initializer is present)
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Spanned<Ident>,
    pub ty: Option<Spanned<Ident>>,
    pub init: Option<Spanned<Expr>>,
}

/// `const name [type] = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Spanned<Ident>,
    pub ty: Option<Spanned<Ident>>,
    pub init: Spanned<Expr>,
}

/// `func name(a int, b int) [type] { ... }`; a missing return type means the function is void.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Spanned<Ident>,
    pub params: Vec<Spanned<Param>>,
    pub return_type: Option<Spanned<Ident>>,
    pub body: Spanned<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: Spanned<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_branch: Spanned<Block>,
    /// `else if` is represented as an else block holding a single `if` statement.
    pub else_branch: Option<Spanned<Block>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Spanned<Block>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Spanned<Statement>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// A bare variable reference.
    Location(Ident),
    /// `location = value`; right-associative, evaluates to the assigned value.
    Assign(Spanned<Ident>, Box<Spanned<Expr>>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Call(Spanned<Ident>, Vec<Spanned<Expr>>),
    /// A block used as a value: the value of its final expression statement.
    Block(Block),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i32),
    Float(f64),
    Char(char),
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => {
                // `Display` for f64 never uses exponent notation and round-trips exactly.
                let text = v.to_string();
                if text.contains('.') { write!(f, "{text}") } else { write!(f, "{text}.0") }
            }
            Literal::Char(c) => write!(f, "'{}'", escape_char(*c)),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Spell a character the way it must appear between single quotes.
pub fn escape_char(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\0' => "\\0".to_string(),
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        c => c.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,
}

impl BinaryOp {
    /// Map an infix operator token to its binary operation (`=` is not a binary operation).
    pub fn from_operator(id: OperatorId) -> Option<Self> {
        Some(match id {
            OperatorId::Plus => BinaryOp::Add,
            OperatorId::Minus => BinaryOp::Sub,
            OperatorId::Star => BinaryOp::Mul,
            OperatorId::Slash => BinaryOp::Div,
            OperatorId::Lt => BinaryOp::Lt,
            OperatorId::LtEq => BinaryOp::LtEq,
            OperatorId::Gt => BinaryOp::Gt,
            OperatorId::GtEq => BinaryOp::GtEq,
            OperatorId::EqEq => BinaryOp::Eq,
            OperatorId::NotEq => BinaryOp::NotEq,
            OperatorId::AndAnd => BinaryOp::And,
            OperatorId::OrOr => BinaryOp::Or,
            OperatorId::Bang | OperatorId::Eq => return None,
        })
    }

    pub fn operator(self) -> OperatorId {
        match self {
            BinaryOp::Add => OperatorId::Plus,
            BinaryOp::Sub => OperatorId::Minus,
            BinaryOp::Mul => OperatorId::Star,
            BinaryOp::Div => OperatorId::Slash,
            BinaryOp::Lt => OperatorId::Lt,
            BinaryOp::LtEq => OperatorId::LtEq,
            BinaryOp::Gt => OperatorId::Gt,
            BinaryOp::GtEq => OperatorId::GtEq,
            BinaryOp::Eq => OperatorId::EqEq,
            BinaryOp::NotEq => OperatorId::NotEq,
            BinaryOp::And => OperatorId::AndAnd,
            BinaryOp::Or => OperatorId::OrOr,
        }
    }

    pub fn precedence(self) -> u8 {
        operators::precedence(self.operator())
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div)
    }

    pub fn is_comparison(self) -> bool {
        operators::is_comparison(self.operator())
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(operators::as_str(self.operator()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Pos,
    Neg,
    Not,
}

impl UnaryOp {
    pub fn from_operator(id: OperatorId) -> Option<Self> {
        match id {
            OperatorId::Plus => Some(UnaryOp::Pos),
            OperatorId::Minus => Some(UnaryOp::Neg),
            OperatorId::Bang => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn operator(self) -> OperatorId {
        match self {
            UnaryOp::Pos => OperatorId::Plus,
            UnaryOp::Neg => OperatorId::Minus,
            UnaryOp::Not => OperatorId::Bang,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(operators::as_str(self.operator()))
    }
}

// ============================================================================
// Structural comparison
// ============================================================================

impl Program {
    /// A copy with every span reset to `Span::default()`.
    ///
    /// Two programs that differ only in layout, such as a source file and its formatted text, compare equal after
    /// this.
    pub fn without_spans(&self) -> Program {
        Program {
            statements: strip_statements(&self.statements),
        }
    }
}

fn unspanned<T>(node: T) -> Spanned<T> {
    Spanned::new(node, Span::default())
}

fn strip_ident(name: &Spanned<Ident>) -> Spanned<Ident> {
    unspanned(name.node.clone())
}

fn strip_statements(statements: &[Spanned<Statement>]) -> Vec<Spanned<Statement>> {
    statements.iter().map(|s| unspanned(strip_statement(&s.node))).collect()
}

fn strip_block(block: &Block) -> Block {
    Block {
        statements: strip_statements(&block.statements),
    }
}

fn strip_body(block: &Spanned<Block>) -> Spanned<Block> {
    unspanned(strip_block(&block.node))
}

fn strip_statement(statement: &Statement) -> Statement {
    match statement {
        Statement::Var(decl) => Statement::Var(VarDecl {
            name: strip_ident(&decl.name),
            ty: decl.ty.as_ref().map(strip_ident),
            init: decl.init.as_ref().map(strip_expr),
        }),
        Statement::Const(decl) => Statement::Const(ConstDecl {
            name: strip_ident(&decl.name),
            ty: decl.ty.as_ref().map(strip_ident),
            init: strip_expr(&decl.init),
        }),
        Statement::Func(decl) => Statement::Func(FuncDecl {
            name: strip_ident(&decl.name),
            params: decl
                .params
                .iter()
                .map(|p| {
                    unspanned(Param {
                        name: p.node.name.clone(),
                        ty: strip_ident(&p.node.ty),
                    })
                })
                .collect(),
            return_type: decl.return_type.as_ref().map(strip_ident),
            body: strip_body(&decl.body),
        }),
        Statement::If(stmt) => Statement::If(IfStmt {
            condition: strip_expr(&stmt.condition),
            then_branch: strip_body(&stmt.then_branch),
            else_branch: stmt.else_branch.as_ref().map(strip_body),
        }),
        Statement::While(stmt) => Statement::While(WhileStmt {
            condition: strip_expr(&stmt.condition),
            body: strip_body(&stmt.body),
        }),
        Statement::Break => Statement::Break,
        Statement::Continue => Statement::Continue,
        Statement::Return(value) => Statement::Return(value.as_ref().map(strip_expr)),
        Statement::Print(value) => Statement::Print(strip_expr(value)),
        Statement::Block(block) => Statement::Block(strip_block(block)),
        Statement::Expr(value) => Statement::Expr(strip_expr(value)),
    }
}

fn strip_expr(expr: &Spanned<Expr>) -> Spanned<Expr> {
    unspanned(match &expr.node {
        Expr::Literal(literal) => Expr::Literal(*literal),
        Expr::Location(name) => Expr::Location(name.clone()),
        Expr::Assign(name, value) => Expr::Assign(strip_ident(name), Box::new(strip_expr(value))),
        Expr::Binary(left, op, right) => Expr::Binary(Box::new(strip_expr(left)), *op, Box::new(strip_expr(right))),
        Expr::Unary(op, operand) => Expr::Unary(*op, Box::new(strip_expr(operand))),
        Expr::Call(name, args) => Expr::Call(strip_ident(name), args.iter().map(strip_expr).collect()),
        Expr::Block(block) => Expr::Block(strip_block(block)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge_keeps_earliest_position() {
        let a = Span::new(4, 6, 1, 5);
        let b = Span::new(10, 12, 2, 3);
        assert_eq!(a.merge(b), Span::new(4, 12, 1, 5));
        assert_eq!(b.merge(a), Span::new(4, 12, 1, 5));
    }

    #[test]
    fn test_float_literal_always_has_a_point() {
        assert_eq!(Literal::Float(2.0).to_string(), "2.0");
        assert_eq!(Literal::Float(0.5).to_string(), "0.5");
        assert_eq!(Literal::Float(1e20).to_string(), "100000000000000000000.0");
    }

    #[test]
    fn test_char_literal_escapes() {
        assert_eq!(Literal::Char('\n').to_string(), "'\\n'");
        assert_eq!(Literal::Char('\'').to_string(), "'\\''");
        assert_eq!(Literal::Char('a').to_string(), "'a'");
    }

    #[test]
    fn test_without_spans_ignores_layout_only() {
        let parse = |source: &str| crate::parser::parse_source(source).unwrap();
        let compact = parse("func f(a int) int { if a < 1 { return -a; } return f(a - 1); } print f(3);");
        let spread = parse(concat!(
            "func f(a int) int {\n",
            "    if a < 1 {\n",
            "        return -a;\n",
            "    }\n",
            "    return f(a - 1);\n",
            "}\n",
            "print f(3);\n",
        ));
        assert_ne!(compact, spread);
        assert_eq!(compact.without_spans(), spread.without_spans());

        let other = parse("func f(a int) int { if a < 1 { return a; } return f(a - 1); } print f(3);");
        assert_ne!(compact.without_spans(), other.without_spans());
    }

    #[test]
    fn test_binary_op_registry_round_trip() {
        for op in [BinaryOp::Add, BinaryOp::Div, BinaryOp::NotEq, BinaryOp::And, BinaryOp::Or] {
            assert_eq!(BinaryOp::from_operator(op.operator()), Some(op));
        }
        assert_eq!(BinaryOp::from_operator(OperatorId::Eq), None);
    }
}
