//! Expression evaluation.

use std::io::Write;

use wabbit_core::numeric::{self, ArithError};

use crate::frontend::typed_ast::{BinaryOp, Expr, ExprKind, FuncId, LogicalOp, Span, Type, UnaryOp};

use super::{Flow, Frame, Interpreter, RuntimeError, Value};

impl<'p, W: Write> Interpreter<'p, W> {
    pub(crate) fn eval(&mut self, expr: &'p Expr, frame: &mut Frame<'p>) -> Result<Value, RuntimeError> {
        self.check_stack(expr.span)?;
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Value::from(*literal)),
            ExprKind::Load(place) => self.load(*place, frame),
            ExprKind::Assign { place, value } => {
                let value = self.eval(value, frame)?;
                self.store(*place, value, frame)?;
                Ok(value)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left, frame)?;
                let right = self.eval(right, frame)?;
                binary(*op, left, right, expr.span)
            }
            ExprKind::Logical { op, left, right } => {
                let left = self.eval_bool(left, frame)?;
                let result = match op {
                    LogicalOp::And => left && self.eval_bool(right, frame)?,
                    LogicalOp::Or => left || self.eval_bool(right, frame)?,
                };
                Ok(Value::Bool(result))
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.eval(operand, frame)?;
                unary(*op, operand)
            }
            ExprKind::Call { func, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg, frame)?);
                }
                self.call(*func, values, expr.span)
            }
            ExprKind::Block { stmts, value } => match self.exec_stmts(stmts, frame)? {
                Flow::Normal => self.eval(value, frame),
                flow => Err(RuntimeError::Internal(format!("{flow:?} escaped a block expression"))),
            },
        }
    }

    pub(crate) fn eval_bool(&mut self, expr: &'p Expr, frame: &mut Frame<'p>) -> Result<bool, RuntimeError> {
        match self.eval(expr, frame)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::Internal(format!("expected a bool, got {other}"))),
        }
    }

    /// Call a function in a fresh frame chained to the globals only.
    fn call(&mut self, func: FuncId, args: Vec<Value>, span: Span) -> Result<Value, RuntimeError> {
        let program = self.program;
        let function = program
            .functions
            .get(func)
            .ok_or_else(|| RuntimeError::Internal(format!("function {func} does not exist")))?;
        self.check_stack(span)?;

        let mut frame = Frame::new(&function.locals);
        if args.len() != function.param_count {
            return Err(RuntimeError::Internal(format!(
                "'{}' called with {} arguments",
                function.name,
                args.len()
            )));
        }
        frame.slots[..args.len()].copy_from_slice(&args);

        self.depth += 1;
        tracing::trace!(function = %function.name, depth = self.depth, "call");
        let flow = self.exec_stmts(&function.body, &mut frame);
        self.depth -= 1;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal if function.return_type == Type::Void => Ok(Value::Void),
            Flow::Normal => Err(RuntimeError::Internal(format!(
                "'{}' reached the end of its body without returning",
                function.name
            ))),
            flow => Err(RuntimeError::Internal(format!("{flow:?} escaped function '{}'", function.name))),
        }
    }
}

fn binary(op: BinaryOp, left: Value, right: Value, span: Span) -> Result<Value, RuntimeError> {
    let value = match (left, right) {
        (Value::Int(a), Value::Int(b)) => match op {
            BinaryOp::Add => Value::Int(numeric::int_add(a, b)),
            BinaryOp::Sub => Value::Int(numeric::int_sub(a, b)),
            BinaryOp::Mul => Value::Int(numeric::int_mul(a, b)),
            BinaryOp::Div => Value::Int(numeric::int_div(a, b).map_err(|e| arith_error(e, span))?),
            _ => compare(op, &a, &b)?,
        },
        (Value::Float(a), Value::Float(b)) => match op {
            BinaryOp::Add => Value::Float(a + b),
            BinaryOp::Sub => Value::Float(a - b),
            BinaryOp::Mul => Value::Float(a * b),
            BinaryOp::Div => Value::Float(a / b),
            _ => compare(op, &a, &b)?,
        },
        (Value::Char(a), Value::Char(b)) => compare(op, &a, &b)?,
        (Value::Bool(a), Value::Bool(b)) => compare(op, &a, &b)?,
        (left, right) => {
            return Err(RuntimeError::Internal(format!(
                "operator '{op}' applied to {left} and {right}"
            )));
        }
    };
    Ok(value)
}

/// Comparison operators for any ordered type. IEEE semantics for floats: NaN is unordered and unequal to itself.
fn compare<T: PartialOrd>(op: BinaryOp, a: &T, b: &T) -> Result<Value, RuntimeError> {
    let result = match op {
        BinaryOp::Lt => a < b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::GtEq => a >= b,
        BinaryOp::Eq => a == b,
        BinaryOp::NotEq => a != b,
        _ => return Err(RuntimeError::Internal(format!("operator '{op}' is not a comparison"))),
    };
    Ok(Value::Bool(result))
}

fn unary(op: UnaryOp, operand: Value) -> Result<Value, RuntimeError> {
    match (op, operand) {
        (UnaryOp::Pos, Value::Int(_) | Value::Float(_)) => Ok(operand),
        (UnaryOp::Neg, Value::Int(v)) => Ok(Value::Int(numeric::int_neg(v))),
        (UnaryOp::Neg, Value::Float(v)) => Ok(Value::Float(-v)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (op, operand) => Err(RuntimeError::Internal(format!("unary '{op}' applied to {operand}"))),
    }
}

fn arith_error(error: ArithError, span: Span) -> RuntimeError {
    match error {
        ArithError::DivisionByZero => RuntimeError::DivisionByZero { span },
        ArithError::DivisionOverflow => RuntimeError::IntegerOverflow { span },
    }
}
