//! Expression lowering. Each expression lowers to an operand: a constant, a `%tN` temporary, or nothing for a call
//! to a void function.

use crate::frontend::typed_ast::{BinaryOp, Expr, ExprKind, LogicalOp, Type, UnaryOp};

use super::codegen::{CodegenError, FunctionLowering};
use super::types::{arithmetic, comparison, ir_type, literal};

impl FunctionLowering<'_> {
    pub(super) fn lower_expr(&mut self, expr: &Expr) -> Result<String, CodegenError> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(literal(*lit)),
            ExprKind::Load(place) => {
                let (ptr, ty) = self.place(*place)?;
                let t = self.builder.temp();
                self.builder.emit(format!("{t} = load {}, ptr {ptr}", ir_type(ty)));
                Ok(t)
            }
            ExprKind::Assign { place, value } => {
                let value = self.lower_expr(value)?;
                let (ptr, ty) = self.place(*place)?;
                self.builder.emit(format!("store {} {value}, ptr {ptr}", ir_type(ty)));
                Ok(value)
            }
            ExprKind::Binary { op, left, right } => self.lower_binary(*op, left, right),
            ExprKind::Logical { op, left, right } => self.lower_logical(*op, left, right),
            ExprKind::Unary { op, operand } => {
                let value = self.lower_expr(operand)?;
                let t = self.builder.temp();
                let instruction = match (op, operand.ty) {
                    (UnaryOp::Pos, _) => return Ok(value),
                    (UnaryOp::Neg, Type::Int) => format!("{t} = sub i32 0, {value}"),
                    (UnaryOp::Neg, Type::Float) => format!("{t} = fneg double {value}"),
                    (UnaryOp::Not, Type::Bool) => format!("{t} = xor i1 {value}, true"),
                    (op, ty) => {
                        return Err(CodegenError::Internal(format!("unary '{op}' on '{ty}'")));
                    }
                };
                self.builder.emit(instruction);
                Ok(t)
            }
            ExprKind::Call { func, args } => {
                let function = self
                    .program
                    .functions
                    .get(*func)
                    .ok_or_else(|| CodegenError::Internal(format!("function {func} does not exist")))?;
                let mut operands = Vec::with_capacity(args.len());
                for arg in args {
                    let value = self.lower_expr(arg)?;
                    operands.push(format!("{} {value}", ir_type(arg.ty)));
                }
                let call = format!(
                    "call {} @fn.{}({})",
                    ir_type(function.return_type),
                    function.name,
                    operands.join(", ")
                );
                if function.return_type == Type::Void {
                    self.builder.emit(call);
                    return Ok(String::new());
                }
                let t = self.builder.temp();
                self.builder.emit(format!("{t} = {call}"));
                Ok(t)
            }
            ExprKind::Block { stmts, value } => {
                self.lower_stmts(stmts)?;
                self.lower_expr(value)
            }
        }
    }

    fn lower_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<String, CodegenError> {
        let lhs = self.lower_expr(left)?;
        let rhs = self.lower_expr(right)?;
        let ty = left.ty;
        let instruction = arithmetic(op, ty)
            .or_else(|| comparison(op, ty))
            .ok_or_else(|| CodegenError::Internal(format!("binary '{op}' on '{ty}'")))?;
        let t = self.builder.temp();
        self.builder
            .emit(format!("{t} = {instruction} {} {lhs}, {rhs}", ir_type(ty)));
        Ok(t)
    }

    /// `&&` and `||` evaluate their right operand in a block of its own and merge the result with a `phi`.
    fn lower_logical(&mut self, op: LogicalOp, left: &Expr, right: &Expr) -> Result<String, CodegenError> {
        let lhs = self.lower_expr(left)?;
        let lhs_block = self.builder.current_label().to_string();
        let (rhs_label, end_label, short_circuit) = match op {
            LogicalOp::And => (self.builder.label("and.rhs"), self.builder.label("and.end"), "false"),
            LogicalOp::Or => (self.builder.label("or.rhs"), self.builder.label("or.end"), "true"),
        };
        let branch = match op {
            LogicalOp::And => format!("br i1 {lhs}, label %{rhs_label}, label %{end_label}"),
            LogicalOp::Or => format!("br i1 {lhs}, label %{end_label}, label %{rhs_label}"),
        };
        self.builder.terminate(branch);

        self.builder.start_block(&rhs_label);
        let rhs = self.lower_expr(right)?;
        let rhs_block = self.builder.current_label().to_string();

        self.builder.start_block(&end_label);
        let t = self.builder.temp();
        self.builder.emit(format!(
            "{t} = phi i1 [ {short_circuit}, %{lhs_block} ], [ {rhs}, %{rhs_block} ]"
        ));
        Ok(t)
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::generate;
    use crate::frontend::check_source;

    fn ir(source: &str) -> String {
        let program = match check_source(source) {
            Ok(program) => program,
            Err(e) => panic!("front end rejected test program: {e}"),
        };
        match generate(&program, "test.wb") {
            Ok(ir) => ir,
            Err(e) => panic!("codegen failed: {e}"),
        }
    }

    #[test]
    fn test_arithmetic_instructions() {
        let ir = ir("var a int = 7; var f float = 1.5; print a / 2 - a * 3; print f + f / f;");
        assert!(ir.contains("= sdiv i32 %t0, 2"), "{ir}");
        assert!(ir.contains("= mul i32 %t2, 3"), "{ir}");
        assert!(ir.contains("= sub i32 %t1, %t3"), "{ir}");
        assert!(ir.contains("= fdiv double"), "{ir}");
        assert!(ir.contains("= fadd double"), "{ir}");
    }

    #[test]
    fn test_unary_instructions() {
        let ir = ir("var a int = 1; var f float = 1.0; var b bool; print -a; print -f; print !b; print +a;");
        assert!(ir.contains("= sub i32 0, %t"), "{ir}");
        assert!(ir.contains("= fneg double %t"), "{ir}");
        assert!(ir.contains("= xor i1 %t"), "{ir}");
    }

    #[test]
    fn test_comparison_predicates() {
        let ir = ir("var c char = 'a'; var f float; print c < 'b'; print f != f; print true > false;");
        assert!(ir.contains("icmp slt i32 %t0, 98"), "{ir}");
        assert!(ir.contains("fcmp une double"), "{ir}");
        assert!(ir.contains("icmp ugt i1 true, false"), "{ir}");
    }

    #[test]
    fn test_and_short_circuits_through_phi() {
        let ir = ir("var a bool = true; print a && false;");
        assert!(ir.contains("br i1 %t0, label %and.rhs.0, label %and.end.1"), "{ir}");
        assert!(ir.contains("and.rhs.0:\n  br label %and.end.1\nand.end.1:\n"), "{ir}");
        assert!(ir.contains("%t1 = phi i1 [ false, %entry ], [ false, %and.rhs.0 ]"), "{ir}");
    }

    #[test]
    fn test_or_short_circuits_through_phi() {
        let ir = ir("var a bool; print a || true;");
        assert!(ir.contains("br i1 %t0, label %or.end.1, label %or.rhs.0"), "{ir}");
        assert!(ir.contains("%t1 = phi i1 [ true, %entry ], [ true, %or.rhs.0 ]"), "{ir}");
    }

    #[test]
    fn test_calls() {
        let ir = ir("func sq(x int) int { return x * x; } func log(c char) { print c; } log('a'); print sq(3);");
        assert!(ir.contains("  call void @fn.log(i32 97)\n"), "{ir}");
        assert!(ir.contains("%t0 = call i32 @fn.sq(i32 3)"), "{ir}");
    }

    #[test]
    fn test_assignment_yields_stored_value() {
        let ir = ir("var a int; var b int; a = b = 4;");
        assert!(ir.contains("store i32 4, ptr @gv.b\n  store i32 4, ptr @gv.a\n"), "{ir}");
    }

    #[test]
    fn test_block_expression_lowers_statements_then_value() {
        let ir = ir("print { var t int = 2; t * t; };");
        assert!(ir.contains("%l0.t = alloca i32"), "{ir}");
        assert!(ir.contains("store i32 2, ptr %l0.t"), "{ir}");
        assert!(ir.contains("call void @print_int(i32 %t2)"), "{ir}");
    }
}
