//! Module assembly and the code generation entry point.

use std::fmt::Write;

use thiserror::Error;
use wabbit_core::lang::runtime::PRINT_FUNCTIONS;

use crate::frontend::typed_ast::{Function, Local, Place, Program, Type};

use super::builder::FunctionBuilder;
use super::types::{ir_type, zero};

/// Error during IR generation.
///
/// The resolver rejects every ill-formed program, so any of these means the typed tree broke one of its invariants.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("internal code generation error: {0}")]
    Internal(String),
    #[error("failed to format IR: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Generates one LLVM IR module from a resolved program.
pub struct IrCodegen<'p> {
    program: &'p Program,
    source_name: String,
}

impl<'p> IrCodegen<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            source_name: "main.wb".to_string(),
        }
    }

    /// Name recorded as the module's `source_filename`.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    pub fn try_generate(&self) -> Result<String, CodegenError> {
        let mut out = String::new();
        let name = quote(&self.source_name);
        writeln!(out, "; ModuleID = {name}")?;
        writeln!(out, "source_filename = {name}")?;

        out.push('\n');
        for f in PRINT_FUNCTIONS {
            writeln!(out, "declare void @{}({})", f.symbol, f.param_ir_type)?;
        }

        if !self.program.globals.is_empty() {
            out.push('\n');
        }
        for global in &self.program.globals {
            writeln!(out, "@gv.{} = global {} {}", global.name, ir_type(global.ty), zero(global.ty)?)?;
        }

        for function in &self.program.functions {
            out.push('\n');
            out.push_str(&self.function(function)?);
        }

        out.push('\n');
        out.push_str(&self.main()?);
        Ok(out)
    }

    fn function(&self, function: &Function) -> Result<String, CodegenError> {
        let mut lowering = FunctionLowering::new(self.program, &function.locals);
        lowering.allocate_locals();

        let mut params = Vec::with_capacity(function.param_count);
        for (slot, param) in function.params().iter().enumerate() {
            let ty = ir_type(param.ty);
            params.push(format!("{ty} %a{slot}"));
            let ptr = lowering.local_ptr(slot)?;
            lowering.builder.emit(format!("store {ty} %a{slot}, ptr {ptr}"));
        }

        lowering.lower_stmts(&function.body)?;
        // The resolver guarantees non-void functions return on every path.
        let fallthrough = if function.return_type == Type::Void {
            "ret void"
        } else {
            "unreachable"
        };
        let body = lowering.finish(fallthrough);

        let mut out = String::new();
        writeln!(
            out,
            "define {} @fn.{}({}) {{",
            ir_type(function.return_type),
            function.name,
            params.join(", ")
        )?;
        out.push_str(&body);
        out.push_str("}\n");
        Ok(out)
    }

    fn main(&self) -> Result<String, CodegenError> {
        let mut lowering = FunctionLowering::new(self.program, &self.program.body_locals);
        lowering.allocate_locals();
        lowering.lower_stmts(&self.program.body)?;
        let body = lowering.finish("ret i32 0");

        let mut out = String::from("define i32 @main() {\n");
        out.push_str(&body);
        out.push_str("}\n");
        Ok(out)
    }
}

/// Generate the IR module for `program`, recording `source_name` as its source file.
#[tracing::instrument(skip(program), fields(functions = program.functions.len(), globals = program.globals.len()))]
pub fn generate(program: &Program, source_name: &str) -> Result<String, CodegenError> {
    let ir = IrCodegen::new(program).with_source_name(source_name).try_generate()?;
    tracing::debug!(bytes = ir.len(), "generated LLVM IR");
    Ok(ir)
}

/// Branch targets of the innermost enclosing loop.
#[derive(Debug)]
pub(super) struct LoopTargets {
    pub(super) continue_label: String,
    pub(super) break_label: String,
}

/// State for lowering one function (or the top-level body) into a [`FunctionBuilder`].
pub(super) struct FunctionLowering<'p> {
    pub(super) program: &'p Program,
    pub(super) locals: &'p [Local],
    pub(super) builder: FunctionBuilder,
    pub(super) loops: Vec<LoopTargets>,
}

impl<'p> FunctionLowering<'p> {
    fn new(program: &'p Program, locals: &'p [Local]) -> Self {
        Self {
            program,
            locals,
            builder: FunctionBuilder::new(),
            loops: Vec::new(),
        }
    }

    fn allocate_locals(&mut self) {
        for (slot, local) in self.locals.iter().enumerate() {
            let ptr = format!("%l{slot}.{}", local.name);
            self.builder.alloca(&ptr, ir_type(local.ty));
        }
    }

    fn local_ptr(&self, slot: usize) -> Result<String, CodegenError> {
        self.locals
            .get(slot)
            .map(|local| format!("%l{slot}.{}", local.name))
            .ok_or_else(|| CodegenError::Internal(format!("local slot {slot} out of range")))
    }

    /// Pointer operand and type of a variable's storage.
    pub(super) fn place(&self, place: Place) -> Result<(String, Type), CodegenError> {
        match place {
            Place::Global(id) => self
                .program
                .globals
                .get(id)
                .map(|g| (format!("@gv.{}", g.name), g.ty))
                .ok_or_else(|| CodegenError::Internal(format!("global {id} does not exist"))),
            Place::Local(slot) => {
                let ty = self.locals.get(slot).map(|l| l.ty);
                let ty = ty.ok_or_else(|| CodegenError::Internal(format!("local slot {slot} out of range")))?;
                Ok((self.local_ptr(slot)?, ty))
            }
        }
    }

    fn finish(mut self, fallthrough: &str) -> String {
        if !self.builder.is_terminated() {
            self.builder.terminate(fallthrough);
        }
        self.builder.finish()
    }
}

/// An LLVM string literal; `"` and `\` and non-printable bytes become `\XX` escapes.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for byte in s.bytes() {
        if byte == b'"' || byte == b'\\' || !(0x20..0x7f).contains(&byte) {
            let _ = write!(out, "\\{byte:02X}");
        } else {
            out.push(char::from(byte));
        }
    }
    out.push('"');
    out
}
