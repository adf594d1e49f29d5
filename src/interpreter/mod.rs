//! Tree-walking interpreter for resolved Wabbit programs.
//!
//! Executes a [`typed_ast::Program`] directly. Output goes through the same `wabbit_runtime::write_*` functions the
//! compiled backend calls through the C ABI, so both back ends print identical bytes.
//!
//! ## Notes
//!
//! - **Storage**: globals live in one slot vector for the whole run. Each call gets a fresh [`Frame`] with one slot
//!   per local the resolver allocated for that function, so a function sees globals and its own locals only.
//! - **Control flow**: every statement returns a [`Flow`]. Loops consume `Break`/`Continue`, calls consume `Return`.
//!   Errors are reserved for genuine failures.
//! - **Errors**: a [`RuntimeError`] is either a real run-time failure (integer division by zero or overflow, output
//!   failure, stack exhaustion) or an `Internal` defect, i.e. a shape the resolver should have rejected.
//! - **Stack**: the entry points run on a dedicated thread (see [`crate::stack`]) and recursion is bounded by the
//!   stack actually used, not by a call count, so any recursion a compiled program survives runs here too.
//!
//! ## Examples
//!
//! ```rust
//! let mut out = Vec::new();
//! wabbit::interpreter::run_source("print 6 * 7; print 'o'; print 'k'; print '\\n';", &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "42\nok\n");
//! ```

mod eval;
mod exec;
pub mod value;


use std::io::Write;

use thiserror::Error;

use crate::frontend::diagnostics::CompileError;
use crate::stack;
use crate::frontend::typed_ast::{Local, Place, Program, Span, Type};
pub use value::Value;

/// A failure while running a resolved program.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("RuntimeError at {span}: integer division by zero")]
    DivisionByZero { span: Span },

    #[error("RuntimeError at {span}: integer division overflow")]
    IntegerOverflow { span: Span },

    #[error("RuntimeError at {span}: stack overflow after {depth} nested calls")]
    StackOverflow { span: Span, depth: usize },

    #[error("failed to write program output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to start the interpreter thread: {0}")]
    Spawn(std::io::Error),

    /// A resolver invariant did not hold. Always a bug.
    #[error("internal interpreter error: {0}")]
    Internal(String),
}

/// Any failure of [`run_source`]: a front-end diagnostic or a run-time error.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Non-local control flow produced by executing a statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// Local slots of one activation (a function call, or the top-level body).
#[derive(Debug)]
pub(crate) struct Frame<'p> {
    locals: &'p [Local],
    slots: Vec<Value>,
}

impl<'p> Frame<'p> {
    pub(crate) fn new(locals: &'p [Local]) -> Self {
        Self {
            locals,
            slots: locals.iter().map(|l| Value::default_for(l.ty)).collect(),
        }
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut Value, RuntimeError> {
        self.slots
            .get_mut(slot)
            .ok_or_else(|| RuntimeError::Internal(format!("local slot {slot} out of range")))
    }
}

/// Options for one interpreter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Stack size of the thread the program runs on, in bytes.
    pub stack_size: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            stack_size: stack::LARGE_STACK_SIZE,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = bytes;
        self
    }
}

/// Interpreter state for one run of one program.
///
/// Must run on a thread whose stack holds at least `stack_budget` bytes below the point where [`Interpreter::run`]
/// starts; the entry points below guarantee that.
pub(crate) struct Interpreter<'p, W: Write> {
    program: &'p Program,
    globals: Vec<Value>,
    out: W,
    /// Nested calls in progress, for the overflow message.
    depth: usize,
    stack_base: usize,
    stack_budget: usize,
}

impl<'p, W: Write> Interpreter<'p, W> {
    pub(crate) fn new(program: &'p Program, out: W, stack_budget: usize) -> Self {
        Self {
            program,
            globals: program.globals.iter().map(|g| Value::default_for(g.ty)).collect(),
            out,
            depth: 0,
            stack_base: stack::stack_position(),
            stack_budget,
        }
    }

    /// Execute the top-level statements in order, then flush the output.
    pub(crate) fn run(&mut self) -> Result<(), RuntimeError> {
        self.stack_base = stack::stack_position();
        let program = self.program;
        let mut frame = Frame::new(&program.body_locals);
        match self.exec_stmts(&program.body, &mut frame)? {
            Flow::Normal => {}
            flow => return Err(RuntimeError::Internal(format!("{flow:?} escaped the top level"))),
        }
        self.out.flush()?;
        Ok(())
    }

    /// Fail once this thread has used up the stack granted to the run.
    pub(crate) fn check_stack(&self, span: Span) -> Result<(), RuntimeError> {
        if self.stack_base.abs_diff(stack::stack_position()) > self.stack_budget {
            return Err(RuntimeError::StackOverflow { span, depth: self.depth });
        }
        Ok(())
    }

    // ========================================================================
    // Storage
    // ========================================================================

    fn load(&self, place: Place, frame: &Frame<'_>) -> Result<Value, RuntimeError> {
        let value = match place {
            Place::Global(id) => self.globals.get(id),
            Place::Local(slot) => frame.slots.get(slot),
        };
        value
            .copied()
            .ok_or_else(|| RuntimeError::Internal(format!("{place:?} is not allocated")))
    }

    fn store(&mut self, place: Place, value: Value, frame: &mut Frame<'_>) -> Result<(), RuntimeError> {
        let target = match place {
            Place::Global(id) => self
                .globals
                .get_mut(id)
                .ok_or_else(|| RuntimeError::Internal(format!("global {id} is not allocated")))?,
            Place::Local(slot) => frame.slot_mut(slot)?,
        };
        *target = value;
        Ok(())
    }

    fn place_type(&self, place: Place, frame: &Frame<'_>) -> Result<Type, RuntimeError> {
        let ty = match place {
            Place::Global(id) => self.program.globals.get(id).map(|g| g.ty),
            Place::Local(slot) => frame.locals.get(slot).map(|l| l.ty),
        };
        ty.ok_or_else(|| RuntimeError::Internal(format!("{place:?} has no declaration")))
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Print a value through the runtime function its type selects.
    fn print_value(&mut self, value: Value) -> Result<(), RuntimeError> {
        match value {
            Value::Int(v) => wabbit_runtime::write_int(&mut self.out, v)?,
            Value::Float(v) => wabbit_runtime::write_float(&mut self.out, v)?,
            Value::Bool(b) => wabbit_runtime::write_bool(&mut self.out, i32::from(b))?,
            Value::Char(c) => wabbit_runtime::write_char(&mut self.out, c as i32)?,
            Value::Void => return Err(RuntimeError::Internal("attempted to print a void value".to_string())),
        }
        Ok(())
    }
}

/// Run a resolved program, writing its output to `out`.
pub fn interpret<W: Write + Send>(program: &Program, out: W) -> Result<(), RuntimeError> {
    interpret_with_config(program, out, &RunConfig::default())
}

/// Run a resolved program on a worker thread sized by `config`.
#[tracing::instrument(skip_all, fields(functions = program.functions.len(), globals = program.globals.len()))]
pub fn interpret_with_config<W: Write + Send>(
    program: &Program,
    out: W,
    config: &RunConfig,
) -> Result<(), RuntimeError> {
    let budget = stack::budget(config.stack_size);
    stack::with_stack(config.stack_size, || Interpreter::new(program, out, budget).run())
        .map_err(RuntimeError::Spawn)?
}

/// Lex, parse, resolve and run a source string.
///
/// ## Errors
/// The first front-end diagnostic, or the run-time error that stopped execution. Output printed before a run-time
/// error has already been written to `out`.
pub fn run_source<W: Write + Send>(source: &str, out: W) -> Result<(), RunError> {
    run_source_with_config(source, out, &RunConfig::default())
}

/// [`run_source`] with an explicit [`RunConfig`].
///
/// The front end runs on the same worker thread, so deeply nested source is parsed, resolved and dropped there too.
pub fn run_source_with_config<W: Write + Send>(source: &str, out: W, config: &RunConfig) -> Result<(), RunError> {
    let budget = stack::budget(config.stack_size);
    stack::with_stack(config.stack_size, || -> Result<(), RunError> {
        let program = crate::frontend::check_source(source)?;
        Interpreter::new(&program, out, budget).run()?;
        Ok(())
    })
    .map_err(RuntimeError::Spawn)?
}

/// Run a source string and capture everything it prints.
pub fn run_to_string(source: &str) -> Result<String, RunError> {
    let mut out = Vec::new();
    run_source(source, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
