//! LLVM IR generation.
//!
//! ```text
//! typed_ast::Program → IrCodegen → textual LLVM IR module
//! ```
//!
//! ## Layout of a generated module
//!
//! - `declare` lines for the four runtime print functions;
//! - one zero-initialized `@gv.<name>` global per top-level `var`/`const`;
//! - one `@fn.<name>` definition per Wabbit function;
//! - `define i32 @main()`, holding the top-level statements and returning `0`.
//!
//! Every variable, parameters included, lives in a stack slot allocated in the entry block; values are loaded and
//! stored around each use. Temporaries are `%tN` and block labels `<hint>.N`.
//!
//! ## Examples
//!
//! ```rust
//! let program = wabbit::frontend::check_source("print 1 + 2;").unwrap();
//! let ir = wabbit::backend::generate(&program, "sum.wb").unwrap();
//! assert!(ir.contains("define i32 @main()"));
//! assert!(ir.contains("call void @print_int(i32"));
//! ```

mod builder;
mod codegen;
mod expr;
mod stmt;
pub mod types;

pub use builder::FunctionBuilder;
pub use codegen::{CodegenError, IrCodegen, generate};
