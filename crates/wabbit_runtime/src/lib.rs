//! Runtime support library for compiled Wabbit programs.
//!
//! Compiled modules declare four external functions and call them for `print` statements:
//!
//! | symbol        | parameter | output                                 |
//! |---------------|-----------|----------------------------------------|
//! | `print_int`   | `i32`     | decimal value, newline                 |
//! | `print_float` | `double`  | `%f`-style value, newline              |
//! | `print_bool`  | `i32`     | `true` if the argument is `> 0`, else `false`, newline |
//! | `print_char`  | `i32`     | the character for the codepoint, no newline |
//!
//! The `write_*` functions are the same operations over any [`Write`], which is how the interpreter prints. The C ABI
//! entry points lock stdout, write, and flush immediately: a compiled program's `main` is not a Rust `main`, so
//! nothing else would flush buffered output at exit.
//!
//! ## Examples
//! ```rust
//! let mut out = Vec::new();
//! wabbit_runtime::write_int(&mut out, 120).unwrap();
//! wabbit_runtime::write_char(&mut out, 'x' as i32).unwrap();
//! assert_eq!(out, b"120\nx");
//! ```

#![deny(clippy::unwrap_used)]

use std::io::{self, Write};

use wabbit_core::render;

pub fn write_int<W: Write + ?Sized>(out: &mut W, v: i32) -> io::Result<()> {
    writeln!(out, "{}", render::int(v))
}

pub fn write_float<W: Write + ?Sized>(out: &mut W, v: f64) -> io::Result<()> {
    writeln!(out, "{}", render::float(v))
}

/// `v` follows the ABI convention: any value `> 0` is `true`.
pub fn write_bool<W: Write + ?Sized>(out: &mut W, v: i32) -> io::Result<()> {
    writeln!(out, "{}", render::bool_abi(v))
}

pub fn write_char<W: Write + ?Sized>(out: &mut W, c: i32) -> io::Result<()> {
    write!(out, "{}", render::char_abi(c))
}

// ============================================================================
// C ABI entry points
// ============================================================================

fn emit(f: impl FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>) {
    let mut out = io::stdout().lock();
    // Like printf, a failed write to stdout is not reported to the program.
    let _ = f(&mut out).and_then(|()| out.flush());
}

#[unsafe(no_mangle)]
pub extern "C" fn print_int(v: i32) {
    emit(|out| write_int(out, v));
}

#[unsafe(no_mangle)]
pub extern "C" fn print_float(v: f64) {
    emit(|out| write_float(out, v));
}

#[unsafe(no_mangle)]
pub extern "C" fn print_bool(v: i32) {
    emit(|out| write_bool(out, v));
}

#[unsafe(no_mangle)]
pub extern "C" fn print_char(c: i32) {
    emit(|out| write_char(out, c));
}
