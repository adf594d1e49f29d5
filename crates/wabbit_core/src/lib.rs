//! Provide shared, pure semantic helpers and canonical language vocabulary for Wabbit.
//!
//! Both the interpreter and the compiled runtime must produce byte-identical output for every valid program. Anything
//! that decides *what a value means* (integer overflow, division, how a value is printed) lives here so there is
//! exactly one definition of it.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no compiler-specific types.
//! - Current scope: canonical language vocabulary ([`lang`]), integer/float arithmetic policy ([`numeric`]) and print
//!   rendering ([`render`]).

pub mod lang;
pub mod numeric;
pub mod render;
