//! Wabbit language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords, operators, punctuation, the
//! primitive types and the print runtime ABI.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings/metadata via registry
//! tables instead of scattering string comparisons across the lexer, parser, formatter and code generator.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - Every table is ordered by its id's discriminant, so `info_for` is a direct index. The guardrail tests in
//!   `tests/lang_registry_guardrails.rs` keep that true.
//!
//! ## Examples
//! ```rust
//! use wabbit_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("while"), Some(KeywordId::While));
//! assert_eq!(keywords::as_str(KeywordId::While), "while");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod runtime;
pub mod types;
