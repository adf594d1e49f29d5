//! Diagnostics and error reporting for Wabbit
//!
//! Every front-end failure is a [`CompileError`]: a kind from the language's error taxonomy, a message naming the
//! offending token or name, and the span it points at. [`format_error`] renders one with source context via `miette`.

use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, MietteDiagnostic, NamedSource, Report};
use thiserror::Error;

use crate::ast::Span;

/// A compile-time error with location information
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {}:{}: {message}", .span.line, .span.column)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lex, message, span)
    }

    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Parse, message, span)
    }

    pub fn name(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Name, message, span)
    }

    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Type, message, span)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Parse,
    Name,
    Type,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "LexError"),
            ErrorKind::Parse => write!(f, "ParseError"),
            ErrorKind::Name => write!(f, "NameError"),
            ErrorKind::Type => write!(f, "TypeError"),
        }
    }
}

/// Render an error with source context.
///
/// ## Notes
/// - Output is plain text (no ANSI colors) so it is stable in tests and logs.
/// - Notes and hints are folded into the report's help section.
pub fn format_error(file_name: &str, source: &str, error: &CompileError) -> String {
    let start = error.span.start.min(source.len());
    let len = error.span.end.saturating_sub(error.span.start).max(1);
    let len = len.min(source.len().saturating_sub(start));

    let mut diagnostic = MietteDiagnostic::new(format!("{}: {}", error.kind, error.message))
        .with_label(LabeledSpan::at(start..start + len, "here"));
    let help: Vec<String> = error
        .notes
        .iter()
        .map(|n| format!("note: {n}"))
        .chain(error.hints.iter().map(|h| format!("hint: {h}")))
        .collect();
    if !help.is_empty() {
        diagnostic = diagnostic.with_help(help.join("\n"));
    }

    let report = Report::new(diagnostic).with_source_code(NamedSource::new(file_name, source.to_string()));
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut out, &*report).is_err() {
        // Fall back to the one-line form if rendering fails.
        return format!("{file_name}:{error}\n");
    }
    out
}

// ============================================================================
// Error catalog: common resolver errors
// ============================================================================

/// Constructors for the diagnostics the resolver reports most often, so wording stays consistent.
pub mod errors {
    use super::*;

    pub fn undefined_variable(name: &str, span: Span) -> CompileError {
        CompileError::name(format!("undefined name '{name}'"), span)
            .with_hint("declare it with `var` or `const` before using it")
    }

    pub fn undefined_function(name: &str, span: Span) -> CompileError {
        CompileError::name(format!("undefined function '{name}'"), span)
    }

    pub fn unknown_type(name: &str, span: Span) -> CompileError {
        CompileError::name(format!("unknown type '{name}'"), span)
            .with_note("the primitive types are int, float, char and bool")
    }

    pub fn duplicate_definition(name: &str, span: Span, first: Span) -> CompileError {
        CompileError::name(format!("'{name}' is already declared in this scope"), span)
            .with_note(format!("'{name}' was first declared at {first}"))
    }

    pub fn type_mismatch(expected: &str, found: &str, span: Span) -> CompileError {
        let mut error = CompileError::type_error(format!("expected '{expected}', found '{found}'"), span);
        if matches!((expected, found), ("int", "float") | ("float", "int")) {
            error = error.with_note("Wabbit never converts between int and float implicitly");
        }
        error
    }

    pub fn assign_to_const(name: &str, span: Span) -> CompileError {
        CompileError::type_error(format!("cannot assign to constant '{name}'"), span)
            .with_hint(format!("declare '{name}' with `var` to make it mutable"))
    }

    pub fn arity_mismatch(name: &str, expected: usize, found: usize, span: Span) -> CompileError {
        CompileError::type_error(
            format!("function '{name}' takes {expected} argument(s) but {found} were supplied"),
            span,
        )
    }

    pub fn outside_loop(keyword: &str, span: Span) -> CompileError {
        CompileError::type_error(format!("'{keyword}' outside of a while loop"), span)
    }
}
