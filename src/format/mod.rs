//! Wabbit Code Formatter
//!
//! Prints a parsed program back as canonical source:
//! - 4-space indentation, one statement per line
//! - spaces around binary operators and after commas
//! - parentheses only where precedence or associativity needs them
//! - a blank line around top-level functions
//!
//! Comments are not part of the syntax tree and do not survive formatting.

mod config;
mod formatter;
mod writer;

pub use config::FormatConfig;
pub use formatter::Formatter;

use crate::frontend::ast::Program;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::parser;

/// Format a parsed program
pub fn format_program(program: &Program, config: &FormatConfig) -> String {
    Formatter::new(config.clone()).format(program)
}

/// Format Wabbit source code with default settings
pub fn format_source(source: &str) -> Result<String, CompileError> {
    format_source_with_config(source, &FormatConfig::default())
}

/// Format Wabbit source code with custom configuration
pub fn format_source_with_config(source: &str, config: &FormatConfig) -> Result<String, CompileError> {
    let program = parser::parse_source(source)?;
    Ok(format_program(&program, config))
}

/// Check if source code is already formatted
pub fn check_formatted(source: &str) -> Result<bool, CompileError> {
    Ok(source == format_source(source)?)
}

/// Line-by-line diff between `source` and its formatted form; `None` when already formatted.
pub fn format_diff(source: &str) -> Result<Option<String>, CompileError> {
    let formatted = format_source(source)?;
    if source == formatted {
        return Ok(None);
    }

    let mut diff = String::new();
    let original_lines: Vec<&str> = source.lines().collect();
    let formatted_lines: Vec<&str> = formatted.lines().collect();
    let max_lines = original_lines.len().max(formatted_lines.len());

    for i in 0..max_lines {
        let orig = original_lines.get(i).copied();
        let fmt = formatted_lines.get(i).copied();
        if orig == fmt {
            continue;
        }
        if let Some(orig) = orig {
            diff.push_str(&format!("-{:4} | {}\n", i + 1, orig));
        }
        if let Some(fmt) = fmt {
            diff.push_str(&format!("+{:4} | {}\n", i + 1, fmt));
        }
    }

    Ok(Some(diff))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source_invalid_syntax() {
        let err = format_source("func f(").unwrap_err();
        assert!(err.to_string().starts_with("ParseError"), "{err}");
    }

    #[test]
    fn test_format_source_empty() {
        assert_eq!(format_source("").unwrap(), "");
    }

    #[test]
    fn test_format_source_with_custom_config() {
        let config = FormatConfig::new().with_indent_width(2);
        let formatted = format_source_with_config("while true { break; }", &config).unwrap();
        assert_eq!(formatted, "while true {\n  break;\n}\n");
    }

    #[test]
    fn test_check_formatted() {
        assert!(check_formatted("print 1;\n").unwrap());
        assert!(!check_formatted("print   1;").unwrap());
    }

    #[test]
    fn test_format_is_idempotent() {
        let source = "func f(n int) int { if n < 2 { return 1; } else { return n * f(n - 1); } } print f(5);";
        let once = format_source(source).unwrap();
        assert_eq!(format_source(&once).unwrap(), once);
    }

    #[test]
    fn test_format_diff() {
        assert_eq!(format_diff("print 1;\n").unwrap(), None);
        let diff = format_diff("print 1;\nprint   2;\n").unwrap().unwrap();
        assert_eq!(diff, "-   2 | print   2;\n+   2 | print 2;\n");
    }

    #[test]
    fn test_comments_are_dropped() {
        assert_eq!(format_source("// header\nprint 1; /* trailing */").unwrap(), "print 1;\n");
    }
}
