//! Property-based tests for the Wabbit toolchain
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use wabbit::format::format_source;
use wabbit::frontend::{lexer, parser};
use wabbit::interpreter::{RunError, run_to_string};

// =============================================================================
// Strategies
// =============================================================================

const KEYWORDS: &[&str] = &[
    "var", "const", "print", "if", "else", "while", "break", "continue", "return", "func", "true", "false", "int",
    "float", "char", "bool",
];

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}".prop_filter("Not a keyword", |s| !KEYWORDS.contains(&s.as_str()))
}

/// An integer expression, fully parenthesised, with the value it must evaluate to. `None` means evaluation fails
/// (division by zero or `i32::MIN / -1`).
fn int_expr() -> impl Strategy<Value = (String, Option<i32>)> {
    let leaf = (0i32..1000).prop_map(|n| (n.to_string(), Some(n)));
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|(src, v)| (format!("(-{src})"), v.map(i32::wrapping_neg))),
            (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/"]), inner).prop_map(
                |((ls, lv), op, (rs, rv))| {
                    let value = match (lv, rv) {
                        (Some(a), Some(b)) => match op {
                            "+" => Some(a.wrapping_add(b)),
                            "-" => Some(a.wrapping_sub(b)),
                            "*" => Some(a.wrapping_mul(b)),
                            _ => a.checked_div(b),
                        },
                        _ => None,
                    };
                    (format!("({ls} {op} {rs})"), value)
                }
            ),
        ]
    })
}

/// A boolean expression built from comparisons and logical operators, with its value.
fn bool_expr() -> impl Strategy<Value = (String, bool)> {
    let comparison = (0i32..50, prop::sample::select(vec!["<", "<=", ">", ">=", "==", "!="]), 0i32..50).prop_map(
        |(a, op, b)| {
            let value = match op {
                "<" => a < b,
                "<=" => a <= b,
                ">" => a > b,
                ">=" => a >= b,
                "==" => a == b,
                _ => a != b,
            };
            (format!("{a} {op} {b}"), value)
        },
    );
    comparison.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|(src, v)| (format!("!({src})"), !v)),
            (inner.clone(), inner.clone()).prop_map(|((ls, lv), (rs, rv))| (format!("({ls}) && ({rs})"), lv && rv)),
            (inner.clone(), inner).prop_map(|((ls, lv), (rs, rv))| (format!("({ls}) || ({rs})"), lv || rv)),
        ]
    })
}

/// A small program with globals, a function, a loop and a conditional.
fn program_strategy() -> impl Strategy<Value = String> {
    (ident_strategy(), ident_strategy(), 0i32..20, int_expr(), bool_expr()).prop_filter_map(
        "distinct names",
        |(f, v, n, (expr, value), (cond, _))| {
            if f == v || f == "acc" || v == "acc" {
                return None;
            }
            // Keep the program free of run-time errors.
            value?;
            Some(format!(
                "func {f}({v} int) int {{ var acc int = 0; while {v} > 0 {{ acc = acc + {v}; {v} = {v} - 1; }} \
                 return acc; }}\nvar {v} int = {n};\nif {cond} {{ print {f}({v}); }} else {{ print {expr}; }}\n"
            ))
        },
    )
}

// =============================================================================
// Evaluation Properties
// =============================================================================

proptest! {
    /// Property: integer arithmetic wraps like two's-complement i32 and division truncates toward zero
    #[test]
    fn int_arithmetic_matches_wrapping_i32((expr, expected) in int_expr()) {
        let result = run_to_string(&format!("print {expr};"));
        match expected {
            Some(v) => prop_assert_eq!(result.unwrap(), format!("{v}\n")),
            None => prop_assert!(matches!(result, Err(RunError::Runtime(_))), "{:?}", result),
        }
    }

    /// Property: comparisons and logical operators agree with Rust's bool semantics
    #[test]
    fn bool_logic_matches_rust((expr, expected) in bool_expr()) {
        prop_assert_eq!(run_to_string(&format!("print {expr};")).unwrap(), format!("{expected}\n"));
    }
}

// =============================================================================
// Format Properties
// =============================================================================

proptest! {
    /// Property: formatting is idempotent and keeps the program's behaviour
    #[test]
    fn format_preserves_behaviour(source in program_strategy()) {
        let formatted = format_source(&source).unwrap();
        prop_assert_eq!(format_source(&formatted).unwrap(), formatted.clone());
        prop_assert_eq!(run_to_string(&formatted).unwrap(), run_to_string(&source).unwrap());
    }

    /// Property: reparsing formatted source gives back the same tree, up to spans
    #[test]
    fn format_round_trips_the_tree(source in program_strategy()) {
        let original = parser::parse_source(&source).unwrap();
        let reparsed = parser::parse_source(&format_source(&source).unwrap()).unwrap();
        prop_assert_eq!(reparsed.without_spans(), original.without_spans());
    }

    /// Property: the formatter drops redundant parentheses without changing evaluation
    #[test]
    fn format_keeps_expression_values((expr, expected) in int_expr()) {
        prop_assume!(expected.is_some());
        let formatted = format_source(&format!("print {expr};")).unwrap();
        prop_assert_eq!(run_to_string(&formatted).unwrap(), run_to_string(&format!("print {expr};")).unwrap());
    }
}

// =============================================================================
// Robustness
// =============================================================================

proptest! {
    /// Property: the lexer and parser reject bad input with an error, never a panic
    #[test]
    fn frontend_never_panics(source in "[ -~\n]{0,64}") {
        if let Ok(tokens) = lexer::lex(&source) {
            let _ = parser::parse(&tokens);
        }
        let _ = wabbit::frontend::check_source(&source);
    }

    /// Property: identifiers survive lexing as a single name token
    #[test]
    fn identifiers_survive_lexing(ident in ident_strategy()) {
        let source = format!("print {ident};");
        let tokens = lexer::lex(&source).unwrap();
        // print, name, ';', EOF
        prop_assert_eq!(tokens.len(), 4);
    }
}
