//! Snapshot tests for `wabbit fmt`
//!
//! Review changes: `cargo insta review`

use wabbit::{FormatConfig, format_source, format_source_with_config};

fn fmt(source: &str) -> String {
    format_source(source).unwrap_or_else(|e| panic!("format failed: {e}\n{source}"))
}

#[test]
fn test_program_layout() {
    let source = "var n int=10;func fib(n int) int{if n<2{return n;}return fib(n-1)+fib(n-2);}\n\n\n\
                  var i int=0;while i<n{print fib(i);i=i+1;}";
    insta::assert_snapshot!(fmt(source), @r"
    var n int = 10;

    func fib(n int) int {
        if n < 2 {
            return n;
        }
        return fib(n - 1) + fib(n - 2);
    }

    var i int = 0;
    while i < n {
        print fib(i);
        i = i + 1;
    }
    ");
}

#[test]
fn test_control_flow_nesting() {
    let source = "while true { if x == 0 { break; } else if x < 0 { x = -x; continue; } else { { var t = x; } } }";
    insta::assert_snapshot!(fmt(source), @r"
    while true {
        if x == 0 {
            break;
        } else if x < 0 {
            x = -x;
            continue;
        } else {
            {
                var t = x;
            }
        }
    }
    ");
}

#[test]
fn test_expression_parentheses() {
    let source = "print ((a+b))*(c-(d-e)); print !(x<y) || (p && q); print -(-1); print (1.5/2.0)/3.0;";
    insta::assert_snapshot!(fmt(source), @r"
    print (a + b) * (c - (d - e));
    print !(x < y) || p && q;
    print --1;
    print 1.5 / 2.0 / 3.0;
    ");
}

#[test]
fn test_block_expressions() {
    let source = "var y int = { var t int = 4; t * t; }; print { 1; } + 2;";
    insta::assert_snapshot!(fmt(source), @r"
    var y int = {
        var t int = 4;
        t * t;
    };
    print {
        1;
    } + 2;
    ");
}

#[test]
fn test_literals_are_canonical() {
    let source = "const c = '\\n'; const q char = '\\''; var f float = 2.50; var b = false; print 007;";
    insta::assert_snapshot!(fmt(source), @r"
    const c = '\n';
    const q char = '\'';
    var f float = 2.5;
    var b = false;
    print 7;
    ");
}

#[test]
fn test_most_negative_int_literal() {
    let source = "print -2147483648;print 1- -2147483648;print - -2147483648;";
    insta::assert_snapshot!(fmt(source), @r"
    print -2147483648;
    print 1 - -2147483648;
    print --2147483648;
    ");
}

#[test]
fn test_custom_indent_width() {
    let config = FormatConfig::new().with_indent_width(2);
    let formatted = format_source_with_config("func f() { while x { print 1; } }", &config).unwrap();
    insta::assert_snapshot!(formatted, @r"
    func f() {
      while x {
        print 1;
      }
    }
    ");
}
