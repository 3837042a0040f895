//! Snapshot tests for error message formatting.
//!
//! Uses insta inline snapshots to detect regressions in diagnostic wording.
//! Run `cargo insta review` to review changes.

use insta::assert_snapshot;
use lyra::runtime::{ConstEvaluator, RuntimeConfig};

fn parse_error(source: &str) -> String {
    lyra::parse(source).unwrap_err().to_string()
}

fn eval_error(source: &str, config: &RuntimeConfig) -> String {
    let expr = lyra::parse_expression(source).unwrap();
    ConstEvaluator::new(config).eval(&expr).unwrap_err().to_string()
}

#[test]
fn missing_class_name() {
    assert_snapshot!(parse_error("class { }"), @"Syntax error: expected class name, found '{' on line 1");
}

#[test]
fn conflicting_visibility() {
    assert_snapshot!(
        parse_error("class A {\n  public private function f() {}\n}"),
        @"Syntax error: multiple visibility modifiers: 'public' and 'private' on line 2"
    );
}

#[test]
fn duplicate_modifier() {
    assert_snapshot!(
        parse_error("class A { static static function f() {} }"),
        @"Syntax error: duplicate modifier 'static' on line 1"
    );
}

#[test]
fn exclusive_modifiers() {
    assert_snapshot!(
        parse_error("final abstract class A {}"),
        @"Syntax error: modifiers 'final' and 'abstract' cannot be combined on line 1"
    );
}

#[test]
fn modifier_not_allowed() {
    assert_snapshot!(
        parse_error("class A { static const X = 1; }"),
        @"Syntax error: modifier 'static' is not allowed on class constants on line 1"
    );
}

#[test]
fn dangling_modifiers() {
    assert_snapshot!(
        parse_error("class A {\n  function f() {}\n  public\n}"),
        @"Syntax error: modifiers without a following member on line 3"
    );
}

#[test]
fn nested_class() {
    assert_snapshot!(
        parse_error("class A { class B {} }"),
        @"Syntax error: cannot declare class 'B' inside class 'A' on line 1"
    );
}

#[test]
fn statement_in_class_body() {
    assert_snapshot!(
        parse_error("class A { $x = 1; }"),
        @"Syntax error: unexpected variable '$x' in class body, expected a constant or method declaration on line 1"
    );
}

#[test]
fn body_errors() {
    assert_snapshot!(
        parse_error("abstract class A { abstract function f() {} }"),
        @"Syntax error: abstract method 'f' cannot have a body on line 1"
    );
    assert_snapshot!(parse_error("function f();"), @"Syntax error: function 'f' requires a body on line 1");
}

#[test]
fn namespace_not_top_level() {
    assert_snapshot!(
        parse_error("function f() { namespace N; }"),
        @"Syntax error: namespace declaration must be at the top level on line 1"
    );
}

#[test]
fn unexpected_end() {
    assert_snapshot!(parse_error("class A {"), @"Syntax error: unexpected end of input, expected '}' on line 1");
}

#[test]
fn lex_error() {
    assert_snapshot!(parse_error("const A = 1 @ 2;"), @"Lex error: unexpected character '@'");
}

#[test]
fn evaluation_errors() {
    let config = RuntimeConfig::default();
    assert_snapshot!(eval_error("NOPE", &config), @"undefined constant 'NOPE'");
    assert_snapshot!(eval_error("[1] * 2", &config), @"unsupported operand types: array * int on line 1");
    assert_snapshot!(eval_error("$x + 1", &config), @"variable is not allowed in a constant expression");
    assert_snapshot!(eval_error("[[1] => 2]", &config), @"illegal offset type array");
    assert_snapshot!(eval_error("1 / 0", &RuntimeConfig::strict()), @"division by zero on line 1");
}
