mod common;
use common::syntax_error;

use lyra::diagnostics::{CompileError, SyntaxErrorKind};
use lyra::parser::analyzer::MAX_NESTING;
use lyra::parser::modifiers::Modifier;

fn unexpected(expected: &str, found: &str) -> SyntaxErrorKind {
    SyntaxErrorKind::UnexpectedToken { expected: expected.into(), found: found.into() }
}

#[test]
fn missing_class_name_reports_line() {
    let (kind, line) = syntax_error("<?php\n\nclass {\n}");
    assert_eq!(kind, unexpected("class name", "'{'"));
    assert_eq!(line, 3);
}

#[test]
fn duplicate_visibility_on_later_line() {
    let src = "class A {\n    public function ok() {}\n    private\n    protected function bad() {}\n}";
    let (kind, line) = syntax_error(src);
    assert_eq!(kind, SyntaxErrorKind::DuplicateVisibility { first: Modifier::Private, second: Modifier::Protected });
    assert_eq!(line, 4);
}

#[test]
fn repeated_non_visibility_modifiers() {
    for (src, modifier) in [
        ("class A { final final function f() {} }", Modifier::Final),
        ("abstract class A { abstract abstract function f(); }", Modifier::Abstract),
        ("class A { static static function f() {} }", Modifier::Static),
    ] {
        let (kind, _) = syntax_error(src);
        assert_eq!(kind, SyntaxErrorKind::DuplicateModifier(modifier), "{src}");
    }
}

#[test]
fn abstract_and_final_are_exclusive_everywhere() {
    let (kind, _) = syntax_error("abstract class A { abstract final function f(); }");
    assert_eq!(kind, SyntaxErrorKind::ConflictingModifiers(Modifier::Abstract, Modifier::Final));
}

#[test]
fn modifiers_rejected_by_target() {
    let (kind, _) = syntax_error("final static class A {}");
    assert_eq!(kind, SyntaxErrorKind::ModifierNotAllowed { modifier: Modifier::Static, target: "class declarations" });
    let (kind, _) = syntax_error("class A { abstract const X = 1; }");
    assert_eq!(kind, SyntaxErrorKind::ModifierNotAllowed { modifier: Modifier::Abstract, target: "class constants" });
}

#[test]
fn every_modifier_failure_is_classified() {
    for src in [
        "class A { public public function f() {} }",
        "class A { static static function f() {} }",
        "final abstract class A {}",
        "abstract private class A {}",
        "class A { public }",
    ] {
        let (kind, _) = syntax_error(src);
        assert!(kind.is_modifier_error(), "{src}: {kind}");
    }
}

#[test]
fn namespace_inside_function_body() {
    let (kind, line) = syntax_error("function f() {\n    namespace Inner;\n}");
    assert_eq!(kind, SyntaxErrorKind::NamespaceNotTopLevel);
    assert_eq!(line, 2);
}

#[test]
fn namespace_inside_method_body() {
    let (kind, _) = syntax_error("class A { function f() { namespace Inner; } }");
    assert_eq!(kind, SyntaxErrorKind::NamespaceNotTopLevel);
}

#[test]
fn nested_class_names_both_classes() {
    let (kind, line) = syntax_error("class Outer {\n  function f() {\n    final class Inner {}\n  }\n}");
    assert_eq!(kind, SyntaxErrorKind::NestedClass { name: "Inner".into(), enclosing: "Outer".into() });
    assert_eq!(line, 3);
}

#[test]
fn class_inside_free_function_is_allowed() {
    // Only class-in-class is rejected; a function body at top level may declare one.
    let program = common::parse_ok("function make() { class Local {} }");
    assert_eq!(program.functions().count(), 1);
}

#[test]
fn body_rules() {
    let (kind, _) = syntax_error("function f();");
    assert_eq!(kind, SyntaxErrorKind::MissingBody("function 'f'".into()));
    let (kind, _) = syntax_error("class A { function m(); }");
    assert_eq!(kind, SyntaxErrorKind::MissingBody("method 'm'".into()));
    let (kind, _) = syntax_error("abstract class A { abstract function m() { return 1; } }");
    assert_eq!(kind, SyntaxErrorKind::AbstractMethodWithBody("m".into()));
}

#[test]
fn expression_statement_needs_semicolon() {
    let (kind, _) = syntax_error("$a = 1\n$b = 2;");
    assert_eq!(kind, unexpected("';'", "variable '$b'"));
}

#[test]
fn assignment_targets() {
    let (kind, _) = syntax_error("1 = 2;");
    assert_eq!(kind, SyntaxErrorKind::InvalidAssignmentTarget("literal".into()));
    let (kind, _) = syntax_error("$a + $b = 2;");
    assert!(matches!(kind, SyntaxErrorKind::InvalidAssignmentTarget(_)));
}

#[test]
fn unexpected_end_of_input() {
    let (kind, _) = syntax_error("class A {");
    assert_eq!(kind, SyntaxErrorKind::UnexpectedEnd { expected: "'}'".into() });
    let (kind, _) = syntax_error("const X =");
    assert!(matches!(kind, SyntaxErrorKind::UnexpectedEnd { .. }));
}

#[test]
fn tokens_that_cannot_start_a_statement() {
    let (kind, _) = syntax_error("}");
    assert_eq!(kind, unexpected("statement", "'}'"));
    // Member-only modifiers never open a top-level declaration.
    let (kind, _) = syntax_error("public function f() {}");
    assert_eq!(kind, unexpected("statement", "'public'"));
}

#[test]
fn lex_error_is_not_a_syntax_error() {
    let err = lyra::parse("$a = 1 @ 2;").unwrap_err();
    assert!(matches!(err, CompileError::Lex { .. }));
    assert!(err.syntax_kind().is_none());
    assert_eq!(err.span().map(|s| s.start), Some(7));
}

#[test]
fn deeply_nested_groups_are_rejected() {
    let depth = 200_000;
    let src = format!("const X = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let (kind, line) = syntax_error(&src);
    assert_eq!(kind, SyntaxErrorKind::NestingTooDeep { limit: MAX_NESTING });
    assert_eq!(line, 1);
}

#[test]
fn deeply_nested_arrays_and_unary_operators_are_rejected() {
    for src in [format!("{}1;", "-".repeat(10_000)), format!("{}1{};", "[".repeat(10_000), "]".repeat(10_000))] {
        let (kind, _) = syntax_error(&src);
        assert_eq!(kind, SyntaxErrorKind::NestingTooDeep { limit: MAX_NESTING });
    }
}

#[test]
fn deeply_nested_function_bodies_are_rejected() {
    let depth = 5_000;
    let src = format!("{}{}", "function f() {\n".repeat(depth), "}".repeat(depth));
    let (kind, line) = syntax_error(&src);
    assert_eq!(kind, SyntaxErrorKind::NestingTooDeep { limit: MAX_NESTING });
    assert_eq!(line, MAX_NESTING as u32 + 1);
}

#[test]
fn nesting_below_the_limit_still_parses() {
    let depth = MAX_NESTING / 4;
    let src = format!("const X = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let program = common::parse_ok(&src);
    assert_eq!(program.constants().count(), 1);
    let value = common::eval(&format!("{}2{}", "[".repeat(depth), "]".repeat(depth)));
    assert!(value.is_array());
}
