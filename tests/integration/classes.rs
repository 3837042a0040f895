mod common;
use common::{parse_ok, single_class};

use lyra::parser::ast::{ClassMember, Expr, Stmt};
use lyra::parser::modifiers::Visibility;

#[test]
fn class_with_every_member_kind() {
    let src = r#"<?php
namespace App\Shapes;

abstract class Shape extends Base implements \JsonSerializable, Countable {
    const SIDES = 0;
    final protected const LABEL = "shape";

    abstract public function area();

    public static function unit() {
        return 1;
    }

    private final function secret($a, &$b = null) {}
}
"#;
    let shape = single_class(src);
    assert_eq!(shape.qualified_name(), r"App\Shapes\Shape");
    assert!(shape.is_abstract);
    assert_eq!(shape.extends.as_ref().map(|e| e.node.as_str()), Some("Base"));
    assert_eq!(shape.implements.len(), 2);
    assert_eq!(shape.members.len(), 5);
    assert_eq!(shape.constants().count(), 2);
    assert_eq!(shape.methods().count(), 3);

    let label = shape.constants().find(|c| c.name.node == "LABEL").unwrap();
    assert!(label.is_final);
    assert_eq!(label.visibility, Visibility::Protected);
    assert_eq!(label.value.node, Expr::String("shape".into()));

    let area = shape.method("AREA").unwrap();
    assert!(area.is_abstract);
    assert!(area.function.body.is_none());

    let unit = shape.method("unit").unwrap();
    assert!(unit.is_static);
    let body = unit.function.body.as_ref().unwrap();
    assert!(matches!(body.node.stmts[0].node, Stmt::Return(Some(_))));

    let secret = shape.method("secret").unwrap();
    assert_eq!(secret.visibility, Visibility::Private);
    assert!(secret.is_final);
    let params = &secret.function.params;
    assert_eq!(params.len(), 2);
    assert!(params[1].node.by_ref);
    assert_eq!(params[1].node.default.as_ref().map(|d| &d.node), Some(&Expr::Null));
}

#[test]
fn each_class_tracks_its_own_namespace() {
    let program = parse_ok(r"namespace A; class X {} namespace B\C; class Y {}");
    let names: Vec<_> = program.classes().map(|c| c.qualified_name()).collect();
    assert_eq!(names, vec![r"A\X", r"B\C\Y"]);
}

#[test]
fn global_class_has_no_namespace() {
    let class = single_class("class Plain {}");
    assert!(class.namespace.is_none());
    assert_eq!(class.qualified_name(), "Plain");
}

#[test]
fn methods_and_constants_record_their_class() {
    let class = single_class("class Owner { const K = 1; function m() {} }");
    for member in &class.members {
        match &member.node {
            ClassMember::Constant(c) => assert_eq!(c.class.as_deref(), Some("Owner")),
            ClassMember::Method(m) => assert_eq!(m.class, "Owner"),
        }
    }
}

#[test]
fn top_level_constant_has_no_class() {
    let program = parse_ok("const GLOBAL = 1; class A { const LOCAL = 2; }");
    let global = program.constants().next().unwrap();
    assert_eq!(global.name.node, "GLOBAL");
    assert!(global.class.is_none());
}

#[test]
fn keywords_are_case_insensitive() {
    let class = single_class("ABSTRACT Class Loud { PUBLIC STATIC FUNCTION go() {} }");
    assert!(class.is_abstract);
    let go = class.method("go").unwrap();
    assert!(go.is_static);
    assert_eq!(go.visibility, Visibility::Public);
}

#[test]
fn comments_and_open_tag_are_ignored() {
    let class = single_class(
        "<?php\n# hash comment\n/** doc */\nclass Doc {\n  // line\n  /* block */ const A = 1;\n}\n?>",
    );
    assert_eq!(class.constants().count(), 1);
}

#[test]
fn class_spans_point_at_lines() {
    let program = parse_ok("\n\nclass Later {\n}\n");
    let stmt = &program.stmts[0];
    assert_eq!(stmt.span.line, 3);
    let Stmt::Class(class) = &stmt.node else { panic!("expected class") };
    assert_eq!(class.name.span.line, 3);
}

#[test]
fn free_functions_next_to_classes() {
    let program = parse_ok("function helper($x) { return $x * 2; } class A { function m() { helper(1); } }");
    assert_eq!(program.functions().count(), 1);
    assert_eq!(program.classes().count(), 1);
    let helper = program.functions().next().unwrap();
    assert_eq!(helper.name.node, "helper");
    assert!(helper.body.is_some());
}
