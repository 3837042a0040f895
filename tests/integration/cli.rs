mod common;
use common::{lyrac, run_on_source};

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn parse_prints_outline() {
    let output = run_on_source(
        "parse",
        "<?php\nnamespace Shop;\nconst VERSION = 2;\nfinal class Cart {\n  private const LIMIT = 10;\n  public function add($item) {}\n}\nfunction total($cart) { return 0; }\n",
        &[],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "namespace Shop\nconst VERSION\nfinal class Shop\\Cart\n  private const LIMIT\n  public function add\nfunction total/1\n"
    );
}

#[test]
fn parse_json_is_valid_json() {
    let output = run_on_source("parse", "class A { const X = 1 + 2; }", &["--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let tree: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let stmts = tree["stmts"].as_array().unwrap();
    assert_eq!(stmts.len(), 1);
    assert_eq!(stmts[0]["node"]["class"]["name"]["node"], "A");
}

#[test]
fn parse_reports_syntax_error() {
    let output = run_on_source("parse", "class A {\n  public public function f() {}\n}", &[]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("syntax error"), "{err}");
    assert!(err.contains("multiple visibility modifiers"), "{err}");
}

#[test]
fn check_summarizes_program() {
    let output = run_on_source("check", "const A = 2; class K { const B = A ** 3; } function f() {}", &[]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).ends_with(": 1 classes, 1 functions, 2 constants\n"), "{}", stdout(&output));
}

#[test]
fn check_reports_evaluation_error() {
    let output = run_on_source("check", "const A = MISSING + 1;", &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("undefined constant 'MISSING'"), "{}", stderr(&output));
}

#[test]
fn check_respects_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lyra.toml");
    std::fs::write(&config, "[arithmetic]\ndivision_by_zero = \"error\"\n").unwrap();

    let lenient = run_on_source("check", "const X = 1 / 0;", &[]);
    assert!(lenient.status.success(), "{}", stderr(&lenient));

    let strict = run_on_source("check", "const X = 1 / 0;", &["--config", config.to_str().unwrap()]);
    assert!(!strict.status.success());
    assert!(stderr(&strict).contains("division by zero"), "{}", stderr(&strict));
}

#[test]
fn eval_prints_exported_value() {
    let output = lyrac().args(["eval", "'a' . (1 + 2)"]).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "'a3'\n");

    let output = lyrac().args(["eval", "[1, 'k' => true]"]).output().unwrap();
    assert_eq!(stdout(&output), "array (0 => 1, 'k' => true)\n");
}

#[test]
fn eval_division_warning_is_logged() {
    let output = lyrac().args(["eval", "1 / 0"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "INF\n");
    assert!(stderr(&output).contains("division by zero"), "{}", stderr(&output));
}

#[test]
fn missing_file_fails() {
    let output = lyrac().args(["parse", "/nonexistent/lyra/input.php"]).output().unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("could not read"));
}

#[test]
fn bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[arithmetic]\ndivision_by_zero = 1\n").unwrap();
    let output = lyrac().args(["eval", "1", "--config", config.to_str().unwrap()]).output().unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error[config]"), "{}", stderr(&output));
}
