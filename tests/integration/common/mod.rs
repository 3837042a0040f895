#![allow(dead_code)]

use std::process::{Command, Output};

use lyra::diagnostics::SyntaxErrorKind;
use lyra::parser::ast::{ClassDecl, Program};
use lyra::runtime::{ConstEvaluator, EvalError, Memory, RuntimeConfig};

pub fn lyrac() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lyrac"))
}

/// Write `source` to a temp file and run `lyrac <subcommand> <file> <extra..>`.
pub fn run_on_source(subcommand: &str, source: &str, extra: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("test.php");
    std::fs::write(&src_path, source).unwrap();
    lyrac().arg(subcommand).arg(&src_path).args(extra).output().unwrap()
}

pub fn parse_ok(source: &str) -> Program {
    match lyra::parse(source) {
        Ok(program) => program,
        Err(err) => panic!("parse failed for {source:?}: {err}"),
    }
}

pub fn single_class(source: &str) -> ClassDecl {
    let program = parse_ok(source);
    let mut classes: Vec<_> = program.classes().cloned().collect();
    assert_eq!(classes.len(), 1, "expected exactly one class in {source:?}");
    classes.remove(0)
}

/// Parse must fail with a syntax error; returns the kind and its line.
pub fn syntax_error(source: &str) -> (SyntaxErrorKind, u32) {
    let err = lyra::parse(source).expect_err("parse should have failed");
    let line = err.span().map(|s| s.line).unwrap_or(0);
    match err.syntax_kind() {
        Some(kind) => (kind.clone(), line),
        None => panic!("expected a syntax error, got: {err}"),
    }
}

pub fn eval_with(source: &str, config: &RuntimeConfig) -> Result<Memory, EvalError> {
    let expr = lyra::parse_expression(source).unwrap();
    ConstEvaluator::new(config).eval(&expr)
}

pub fn eval(source: &str) -> Memory {
    match eval_with(source, &RuntimeConfig::default()) {
        Ok(value) => value,
        Err(err) => panic!("evaluation of {source:?} failed: {err}"),
    }
}
