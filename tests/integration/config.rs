mod common;
use common::eval_with;

use lyra::diagnostics::CompileError;
use lyra::runtime::{ConstEvaluator, DivisionByZero, EvalError, Memory, OperatorError, RuntimeConfig};

fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("lyra.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn loaded_config_drives_division() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[arithmetic]\ndivision_by_zero = \"error\"\n");
    let config = RuntimeConfig::load(&path).unwrap();
    assert_eq!(config, RuntimeConfig::strict());

    let err = eval_with("10 / 0", &config).unwrap_err();
    assert!(matches!(err, EvalError::Operator { source: OperatorError::DivisionByZero, .. }));
    assert_eq!(eval_with("10 / 4", &config).unwrap(), Memory::Float(2.5));
}

#[test]
fn sentinel_is_explicit_or_default() {
    let dir = tempfile::tempdir().unwrap();
    let explicit = RuntimeConfig::load(&write_config(&dir, "[arithmetic]\ndivision_by_zero = \"sentinel\"\n")).unwrap();
    assert_eq!(explicit, RuntimeConfig::default());
    let empty = RuntimeConfig::load(&write_config(&dir, "")).unwrap();
    assert_eq!(empty.arithmetic.division_by_zero, DivisionByZero::Sentinel);
    assert_eq!(eval_with("-1 / 0", &empty).unwrap(), Memory::Float(f64::NEG_INFINITY));
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = RuntimeConfig::load(&path).unwrap_err();
    match err {
        CompileError::Config { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn unknown_keys_and_values_are_rejected() {
    for content in [
        "[arithmetic]\ndivision_by_zero = \"panic\"\n",
        "[arithmetic]\nrounding = \"up\"\n",
        "[logging]\nlevel = \"debug\"\n",
        "arithmetic = 3\n",
    ] {
        let err = RuntimeConfig::from_toml_str(content).unwrap_err();
        assert!(matches!(err, CompileError::Config { .. }), "{content}");
        assert!(err.to_string().starts_with("Config error: invalid config"), "{err}");
    }
}

#[test]
fn config_applies_to_program_constants() {
    let program = lyra::parse("class Ratio { const BROKEN = 1 % 0; }").unwrap();

    let lenient = RuntimeConfig::default();
    let mut evaluator = ConstEvaluator::new(&lenient);
    evaluator.define_program(&program).unwrap();
    assert!(matches!(evaluator.constant("Ratio::BROKEN"), Some(Memory::Float(f)) if f.is_nan()));

    let strict = RuntimeConfig::strict();
    let err = ConstEvaluator::new(&strict).define_program(&program).unwrap_err();
    assert!(matches!(err, EvalError::Operator { source: OperatorError::ModuloByZero, .. }));
}
