use std::collections::HashMap;

use super::array::{ArrayKey, ArrayMemory};
use super::config::RuntimeConfig;
use super::error::{EvalError, OperatorError};
use super::memory::Memory;
use crate::parser::ast::{Expr, Program, Stmt};
use crate::span::{Span, Spanned};

/// Evaluates constant expressions: literals, arrays, operators and references
/// to constants defined earlier.
pub struct ConstEvaluator<'c> {
    config: &'c RuntimeConfig,
    /// Keyed by name; class constants as `Class::NAME`.
    constants: HashMap<String, Memory>,
}

impl<'c> ConstEvaluator<'c> {
    pub fn new(config: &'c RuntimeConfig) -> Self {
        Self { config, constants: HashMap::new() }
    }

    pub fn define(&mut self, name: impl Into<String>, value: Memory) {
        self.constants.insert(name.into(), value);
    }

    pub fn constant(&self, name: &str) -> Option<&Memory> {
        self.constants.get(name)
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Define every top-level and class constant of `program`, in source order.
    pub fn define_program(&mut self, program: &Program) -> Result<(), EvalError> {
        for stmt in &program.stmts {
            match &stmt.node {
                Stmt::Constant(c) => {
                    let value = self.eval_in(&c.value, None)?;
                    self.define(c.name.node.clone(), value);
                }
                Stmt::Class(class) => {
                    for c in class.constants() {
                        let value = self.eval_in(&c.value, Some(&class.name.node))?;
                        self.define(format!("{}::{}", class.name.node, c.name.node), value);
                    }
                }
                _ => {}
            }
        }
        tracing::debug!(constants = self.constants.len(), "evaluated program constants");
        Ok(())
    }

    pub fn eval(&self, expr: &Spanned<Expr>) -> Result<Memory, EvalError> {
        self.eval_in(expr, None)
    }

    /// `class` resolves `self::` fetches.
    fn eval_in(&self, expr: &Spanned<Expr>, class: Option<&str>) -> Result<Memory, EvalError> {
        let span = expr.span;
        let operator_error = |source: OperatorError| EvalError::Operator { source, span };

        Ok(match &expr.node {
            Expr::Null => Memory::NULL,
            Expr::Bool(b) => Memory::bool(*b),
            Expr::Int(n) => Memory::Int(*n),
            Expr::Float(f) => Memory::Float(*f),
            Expr::String(s) => Memory::String(s.clone()),
            Expr::Grouping(inner) => self.eval_in(inner, class)?,
            Expr::Array(items) => {
                let mut array = ArrayMemory::new();
                for item in items {
                    let value = self.eval_in(&item.value, class)?;
                    match &item.key {
                        Some(key_expr) => {
                            let key = self.eval_in(key_expr, class)?;
                            let Some(key) = ArrayKey::from_memory(&key) else {
                                return Err(EvalError::IllegalOffset { kind: key.value_kind(), span: key_expr.span });
                            };
                            array.put(key, value);
                        }
                        None => {
                            if array.push(value).is_none() {
                                return Err(EvalError::NextIndexOccupied { span: item.value.span });
                            }
                        }
                    }
                }
                Memory::from(array)
            }
            Expr::ConstFetch(name) => self.lookup(name.trim_start_matches('\\'), span)?,
            Expr::ClassConstFetch { class: target, name } => {
                let owner = match class {
                    Some(current) if target.node.eq_ignore_ascii_case("self") => current,
                    _ => target.node.trim_start_matches('\\'),
                };
                self.lookup(&format!("{owner}::{}", name.node), span)?
            }
            Expr::Unary { op, operand } => {
                let value = self.eval_in(operand, class)?;
                op.eval(&value).map_err(operator_error)?
            }
            Expr::Binary { op, lhs, rhs } => {
                let left = self.eval_in(lhs, class)?;
                match op.short_circuits(&left) {
                    Some(result) => result,
                    None => {
                        let right = self.eval_in(rhs, class)?;
                        op.eval(&left, &right, self.config).map_err(operator_error)?
                    }
                }
            }
            Expr::Variable(_) => return Err(EvalError::NotConstant { what: "variable", span }),
            Expr::Assign { .. } => return Err(EvalError::NotConstant { what: "assignment", span }),
            Expr::Call { .. } => return Err(EvalError::NotConstant { what: "function call", span }),
        })
    }

    fn lookup(&self, name: &str, span: Span) -> Result<Memory, EvalError> {
        self.constants
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedConstant { name: name.to_string(), span })
    }
}
