use thiserror::Error;

use super::memory::Kind;
use crate::span::Span;

/// Evaluation-time failure of a single operator application.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperatorError {
    #[error("unsupported operand types: {lhs} {op} {rhs}")]
    UnsupportedOperands { op: &'static str, lhs: Kind, rhs: Kind },

    #[error("unsupported operand type for unary {op}: {operand}")]
    UnsupportedOperand { op: &'static str, operand: Kind },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,
}

impl OperatorError {
    pub fn is_zero_divisor(&self) -> bool {
        matches!(self, OperatorError::DivisionByZero | OperatorError::ModuloByZero)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("{source} on line {}", .span.line)]
    Operator {
        #[source]
        source: OperatorError,
        span: Span,
    },

    #[error("{what} is not allowed in a constant expression")]
    NotConstant { what: &'static str, span: Span },

    #[error("undefined constant '{name}'")]
    UndefinedConstant { name: String, span: Span },

    #[error("illegal offset type {kind}")]
    IllegalOffset { kind: Kind, span: Span },

    #[error("cannot append to an array whose next index is already occupied")]
    NextIndexOccupied { span: Span },
}

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            EvalError::Operator { span, .. }
            | EvalError::NotConstant { span, .. }
            | EvalError::UndefinedConstant { span, .. }
            | EvalError::IllegalOffset { span, .. }
            | EvalError::NextIndexOccupied { span } => *span,
        }
    }
}
