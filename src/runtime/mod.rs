//! Dynamic values and the operators over them.

pub mod array;
pub mod config;
pub mod error;
pub mod eval;
pub mod memory;
pub mod operator;
pub mod ops;

pub use array::{ArrayKey, ArrayMemory};
pub use config::{DivisionByZero, RuntimeConfig};
pub use error::{EvalError, OperatorError};
pub use eval::ConstEvaluator;
pub use memory::{Kind, Memory, Numeric, ObjectMemory};
pub use operator::{Associativity, Operator, UnaryOperator};
