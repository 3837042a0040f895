//! One [`Generator`](crate::parser::generator::Generator) per grammar construct.

mod class;
mod constant;
mod expression;
mod function;
mod namespace;
mod ret;

pub use class::ClassGenerator;
pub use constant::ConstantGenerator;
pub use expression::ExpressionGenerator;
pub use function::FunctionGenerator;
pub use namespace::NamespaceGenerator;
pub use ret::ReturnGenerator;
