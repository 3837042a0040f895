pub mod span;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod stdlib;

use diagnostics::CompileError;
use parser::ast::{Expr, Program};
use span::Spanned;

/// Parse a source string into a [`Program`] (lex → token stream → syntax analysis).
/// The first error aborts the parse; no partial program is returned.
pub fn parse(source: &str) -> Result<Program, CompileError> {
    let mut stream = lexer::tokenize(source)?;
    let program = parser::parse_program(&mut stream)?;
    tracing::debug!(statements = program.stmts.len(), "parsed program");
    Ok(program)
}

/// Parse a source string holding a single expression, e.g. `1 + 2 * 3`.
/// A trailing `;` is accepted.
pub fn parse_expression(source: &str) -> Result<Spanned<Expr>, CompileError> {
    let mut stream = lexer::tokenize(source)?;
    parser::parse_expression(&mut stream)
}
