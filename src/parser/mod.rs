//! Token stream → AST.
//!
//! The [`SyntaxAnalyzer`] reads statement-leading tokens and hands each one to
//! the [`Generator`] registered for its kind. Generators parse one construct
//! each and call back into the analyzer for nested statements.

pub mod analyzer;
pub mod ast;
pub mod generator;
pub mod generators;
pub mod modifiers;

pub use analyzer::{GENERATORS, GeneratorKind, Generators, MAX_NESTING, ParseContext, SyntaxAnalyzer};
pub use generator::Generator;

use crate::diagnostics::CompileError;
use crate::lexer::{TokenKind, TokenStream};
use crate::span::Spanned;
use ast::{Expr, Program};
use generator::next_token;

/// Parse a whole token stream into a [`Program`].
pub fn parse_program(stream: &mut TokenStream) -> Result<Program, CompileError> {
    SyntaxAnalyzer::new().parse_program(stream)
}

/// Parse a stream holding exactly one expression (no trailing `;`).
pub fn parse_expression(stream: &mut TokenStream) -> Result<Spanned<Expr>, CompileError> {
    let mut analyzer = SyntaxAnalyzer::new();
    let leading = next_token(stream, "expression")?;
    let expr = analyzer.generators().expression.parse(leading, &mut analyzer, stream)?;
    stream.next_if(TokenKind::Semicolon);
    match stream.next() {
        None => Ok(expr),
        Some(extra) => Err(CompileError::unexpected("end of expression", &extra, extra.span)),
    }
}
