use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::parser::analyzer::SyntaxAnalyzer;
use crate::parser::ast::Expr;
use crate::parser::generator::{Generator, expect_next, next_token};
use crate::span::Spanned;

/// `return;` or `return expr;`
pub struct ReturnGenerator;

impl Generator for ReturnGenerator {
    type Output = Option<Spanned<Expr>>;

    fn parse(
        &self,
        _leading: Token,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<Option<Spanned<Expr>>, CompileError> {
        if stream.next_if(TokenKind::Semicolon).is_some() {
            return Ok(None);
        }
        let first = next_token(stream, "expression or ';'")?;
        let value = analyzer.generators().expression.parse(first, analyzer, stream)?;
        expect_next(stream, TokenKind::Semicolon, "';'")?;
        Ok(Some(value))
    }
}
