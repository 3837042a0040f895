use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::parser::analyzer::SyntaxAnalyzer;
use crate::parser::ast::ConstDecl;
use crate::parser::generator::{Generator, expect_next, next_token};
use crate::parser::modifiers::Visibility;
use crate::span::Spanned;

/// `const NAME = expr;`
///
/// Produces a public, non-final declaration; inside a class body the class
/// generator applies the pending modifiers afterwards.
pub struct ConstantGenerator;

impl Generator for ConstantGenerator {
    type Output = ConstDecl;

    fn parse(
        &self,
        _leading: Token,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<ConstDecl, CompileError> {
        let name = expect_next(stream, TokenKind::Ident, "constant name")?;
        expect_next(stream, TokenKind::Eq, "'='")?;
        let first = next_token(stream, "constant value")?;
        let value = analyzer.generators().expression.parse(first, analyzer, stream)?;
        expect_next(stream, TokenKind::Semicolon, "';'")?;

        Ok(ConstDecl {
            name: Spanned::new(name.text, name.span),
            value,
            visibility: Visibility::Public,
            is_final: false,
            class: analyzer.context().current_class.clone(),
        })
    }
}
