use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::parser::analyzer::SyntaxAnalyzer;
use crate::parser::ast::{FunctionDecl, Param};
use crate::parser::generator::{Generator, expect_next, is_one_of, next_token, parse_qualified_name};
use crate::span::Spanned;

/// `function name(params) { body }` or `function name(params);`
///
/// Whether a body is required depends on the caller: top-level functions and
/// concrete methods need one, abstract methods must not have one.
pub struct FunctionGenerator;

impl Generator for FunctionGenerator {
    type Output = FunctionDecl;

    fn parse(
        &self,
        _leading: Token,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<FunctionDecl, CompileError> {
        let name = expect_next(stream, TokenKind::Ident, "function name")?;
        expect_next(stream, TokenKind::LParen, "'('")?;
        let params = parse_params(analyzer, stream)?;

        let terminator = next_token(stream, "'{' or ';'")?;
        if !is_one_of(&terminator, &[TokenKind::LBrace, TokenKind::Semicolon]) {
            return Err(CompileError::unexpected("'{' or ';'", &terminator, terminator.span));
        }
        let body = if terminator.is(TokenKind::LBrace) {
            Some(analyzer.with_function(|analyzer| analyzer.parse_block(&terminator, stream))?)
        } else {
            None
        };

        tracing::debug!(function = %name.text, params = params.len(), "parsed function");

        Ok(FunctionDecl {
            name: Spanned::new(name.text, name.span),
            namespace: analyzer.context().current_namespace.clone(),
            params,
            body,
        })
    }
}

fn parse_params(analyzer: &mut SyntaxAnalyzer<'_>, stream: &mut TokenStream) -> Result<Vec<Spanned<Param>>, CompileError> {
    let mut params = Vec::new();
    loop {
        if stream.next_if(TokenKind::RParen).is_some() {
            return Ok(params);
        }
        params.push(parse_param(analyzer, stream)?);
        if stream.next_if(TokenKind::Comma).is_none() {
            expect_next(stream, TokenKind::RParen, "',' or ')'")?;
            return Ok(params);
        }
    }
}

fn parse_param(analyzer: &mut SyntaxAnalyzer<'_>, stream: &mut TokenStream) -> Result<Spanned<Param>, CompileError> {
    let start = stream.current_span();
    let hint = match stream.peek_kind() {
        Some(TokenKind::Ident | TokenKind::Backslash) => Some(parse_qualified_name(stream, "type name")?),
        _ => None,
    };
    let by_ref = stream.next_if(TokenKind::Amp).is_some();
    let variable = expect_next(stream, TokenKind::Variable, "parameter name")?;
    let default = match stream.next_if(TokenKind::Eq) {
        Some(_) => {
            let first = next_token(stream, "default value")?;
            Some(analyzer.generators().expression.parse(first, analyzer, stream)?)
        }
        None => None,
    };
    let name = Spanned::new(variable.text.trim_start_matches('$').to_string(), variable.span);
    Ok(Spanned::new(Param { name, hint, by_ref, default }, start.to(stream.previous_span())))
}
