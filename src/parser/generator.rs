use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::parser::analyzer::SyntaxAnalyzer;
use crate::span::Spanned;

/// One grammar construct's parser.
///
/// `parse` is handed the token that selected this generator (already consumed
/// from `stream`) and reads the rest of the construct. Generators hold no
/// per-parse state; anything that spans constructs lives in the
/// [`SyntaxAnalyzer`], so one instance serves every parse.
pub trait Generator: Sync {
    type Output;

    fn parse(
        &self,
        leading: Token,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<Self::Output, CompileError>;
}

/// Consume one token and require it to be `kind`.
pub fn expect_next(stream: &mut TokenStream, kind: TokenKind, expected: &str) -> Result<Token, CompileError> {
    match stream.next() {
        Some(token) if token.kind == kind => Ok(token),
        Some(token) => Err(CompileError::unexpected(expected, &token, token.span)),
        None => Err(CompileError::unexpected_end(expected, stream.eof_span())),
    }
}

pub fn is_one_of(token: &Token, kinds: &[TokenKind]) -> bool {
    kinds.contains(&token.kind)
}

pub fn check_not_end(stream: &TokenStream, expected: &str) -> Result<(), CompileError> {
    if stream.is_eof() { Err(CompileError::unexpected_end(expected, stream.eof_span())) } else { Ok(()) }
}

/// Consume the next token, whatever it is, failing at end of input.
pub fn next_token(stream: &mut TokenStream, expected: &str) -> Result<Token, CompileError> {
    check_not_end(stream, expected)?;
    stream.next().ok_or_else(|| CompileError::unexpected_end(expected, stream.eof_span()))
}

/// `Name`, `A\B\Name` or `\A\Name`. The text keeps the separators as written.
pub fn parse_qualified_name(stream: &mut TokenStream, expected: &str) -> Result<Spanned<String>, CompileError> {
    let mut text = String::new();
    let start = stream.current_span();
    if stream.next_if(TokenKind::Backslash).is_some() {
        text.push('\\');
    }
    loop {
        let part = expect_next(stream, TokenKind::Ident, expected)?;
        text.push_str(&part.text);
        if stream.peek_kind() == Some(TokenKind::Backslash)
            && stream.lookahead(1).is_some_and(|t| t.kind == TokenKind::Ident)
        {
            stream.next();
            text.push('\\');
        } else {
            break;
        }
    }
    Ok(Spanned::new(text, start.to(stream.previous_span())))
}
