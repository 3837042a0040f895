pub mod line_index;
pub mod stream;
pub mod token;

pub use line_index::LineIndex;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};

use logos::Logos;

use crate::diagnostics::CompileError;
use crate::span::Span;

pub fn lex(source: &str) -> Result<Vec<Token>, CompileError> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::with_line(range.start, range.end, index.line_of(range.start));
        match result {
            Ok(kind) => tokens.push(Token::new(kind, lexer.slice(), span)),
            Err(()) => {
                return Err(CompileError::lex(
                    format!("unexpected character '{}'", &source[range.start..range.end]),
                    span,
                ));
            }
        }
    }

    tracing::trace!(count = tokens.len(), "lexed source");
    Ok(tokens)
}

/// Lex `source` and wrap the result in a [`TokenStream`] positioned at the first token.
pub fn tokenize(source: &str) -> Result<TokenStream, CompileError> {
    let tokens = lex(source)?;
    let eof = Span::with_line(source.len(), source.len(), LineIndex::new(source).line_of(source.len()));
    Ok(TokenStream::new(tokens, eof))
}
