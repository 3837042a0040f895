use crate::span::Span;

use super::token::{Token, TokenKind};

/// Forward cursor over a finished token sequence with a single level of pushback.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    eof: Span,
    pushed_back: bool,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>, eof: Span) -> Self {
        Self { tokens, pos: 0, eof, pushed_back: false }
    }

    /// Build a stream whose end-of-input span sits right after the last token.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let eof = tokens
            .last()
            .map(|t| Span::with_line(t.span.end, t.span.end, t.span.line))
            .unwrap_or_else(Span::dummy);
        Self::new(tokens, eof)
    }

    /// Current token without advancing, or `None` at end of input.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Token `n` positions past the cursor (`lookahead(0) == peek()`).
    pub fn lookahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    /// Current token; advances the cursor.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        self.pushed_back = false;
        Some(tok)
    }

    /// Consume the current token only if it has the given kind.
    pub fn next_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind() == Some(kind) { self.next() } else { None }
    }

    /// Rewind one step. Only one level is supported; a second consecutive
    /// pushback without an intervening `next` is a caller bug.
    pub fn push_back(&mut self) {
        debug_assert!(!self.pushed_back, "only one level of pushback is supported");
        debug_assert!(self.pos > 0, "push_back at start of stream");
        if self.pos > 0 && !self.pushed_back {
            self.pos -= 1;
            self.pushed_back = true;
        }
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Span used to report errors at end of input.
    pub fn eof_span(&self) -> Span {
        self.eof
    }

    /// Span of the current token, or the end-of-input span.
    pub fn current_span(&self) -> Span {
        self.peek().map(|t| t.span).unwrap_or(self.eof)
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
            .unwrap_or(self.eof)
    }
}
