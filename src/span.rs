use serde::Serialize;

/// Byte-offset span in source code, plus the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end, line: 1 }
    }

    pub fn with_line(start: usize, end: usize, line: u32) -> Self {
        Self { start, end, line }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0, line: 0 }
    }

    /// Smallest span covering both `self` and `other`. Keeps the line of whichever starts first.
    pub fn to(self, other: Span) -> Span {
        let line = if other.start < self.start { other.line } else { self.line };
        Span { start: self.start.min(other.start), end: self.end.max(other.end), line }
    }
}

/// A value annotated with its source span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    pub fn dummy(node: T) -> Self {
        Self { node, span: Span::dummy() }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned { node: f(self.node), span: self.span }
    }
}
