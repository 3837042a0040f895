use crate::diagnostics::{CompileError, SyntaxErrorKind};
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::parser::ast::{Block, Program, Stmt};
use crate::parser::generator::{Generator, expect_next};
use crate::parser::generators::{
    ClassGenerator, ConstantGenerator, ExpressionGenerator, FunctionGenerator, NamespaceGenerator, ReturnGenerator,
};
use crate::span::{Span, Spanned};

/// Deepest allowed nesting of expressions and function bodies. Each level of
/// the syntax tree costs a few stack frames here and in every tree walk.
pub const MAX_NESTING: usize = 128;

/// Cross-construct state for one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    pub current_namespace: Option<String>,
    /// Set while parsing a class body (including its method bodies).
    pub current_class: Option<String>,
    /// Number of function bodies currently open.
    pub function_depth: usize,
    /// Open expression and block levels, bounded by [`MAX_NESTING`].
    pub nesting: usize,
}

/// Which generator handles a statement-leading token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Namespace,
    Class,
    Function,
    Constant,
    Return,
    Expression,
}

impl GeneratorKind {
    /// `None` for tokens that cannot start a statement.
    pub fn for_token(kind: TokenKind) -> Option<GeneratorKind> {
        match kind {
            TokenKind::Namespace => Some(GeneratorKind::Namespace),
            TokenKind::Class | TokenKind::Abstract | TokenKind::Final => Some(GeneratorKind::Class),
            TokenKind::Function => Some(GeneratorKind::Function),
            TokenKind::Const => Some(GeneratorKind::Constant),
            TokenKind::Return => Some(GeneratorKind::Return),

            TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::IntLit
            | TokenKind::FloatLit
            | TokenKind::StringLit
            | TokenKind::Ident
            | TokenKind::Variable
            | TokenKind::Backslash
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Bang
            | TokenKind::LParen
            | TokenKind::LBracket => Some(GeneratorKind::Expression),

            TokenKind::Extends
            | TokenKind::Implements
            | TokenKind::Public
            | TokenKind::Private
            | TokenKind::Protected
            | TokenKind::Static
            | TokenKind::Star
            | TokenKind::StarStar
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Dot
            | TokenKind::Eq
            | TokenKind::EqEq
            | TokenKind::BangEq
            | TokenKind::EqEqEq
            | TokenKind::BangEqEq
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::LtEq
            | TokenKind::GtEq
            | TokenKind::AmpAmp
            | TokenKind::PipePipe
            | TokenKind::Amp
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::RBracket
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::FatArrow
            | TokenKind::DoubleColon => None,
        }
    }
}

/// The generator registry. Generators are stateless, so one static instance
/// is shared by every analyzer.
pub struct Generators {
    pub namespace: NamespaceGenerator,
    pub class: ClassGenerator,
    pub function: FunctionGenerator,
    pub constant: ConstantGenerator,
    pub ret: ReturnGenerator,
    pub expression: ExpressionGenerator,
}

pub static GENERATORS: Generators = Generators {
    namespace: NamespaceGenerator,
    class: ClassGenerator,
    function: FunctionGenerator,
    constant: ConstantGenerator,
    ret: ReturnGenerator,
    expression: ExpressionGenerator,
};

/// Drives a parse: owns the [`ParseContext`] and dispatches each statement to
/// its generator. One analyzer per parse; it is not meant to be shared.
pub struct SyntaxAnalyzer<'g> {
    context: ParseContext,
    generators: &'g Generators,
}

impl SyntaxAnalyzer<'static> {
    pub fn new() -> Self {
        Self::with_generators(&GENERATORS)
    }
}

impl Default for SyntaxAnalyzer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'g> SyntaxAnalyzer<'g> {
    pub fn with_generators(generators: &'g Generators) -> Self {
        Self { context: ParseContext::default(), generators }
    }

    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    pub fn generators(&self) -> &'g Generators {
        self.generators
    }

    pub fn parse_program(&mut self, stream: &mut TokenStream) -> Result<Program, CompileError> {
        let mut stmts = Vec::new();
        while !stream.is_eof() {
            if stream.next_if(TokenKind::Semicolon).is_some() {
                continue;
            }
            stmts.push(self.parse_statement(stream)?);
        }
        tracing::debug!(statements = stmts.len(), "parsed program");
        Ok(Program { stmts })
    }

    pub fn parse_statement(&mut self, stream: &mut TokenStream) -> Result<Spanned<Stmt>, CompileError> {
        let leading = match stream.next() {
            Some(token) => token,
            None => return Err(CompileError::unexpected_end("statement", stream.eof_span())),
        };
        self.dispatch(leading, stream)
    }

    /// Hand `leading` (already consumed) to the generator registered for its kind.
    pub fn dispatch(&mut self, leading: Token, stream: &mut TokenStream) -> Result<Spanned<Stmt>, CompileError> {
        let start = leading.span;
        let Some(kind) = GeneratorKind::for_token(leading.kind) else {
            return Err(CompileError::unexpected("statement", &leading, leading.span));
        };
        tracing::trace!(token = %leading, generator = ?kind, line = start.line, "dispatch");

        let generators = self.generators;
        let stmt = match kind {
            GeneratorKind::Namespace => {
                if self.context.current_class.is_some() || self.context.function_depth > 0 {
                    return Err(CompileError::syntax(SyntaxErrorKind::NamespaceNotTopLevel, start));
                }
                Stmt::Namespace(generators.namespace.parse(leading, self, stream)?)
            }
            GeneratorKind::Class => {
                if let Some(enclosing) = &self.context.current_class {
                    let name = nested_class_name(&leading, stream);
                    return Err(CompileError::syntax(
                        SyntaxErrorKind::NestedClass { name, enclosing: enclosing.clone() },
                        start,
                    ));
                }
                Stmt::Class(generators.class.parse(leading, self, stream)?)
            }
            GeneratorKind::Function => {
                let function = generators.function.parse(leading, self, stream)?;
                if function.body.is_none() {
                    return Err(CompileError::syntax(
                        SyntaxErrorKind::MissingBody(format!("function '{}'", function.name.node)),
                        function.name.span,
                    ));
                }
                Stmt::Function(function)
            }
            GeneratorKind::Constant => Stmt::Constant(generators.constant.parse(leading, self, stream)?),
            GeneratorKind::Return => Stmt::Return(generators.ret.parse(leading, self, stream)?),
            GeneratorKind::Expression => {
                let expr = generators.expression.parse(leading, self, stream)?;
                expect_next(stream, TokenKind::Semicolon, "';'")?;
                Stmt::Expr(expr)
            }
        };
        Ok(Spanned::new(stmt, start.to(stream.previous_span())))
    }

    /// Statements up to the `}` matching `open`.
    pub fn parse_block(&mut self, open: &Token, stream: &mut TokenStream) -> Result<Spanned<Block>, CompileError> {
        self.nested(open.span, |analyzer| {
            let mut stmts = Vec::new();
            loop {
                match stream.peek_kind() {
                    None => return Err(CompileError::unexpected_end("'}'", stream.eof_span())),
                    Some(TokenKind::RBrace) => {
                        stream.next();
                        break;
                    }
                    Some(TokenKind::Semicolon) => {
                        stream.next();
                    }
                    Some(_) => stmts.push(analyzer.parse_statement(stream)?),
                }
            }
            Ok(Spanned::new(Block { stmts }, open.span.to(stream.previous_span())))
        })
    }

    /// Run `f` one nesting level deeper, failing at `at` once [`MAX_NESTING`]
    /// levels are already open.
    pub fn nested<R>(
        &mut self,
        at: Span,
        f: impl FnOnce(&mut Self) -> Result<R, CompileError>,
    ) -> Result<R, CompileError> {
        self.descend(at)?;
        let result = f(self);
        self.ascend(1);
        result
    }

    /// Open one nesting level without a matching scope; pair with [`Self::ascend`].
    pub fn descend(&mut self, at: Span) -> Result<(), CompileError> {
        if self.context.nesting >= MAX_NESTING {
            return Err(CompileError::syntax(SyntaxErrorKind::NestingTooDeep { limit: MAX_NESTING }, at));
        }
        self.context.nesting += 1;
        Ok(())
    }

    pub fn ascend(&mut self, levels: usize) {
        self.context.nesting = self.context.nesting.saturating_sub(levels);
    }

    pub fn set_namespace(&mut self, namespace: Option<String>) {
        self.context.current_namespace = namespace;
    }

    /// Run `f` with `class` as the enclosing class. The previous value is
    /// restored whether `f` succeeds or fails.
    pub fn with_class<R>(
        &mut self,
        class: &str,
        f: impl FnOnce(&mut Self) -> Result<R, CompileError>,
    ) -> Result<R, CompileError> {
        let previous = self.context.current_class.replace(class.to_string());
        let result = f(self);
        self.context.current_class = previous;
        result
    }

    /// Run `f` inside a function body.
    pub fn with_function<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R, CompileError>) -> Result<R, CompileError> {
        self.context.function_depth += 1;
        let result = f(self);
        self.context.function_depth -= 1;
        result
    }
}

/// Name of the class a nested declaration was trying to open, for the diagnostic.
fn nested_class_name(leading: &Token, stream: &TokenStream) -> String {
    let offset = if leading.kind == TokenKind::Class {
        0
    } else {
        let mut n = 0;
        while stream.lookahead(n).is_some_and(|t| t.kind != TokenKind::Class) && n < 4 {
            n += 1;
        }
        n + 1
    };
    stream
        .lookahead(offset)
        .filter(|t| t.kind == TokenKind::Ident)
        .map(|t| t.text.clone())
        .unwrap_or_else(|| "<anonymous>".to_string())
}
