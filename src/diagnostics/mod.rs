use crate::parser::modifiers::Modifier;
use crate::runtime::EvalError;
use crate::span::Span;
use std::path::PathBuf;
use thiserror::Error;

/// What went wrong during a parse. Every variant is fatal to the current parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("duplicate modifier '{0}'")]
    DuplicateModifier(Modifier),

    #[error("multiple visibility modifiers: '{first}' and '{second}'")]
    DuplicateVisibility { first: Modifier, second: Modifier },

    #[error("modifiers '{0}' and '{1}' cannot be combined")]
    ConflictingModifiers(Modifier, Modifier),

    #[error("modifier '{modifier}' is not allowed on {target}")]
    ModifierNotAllowed { modifier: Modifier, target: &'static str },

    #[error("modifiers without a following member")]
    DanglingModifiers,

    #[error("cannot declare class '{name}' inside class '{enclosing}'")]
    NestedClass { name: String, enclosing: String },

    #[error("unexpected {found} in class body, expected a constant or method declaration")]
    UnexpectedMember { found: String },

    #[error("abstract method '{0}' cannot have a body")]
    AbstractMethodWithBody(String),

    #[error("{0} requires a body")]
    MissingBody(String),

    #[error("namespace declaration must be at the top level")]
    NamespaceNotTopLevel,

    #[error("cannot assign to {0}")]
    InvalidAssignmentTarget(String),

    #[error("invalid numeric literal '{0}'")]
    InvalidNumber(String),

    #[error("nesting is deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl SyntaxErrorKind {
    /// True for errors caused by repeating or combining modifiers.
    pub fn is_modifier_error(&self) -> bool {
        matches!(
            self,
            SyntaxErrorKind::DuplicateModifier(_)
                | SyntaxErrorKind::DuplicateVisibility { .. }
                | SyntaxErrorKind::ConflictingModifiers(..)
                | SyntaxErrorKind::ModifierNotAllowed { .. }
                | SyntaxErrorKind::DanglingModifiers
        )
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Lex error: {msg}")]
    Lex { msg: String, span: Span },

    #[error("Syntax error: {kind} on line {}", .span.line)]
    Syntax { kind: SyntaxErrorKind, span: Span },

    #[error("Config error: {msg}")]
    Config { msg: String, path: PathBuf },
}

impl CompileError {
    pub fn lex(msg: impl Into<String>, span: Span) -> Self {
        Self::Lex { msg: msg.into(), span }
    }

    pub fn syntax(kind: SyntaxErrorKind, span: Span) -> Self {
        Self::Syntax { kind, span }
    }

    pub fn unexpected(expected: impl Into<String>, found: impl ToString, span: Span) -> Self {
        Self::syntax(
            SyntaxErrorKind::UnexpectedToken { expected: expected.into(), found: found.to_string() },
            span,
        )
    }

    pub fn unexpected_end(expected: impl Into<String>, span: Span) -> Self {
        Self::syntax(SyntaxErrorKind::UnexpectedEnd { expected: expected.into() }, span)
    }

    pub fn config(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Config { msg: msg.into(), path }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lex { span, .. } | CompileError::Syntax { span, .. } => Some(*span),
            CompileError::Config { .. } => None,
        }
    }

    pub fn syntax_kind(&self) -> Option<&SyntaxErrorKind> {
        match self {
            CompileError::Syntax { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// Render a CompileError with ariadne for nice terminal output.
pub fn render_error(source: &str, filename: &str, err: &CompileError) {
    match err {
        CompileError::Lex { msg, span } => {
            report(source, filename, "lex error", msg, *span);
        }
        CompileError::Syntax { kind, span } => {
            report(source, filename, "syntax error", &kind.to_string(), *span);
        }
        CompileError::Config { msg, path } => {
            eprintln!("error[config]: {msg}");
            eprintln!("  --> {}", path.display());
        }
    }
}

/// Render a constant-evaluation failure against the source it came from.
pub fn render_eval_error(source: &str, filename: &str, err: &EvalError) {
    let msg = match err {
        EvalError::Operator { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    report(source, filename, "evaluation error", &msg, err.span());
}

fn report(source: &str, filename: &str, title: &str, msg: &str, span: Span) {
    use ariadne::{Label, Report, ReportKind, Source};

    let end = span.end.max(span.start).min(source.len());
    let start = span.start.min(end);
    let printed = Report::build(ReportKind::Error, (), start)
        .with_message(format!("{title} in {filename}"))
        .with_label(Label::new(start..end).with_message(msg))
        .finish()
        .eprint(Source::from(source));
    if printed.is_err() {
        eprintln!("{filename}:{}: {title}: {msg}", span.line);
    }
}
