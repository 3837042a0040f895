use logos::Logos;
use serde::Serialize;

use crate::span::Span;

/// Closed set of token tags. Payload-free so kinds can be compared, hashed and
/// used as dispatch keys; the raw text lives on [`Token`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"<\?php")]
#[logos(skip r"\?>")]
#[logos(skip r"(//|#)[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum TokenKind {
    // Declaration keywords
    #[token("namespace", ignore(ascii_case))]
    Namespace,
    #[token("class", ignore(ascii_case))]
    Class,
    #[token("extends", ignore(ascii_case))]
    Extends,
    #[token("implements", ignore(ascii_case))]
    Implements,
    #[token("function", ignore(ascii_case))]
    Function,
    #[token("const", ignore(ascii_case))]
    Const,
    #[token("return", ignore(ascii_case))]
    Return,

    // Modifiers
    #[token("public", ignore(ascii_case))]
    Public,
    #[token("private", ignore(ascii_case))]
    Private,
    #[token("protected", ignore(ascii_case))]
    Protected,
    #[token("static", ignore(ascii_case))]
    Static,
    #[token("abstract", ignore(ascii_case))]
    Abstract,
    #[token("final", ignore(ascii_case))]
    Final,

    // Literals
    #[token("true", ignore(ascii_case))]
    True,
    #[token("false", ignore(ascii_case))]
    False,
    #[token("null", ignore(ascii_case))]
    Null,
    #[regex(r"0[xX][0-9a-fA-F]+|0[bB][01]+|[0-9]+")]
    IntLit,
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?|\.[0-9]+([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+")]
    FloatLit,
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    StringLit,

    // Names
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    Variable,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    #[token("<>")]
    BangEq,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    BangEqEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=>")]
    FatArrow,
    #[token("::")]
    DoubleColon,
    #[token("\\")]
    Backslash,
}

impl TokenKind {
    /// Keyword that introduces a modifier (visibility, static, abstract, final).
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Private
                | TokenKind::Protected
                | TokenKind::Static
                | TokenKind::Abstract
                | TokenKind::Final
        )
    }

    /// Tokens that can begin an expression.
    pub fn starts_expression(self) -> bool {
        matches!(
            self,
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
                | TokenKind::LBracket
        )
    }

    /// Short human-readable description used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Namespace => "'namespace'",
            TokenKind::Class => "'class'",
            TokenKind::Extends => "'extends'",
            TokenKind::Implements => "'implements'",
            TokenKind::Function => "'function'",
            TokenKind::Const => "'const'",
            TokenKind::Return => "'return'",
            TokenKind::Public => "'public'",
            TokenKind::Private => "'private'",
            TokenKind::Protected => "'protected'",
            TokenKind::Static => "'static'",
            TokenKind::Abstract => "'abstract'",
            TokenKind::Final => "'final'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::IntLit => "integer literal",
            TokenKind::FloatLit => "float literal",
            TokenKind::StringLit => "string literal",
            TokenKind::Ident => "identifier",
            TokenKind::Variable => "variable",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::StarStar => "'**'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Dot => "'.'",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::EqEqEq => "'==='",
            TokenKind::BangEqEq => "'!=='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::PipePipe => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::Amp => "'&'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::FatArrow => "'=>'",
            TokenKind::DoubleColon => "'::'",
            TokenKind::Backslash => "'\\'",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// An immutable lexical unit: kind tag, raw source text and position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self { kind, text: text.into(), span }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Ident | TokenKind::Variable | TokenKind::IntLit | TokenKind::FloatLit => {
                write!(f, "{} '{}'", self.kind.describe(), self.text)
            }
            _ => f.write_str(self.kind.describe()),
        }
    }
}
