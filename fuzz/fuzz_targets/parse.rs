#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lyra::lexer::{Token, TokenKind, TokenStream};
use lyra::span::Span;

/// Token kinds the analyzer dispatches on, with representative text
#[derive(Arbitrary, Debug)]
enum FuzzToken {
    Namespace,
    Class,
    Extends,
    Implements,
    Function,
    Const,
    Return,
    Public,
    Private,
    Protected,
    Static,
    Abstract,
    Final,
    Ident,
    Variable,
    IntLit,
    StringLit,
    Plus,
    Star,
    StarStar,
    Dot,
    Eq,
    Amp,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    FatArrow,
    DoubleColon,
    Backslash,
}

impl FuzzToken {
    fn to_token(&self, offset: usize) -> Token {
        let (kind, text) = match self {
            FuzzToken::Namespace => (TokenKind::Namespace, "namespace"),
            FuzzToken::Class => (TokenKind::Class, "class"),
            FuzzToken::Extends => (TokenKind::Extends, "extends"),
            FuzzToken::Implements => (TokenKind::Implements, "implements"),
            FuzzToken::Function => (TokenKind::Function, "function"),
            FuzzToken::Const => (TokenKind::Const, "const"),
            FuzzToken::Return => (TokenKind::Return, "return"),
            FuzzToken::Public => (TokenKind::Public, "public"),
            FuzzToken::Private => (TokenKind::Private, "private"),
            FuzzToken::Protected => (TokenKind::Protected, "protected"),
            FuzzToken::Static => (TokenKind::Static, "static"),
            FuzzToken::Abstract => (TokenKind::Abstract, "abstract"),
            FuzzToken::Final => (TokenKind::Final, "final"),
            FuzzToken::Ident => (TokenKind::Ident, "x"),
            FuzzToken::Variable => (TokenKind::Variable, "$x"),
            FuzzToken::IntLit => (TokenKind::IntLit, "42"),
            FuzzToken::StringLit => (TokenKind::StringLit, "'str'"),
            FuzzToken::Plus => (TokenKind::Plus, "+"),
            FuzzToken::Star => (TokenKind::Star, "*"),
            FuzzToken::StarStar => (TokenKind::StarStar, "**"),
            FuzzToken::Dot => (TokenKind::Dot, "."),
            FuzzToken::Eq => (TokenKind::Eq, "="),
            FuzzToken::Amp => (TokenKind::Amp, "&"),
            FuzzToken::LParen => (TokenKind::LParen, "("),
            FuzzToken::RParen => (TokenKind::RParen, ")"),
            FuzzToken::LBrace => (TokenKind::LBrace, "{"),
            FuzzToken::RBrace => (TokenKind::RBrace, "}"),
            FuzzToken::LBracket => (TokenKind::LBracket, "["),
            FuzzToken::RBracket => (TokenKind::RBracket, "]"),
            FuzzToken::Comma => (TokenKind::Comma, ","),
            FuzzToken::Semicolon => (TokenKind::Semicolon, ";"),
            FuzzToken::FatArrow => (TokenKind::FatArrow, "=>"),
            FuzzToken::DoubleColon => (TokenKind::DoubleColon, "::"),
            FuzzToken::Backslash => (TokenKind::Backslash, "\\"),
        };
        Token::new(kind, text, Span::new(offset, offset + 1))
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzTokens {
    tokens: Vec<FuzzToken>,
}

fuzz_target!(|input: FuzzTokens| {
    let tokens: Vec<Token> = input.tokens.iter().enumerate().map(|(i, t)| t.to_token(i)).collect();
    let mut stream = TokenStream::from_tokens(tokens);

    // Feed to the analyzer - should never panic
    let _ = lyra::parser::parse_program(&mut stream);
});
