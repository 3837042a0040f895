use crate::diagnostics::{CompileError, SyntaxErrorKind};
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::parser::analyzer::SyntaxAnalyzer;
use crate::parser::ast::{ClassDecl, ClassMember, MethodDecl};
use crate::parser::generator::{Generator, expect_next, next_token, parse_qualified_name};
use crate::parser::modifiers::{Modifier, ModifierTarget, PendingModifiers};
use crate::span::Spanned;

/// `[abstract|final] class Name [extends Parent] [implements I, J] { members }`
pub struct ClassGenerator;

impl Generator for ClassGenerator {
    type Output = ClassDecl;

    fn parse(
        &self,
        leading: Token,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<ClassDecl, CompileError> {
        let mut modifiers = PendingModifiers::new();
        let mut keyword = leading;
        while let Some(modifier) = Modifier::from_token(keyword.kind) {
            modifiers.push(modifier, keyword.span)?;
            keyword = next_token(stream, "'class'")?;
        }
        if keyword.kind != TokenKind::Class {
            return Err(CompileError::unexpected("'class'", &keyword, keyword.span));
        }
        let applied = modifiers.take(ModifierTarget::Class)?;

        let name_token = expect_next(stream, TokenKind::Ident, "class name")?;
        let name = Spanned::new(name_token.text, name_token.span);

        let extends = match stream.next_if(TokenKind::Extends) {
            Some(_) => Some(parse_qualified_name(stream, "parent class name")?),
            None => None,
        };

        let mut implements = Vec::new();
        if stream.next_if(TokenKind::Implements).is_some() {
            loop {
                implements.push(parse_qualified_name(stream, "interface name")?);
                if stream.next_if(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        expect_next(stream, TokenKind::LBrace, "'{'")?;

        let namespace = analyzer.context().current_namespace.clone();
        let members = analyzer.with_class(&name.node, |analyzer| parse_members(&name.node, analyzer, stream))?;

        tracing::debug!(
            class = %name.node,
            members = members.len(),
            is_abstract = applied.is_abstract(),
            "parsed class"
        );

        Ok(ClassDecl {
            name,
            namespace,
            is_abstract: applied.is_abstract(),
            is_final: applied.is_final(),
            extends,
            implements,
            members,
        })
    }
}

fn parse_members(
    class: &str,
    analyzer: &mut SyntaxAnalyzer<'_>,
    stream: &mut TokenStream,
) -> Result<Vec<Spanned<ClassMember>>, CompileError> {
    let generators = analyzer.generators();
    let mut members = Vec::new();
    let mut pending = PendingModifiers::new();

    loop {
        let Some(token) = stream.next() else {
            return Err(CompileError::unexpected_end("'}'", stream.eof_span()));
        };

        if let Some(modifier) = Modifier::from_token(token.kind) {
            pending.push(modifier, token.span)?;
            continue;
        }

        let start = pending.first_span().unwrap_or(token.span);
        match token.kind {
            TokenKind::RBrace => {
                if let Some(span) = pending.first_span() {
                    return Err(CompileError::syntax(SyntaxErrorKind::DanglingModifiers, span));
                }
                return Ok(members);
            }
            TokenKind::Const => {
                let applied = pending.take(ModifierTarget::Constant)?;
                let mut constant = generators.constant.parse(token, analyzer, stream)?;
                constant.visibility = applied.visibility;
                constant.is_final = applied.is_final();
                members.push(Spanned::new(ClassMember::Constant(constant), start.to(stream.previous_span())));
            }
            TokenKind::Function => {
                let applied = pending.take(ModifierTarget::Method)?;
                let function = generators.function.parse(token, analyzer, stream)?;
                match (&function.body, applied.is_abstract()) {
                    (Some(body), true) => {
                        return Err(CompileError::syntax(
                            SyntaxErrorKind::AbstractMethodWithBody(function.name.node.clone()),
                            body.span,
                        ));
                    }
                    (None, false) => {
                        return Err(CompileError::syntax(
                            SyntaxErrorKind::MissingBody(format!("method '{}'", function.name.node)),
                            function.name.span,
                        ));
                    }
                    _ => {}
                }
                let method = MethodDecl {
                    function,
                    visibility: applied.visibility,
                    is_static: applied.is_static(),
                    is_abstract: applied.is_abstract(),
                    is_final: applied.is_final(),
                    class: class.to_string(),
                };
                members.push(Spanned::new(ClassMember::Method(method), start.to(stream.previous_span())));
            }
            // The analyzer owns the nesting rule and rejects this.
            TokenKind::Class => {
                analyzer.dispatch(token, stream)?;
            }
            _ => {
                return Err(CompileError::syntax(
                    SyntaxErrorKind::UnexpectedMember { found: token.to_string() },
                    token.span,
                ));
            }
        }
    }
}
