use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::parser::analyzer::SyntaxAnalyzer;
use crate::parser::ast::NamespaceDecl;
use crate::parser::generator::{Generator, expect_next, parse_qualified_name};

/// `namespace A\B;` switches the namespace for every following declaration.
pub struct NamespaceGenerator;

impl Generator for NamespaceGenerator {
    type Output = NamespaceDecl;

    fn parse(
        &self,
        _leading: Token,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<NamespaceDecl, CompileError> {
        let name = parse_qualified_name(stream, "namespace name")?;
        expect_next(stream, TokenKind::Semicolon, "';'")?;
        let normalized = name.node.trim_start_matches('\\').to_string();
        tracing::debug!(namespace = %normalized, "entering namespace");
        analyzer.set_namespace(Some(normalized));
        Ok(NamespaceDecl { name })
    }
}
