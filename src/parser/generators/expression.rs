use crate::diagnostics::{CompileError, SyntaxErrorKind};
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::parser::analyzer::SyntaxAnalyzer;
use crate::parser::ast::{ArrayItem, Expr};
use crate::parser::generator::{Generator, expect_next, next_token, parse_qualified_name};
use crate::runtime::operator::{Associativity, Operator, UnaryOperator};
use crate::span::Spanned;

/// Assignment binds looser than every operator and groups to the right.
const ASSIGN_PRECEDENCE: u8 = 5;

/// Precedence-climbing expression parser. Binding strength comes from the
/// operator table in [`crate::runtime::operator`].
pub struct ExpressionGenerator;

impl Generator for ExpressionGenerator {
    type Output = Spanned<Expr>;

    fn parse(
        &self,
        _leading: Token,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<Spanned<Expr>, CompileError> {
        // The leading token is the first operand; let the prefix parser see it.
        stream.push_back();
        self.parse_expr(analyzer, stream, 0)
    }
}

impl ExpressionGenerator {
    /// One nesting level per call. Every operator folded into the left operand
    /// deepens the tree as well, so it holds a level until the call returns.
    pub fn parse_expr(
        &self,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
        min_prec: u8,
    ) -> Result<Spanned<Expr>, CompileError> {
        analyzer.nested(stream.current_span(), |analyzer| {
            let mut folds = 0;
            let result = self.parse_operators(analyzer, stream, min_prec, &mut folds);
            analyzer.ascend(folds);
            result
        })
    }

    fn parse_operators(
        &self,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
        min_prec: u8,
        folds: &mut usize,
    ) -> Result<Spanned<Expr>, CompileError> {
        let mut lhs = self.parse_prefix(analyzer, stream)?;

        loop {
            let Some(kind) = stream.peek_kind() else { break };

            if kind == TokenKind::Eq {
                if min_prec > ASSIGN_PRECEDENCE {
                    break;
                }
                if !matches!(lhs.node, Expr::Variable(_)) {
                    return Err(CompileError::syntax(
                        SyntaxErrorKind::InvalidAssignmentTarget(lhs.node.describe().to_string()),
                        lhs.span,
                    ));
                }
                stream.next();
                let by_ref = stream.next_if(TokenKind::Amp).is_some();
                let value = self.parse_expr(analyzer, stream, ASSIGN_PRECEDENCE)?;
                if by_ref && !matches!(value.node, Expr::Variable(_)) {
                    return Err(CompileError::unexpected("variable after '&'", value.node.describe(), value.span));
                }
                let span = lhs.span.to(value.span);
                lhs = Spanned::new(Expr::Assign { target: Box::new(lhs), value: Box::new(value), by_ref }, span);
                continue;
            }

            let Some(op) = Operator::from_token(kind) else { break };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            analyzer.descend(stream.current_span())?;
            *folds += 1;
            stream.next();
            let next_min = match op.associativity() {
                Associativity::Left => prec + 1,
                Associativity::Right => prec,
            };
            let rhs = self.parse_expr(analyzer, stream, next_min)?;
            let span = lhs.span.to(rhs.span);
            lhs = Spanned::new(Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }, span);
        }

        Ok(lhs)
    }

    fn parse_prefix(
        &self,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<Spanned<Expr>, CompileError> {
        let token = next_token(stream, "expression")?;
        let span = token.span;

        if let Some(op) = UnaryOperator::from_token(token.kind) {
            let operand = self.parse_expr(analyzer, stream, UnaryOperator::PRECEDENCE)?;
            let span = span.to(operand.span);
            return Ok(Spanned::new(Expr::Unary { op, operand: Box::new(operand) }, span));
        }

        let expr = match token.kind {
            TokenKind::IntLit => parse_int(&token)?,
            TokenKind::FloatLit => match token.text.parse::<f64>() {
                Ok(f) => Expr::Float(f),
                Err(_) => return Err(invalid_number(&token)),
            },
            TokenKind::StringLit => Expr::String(unescape(&token.text)),
            TokenKind::True => Expr::Bool(true),
            TokenKind::False => Expr::Bool(false),
            TokenKind::Null => Expr::Null,
            TokenKind::Variable => Expr::Variable(token.text.trim_start_matches('$').to_string()),
            TokenKind::Ident | TokenKind::Backslash => {
                stream.push_back();
                return self.parse_name(analyzer, stream);
            }
            TokenKind::LParen => {
                let inner = self.parse_expr(analyzer, stream, 0)?;
                let close = expect_next(stream, TokenKind::RParen, "')'")?;
                return Ok(Spanned::new(Expr::Grouping(Box::new(inner)), span.to(close.span)));
            }
            TokenKind::LBracket => {
                let items = self.parse_array_items(analyzer, stream)?;
                return Ok(Spanned::new(Expr::Array(items), span.to(stream.previous_span())));
            }
            _ => return Err(CompileError::unexpected("expression", &token, span)),
        };
        Ok(Spanned::new(expr, span))
    }

    /// Constant fetch, class constant fetch (`A::X`) or call (`f(...)`).
    fn parse_name(
        &self,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<Spanned<Expr>, CompileError> {
        let name = parse_qualified_name(stream, "name")?;

        if stream.next_if(TokenKind::LParen).is_some() {
            let args = self.parse_args(analyzer, stream)?;
            let span = name.span.to(stream.previous_span());
            return Ok(Spanned::new(Expr::Call { callee: name, args }, span));
        }

        if stream.next_if(TokenKind::DoubleColon).is_some() {
            let constant = expect_next(stream, TokenKind::Ident, "constant name")?;
            let span = name.span.to(constant.span);
            let constant = Spanned::new(constant.text, constant.span);
            return Ok(Spanned::new(Expr::ClassConstFetch { class: name, name: constant }, span));
        }

        Ok(name.map(Expr::ConstFetch))
    }

    fn parse_args(
        &self,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<Vec<Spanned<Expr>>, CompileError> {
        let mut args = Vec::new();
        loop {
            if stream.next_if(TokenKind::RParen).is_some() {
                return Ok(args);
            }
            args.push(self.parse_expr(analyzer, stream, 0)?);
            if stream.next_if(TokenKind::Comma).is_none() {
                expect_next(stream, TokenKind::RParen, "',' or ')'")?;
                return Ok(args);
            }
        }
    }

    fn parse_array_items(
        &self,
        analyzer: &mut SyntaxAnalyzer<'_>,
        stream: &mut TokenStream,
    ) -> Result<Vec<ArrayItem>, CompileError> {
        let mut items = Vec::new();
        loop {
            if stream.next_if(TokenKind::RBracket).is_some() {
                return Ok(items);
            }
            let first = self.parse_expr(analyzer, stream, 0)?;
            let item = if stream.next_if(TokenKind::FatArrow).is_some() {
                ArrayItem { key: Some(first), value: self.parse_expr(analyzer, stream, 0)? }
            } else {
                ArrayItem { key: None, value: first }
            };
            items.push(item);
            if stream.next_if(TokenKind::Comma).is_none() {
                expect_next(stream, TokenKind::RBracket, "',' or ']'")?;
                return Ok(items);
            }
        }
    }
}

fn invalid_number(token: &Token) -> CompileError {
    CompileError::syntax(SyntaxErrorKind::InvalidNumber(token.text.clone()), token.span)
}

/// Decimal, `0x` hex or `0b` binary. Values past `i64::MAX` become floats.
fn parse_int(token: &Token) -> Result<Expr, CompileError> {
    let text = token.text.as_str();
    let (digits, radix) = match text.get(..2) {
        Some("0x" | "0X") => (&text[2..], 16),
        Some("0b" | "0B") => (&text[2..], 2),
        _ => (text, 10),
    };
    if let Ok(n) = i64::from_str_radix(digits, radix) {
        return Ok(Expr::Int(n));
    }
    if radix == 10 {
        return text.parse::<f64>().map(Expr::Float).map_err(|_| invalid_number(token));
    }
    u128::from_str_radix(digits, radix)
        .map(|n| Expr::Float(n as f64))
        .map_err(|_| invalid_number(token))
}

/// Strip quotes and resolve escapes. Single-quoted strings only know `\\` and `\'`.
fn unescape(literal: &str) -> String {
    let double = literal.starts_with('"');
    let inner = &literal[1..literal.len().saturating_sub(1).max(1)];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        let resolved = match (double, next) {
            (_, '\\') => Some('\\'),
            (false, '\'') => Some('\''),
            (true, '"') => Some('"'),
            (true, 'n') => Some('\n'),
            (true, 't') => Some('\t'),
            (true, 'r') => Some('\r'),
            (true, 'v') => Some('\x0b'),
            (true, 'f') => Some('\x0c'),
            (true, 'e') => Some('\x1b'),
            (true, '0') => Some('\0'),
            (true, '$') => Some('$'),
            _ => None,
        };
        match resolved {
            Some(r) => out.push(r),
            None => {
                out.push('\\');
                out.push(next);
            }
        }
    }
    out
}
