use serde::Serialize;

use crate::parser::modifiers::Visibility;
use crate::runtime::operator::{Operator, UnaryOperator};
use crate::span::Spanned;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub stmts: Vec<Spanned<Stmt>>,
}

impl Program {
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.stmts.iter().filter_map(|s| match &s.node {
            Stmt::Class(c) => Some(c),
            _ => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.stmts.iter().filter_map(|s| match &s.node {
            Stmt::Function(f) => Some(f),
            _ => None,
        })
    }

    pub fn constants(&self) -> impl Iterator<Item = &ConstDecl> {
        self.stmts.iter().filter_map(|s| match &s.node {
            Stmt::Constant(c) => Some(c),
            _ => None,
        })
    }

    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes().find(|c| c.name.node.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    Namespace(NamespaceDecl),
    Class(ClassDecl),
    Function(FunctionDecl),
    Constant(ConstDecl),
    Return(Option<Spanned<Expr>>),
    Expr(Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceDecl {
    pub name: Spanned<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub stmts: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDecl {
    pub name: Spanned<String>,
    /// Namespace in effect where the class was declared.
    pub namespace: Option<String>,
    pub is_abstract: bool,
    pub is_final: bool,
    pub extends: Option<Spanned<String>>,
    pub implements: Vec<Spanned<String>>,
    /// Constants and methods in source order.
    pub members: Vec<Spanned<ClassMember>>,
}

impl ClassDecl {
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}\\{}", self.name.node),
            None => self.name.node.clone(),
        }
    }

    pub fn constants(&self) -> impl Iterator<Item = &ConstDecl> {
        self.members.iter().filter_map(|m| match &m.node {
            ClassMember::Constant(c) => Some(c),
            ClassMember::Method(_) => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match &m.node {
            ClassMember::Method(method) => Some(method),
            ClassMember::Constant(_) => None,
        })
    }

    /// Method names are case-insensitive.
    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods().find(|m| m.function.name.node.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassMember {
    Constant(ConstDecl),
    Method(MethodDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDecl {
    pub function: FunctionDecl,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    /// Name of the declaring class.
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstDecl {
    pub name: Spanned<String>,
    pub value: Spanned<Expr>,
    pub visibility: Visibility,
    pub is_final: bool,
    /// Declaring class for class constants.
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: Spanned<String>,
    pub namespace: Option<String>,
    pub params: Vec<Spanned<Param>>,
    /// `None` for bodiless (`;`-terminated) declarations.
    pub body: Option<Spanned<Block>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    /// Variable name without the leading `$`.
    pub name: Spanned<String>,
    pub hint: Option<Spanned<String>>,
    pub by_ref: bool,
    pub default: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Variable(String),
    ConstFetch(String),
    ClassConstFetch {
        class: Spanned<String>,
        name: Spanned<String>,
    },
    Array(Vec<ArrayItem>),
    Unary {
        op: UnaryOperator,
        operand: Box<Spanned<Expr>>,
    },
    Binary {
        op: Operator,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    Assign {
        target: Box<Spanned<Expr>>,
        value: Box<Spanned<Expr>>,
        by_ref: bool,
    },
    Call {
        callee: Spanned<String>,
        args: Vec<Spanned<Expr>>,
    },
    Grouping(Box<Spanned<Expr>>),
}

impl Expr {
    /// Short noun phrase used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Expr::Null | Expr::Bool(_) | Expr::Int(_) | Expr::Float(_) | Expr::String(_) => "literal",
            Expr::Variable(_) => "variable",
            Expr::ConstFetch(_) => "constant",
            Expr::ClassConstFetch { .. } => "class constant",
            Expr::Array(_) => "array literal",
            Expr::Unary { .. } | Expr::Binary { .. } => "operator expression",
            Expr::Assign { .. } => "assignment",
            Expr::Call { .. } => "function call",
            Expr::Grouping(_) => "parenthesized expression",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayItem {
    pub key: Option<Spanned<Expr>>,
    pub value: Spanned<Expr>,
}
