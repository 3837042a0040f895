//! Operator nodes: one table entry per operator, carrying its precedence and
//! the evaluation function over already-evaluated operands.
//!
//! Precedence uses a single convention everywhere: a higher number binds
//! tighter.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::config::RuntimeConfig;
use super::error::OperatorError;
use super::memory::Memory;
use super::ops;
use crate::lexer::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Associativity {
    Left,
    Right,
}

pub type BinaryFn = fn(&Memory, &Memory, &RuntimeConfig) -> Result<Memory, OperatorError>;

pub struct OperatorInfo {
    /// Stable lowercase name, used in JSON dumps and logs.
    pub code: &'static str,
    pub symbol: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub eval: BinaryFn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Or,
    And,
    Equal,
    NotEqual,
    Identical,
    NotIdentical,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Concat,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

fn relational(a: &Memory, b: &Memory, test: fn(Ordering) -> bool) -> Result<Memory, OperatorError> {
    Ok(Memory::bool(ops::compare(a, b)?.is_some_and(test)))
}

// Indexed by `Operator as usize`; keep in declaration order.
static OPERATORS: [OperatorInfo; 17] = [
    OperatorInfo {
        code: "or",
        symbol: "||",
        precedence: 10,
        associativity: Associativity::Left,
        eval: |a, b, _| Ok(ops::or(a, b)),
    },
    OperatorInfo {
        code: "and",
        symbol: "&&",
        precedence: 20,
        associativity: Associativity::Left,
        eval: |a, b, _| Ok(ops::and(a, b)),
    },
    OperatorInfo {
        code: "equal",
        symbol: "==",
        precedence: 30,
        associativity: Associativity::Left,
        eval: |a, b, _| Ok(Memory::bool(ops::loose_equals(a, b))),
    },
    OperatorInfo {
        code: "not_equal",
        symbol: "!=",
        precedence: 30,
        associativity: Associativity::Left,
        eval: |a, b, _| Ok(Memory::bool(!ops::loose_equals(a, b))),
    },
    OperatorInfo {
        code: "identical",
        symbol: "===",
        precedence: 30,
        associativity: Associativity::Left,
        eval: |a, b, _| Ok(Memory::bool(ops::identical(a, b))),
    },
    OperatorInfo {
        code: "not_identical",
        symbol: "!==",
        precedence: 30,
        associativity: Associativity::Left,
        eval: |a, b, _| Ok(Memory::bool(!ops::identical(a, b))),
    },
    OperatorInfo {
        code: "less",
        symbol: "<",
        precedence: 40,
        associativity: Associativity::Left,
        eval: |a, b, _| relational(a, b, Ordering::is_lt),
    },
    OperatorInfo {
        code: "greater",
        symbol: ">",
        precedence: 40,
        associativity: Associativity::Left,
        eval: |a, b, _| relational(a, b, Ordering::is_gt),
    },
    OperatorInfo {
        code: "less_equal",
        symbol: "<=",
        precedence: 40,
        associativity: Associativity::Left,
        eval: |a, b, _| relational(a, b, Ordering::is_le),
    },
    OperatorInfo {
        code: "greater_equal",
        symbol: ">=",
        precedence: 40,
        associativity: Associativity::Left,
        eval: |a, b, _| relational(a, b, Ordering::is_ge),
    },
    OperatorInfo {
        code: "concat",
        symbol: ".",
        precedence: 50,
        associativity: Associativity::Left,
        eval: |a, b, _| ops::concat(a, b),
    },
    OperatorInfo {
        code: "add",
        symbol: "+",
        precedence: 60,
        associativity: Associativity::Left,
        eval: |a, b, _| ops::add(a, b),
    },
    OperatorInfo {
        code: "sub",
        symbol: "-",
        precedence: 60,
        associativity: Associativity::Left,
        eval: |a, b, _| ops::sub(a, b),
    },
    OperatorInfo {
        code: "mul",
        symbol: "*",
        precedence: 70,
        associativity: Associativity::Left,
        eval: |a, b, _| ops::mul(a, b),
    },
    OperatorInfo {
        code: "div",
        symbol: "/",
        precedence: 70,
        associativity: Associativity::Left,
        eval: |a, b, config| ops::div(a, b, config.arithmetic.division_by_zero),
    },
    OperatorInfo {
        code: "mod",
        symbol: "%",
        precedence: 70,
        associativity: Associativity::Left,
        eval: |a, b, config| ops::modulo(a, b, config.arithmetic.division_by_zero),
    },
    OperatorInfo {
        code: "pow",
        symbol: "**",
        precedence: 90,
        associativity: Associativity::Right,
        eval: |a, b, _| ops::pow(a, b),
    },
];

impl Operator {
    pub const ALL: [Operator; 17] = [
        Operator::Or,
        Operator::And,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Identical,
        Operator::NotIdentical,
        Operator::Less,
        Operator::Greater,
        Operator::LessEqual,
        Operator::GreaterEqual,
        Operator::Concat,
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
        Operator::Pow,
    ];

    pub fn info(self) -> &'static OperatorInfo {
        &OPERATORS[self as usize]
    }

    pub fn from_token(kind: TokenKind) -> Option<Operator> {
        Some(match kind {
            TokenKind::PipePipe => Operator::Or,
            TokenKind::AmpAmp => Operator::And,
            TokenKind::EqEq => Operator::Equal,
            TokenKind::BangEq => Operator::NotEqual,
            TokenKind::EqEqEq => Operator::Identical,
            TokenKind::BangEqEq => Operator::NotIdentical,
            TokenKind::Lt => Operator::Less,
            TokenKind::Gt => Operator::Greater,
            TokenKind::LtEq => Operator::LessEqual,
            TokenKind::GtEq => Operator::GreaterEqual,
            TokenKind::Dot => Operator::Concat,
            TokenKind::Plus => Operator::Add,
            TokenKind::Minus => Operator::Sub,
            TokenKind::Star => Operator::Mul,
            TokenKind::Slash => Operator::Div,
            TokenKind::Percent => Operator::Mod,
            TokenKind::StarStar => Operator::Pow,
            _ => return None,
        })
    }

    pub fn precedence(self) -> u8 {
        self.info().precedence
    }

    pub fn associativity(self) -> Associativity {
        self.info().associativity
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn code(self) -> &'static str {
        self.info().code
    }

    /// Short-circuiting operators skip evaluating the right operand when the left decides.
    pub fn short_circuits(self, lhs: &Memory) -> Option<Memory> {
        match self {
            Operator::And if !lhs.to_boolean() => Some(Memory::FALSE),
            Operator::Or if lhs.to_boolean() => Some(Memory::TRUE),
            _ => None,
        }
    }

    pub fn eval(self, lhs: &Memory, rhs: &Memory, config: &RuntimeConfig) -> Result<Memory, OperatorError> {
        (self.info().eval)(lhs, rhs, config)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    Neg,
    Plus,
    Not,
}

impl UnaryOperator {
    /// Binds tighter than every binary operator except `**`, so `-2 ** 2` is `-(2 ** 2)`.
    pub const PRECEDENCE: u8 = 80;

    pub fn from_token(kind: TokenKind) -> Option<UnaryOperator> {
        match kind {
            TokenKind::Minus => Some(UnaryOperator::Neg),
            TokenKind::Plus => Some(UnaryOperator::Plus),
            TokenKind::Bang => Some(UnaryOperator::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Neg => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Not => "!",
        }
    }

    pub fn eval(self, operand: &Memory) -> Result<Memory, OperatorError> {
        match self {
            UnaryOperator::Neg => ops::negate(operand),
            UnaryOperator::Plus => ops::plus(operand),
            UnaryOperator::Not => Ok(ops::not(operand)),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
