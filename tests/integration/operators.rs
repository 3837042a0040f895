mod common;
use common::{eval, eval_with};

use lyra::lexer::TokenKind;
use lyra::parser::ast::Expr;
use lyra::runtime::{Associativity, EvalError, Kind, Memory, Operator, OperatorError, RuntimeConfig, UnaryOperator};

#[test]
fn table_is_complete_and_consistent() {
    for op in Operator::ALL {
        assert_eq!(op.info().symbol, op.symbol());
        assert!(op.precedence() > 0, "{op}");
        assert!(op.precedence() < UnaryOperator::PRECEDENCE || op == Operator::Pow, "{op}");
    }
    let mut codes: Vec<_> = Operator::ALL.iter().map(|op| op.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), Operator::ALL.len());
}

#[test]
fn precedence_ladder() {
    use Operator::*;
    let ladder = [Or, And, Equal, Less, Concat, Add, Mul, Pow];
    for pair in ladder.windows(2) {
        assert!(pair[0].precedence() < pair[1].precedence(), "{} should bind looser than {}", pair[0], pair[1]);
    }
    assert_eq!(Add.precedence(), Sub.precedence());
    assert_eq!(Mul.precedence(), Mod.precedence());
    assert_eq!(Identical.precedence(), NotEqual.precedence());
}

#[test]
fn only_pow_is_right_associative() {
    for op in Operator::ALL {
        let expected = if op == Operator::Pow { Associativity::Right } else { Associativity::Left };
        assert_eq!(op.associativity(), expected, "{op}");
    }
}

#[test]
fn tokens_map_to_operators() {
    assert_eq!(Operator::from_token(TokenKind::Dot), Some(Operator::Concat));
    assert_eq!(Operator::from_token(TokenKind::StarStar), Some(Operator::Pow));
    assert_eq!(Operator::from_token(TokenKind::BangEqEq), Some(Operator::NotIdentical));
    assert_eq!(Operator::from_token(TokenKind::Eq), None);
    assert_eq!(UnaryOperator::from_token(TokenKind::Bang), Some(UnaryOperator::Not));
    assert_eq!(UnaryOperator::from_token(TokenKind::Star), None);
}

#[test]
fn parsed_tree_follows_the_table() {
    let expr = lyra::parse_expression("$a || $b && $c == 1 + 2 * 3").unwrap();
    let Expr::Binary { op, rhs, .. } = &expr.node else { panic!("expected binary") };
    assert_eq!(*op, Operator::Or);
    let Expr::Binary { op, .. } = &rhs.node else { panic!("expected binary") };
    assert_eq!(*op, Operator::And);
}

#[test]
fn arithmetic_results() {
    assert_eq!(eval("1 + 2 * 3 - 4"), Memory::Int(3));
    assert_eq!(eval("10 % 4"), Memory::Int(2));
    assert_eq!(eval("2 ** -1"), Memory::Float(0.5));
    assert_eq!(eval("1.5 + 1.5"), Memory::Float(3.0));
    assert_eq!(eval("0x10 + 0b11"), Memory::Int(19));
    assert_eq!(eval("9223372036854775807 + 1").kind(), Kind::Float);
}

#[test]
fn numeric_strings_coerce() {
    assert_eq!(eval("'5' * '4'"), Memory::Int(20));
    assert_eq!(eval("'2.5' + 1"), Memory::Float(3.5));
    assert_eq!(eval("'12abc' + 1"), Memory::Int(13));
    assert_eq!(eval("null + true"), Memory::Int(1));
}

#[test]
fn concat_and_arithmetic_mix() {
    assert_eq!(eval("'n=' . 1 + 1"), Memory::from("n=2"));
    assert_eq!(eval("1 . 2"), Memory::from("12"));
    assert_eq!(eval("'x' . null . true . false"), Memory::from("x1"));
    assert_eq!(eval("'pi ' . 3.5"), Memory::from("pi 3.5"));
}

#[test]
fn comparisons() {
    assert_eq!(eval("'abc' == 'abc'"), Memory::TRUE);
    assert_eq!(eval("'1e1' == '10'"), Memory::TRUE);
    assert_eq!(eval("null == false"), Memory::TRUE);
    assert_eq!(eval("1 === 1.0"), Memory::FALSE);
    assert_eq!(eval("[1, 2] == [1, 2]"), Memory::TRUE);
    assert_eq!(eval("[1, 2] === [1, 2]"), Memory::TRUE);
    assert_eq!(eval("'b' > 'a'"), Memory::TRUE);
    assert_eq!(eval("2 >= 3"), Memory::FALSE);
    assert_eq!(eval("1 != 2"), Memory::TRUE);
}

#[test]
fn logic_yields_booleans() {
    assert_eq!(eval("1 && 'x'"), Memory::TRUE);
    assert_eq!(eval("0 || ''"), Memory::FALSE);
    assert_eq!(eval("!'0'"), Memory::TRUE);
    assert_eq!(eval("!![]"), Memory::FALSE);
}

#[test]
fn array_union_keeps_left_keys() {
    let value = eval("['a' => 1, 'b' => 2] + ['b' => 3, 'c' => 4]");
    assert_eq!(value.export(), "array ('a' => 1, 'b' => 2, 'c' => 4)");
}

#[test]
fn division_by_zero_follows_config() {
    assert_eq!(eval("1 / 0"), Memory::Float(f64::INFINITY));
    assert!(matches!(eval("0 / 0"), Memory::Float(f) if f.is_nan()));
    assert!(matches!(eval("5 % 0"), Memory::Float(f) if f.is_nan()));

    let strict = RuntimeConfig::strict();
    let err = eval_with("1 / (2 - 2)", &strict).unwrap_err();
    assert!(matches!(err, EvalError::Operator { source: OperatorError::DivisionByZero, .. }));
    let err = eval_with("5 % 0", &strict).unwrap_err();
    assert!(matches!(err, EvalError::Operator { source: OperatorError::ModuloByZero, .. }));
}

#[test]
fn unsupported_operands_name_kinds() {
    let err = eval_with("[1] * 2", &RuntimeConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "unsupported operand types: array * int on line 1");
    let err = eval_with("-[1]", &RuntimeConfig::default()).unwrap_err();
    assert!(matches!(err, EvalError::Operator { source: OperatorError::UnsupportedOperand { operand: Kind::Array, .. }, .. }));
}
