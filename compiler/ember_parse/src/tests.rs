//! Parser tests.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use ember_ir::{Op, Program, Token, TokenKind};
use ember_lexer::tokenize;
use pretty_assertions::assert_eq;

use crate::{to_postfix, ParseError};

fn postfix(source: &str) -> String {
    to_postfix(&tokenize(source).unwrap()).unwrap().to_string()
}

fn error(source: &str) -> ParseError {
    to_postfix(&tokenize(source).unwrap()).unwrap_err()
}

// === Precedence ===

#[test]
fn test_precedence() {
    assert_eq!(postfix("2 + 3 * 4"), "2 3 4 * +");
    assert_eq!(postfix("2 * 3 + 4"), "2 3 * 4 +");
    assert_eq!(postfix("a + 1 > b && c || d"), "a 1 + b > c && d ||");
    assert_eq!(postfix("a ?? b == c"), "a b ?? c ==");
}

#[test]
fn test_left_associativity() {
    assert_eq!(postfix("8 - 4 - 2"), "8 4 - 2 -");
    assert_eq!(postfix("8 / 4 * 2"), "8 4 / 2 *");
}

#[test]
fn test_right_associativity() {
    assert_eq!(postfix("a ?? b ?? c"), "a b c ?? ??");
    assert_eq!(postfix("!!a"), "a ! !");
    assert_eq!(postfix("!a && b"), "a ! b &&");
}

#[test]
fn test_parentheses() {
    assert_eq!(postfix("(2 + 3) * 4"), "2 3 + 4 *");
    assert_eq!(postfix("((1))"), "1");
    assert_eq!(postfix("2 * (3 + (4 - 1))"), "2 3 4 1 - + *");
}

// === Casts ===

#[test]
fn test_cast_behaves_as_operand() {
    assert_eq!(
        postfix("String(3 + 1) + String(2.1)"),
        "3 1 + String 2.1 String +"
    );
    assert_eq!(postfix("2 * Int(x)"), "2 x Int *");
}

#[test]
fn test_nested_casts() {
    assert_eq!(postfix(r#"Double(Int("4") + 1)"#), r#""4" Int 1 + Double"#);
}

#[test]
fn test_cast_body_is_independent() {
    // The outer `*` must not reach into the cast body.
    assert_eq!(postfix("3 * Int(1 + 2)"), "3 1 2 + Int *");
}

#[test]
fn test_cast_without_argument() {
    let tokens = vec![
        Token::operator(Op::CastInt),
        Token::new(TokenKind::IntLiteral, "1"),
    ];
    assert_eq!(
        to_postfix(&tokens).unwrap_err(),
        ParseError::CastWithoutArgument { symbol: "Int" }
    );
}

#[test]
fn test_unclosed_cast_group() {
    let tokens = vec![
        Token::operator(Op::CastInt),
        Token::open(),
        Token::new(TokenKind::IntLiteral, "1"),
    ];
    assert_eq!(
        to_postfix(&tokens).unwrap_err(),
        ParseError::MissingCloseParen
    );
}

// === Errors ===

#[test]
fn test_missing_parentheses() {
    assert_eq!(error("1 + 2)"), ParseError::MissingOpenParen);
    assert_eq!(error(")"), ParseError::MissingOpenParen);
    assert_eq!(error("(1 + 2"), ParseError::MissingCloseParen);
    assert_eq!(error("((1)"), ParseError::MissingCloseParen);
}

#[test]
fn test_sentinel_is_rejected() {
    assert_eq!(
        to_postfix(&[Token::bottom()]).unwrap_err(),
        ParseError::UnexpectedToken { raw: "#".into() }
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(to_postfix(&[]).unwrap(), Program::default());
}

#[test]
fn test_output_has_no_parentheses() {
    let program = to_postfix(&tokenize("(a + Int(b)) * (c)").unwrap()).unwrap();
    assert!(program
        .iter()
        .all(|t| !matches!(t.kind, TokenKind::Open | TokenKind::Close | TokenKind::Bottom)));
}
