//! Public API tests for compiling and evaluating expressions.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use ember::{
    compile, compile_with, evaluate, evaluate_as_bool, evaluate_as_double, evaluate_as_float,
    evaluate_as_int, evaluate_as_string, evaluate_as_uint, CompileOptions, Environment, Error,
    EvalError, Evaluate, Expression, LexErrorKind, ParseError, Value,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn empty() -> Environment {
    Environment::new()
}

// === Evaluation ===

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(evaluate("2 + 3 * 4", &empty()).unwrap(), Value::Int(14));
    assert_eq!(evaluate("(2 + 3) * 4", &empty()).unwrap(), Value::Int(20));
}

#[test]
fn test_null_aware_equality() {
    assert_eq!(evaluate("x == y", &empty()).unwrap(), Value::Bool(true));
    assert_eq!(evaluate("x != y", &empty()).unwrap(), Value::Bool(false));
    assert!(matches!(
        evaluate("x + 1", &empty()).unwrap_err(),
        Error::Eval(EvalError::NilOperand { .. })
    ));
}

#[test]
fn test_nil_coalescing() {
    let env = Environment::new().with("b", 5_i64);
    assert_eq!(evaluate("a ?? b", &env).unwrap(), Value::Int(5));
    assert_eq!(evaluate("b ?? a", &env).unwrap(), Value::Int(5));
}

#[test]
fn test_casts() {
    assert_eq!(
        evaluate("String(3 + 1) + String(2.1)", &empty()).unwrap(),
        Value::from("42.1")
    );
    assert_eq!(evaluate(r#"Int("4")"#, &empty()).unwrap(), Value::Int(4));
    assert_eq!(evaluate(r#"Double("abc")"#, &empty()).unwrap(), Value::Absent);
    assert!(matches!(
        evaluate(r#"Double("abc") + 1.0"#, &empty()).unwrap_err(),
        Error::Eval(EvalError::NilOperand { .. })
    ));
}

#[test]
fn test_dotted_and_count_access() {
    let env = Environment::from_json(json!({
        "c": { "name": "John", "items": [1, 1] }
    }))
    .unwrap();
    assert_eq!(evaluate_as_bool(r#"c.name == "John""#, &env), Some(true));
    assert_eq!(evaluate_as_bool("c.items.count == 2", &env), Some(true));
}

#[test]
fn test_mixed_numeric_types() {
    assert!(matches!(
        evaluate("1 + 1.0", &empty()).unwrap_err(),
        Error::Eval(EvalError::TypeMismatch { op: "+", .. })
    ));
}

// === Typed helpers ===

#[test]
fn test_typed_helpers() {
    let env = Environment::new()
        .with("u", 7_u64)
        .with("f", 1.5_f32)
        .with("name", "Ada");
    assert_eq!(evaluate_as_int("6 * 7", &env), Some(42));
    assert_eq!(evaluate_as_uint("u % u", &env), Some(0));
    assert_eq!(evaluate_as_double("0.5 + 0.25", &env), Some(0.75));
    assert_eq!(evaluate_as_float("f * f", &env), Some(2.25));
    assert_eq!(evaluate_as_string(r#""Hi " + name"#, &env), Some("Hi Ada".to_owned()));
}

#[test]
fn test_typed_helpers_return_none() {
    assert_eq!(evaluate_as_bool("1 + 1", &empty()), None);
    assert_eq!(evaluate_as_int("1 +", &empty()), None);
    assert_eq!(evaluate_as_int("x", &empty()), None);
}

// === Compilation ===

#[test]
fn test_compile_errors() {
    assert!(matches!(
        compile("1 + #").unwrap_err(),
        Error::Lex(err) if matches!(err.kind, LexErrorKind::UnexpectedCharacter { got: '#', .. })
    ));
    assert!(matches!(
        compile("(1 + 2").unwrap_err(),
        Error::Parse(ParseError::MissingCloseParen)
    ));
}

#[test]
fn test_compile_options() {
    let options: CompileOptions = serde_json::from_value(json!({ "max_cast_depth": 1 })).unwrap();
    assert_eq!(options.max_cast_depth, 1);
    assert!(compile_with("Int(1)", options).is_ok());
    assert!(matches!(
        compile_with("Int(Int(1))", options).unwrap_err(),
        Error::Lex(err) if err.kind == LexErrorKind::NestingTooDeep { limit: 1 }
    ));

    let defaults: CompileOptions = serde_json::from_value(json!({})).unwrap();
    assert_eq!(defaults, CompileOptions::default());
}

#[test]
fn test_program_symbols() {
    let program = compile("a * (b + 1)").unwrap();
    assert_eq!(
        program.symbols().collect::<Vec<_>>(),
        vec!["a", "b", "1", "+", "*"]
    );
    let env = Environment::new().with("a", 2_i64).with("b", 3_i64);
    assert_eq!(program.evaluate(&env).unwrap(), Value::Int(8));
}

// === Expression ===

#[test]
fn test_expression_reuse() {
    let expr = Expression::new("price * quantity >= 100").unwrap();
    let cheap = Environment::new().with("price", 5_i64).with("quantity", 4_i64);
    let dear = Environment::new().with("price", 25_i64).with("quantity", 4_i64);
    assert_eq!(expr.evaluate(&cheap).unwrap(), Value::Bool(false));
    assert_eq!(expr.evaluate(&dear).unwrap(), Value::Bool(true));
}

#[test]
fn test_expression_json_round_trip() {
    let expr = Expression::new(r#"String(n + 1) == "3" && !flag"#).unwrap();
    let restored = Expression::from_json(&expr.to_json().unwrap()).unwrap();
    assert_eq!(restored, expr);

    let env = Environment::new().with("n", 2_i64).with("flag", false);
    assert_eq!(restored.evaluate(&env).unwrap(), Value::Bool(true));
}

#[test]
fn test_expression_from_bad_json() {
    assert!(matches!(
        Expression::from_json("not json").unwrap_err(),
        Error::Decode(_)
    ));
}

#[test]
fn test_expression_shared_across_threads() {
    let expr = Expression::new("n * 2").unwrap();
    let handles: Vec<_> = (0..4_i64)
        .map(|n| {
            let expr = expr.clone();
            std::thread::spawn(move || expr.evaluate(&Environment::new().with("n", n)).unwrap())
        })
        .collect();
    let results: Vec<Value> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results,
        vec![Value::Int(0), Value::Int(2), Value::Int(4), Value::Int(6)]
    );
}

#[test]
fn test_init_tracing_is_idempotent() {
    ember::init_tracing();
    ember::init_tracing();
    assert_eq!(evaluate("1", &empty()).unwrap(), Value::Int(1));
}
