//! Postfix stack evaluator for Ember programs.
//!
//! A single left-to-right pass over the [`Program`]: operands push values,
//! operators pop their arguments and push their result. A well-formed program
//! leaves exactly one value on the stack.
//!
//! # Absent values
//!
//! Unbound variables and failed conversions produce [`Value::Absent`]. Only
//! `==`, `!=` and `??` accept absent operands; every other operator reports
//! [`EvalError::NilOperand`].

mod environment;
mod errors;

#[cfg(test)]
mod tests;

use ember_ir::{Op, OpForm, Program, Token, TokenKind, Value};
use smallvec::SmallVec;
use tracing::{debug, trace};

pub use environment::{json_value, Environment};
pub use errors::{EvalError, EvalResult};

/// Value stack, kept inline for typical expression depths.
type ValueStack = SmallVec<[Value; 8]>;

/// Execute a postfix program against an environment.
#[tracing::instrument(level = "debug", skip_all, fields(len = program.len()))]
pub fn evaluate(program: &Program, env: &Environment) -> EvalResult {
    let mut stack = ValueStack::new();

    for token in program {
        let value = match token.kind {
            TokenKind::IntLiteral => literal(token, "Int", |raw| raw.parse().ok().map(Value::Int))?,
            TokenKind::DoubleLiteral => {
                literal(token, "Double", |raw| raw.parse().ok().map(Value::Double))?
            }
            TokenKind::BoolLiteral => literal(token, "Bool", |raw| match raw {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            })?,
            TokenKind::StringLiteral => Value::string(token.raw.as_str()),
            TokenKind::Variable => {
                let value = env.resolve(&token.raw);
                trace!(name = %token.raw, ty = value.type_name(), "resolved");
                value
            }
            TokenKind::Operator(op) => apply(op, &mut stack)?,
            TokenKind::Open | TokenKind::Close | TokenKind::Bottom => {
                return Err(EvalError::SyntaxError {
                    message: format!("unexpected '{}' in postfix program", token.raw),
                });
            }
        };
        stack.push(value);
    }

    let result = stack
        .pop()
        .ok_or(EvalError::MissingValue { operand: "result" })?;
    if !stack.is_empty() {
        return Err(EvalError::SyntaxError {
            message: format!("{} values left on the stack", stack.len() + 1),
        });
    }
    debug!(ty = result.type_name(), "evaluated");
    Ok(result)
}

fn literal(
    token: &Token,
    kind: &'static str,
    parse: impl FnOnce(&str) -> Option<Value>,
) -> EvalResult {
    parse(&token.raw).ok_or_else(|| EvalError::InvalidLiteral {
        kind,
        raw: token.raw.clone(),
    })
}

/// Pop the operands of `op` and compute its result.
fn apply(op: Op, stack: &mut ValueStack) -> EvalResult {
    let symbol = op.symbol();
    match op.form() {
        OpForm::Binary(f) => {
            let (left, right) = pop_pair(stack, symbol)?;
            if !left.is_absent() && !right.is_absent() {
                return Ok(f(&left, &right)?);
            }
            let both = left.is_absent() && right.is_absent();
            match op {
                Op::Eq => Ok(Value::Bool(both)),
                Op::NotEq => Ok(Value::Bool(!both)),
                _ => Err(EvalError::NilOperand {
                    expr: format!("{left} {symbol} {right}"),
                }),
            }
        }
        OpForm::NilCoalescing => {
            let (left, right) = pop_pair(stack, symbol)?;
            Ok(if left.is_absent() { right } else { left })
        }
        OpForm::Unary(f) => Ok(f(&pop_present(stack, symbol)?)?),
        OpForm::Cast(f) => Ok(f(&pop_present(stack, symbol)?)),
    }
}

/// Pop `(left, right)`; `right` is on top of the stack.
fn pop_pair(stack: &mut ValueStack, symbol: &'static str) -> EvalResult<(Value, Value)> {
    match (stack.pop(), stack.pop()) {
        (Some(right), Some(left)) => Ok((left, right)),
        _ => Err(EvalError::MissingValue { operand: symbol }),
    }
}

/// Pop the single operand of a unary operator or cast, which must not be absent.
fn pop_present(stack: &mut ValueStack, symbol: &'static str) -> EvalResult {
    match stack.pop() {
        None => Err(EvalError::MissingValue { operand: symbol }),
        Some(Value::Absent) => Err(EvalError::NilOperand {
            expr: format!("{symbol}(nil)"),
        }),
        Some(value) => Ok(value),
    }
}
