//! Binary and unary operator implementations.
//!
//! Each operator is a plain function matching on the exact pair of operand
//! types. There is no implicit numeric promotion: `Int + Double` falls through
//! to the type mismatch arm like any other unsupported pair.
//!
//! Integer arithmetic is checked. Floating arithmetic follows IEEE 754.
//! Absent operands never reach these functions; the evaluator applies the
//! absent-value policy before dispatching.

use std::cmp::Ordering;

use crate::value::Value;

/// Failure of a single operator application.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("cannot apply `{op}` to {left} {op} {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("cannot apply `{op}` to {operand}")]
    UnaryTypeMismatch {
        op: &'static str,
        operand: &'static str,
    },
    #[error("division by zero in `{op}`")]
    DivisionByZero { op: &'static str },
    #[error("integer overflow in `{op}`")]
    IntegerOverflow { op: &'static str },
}

pub type OpResult = Result<Value, OpError>;

fn mismatch(op: &'static str, left: &Value, right: &Value) -> OpError {
    OpError::TypeMismatch {
        op,
        left: left.type_name(),
        right: right.type_name(),
    }
}

#[inline]
fn checked<T>(result: Option<T>, wrap: fn(T) -> Value, op: &'static str) -> OpResult {
    result.map(wrap).ok_or(OpError::IntegerOverflow { op })
}

#[inline]
fn checked_div<T>(
    is_zero: bool,
    result: impl FnOnce() -> Option<T>,
    wrap: fn(T) -> Value,
    op: &'static str,
) -> OpResult {
    if is_zero {
        Err(OpError::DivisionByZero { op })
    } else {
        checked(result(), wrap, op)
    }
}

// Arithmetic

pub(crate) fn add(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => checked(a.checked_add(*b), Value::Int, "+"),
        (Value::UInt(a), Value::UInt(b)) => checked(a.checked_add(*b), Value::UInt, "+"),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a + b)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        _ => Err(mismatch("+", left, right)),
    }
}

pub(crate) fn sub(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => checked(a.checked_sub(*b), Value::Int, "-"),
        (Value::UInt(a), Value::UInt(b)) => checked(a.checked_sub(*b), Value::UInt, "-"),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a - b)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a - b)),
        _ => Err(mismatch("-", left, right)),
    }
}

pub(crate) fn mul(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => checked(a.checked_mul(*b), Value::Int, "*"),
        (Value::UInt(a), Value::UInt(b)) => checked(a.checked_mul(*b), Value::UInt, "*"),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a * b)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a * b)),
        _ => Err(mismatch("*", left, right)),
    }
}

pub(crate) fn div(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            checked_div(*b == 0, || a.checked_div(*b), Value::Int, "/")
        }
        (Value::UInt(a), Value::UInt(b)) => {
            checked_div(*b == 0, || a.checked_div(*b), Value::UInt, "/")
        }
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a / b)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a / b)),
        _ => Err(mismatch("/", left, right)),
    }
}

/// Remainder is defined for integers only.
pub(crate) fn rem(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            checked_div(*b == 0, || a.checked_rem(*b), Value::Int, "%")
        }
        (Value::UInt(a), Value::UInt(b)) => {
            checked_div(*b == 0, || a.checked_rem(*b), Value::UInt, "%")
        }
        _ => Err(mismatch("%", left, right)),
    }
}

// Equality

#[allow(clippy::float_cmp, reason = "exact equality is the operator's meaning")]
fn equal(op: &'static str, left: &Value, right: &Value) -> Result<bool, OpError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::UInt(a), Value::UInt(b)) => Ok(a == b),
        (Value::Double(a), Value::Double(b)) => Ok(a == b),
        (Value::Float(a), Value::Float(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        _ => Err(mismatch(op, left, right)),
    }
}

pub(crate) fn eq(left: &Value, right: &Value) -> OpResult {
    equal("==", left, right).map(Value::Bool)
}

pub(crate) fn not_eq(left: &Value, right: &Value) -> OpResult {
    equal("!=", left, right).map(|same| Value::Bool(!same))
}

// Ordering

/// `None` when the operands are unordered (a NaN is involved).
fn ordering(op: &'static str, left: &Value, right: &Value) -> Result<Option<Ordering>, OpError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
        (Value::UInt(a), Value::UInt(b)) => Ok(Some(a.cmp(b))),
        (Value::Double(a), Value::Double(b)) => Ok(a.partial_cmp(b)),
        (Value::Float(a), Value::Float(b)) => Ok(a.partial_cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        _ => Err(mismatch(op, left, right)),
    }
}

fn compare(
    op: &'static str,
    left: &Value,
    right: &Value,
    accept: fn(Ordering) -> bool,
) -> OpResult {
    Ok(Value::Bool(ordering(op, left, right)?.is_some_and(accept)))
}

pub(crate) fn lt(left: &Value, right: &Value) -> OpResult {
    compare("<", left, right, Ordering::is_lt)
}

pub(crate) fn lt_eq(left: &Value, right: &Value) -> OpResult {
    compare("<=", left, right, Ordering::is_le)
}

pub(crate) fn gt(left: &Value, right: &Value) -> OpResult {
    compare(">", left, right, Ordering::is_gt)
}

pub(crate) fn gt_eq(left: &Value, right: &Value) -> OpResult {
    compare(">=", left, right, Ordering::is_ge)
}

// Logic

pub(crate) fn and(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
        _ => Err(mismatch("&&", left, right)),
    }
}

pub(crate) fn or(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
        _ => Err(mismatch("||", left, right)),
    }
}

pub(crate) fn not(operand: &Value) -> OpResult {
    match operand {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        _ => Err(OpError::UnaryTypeMismatch {
            op: "!",
            operand: operand.type_name(),
        }),
    }
}
