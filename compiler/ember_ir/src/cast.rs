//! Conversions behind the `String(...)`, `Int(...)`, ... casts.
//!
//! A conversion never fails: input that has no sensible image in the target
//! type (a non-numeric string, a negative number cast to `UInt`, a NaN cast
//! to `Int`) produces [`Value::Absent`].

use crate::value::Value;

/// 2^63 as `f64`: the first value above `i64::MAX`.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
/// 2^64 as `f64`: the first value above `u64::MAX`.
const U64_UPPER: f64 = 18_446_744_073_709_551_616.0;

pub(crate) fn to_string(value: &Value) -> Value {
    match value {
        Value::Str(_) => value.clone(),
        other => Value::string(other.to_string()),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero is the cast's meaning; range checked first"
)]
fn truncate_to_i64(n: f64) -> Value {
    let whole = n.trunc();
    if whole >= -I64_UPPER && whole < I64_UPPER {
        Value::Int(whole as i64)
    } else {
        Value::Absent
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "truncation toward zero is the cast's meaning; range checked first"
)]
fn truncate_to_u64(n: f64) -> Value {
    let whole = n.trunc();
    if whole >= 0.0 && whole < U64_UPPER {
        Value::UInt(whole as u64)
    } else {
        Value::Absent
    }
}

pub(crate) fn to_int(value: &Value) -> Value {
    match value {
        Value::Int(_) => value.clone(),
        Value::UInt(n) => i64::try_from(*n).map_or(Value::Absent, Value::Int),
        Value::Double(n) => truncate_to_i64(*n),
        Value::Float(n) => truncate_to_i64(f64::from(*n)),
        other => other
            .to_string()
            .parse::<i64>()
            .map_or(Value::Absent, Value::Int),
    }
}

pub(crate) fn to_uint(value: &Value) -> Value {
    match value {
        Value::UInt(_) => value.clone(),
        Value::Int(n) => u64::try_from(*n).map_or(Value::Absent, Value::UInt),
        Value::Double(n) => truncate_to_u64(*n),
        Value::Float(n) => truncate_to_u64(f64::from(*n)),
        other => other
            .to_string()
            .parse::<u64>()
            .map_or(Value::Absent, Value::UInt),
    }
}

pub(crate) fn to_double(value: &Value) -> Value {
    value
        .to_string()
        .parse::<f64>()
        .map_or(Value::Absent, Value::Double)
}

pub(crate) fn to_float(value: &Value) -> Value {
    value
        .to_string()
        .parse::<f32>()
        .map_or(Value::Absent, Value::Float)
}

pub(crate) fn to_bool(value: &Value) -> Value {
    match value.to_string().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&Value::Int(4)), Value::string("4"));
        assert_eq!(to_string(&Value::Double(2.1)), Value::string("2.1"));
        assert_eq!(to_string(&Value::Bool(false)), Value::string("false"));
        assert_eq!(to_string(&Value::string("as is")), Value::string("as is"));
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int(&Value::string("4")), Value::Int(4));
        assert_eq!(to_int(&Value::string("-12")), Value::Int(-12));
        assert_eq!(to_int(&Value::Double(4.99)), Value::Int(4));
        assert_eq!(to_int(&Value::Double(-4.99)), Value::Int(-4));
        assert_eq!(to_int(&Value::Float(2.5)), Value::Int(2));
        assert_eq!(to_int(&Value::UInt(9)), Value::Int(9));
        assert_eq!(to_int(&Value::UInt(u64::MAX)), Value::Absent);
        assert_eq!(to_int(&Value::string("4.0")), Value::Absent);
        assert_eq!(to_int(&Value::Double(f64::NAN)), Value::Absent);
        assert_eq!(to_int(&Value::Double(1e30)), Value::Absent);
        assert_eq!(to_int(&Value::Bool(true)), Value::Absent);
    }

    #[test]
    fn test_to_uint() {
        assert_eq!(to_uint(&Value::Int(3)), Value::UInt(3));
        assert_eq!(to_uint(&Value::Int(-3)), Value::Absent);
        assert_eq!(to_uint(&Value::Double(3.7)), Value::UInt(3));
        assert_eq!(to_uint(&Value::Double(-1.5)), Value::Absent);
        assert_eq!(to_uint(&Value::string("18")), Value::UInt(18));
    }

    #[test]
    fn test_to_double() {
        assert_eq!(to_double(&Value::string("2.5")), Value::Double(2.5));
        assert_eq!(to_double(&Value::Int(2)), Value::Double(2.0));
        assert_eq!(to_double(&Value::Float(0.5)), Value::Double(0.5));
        assert_eq!(to_double(&Value::string("abc")), Value::Absent);
        assert_eq!(to_double(&Value::Bool(true)), Value::Absent);
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(&Value::string("1.25")), Value::Float(1.25));
        assert_eq!(to_float(&Value::Double(0.5)), Value::Float(0.5));
        assert_eq!(to_float(&Value::string("x")), Value::Absent);
    }

    #[test]
    fn test_to_bool() {
        assert_eq!(to_bool(&Value::string("true")), Value::Bool(true));
        assert_eq!(to_bool(&Value::Bool(false)), Value::Bool(false));
        assert_eq!(to_bool(&Value::string("yes")), Value::Absent);
        assert_eq!(to_bool(&Value::Int(1)), Value::Absent);
    }
}
