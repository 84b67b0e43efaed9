//! The fixed operator table.
//!
//! Every operator symbol maps to exactly one static [`OpDescriptor`]. The
//! table is indexed by [`Op`] (for building and encoding tokens) and searched
//! by symbol (for decoding serialized programs). It is plain data: the
//! behaviour of each operator is a function pointer in its [`OpForm`].

use std::fmt;

use crate::cast;
use crate::ops::{self, OpResult};
use crate::value::Value;

/// Precedence of `(`, `)` and the stack sentinel.
///
/// Lower than every operator, so ordinary precedence comparisons never pop
/// a parenthesis off the operator stack.
pub const PAREN_PRECEDENCE: u8 = 10;

/// Operator associativity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// How an operator consumes its operands, with the function implementing it.
#[derive(Clone, Copy, Debug)]
pub enum OpForm {
    /// Two operands, neither of which may be absent (except for `==`/`!=`).
    Binary(fn(&Value, &Value) -> OpResult),
    /// `??`: two operands, absence is the point.
    NilCoalescing,
    /// One operand which must be present.
    Unary(fn(&Value) -> OpResult),
    /// One present operand converted to another type; may yield `Absent`.
    Cast(fn(&Value) -> Value),
}

/// Static metadata and behaviour for one operator symbol.
#[derive(Debug)]
pub struct OpDescriptor {
    pub op: Op,
    pub symbol: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub form: OpForm,
}

/// Every operator known to the language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Not,
    Coalesce,
    CastString,
    CastInt,
    CastUInt,
    CastBool,
    CastDouble,
    CastFloat,
}

impl Op {
    /// All operators, in table order.
    pub const ALL: [Op; 21] = [
        Op::Add,
        Op::Sub,
        Op::Mul,
        Op::Div,
        Op::Rem,
        Op::Eq,
        Op::NotEq,
        Op::Lt,
        Op::LtEq,
        Op::Gt,
        Op::GtEq,
        Op::And,
        Op::Or,
        Op::Not,
        Op::Coalesce,
        Op::CastString,
        Op::CastInt,
        Op::CastUInt,
        Op::CastBool,
        Op::CastDouble,
        Op::CastFloat,
    ];

    #[inline]
    pub fn descriptor(self) -> &'static OpDescriptor {
        &DESCRIPTORS[self as usize]
    }

    #[inline]
    pub fn symbol(self) -> &'static str {
        self.descriptor().symbol
    }

    #[inline]
    pub fn precedence(self) -> u8 {
        self.descriptor().precedence
    }

    #[inline]
    pub fn associativity(self) -> Associativity {
        self.descriptor().associativity
    }

    #[inline]
    pub fn form(self) -> OpForm {
        self.descriptor().form
    }

    pub fn is_cast(self) -> bool {
        matches!(self.form(), OpForm::Cast(_))
    }

    /// Look an operator up by its symbol.
    pub fn from_symbol(symbol: &str) -> Option<Op> {
        DESCRIPTORS.iter().find(|d| d.symbol == symbol).map(|d| d.op)
    }

    /// Look a cast up by the type name written in source (`Int`, `Double`, ...).
    pub fn cast_named(name: &str) -> Option<Op> {
        Op::from_symbol(name).filter(|op| op.is_cast())
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

const fn binary(
    op: Op,
    symbol: &'static str,
    precedence: u8,
    apply: fn(&Value, &Value) -> OpResult,
) -> OpDescriptor {
    OpDescriptor {
        op,
        symbol,
        precedence,
        associativity: Associativity::Left,
        form: OpForm::Binary(apply),
    }
}

const fn conversion(op: Op, symbol: &'static str, convert: fn(&Value) -> Value) -> OpDescriptor {
    OpDescriptor {
        op,
        symbol,
        precedence: 210,
        associativity: Associativity::Right,
        form: OpForm::Cast(convert),
    }
}

/// Indexed by `Op as usize`; order must match [`Op::ALL`].
static DESCRIPTORS: [OpDescriptor; 21] = [
    binary(Op::Add, "+", 140, ops::add),
    binary(Op::Sub, "-", 140, ops::sub),
    binary(Op::Mul, "*", 150, ops::mul),
    binary(Op::Div, "/", 150, ops::div),
    binary(Op::Rem, "%", 150, ops::rem),
    binary(Op::Eq, "==", 130, ops::eq),
    binary(Op::NotEq, "!=", 130, ops::not_eq),
    binary(Op::Lt, "<", 130, ops::lt),
    binary(Op::LtEq, "<=", 130, ops::lt_eq),
    binary(Op::Gt, ">", 130, ops::gt),
    binary(Op::GtEq, ">=", 130, ops::gt_eq),
    binary(Op::And, "&&", 120, ops::and),
    binary(Op::Or, "||", 110, ops::or),
    OpDescriptor {
        op: Op::Not,
        symbol: "!",
        precedence: 200,
        associativity: Associativity::Right,
        form: OpForm::Unary(ops::not),
    },
    OpDescriptor {
        op: Op::Coalesce,
        symbol: "??",
        precedence: 131,
        associativity: Associativity::Right,
        form: OpForm::NilCoalescing,
    },
    conversion(Op::CastString, "String", cast::to_string),
    conversion(Op::CastInt, "Int", cast::to_int),
    conversion(Op::CastUInt, "UInt", cast::to_uint),
    conversion(Op::CastBool, "Bool", cast::to_bool),
    conversion(Op::CastDouble, "Double", cast::to_double),
    conversion(Op::CastFloat, "Float", cast::to_float),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_order_matches_enum() {
        for op in Op::ALL {
            assert_eq!(op.descriptor().op, op);
        }
    }

    #[test]
    fn test_symbols_are_unique() {
        for op in Op::ALL {
            assert_eq!(Op::from_symbol(op.symbol()), Some(op));
        }
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(Op::from_symbol("**"), None);
        assert_eq!(Op::from_symbol(""), None);
    }

    #[test]
    fn test_cast_named() {
        assert_eq!(Op::cast_named("Int"), Some(Op::CastInt));
        assert_eq!(Op::cast_named("Float"), Some(Op::CastFloat));
        assert_eq!(Op::cast_named("+"), None);
        assert_eq!(Op::cast_named("int"), None);
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(Op::Mul.precedence() > Op::Add.precedence());
        assert!(Op::Add.precedence() > Op::Coalesce.precedence());
        assert!(Op::Coalesce.precedence() > Op::Eq.precedence());
        assert!(Op::Eq.precedence() > Op::And.precedence());
        assert!(Op::And.precedence() > Op::Or.precedence());
        assert!(Op::Or.precedence() > PAREN_PRECEDENCE);
        assert!(Op::CastInt.precedence() > Op::Not.precedence());
    }
}
