//! JSON encoding of compiled programs.
//!
//! A [`Program`] is stored as an array of records, one per postfix token:
//!
//! ```text
//! [{"type":{"int":"Int"},"value":"3"},{"type":{"operation":"+"},"value":"+"}]
//! ```
//!
//! The `type` object has a single key naming the token kind. Its label is
//! the operator symbol for `operation` and the kind's type name otherwise.
//! Decoding rebuilds the exact token sequence, so a decoded program
//! evaluates the same way as the one that was encoded, without re-parsing.

mod error;

use ember_ir::{Op, Program, Token, TokenKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::{DecodeError, EncodeError};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Record {
    #[serde(rename = "type")]
    kind: Kind,
    value: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Operation(String),
    Int(String),
    Double(String),
    Bool(String),
    String(String),
    Variable(String),
}

const INT: &str = "Int";
const DOUBLE: &str = "Double";
const BOOL: &str = "Bool";
const STRING: &str = "String";
const VARIABLE: &str = "Variable";

impl Record {
    fn encode(token: &Token) -> Result<Self, EncodeError> {
        let kind = match token.kind {
            TokenKind::Operator(op) => Kind::Operation(op.symbol().to_owned()),
            TokenKind::IntLiteral => Kind::Int(INT.to_owned()),
            TokenKind::DoubleLiteral => Kind::Double(DOUBLE.to_owned()),
            TokenKind::BoolLiteral => Kind::Bool(BOOL.to_owned()),
            TokenKind::StringLiteral => Kind::String(STRING.to_owned()),
            TokenKind::Variable => Kind::Variable(VARIABLE.to_owned()),
            TokenKind::Open | TokenKind::Close | TokenKind::Bottom => {
                return Err(EncodeError::UnencodableToken {
                    raw: token.raw.clone(),
                });
            }
        };
        Ok(Record {
            kind,
            value: token.raw.clone(),
        })
    }

    fn decode(self) -> Result<Token, DecodeError> {
        let (kind, label, expected) = match &self.kind {
            Kind::Operation(symbol) => {
                let op = Op::from_symbol(symbol).ok_or_else(|| DecodeError::UnknownOperation {
                    symbol: symbol.clone(),
                })?;
                if self.value != op.symbol() {
                    return Err(DecodeError::Malformed(format!(
                        "operation '{symbol}' has value '{}'",
                        self.value
                    )));
                }
                return Ok(Token::operator(op));
            }
            Kind::Int(label) => (TokenKind::IntLiteral, label, INT),
            Kind::Double(label) => (TokenKind::DoubleLiteral, label, DOUBLE),
            Kind::Bool(label) => (TokenKind::BoolLiteral, label, BOOL),
            Kind::String(label) => (TokenKind::StringLiteral, label, STRING),
            Kind::Variable(label) => (TokenKind::Variable, label, VARIABLE),
        };
        if label != expected {
            return Err(DecodeError::Malformed(format!(
                "expected label '{expected}', found '{label}'"
            )));
        }
        if !literal_is_valid(kind, &self.value) {
            return Err(DecodeError::InvalidLiteral {
                kind: expected,
                raw: self.value,
            });
        }
        Ok(Token::new(kind, self.value))
    }
}

fn literal_is_valid(kind: TokenKind, raw: &str) -> bool {
    match kind {
        TokenKind::IntLiteral => raw.parse::<i64>().is_ok(),
        TokenKind::DoubleLiteral => raw.parse::<f64>().is_ok(),
        TokenKind::BoolLiteral => matches!(raw, "true" | "false"),
        TokenKind::Variable => !raw.is_empty(),
        _ => true,
    }
}

/// Encode a program as JSON text.
pub fn serialize(program: &Program) -> Result<String, EncodeError> {
    let records = program
        .iter()
        .map(Record::encode)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_string(&records)?)
}

/// Decode a program from JSON text produced by [`serialize`].
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn deserialize(text: &str) -> Result<Program, DecodeError> {
    let records: Vec<Record> =
        serde_json::from_str(text).map_err(|err| DecodeError::Malformed(err.to_string()))?;
    let program = records
        .into_iter()
        .map(Record::decode)
        .collect::<Result<Program, _>>()?;
    debug!(tokens = program.len(), "decoded");
    Ok(program)
}
