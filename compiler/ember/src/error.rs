//! Unified error type.

use ember_eval::EvalError;
use ember_lexer::LexError;
use ember_parse::ParseError;
use ember_serial::{DecodeError, EncodeError};

/// Any failure from compiling, evaluating or (de)serializing an expression.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
