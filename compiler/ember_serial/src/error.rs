//! Encoding and decoding errors.

/// A program that cannot be written out.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Parentheses and the stack sentinel never appear in compiled programs.
    #[error("trying to encode invalid token '{raw}'")]
    UnencodableToken { raw: String },
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialized text that does not describe a program.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Not an array of well-formed token records.
    #[error("malformed program: {0}")]
    Malformed(String),
    #[error("unknown operation symbol '{symbol}'")]
    UnknownOperation { symbol: String },
    #[error("invalid {kind} literal '{raw}'")]
    InvalidLiteral { kind: &'static str, raw: String },
}
