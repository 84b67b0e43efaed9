//! Parser error types.

/// Structural errors found while converting infix tokens to postfix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ParseError {
    /// A `)` with no matching `(`.
    #[error("syntax error: missing open parenthesis")]
    MissingOpenParen,
    /// A `(` that is never closed.
    #[error("syntax error: missing close parenthesis")]
    MissingCloseParen,
    /// A cast operator not followed by a parenthesized argument.
    #[error("syntax error: `{symbol}` must be followed by a parenthesized argument")]
    CastWithoutArgument { symbol: &'static str },
    /// A token that never belongs in parser input, such as the stack sentinel.
    #[error("syntax error: unexpected token '{raw}'")]
    UnexpectedToken { raw: String },
}
