//! Lexer error types.
//!
//! Every error carries the byte offset where it was detected and a
//! [`LexErrorKind`] describing what went wrong. `reading` fields hold the
//! text the lexer had accumulated when it gave up.

/// A lexer error with its location.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind} (at offset {offset})")]
pub struct LexError {
    /// Byte offset into the expression source.
    pub offset: usize,
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character while reading '{reading}', expected {expected} but got '{got}'")]
    UnexpectedCharacter {
        reading: String,
        expected: &'static str,
        got: char,
    },
    #[error("unexpected end while reading '{reading}'")]
    UnexpectedEnd { reading: String },
    /// Structurally invalid input that is not a single bad character.
    #[error("syntax error: {message}")]
    SyntaxError { message: String },
    /// Integer literal does not fit in a signed 64-bit integer.
    #[error("integer literal '{literal}' is out of range")]
    IntOverflow { literal: String },
    /// Casts nested deeper than the configured limit.
    #[error("casts nested deeper than {limit} levels")]
    NestingTooDeep { limit: u32 },
}

impl LexError {
    pub fn new(offset: usize, kind: LexErrorKind) -> Self {
        LexError { offset, kind }
    }

    pub(crate) fn unexpected_character(
        offset: usize,
        reading: impl Into<String>,
        expected: &'static str,
        got: char,
    ) -> Self {
        LexError::new(
            offset,
            LexErrorKind::UnexpectedCharacter {
                reading: reading.into(),
                expected,
                got,
            },
        )
    }

    pub(crate) fn unexpected_end(offset: usize, reading: impl Into<String>) -> Self {
        LexError::new(
            offset,
            LexErrorKind::UnexpectedEnd {
                reading: reading.into(),
            },
        )
    }

    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        LexError::new(
            offset,
            LexErrorKind::SyntaxError {
                message: message.into(),
            },
        )
    }

    /// Re-base an error raised while lexing a cast body onto the enclosing source.
    #[must_use]
    pub(crate) fn shifted(mut self, base: usize) -> Self {
        self.offset += base;
        self
    }
}
