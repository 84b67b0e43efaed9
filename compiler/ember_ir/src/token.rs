//! Tokens and compiled programs.
//!
//! The same [`Token`] type serves both the infix stream produced by the lexer
//! and the postfix [`Program`] produced by the parser or the decoder.

use std::fmt;
use std::sync::Arc;

use crate::op::{Op, PAREN_PRECEDENCE};

/// Token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Operator(Op),
    /// `(`
    Open,
    /// `)`
    Close,
    IntLiteral,
    DoubleLiteral,
    BoolLiteral,
    /// Raw text holds the string content with escapes already resolved.
    StringLiteral,
    /// Raw text holds the full dotted path.
    Variable,
    /// Operator stack sentinel. Never appears in lexer or parser output.
    Bottom,
}

impl TokenKind {
    /// Whether tokens of this kind push a value when evaluated.
    pub fn is_operand(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::DoubleLiteral
                | TokenKind::BoolLiteral
                | TokenKind::StringLiteral
                | TokenKind::Variable
        )
    }
}

/// A token with the source text it was built from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub raw: String,
}

impl Token {
    pub fn new(kind: TokenKind, raw: impl Into<String>) -> Self {
        Token {
            kind,
            raw: raw.into(),
        }
    }

    /// An operator token whose raw text is the operator's symbol.
    pub fn operator(op: Op) -> Self {
        Token::new(TokenKind::Operator(op), op.symbol())
    }

    pub fn open() -> Self {
        Token::new(TokenKind::Open, "(")
    }

    pub fn close() -> Self {
        Token::new(TokenKind::Close, ")")
    }

    pub fn bottom() -> Self {
        Token::new(TokenKind::Bottom, "#")
    }

    /// Precedence used by the shunting-yard parser.
    ///
    /// Parentheses and the sentinel share [`PAREN_PRECEDENCE`]; operands have none.
    pub fn precedence(&self) -> Option<u8> {
        match self.kind {
            TokenKind::Operator(op) => Some(op.precedence()),
            TokenKind::Open | TokenKind::Close | TokenKind::Bottom => Some(PAREN_PRECEDENCE),
            _ => None,
        }
    }

    pub fn op(&self) -> Option<Op> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::StringLiteral => write!(f, "{:?}", self.raw),
            _ => f.write_str(&self.raw),
        }
    }
}

/// A compiled postfix program.
///
/// Immutable and cheap to clone; one program can be evaluated any number of
/// times, from any number of threads.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Program {
    tokens: Arc<[Token]>,
}

impl Program {
    pub fn new(tokens: Vec<Token>) -> Self {
        Program {
            tokens: tokens.into(),
        }
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// The raw text of every token, in postfix order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.raw.as_str())
    }
}

impl Default for Program {
    fn default() -> Self {
        Program::new(Vec::new())
    }
}

impl From<Vec<Token>> for Program {
    fn from(tokens: Vec<Token>) -> Self {
        Program::new(tokens)
    }
}

impl FromIterator<Token> for Program {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Program {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Space-separated postfix rendering, e.g. `2 3 4 * +`.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
