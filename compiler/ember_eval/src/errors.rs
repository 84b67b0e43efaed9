//! Evaluation errors.

use ember_ir::OpError;

/// Failure while executing a postfix program.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// An operator found fewer operands on the stack than it consumes, or the
    /// program left no result (`operand` is then `"result"`).
    #[error("missing value for '{operand}'")]
    MissingValue { operand: &'static str },
    /// An operator that cannot accept an absent operand received one.
    #[error("found nil in '{expr}'")]
    NilOperand { expr: String },
    #[error("cannot apply '{op}' to {left} {op} {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("cannot apply '{op}' to {operand}")]
    UnaryTypeMismatch {
        op: &'static str,
        operand: &'static str,
    },
    #[error("division by zero in '{op}'")]
    DivisionByZero { op: &'static str },
    #[error("integer overflow in '{op}'")]
    IntegerOverflow { op: &'static str },
    /// The program is structurally invalid.
    #[error("syntax error: {message}")]
    SyntaxError { message: String },
    /// A literal token whose text does not parse as its kind.
    ///
    /// Compiled programs never contain these; hand-built ones can.
    #[error("invalid {kind} literal '{raw}'")]
    InvalidLiteral { kind: &'static str, raw: String },
}

impl From<OpError> for EvalError {
    fn from(err: OpError) -> Self {
        match err {
            OpError::TypeMismatch { op, left, right } => {
                EvalError::TypeMismatch { op, left, right }
            }
            OpError::UnaryTypeMismatch { op, operand } => {
                EvalError::UnaryTypeMismatch { op, operand }
            }
            OpError::DivisionByZero { op } => EvalError::DivisionByZero { op },
            OpError::IntegerOverflow { op } => EvalError::IntegerOverflow { op },
        }
    }
}

pub type EvalResult<T = ember_ir::Value> = Result<T, EvalError>;
