//! Ember - an embeddable expression language.
//!
//! Compiles infix expressions such as `c.items.count > 2 && c.name == "John"`
//! into postfix [`Program`]s and evaluates them against a read-only
//! [`Environment`]. Programs can be stored as JSON and evaluated later
//! without re-parsing.
//!
//! ```ignore
//! let expr = ember::Expression::new("price * quantity >= 100")?;
//! let env = ember::Environment::new().with("price", 25_i64).with("quantity", 4_i64);
//! assert_eq!(expr.evaluate(&env)?, ember::Value::Bool(true));
//! ```
//!
//! # Pipeline
//!
//! `source -> ember_lexer -> ember_parse -> Program -> ember_eval -> Value`,
//! with `ember_serial` converting programs to and from JSON.

mod error;
mod expression;
mod options;

use std::sync::Once;

pub use ember_eval::{json_value, Environment, EvalError};
pub use ember_ir::{Op, Program, Token, TokenKind, Value};
pub use ember_lexer::{LexError, LexErrorKind};
pub use ember_parse::ParseError;
pub use ember_serial::{deserialize, serialize, DecodeError, EncodeError};
pub use error::{Error, Result};
pub use expression::Expression;
pub use options::CompileOptions;

/// Compile source text into a postfix program.
pub fn compile(source: &str) -> Result<Program> {
    compile_with(source, CompileOptions::default())
}

#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn compile_with(source: &str, options: CompileOptions) -> Result<Program> {
    let tokens = ember_lexer::tokenize_with(source, options.into())?;
    Ok(ember_parse::to_postfix(&tokens)?)
}

/// Evaluation of a compiled [`Program`].
pub trait Evaluate {
    fn evaluate(&self, env: &Environment) -> Result<Value>;
}

impl Evaluate for Program {
    fn evaluate(&self, env: &Environment) -> Result<Value> {
        Ok(ember_eval::evaluate(self, env)?)
    }
}

/// Compile and evaluate in one step.
pub fn evaluate(source: &str, env: &Environment) -> Result<Value> {
    compile(source)?.evaluate(env)
}

fn evaluate_as<T>(
    source: &str,
    env: &Environment,
    extract: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    evaluate(source, env).ok().as_ref().and_then(extract)
}

/// Evaluate to a `Bool`; `None` on any error or a result of another type.
pub fn evaluate_as_bool(source: &str, env: &Environment) -> Option<bool> {
    evaluate_as(source, env, Value::as_bool)
}

pub fn evaluate_as_int(source: &str, env: &Environment) -> Option<i64> {
    evaluate_as(source, env, Value::as_int)
}

pub fn evaluate_as_uint(source: &str, env: &Environment) -> Option<u64> {
    evaluate_as(source, env, Value::as_uint)
}

pub fn evaluate_as_double(source: &str, env: &Environment) -> Option<f64> {
    evaluate_as(source, env, Value::as_double)
}

pub fn evaluate_as_float(source: &str, env: &Environment) -> Option<f32> {
    evaluate_as(source, env, Value::as_float)
}

pub fn evaluate_as_string(source: &str, env: &Environment) -> Option<String> {
    evaluate_as(source, env, |v| v.as_str().map(str::to_owned))
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by the `EMBER_LOG` variable.
///
/// Call once at startup; later calls do nothing. Without `EMBER_LOG` set, or
/// when the host already installed a global subscriber, nothing changes.
/// Enable with `EMBER_LOG=ember_eval=trace` or `EMBER_LOG=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if let Ok(filter) = EnvFilter::try_from_env("EMBER_LOG") {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
