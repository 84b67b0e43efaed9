//! A compiled expression ready for repeated evaluation.

use ember_eval::Environment;
use ember_ir::{Program, Value};

use crate::{compile_with, CompileOptions, Result};

/// A compiled expression.
///
/// Cloning is cheap and the expression can be shared across threads; each
/// evaluation uses its own stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    program: Program,
}

impl Expression {
    /// Compile source text with default options.
    pub fn new(source: &str) -> Result<Self> {
        Expression::with_options(source, CompileOptions::default())
    }

    pub fn with_options(source: &str, options: CompileOptions) -> Result<Self> {
        Ok(Expression {
            program: compile_with(source, options)?,
        })
    }

    /// Wrap an already compiled program.
    pub fn from_program(program: Program) -> Self {
        Expression { program }
    }

    /// Rebuild an expression from [`Expression::to_json`] output.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Expression {
            program: ember_serial::deserialize(text)?,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(ember_serial::serialize(&self.program)?)
    }

    pub fn evaluate(&self, env: &Environment) -> Result<Value> {
        Ok(ember_eval::evaluate(&self.program, env)?)
    }

    pub fn program(&self) -> &Program {
        &self.program
    }
}

impl From<Program> for Expression {
    fn from(program: Program) -> Self {
        Expression::from_program(program)
    }
}
