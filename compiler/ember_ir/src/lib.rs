//! Ember IR - shared data structures for the Ember expression language.
//!
//! This crate contains everything the other pipeline stages agree on:
//! - [`Value`]: the dynamically typed evaluation result
//! - [`Token`] and [`Program`]: the infix token stream and the compiled postfix program
//! - [`Op`] and [`OpDescriptor`]: the fixed operator table
//! - The pure operator and cast functions the descriptors point at
//!
//! # Design Philosophy
//!
//! - **One table**: every operator symbol has exactly one static descriptor,
//!   used by the lexer to build tokens and by the decoder to rebuild them.
//! - **No promotion**: binary operators dispatch on the exact pair of operand
//!   types; mixed pairs are a type mismatch.
//! - **Immutable**: tokens, programs and values are never mutated after creation.

mod cast;
mod op;
mod ops;
mod token;
mod value;

pub use op::{Associativity, Op, OpDescriptor, OpForm, PAREN_PRECEDENCE};
pub use ops::{OpError, OpResult};
pub use token::{Program, Token, TokenKind};
pub use value::Value;
