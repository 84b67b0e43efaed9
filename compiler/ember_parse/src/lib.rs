//! Shunting-yard parser for Ember.
//!
//! Converts the infix token list produced by `ember_lexer` into a postfix
//! [`Program`]. Operators wait on a stack seeded with a sentinel; an incoming
//! operator first emits every stacked operator that binds tighter (or equally
//! tight, when the incoming operator is left-associative).
//!
//! Cast groups (`Operator(cast) ( ... )`) are compiled recursively as
//! independent sub-expressions. The sub-program is appended to the output
//! followed by the cast operator, so a cast behaves like a single operand in
//! the enclosing expression.

mod error;

#[cfg(test)]
mod tests;

use ember_ir::{Associativity, Op, Program, Token, TokenKind};
use ember_stack::ensure_sufficient_stack;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

pub use error::ParseError;

/// Operator stack; sized for typical expressions without spilling to the heap.
type OpStack<'t> = SmallVec<[&'t Token; 16]>;

/// Convert infix tokens into a postfix program.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn to_postfix(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    shunt(tokens, &mut output)?;
    debug!(len = output.len(), "postfix");
    Ok(Program::new(output))
}

fn shunt(tokens: &[Token], output: &mut Vec<Token>) -> Result<(), ParseError> {
    let bottom = Token::bottom();
    let mut stack: OpStack<'_> = smallvec![&bottom];

    let mut i = 0;
    while let Some(token) = tokens.get(i) {
        i += 1;
        match token.kind {
            kind if kind.is_operand() => output.push(token.clone()),
            TokenKind::Operator(op) if op.is_cast() => {
                let close = cast_group_end(tokens, i, op)?;
                let body = &tokens[i + 1..close];
                trace!(cast = op.symbol(), len = body.len(), "cast group");
                ensure_sufficient_stack(|| shunt(body, output))?;
                output.push(token.clone());
                i = close + 1;
            }
            TokenKind::Operator(op) => {
                pop_bound(&mut stack, op, output);
                stack.push(token);
            }
            TokenKind::Open => stack.push(token),
            TokenKind::Close => loop {
                match stack.pop() {
                    Some(top) if top.kind == TokenKind::Open => break,
                    Some(top) if top.op().is_some() => output.push(top.clone()),
                    _ => return Err(ParseError::MissingOpenParen),
                }
            },
            _ => {
                return Err(ParseError::UnexpectedToken {
                    raw: token.raw.clone(),
                })
            }
        }
    }

    while let Some(top) = stack.pop() {
        match top.kind {
            TokenKind::Bottom => break,
            TokenKind::Open => return Err(ParseError::MissingCloseParen),
            _ => output.push(top.clone()),
        }
    }
    Ok(())
}

/// Emit every stacked operator that binds at least as tightly as `incoming`.
///
/// Parentheses and the sentinel are never operators, so they stop the scan.
fn pop_bound(stack: &mut OpStack<'_>, incoming: Op, output: &mut Vec<Token>) {
    while let Some(top) = stack.last().and_then(|t| t.op()) {
        let binds = match incoming.associativity() {
            Associativity::Left => top.precedence() >= incoming.precedence(),
            Associativity::Right => top.precedence() > incoming.precedence(),
        };
        if !binds {
            break;
        }
        if let Some(token) = stack.pop() {
            output.push(token.clone());
        }
    }
}

/// Index of the `)` closing the group that starts at `open`.
fn cast_group_end(tokens: &[Token], open: usize, op: Op) -> Result<usize, ParseError> {
    if tokens.get(open).map(|t| t.kind) != Some(TokenKind::Open) {
        return Err(ParseError::CastWithoutArgument { symbol: op.symbol() });
    }
    let mut depth = 0_usize;
    for (offset, token) in tokens[open..].iter().enumerate() {
        match token.kind {
            TokenKind::Open => depth += 1,
            TokenKind::Close => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + offset);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::MissingCloseParen)
}
