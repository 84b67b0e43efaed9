//! Lexer for Ember expressions.
//!
//! Scans left to right with one character of lookahead and a single step of
//! push back, producing a flat infix [`Token`] list for the parser.
//!
//! # Casts
//!
//! `String`, `Int`, `UInt`, `Bool`, `Double` and `Float` immediately followed
//! by `(` introduce a cast. The lexer captures the balanced-parenthesis body,
//! lexes it recursively as an independent expression, and emits
//! `Operator(cast) ( body... )`. The same names without a `(` are plain
//! variables.

mod cursor;
mod lex_error;


use ember_ir::{Op, Token, TokenKind};
use ember_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use cursor::Cursor;
pub use lex_error::{LexError, LexErrorKind};

/// Default limit on cast nesting (`Int(Double(String(...)))`).
pub const DEFAULT_MAX_CAST_DEPTH: u32 = 64;

/// Lexer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexOptions {
    /// Maximum number of nested casts.
    pub max_cast_depth: u32,
}

impl Default for LexOptions {
    fn default() -> Self {
        LexOptions {
            max_cast_depth: DEFAULT_MAX_CAST_DEPTH,
        }
    }
}

/// Tokenize an expression with default options.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with(source, LexOptions::default())
}

/// Tokenize an expression.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize_with(source: &str, options: LexOptions) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source, options, 0).run()?;
    debug!(count = tokens.len(), "tokenized");
    Ok(tokens)
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    options: LexOptions,
    /// Cast nesting level of this source (0 for the top-level expression).
    depth: u32,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, options: LexOptions, depth: u32) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            options,
            depth,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.cursor.bump() {
            let start = self.cursor.pos() - c.len_utf8();
            match c {
                ' ' | '\t' | '\n' | '\r' => {}
                '(' => self.tokens.push(Token::open()),
                ')' => self.tokens.push(Token::close()),
                '+' => self.push_op(Op::Add),
                '-' => self.push_op(Op::Sub),
                '*' => self.push_op(Op::Mul),
                '/' => self.push_op(Op::Div),
                '%' => self.push_op(Op::Rem),
                '<' => self.one_or_two('<', Op::LtEq, Op::Lt)?,
                '>' => self.one_or_two('>', Op::GtEq, Op::Gt)?,
                '!' => self.one_or_two('!', Op::NotEq, Op::Not)?,
                '=' => self.doubled('=', "'='", Op::Eq)?,
                '&' => self.doubled('&', "'&'", Op::And)?,
                '|' => self.doubled('|', "'|'", Op::Or)?,
                '?' => self.doubled('?', "'?'", Op::Coalesce)?,
                '"' => self.string()?,
                c if c.is_ascii_digit() => self.number(start)?,
                c if is_ident_start(c) => {
                    self.cursor.back();
                    self.identifier()?;
                }
                other => {
                    return Err(LexError::unexpected_character(
                        start,
                        "",
                        "number, operator or identifier",
                        other,
                    ));
                }
            }
        }
        Ok(self.tokens)
    }

    #[inline]
    fn push_op(&mut self, op: Op) {
        self.tokens.push(Token::operator(op));
    }

    /// `first` alone, or `first=` as `two`.
    fn one_or_two(&mut self, first: char, two: Op, one: Op) -> Result<(), LexError> {
        match self.cursor.bump() {
            None => return Err(LexError::unexpected_end(self.cursor.pos(), first)),
            Some('=') => self.push_op(two),
            Some(_) => {
                self.cursor.back();
                self.push_op(one);
            }
        }
        Ok(())
    }

    /// Operators spelled with the same character twice (`==`, `&&`, `||`, `??`).
    fn doubled(&mut self, first: char, expected: &'static str, op: Op) -> Result<(), LexError> {
        match self.cursor.bump() {
            None => Err(LexError::unexpected_end(self.cursor.pos(), first)),
            Some(c) if c == first => {
                self.push_op(op);
                Ok(())
            }
            Some(c) => Err(LexError::unexpected_character(
                self.cursor.pos() - c.len_utf8(),
                first,
                expected,
                c,
            )),
        }
    }

    /// String literal; the opening `"` is already consumed.
    fn string(&mut self) -> Result<(), LexError> {
        let mut content = String::new();
        loop {
            match self.cursor.bump() {
                None => {
                    return Err(LexError::unexpected_end(
                        self.cursor.pos(),
                        format!("\"{content}"),
                    ));
                }
                Some('"') => break,
                Some('\\') => {
                    let Some(escaped) = self.cursor.bump() else {
                        return Err(LexError::unexpected_end(
                            self.cursor.pos(),
                            "escape sequence",
                        ));
                    };
                    content.push(match escaped {
                        '0' => '\0',
                        '\\' | '\'' | '"' => escaped,
                        't' => '\t',
                        'n' => '\n',
                        'r' => '\r',
                        other => {
                            return Err(LexError::unexpected_character(
                                self.cursor.pos() - other.len_utf8(),
                                "\\",
                                r#"one of 0 \ ' " t n r"#,
                                other,
                            ));
                        }
                    });
                }
                Some(c) => content.push(c),
            }
        }
        trace!(len = content.len(), "string literal");
        self.tokens
            .push(Token::new(TokenKind::StringLiteral, content));
        Ok(())
    }

    /// Integer or decimal literal; the first digit is already consumed.
    fn number(&mut self, start: usize) -> Result<(), LexError> {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        if self.cursor.peek() != Some('.') {
            let literal = self.cursor.slice_from(start);
            if literal.parse::<i64>().is_err() {
                return Err(LexError::new(
                    start,
                    LexErrorKind::IntOverflow {
                        literal: literal.to_owned(),
                    },
                ));
            }
            self.tokens.push(Token::new(TokenKind::IntLiteral, literal));
            return Ok(());
        }

        self.cursor.bump();
        match self.cursor.bump() {
            None => {
                return Err(LexError::unexpected_end(
                    self.cursor.pos(),
                    self.cursor.slice_from(start),
                ));
            }
            Some(c) if c.is_ascii_digit() => self.cursor.eat_while(|c| c.is_ascii_digit()),
            Some(c) => {
                let at = self.cursor.pos() - c.len_utf8();
                return Err(LexError::unexpected_character(
                    at,
                    self.cursor.slice(start, at),
                    "digit",
                    c,
                ));
            }
        }
        self.tokens.push(Token::new(
            TokenKind::DoubleLiteral,
            self.cursor.slice_from(start),
        ));
        Ok(())
    }

    /// Variable path, boolean literal, or cast name.
    fn identifier(&mut self) -> Result<(), LexError> {
        let start = self.cursor.pos();
        let mut segment_start = true;
        while let Some(c) = self.cursor.bump() {
            if segment_start {
                if !is_ident_start(c) {
                    let at = self.cursor.pos() - c.len_utf8();
                    return Err(LexError::unexpected_character(
                        at,
                        self.cursor.slice(start, at),
                        "identifier",
                        c,
                    ));
                }
                segment_start = false;
            } else if c == '.' {
                segment_start = true;
            } else if !is_ident_continue(c) {
                self.cursor.back();
                break;
            }
        }

        let name = self.cursor.slice_from(start);
        if segment_start {
            return Err(LexError::unexpected_end(self.cursor.pos(), name));
        }

        match name {
            "true" | "false" => {
                self.tokens.push(Token::new(TokenKind::BoolLiteral, name));
                return Ok(());
            }
            "_" => {
                return Err(LexError::unexpected_character(
                    start,
                    name,
                    "variable identifier",
                    '_',
                ));
            }
            _ => {}
        }

        if let Some(op) = Op::cast_named(name) {
            match self.cursor.bump() {
                Some('(') => return self.cast(op),
                Some(_) => self.cursor.back(),
                None => {}
            }
        }

        if name.split('.').any(|segment| segment == "true" || segment == "false") {
            return Err(LexError::syntax(
                start,
                format!("variable name '{name}' cannot use true or false as a segment"),
            ));
        }
        self.tokens.push(Token::new(TokenKind::Variable, name));
        Ok(())
    }

    /// Cast body; the cast name and its `(` are already consumed.
    fn cast(&mut self, op: Op) -> Result<(), LexError> {
        let body_start = self.cursor.pos();
        let body_end = self.balanced_body(body_start)?;

        if self.depth >= self.options.max_cast_depth {
            return Err(LexError::new(
                body_start,
                LexErrorKind::NestingTooDeep {
                    limit: self.options.max_cast_depth,
                },
            ));
        }

        let body = self.cursor.slice(body_start, body_end);
        trace!(cast = op.symbol(), body, depth = self.depth, "cast body");
        let inner = ensure_sufficient_stack(|| {
            Lexer::new(body, self.options, self.depth + 1).run()
        })
        .map_err(|err| err.shifted(body_start))?;

        self.tokens.reserve(inner.len() + 3);
        self.push_op(op);
        self.tokens.push(Token::open());
        self.tokens.extend(inner);
        self.tokens.push(Token::close());
        Ok(())
    }

    /// Advance past the `)` matching an already consumed `(`.
    ///
    /// Returns the byte offset of that `)`. Parentheses inside string
    /// literals do not count.
    fn balanced_body(&mut self, body_start: usize) -> Result<usize, LexError> {
        let mut open = 1_u32;
        while let Some(c) = self.cursor.bump() {
            match c {
                '(' => open += 1,
                ')' => {
                    open -= 1;
                    if open == 0 {
                        return Ok(self.cursor.pos() - 1);
                    }
                }
                '"' => self.skip_string(),
                _ => {}
            }
        }
        Err(LexError::unexpected_end(
            self.cursor.pos(),
            self.cursor.slice_from(body_start),
        ))
    }

    fn skip_string(&mut self) {
        while let Some(c) = self.cursor.bump() {
            match c {
                '"' => return,
                '\\' => {
                    self.cursor.bump();
                }
                _ => {}
            }
        }
    }
}
