//! Character cursor with a single step of push back.
//!
//! The lexer reads one character at a time and may return exactly the last
//! character it read with [`Cursor::back`]. Anything beyond that is done with
//! [`Cursor::peek`], which never moves the position.

/// Cursor over a source string.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    /// Byte offset of the next character.
    pos: usize,
    /// Byte offset of the character returned by the last `bump`, if it may be pushed back.
    last: Option<usize>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            source,
            pos: 0,
            last: None,
        }
    }

    /// Byte offset of the next character.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Consume and return the next character.
    #[inline]
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.last = Some(self.pos);
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Un-read the character returned by the last `bump`.
    ///
    /// Only one character can be pushed back; a second call is a no-op.
    #[inline]
    pub(crate) fn back(&mut self) {
        if let Some(last) = self.last.take() {
            self.pos = last;
        }
    }

    /// Consume characters while `pred` holds.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.peek().is_some_and(&mut pred) {
            self.bump();
        }
    }

    /// Source text between `start` and the current position.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.pos]
    }

    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }
}
