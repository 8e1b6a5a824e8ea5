//! Character cursor over TOML source text.
//!
//! The [`Scanner`] is the only piece of state the grammar layer mutates. Reads
//! past the end of input never fail; they return `None`, which lets every
//! recognizer look ahead freely.

use crate::error::Structural;

/// How much insignificant input [`Scanner::skip`] steps over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Skip {
    /// Tabs and spaces only.
    Inline,
    /// Tabs, spaces, line breaks and `#` comments.
    Full,
    /// Tabs, spaces and line breaks; a `#` stops the skip.
    FullKeepComments,
}

pub(crate) struct Scanner {
    source: Vec<char>,
    position: usize,
}

impl Scanner {
    pub(crate) fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            position: 0,
        }
    }

    /// Character at `position + offset`, or `None` past the end.
    #[inline]
    pub(crate) fn peek(&self, offset: usize) -> Option<char> {
        self.source.get(self.position + offset).copied()
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.peek(0)
    }

    /// Text between `position + start` and `position + end`, clipped to the input.
    pub(crate) fn slice(&self, start: usize, end: usize) -> String {
        let len = self.source.len();
        let from = (self.position + start).min(len);
        let to = (self.position + end).min(len).max(from);
        self.source[from..to].iter().collect()
    }

    pub(crate) fn starts_with(&self, literal: &str) -> bool {
        let mut offset = 0;
        for expected in literal.chars() {
            if self.peek(offset) != Some(expected) {
                return false;
            }
            offset += 1;
        }
        true
    }

    #[inline]
    pub(crate) fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.source.len());
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor back to a position previously read from [`Scanner::position`].
    pub(crate) fn rewind(&mut self, position: usize) {
        debug_assert!(position <= self.position);
        self.position = position;
    }

    /// `true` on `\n` or `\r\n`.
    pub(crate) fn at_line_break(&self) -> bool {
        match self.current() {
            Some('\n') => true,
            Some('\r') => self.peek(1) == Some('\n'),
            _ => false,
        }
    }

    fn skip_line_break(&mut self) {
        if self.current() == Some('\r') {
            self.advance(2);
        } else {
            self.advance(1);
        }
    }

    /// Steps over insignificant input, then rejects any other unicode
    /// whitespace sitting at the cursor.
    pub(crate) fn skip(&mut self, mode: Skip) -> Result<(), Structural> {
        match mode {
            Skip::Inline => {
                while matches!(self.current(), Some(' ' | '\t')) {
                    self.advance(1);
                }
            }
            Skip::Full | Skip::FullKeepComments => loop {
                match self.current() {
                    Some(' ' | '\t') => self.advance(1),
                    Some(_) if self.at_line_break() => self.skip_line_break(),
                    Some('#') if mode == Skip::Full => {
                        while !self.at_end() && !self.at_line_break() {
                            self.advance(1);
                        }
                    }
                    _ => break,
                }
            },
        }

        match self.current() {
            Some(ch) if ch.is_whitespace() && !self.at_line_break() => Err(Structural(format!(
                "Contains invalid whitespaces: `\\u{:x}` at position {}",
                ch as u32, self.position
            ))),
            _ => Ok(()),
        }
    }

    /// 1-based line and column of the cursor.
    pub(crate) fn line_column(&self) -> (usize, usize) {
        let consumed = &self.source[..self.position.min(self.source.len())];
        let line = 1 + consumed.iter().filter(|&&ch| ch == '\n').count();
        let column = 1 + consumed.iter().rev().take_while(|&&ch| ch != '\n').count();
        (line, column)
    }
}
