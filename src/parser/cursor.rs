//! Character cursor over manifest text
//!
//! Every scanning operation skips leading whitespace (including newlines)
//! first. Line numbers are 1-based and count the newlines consumed so far.

/// Position within a manifest string
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset into the input
    pub fn position(&self) -> usize {
        self.pos
    }

    /// 1-based line number of the current position
    pub fn line(&self) -> usize {
        self.input[..self.pos].matches('\n').count() + 1
    }

    /// Unconsumed input
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Returns true when only whitespace remains
    pub fn is_at_end(&self) -> bool {
        self.rest().trim_start().is_empty()
    }

    /// Advances past any whitespace
    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consumes `literal` if the input continues with it
    ///
    /// Matching is a plain prefix test: `gitfoo` starts with `git`.
    pub fn scan_literal(&mut self, literal: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consumes text up to, but not including, `stop`
    ///
    /// Returns `None` without consuming the text when it is empty. When
    /// `stop` never occurs the remainder of the input is consumed.
    pub fn scan_up_to(&mut self, stop: char) -> Option<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest.find(stop).unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }
}
