//! Character-level scanning over the input buffer.

use crate::error::{Error, Position};

/// Transient scanner state for one parse: the buffer, a byte offset and the
/// line/column of that offset.
///
/// A cursor drives exactly one parse and is dropped with it.
pub struct ParseCursor<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> ParseCursor<'a> {
    pub fn new(input: &'a str) -> Self {
        ParseCursor {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current byte offset, line and column.
    pub fn position(&self) -> Position {
        Position {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Looks `n` characters past the current one.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consumes `prefix` if the input continues with it.
    pub fn eat(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            for _ in prefix.chars() {
                self.next_char();
            }
            true
        } else {
            false
        }
    }

    /// Consumes characters while `pred` holds and returns the consumed slice.
    pub fn take_while<F>(&mut self, mut pred: F) -> &'a str
    where
        F: FnMut(char) -> bool,
    {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if !pred(ch) {
                break;
            }
            self.next_char();
        }
        &self.input[start..self.position]
    }

    /// Skips spaces and tabs. Newlines are statement terminators and stay put.
    pub fn skip_whitespace(&mut self) {
        self.take_while(|ch| ch == ' ' || ch == '\t');
    }

    /// Skips a `#` comment up to, not including, the end of line.
    pub fn skip_comment(&mut self) {
        if self.peek_char() == Some('#') {
            self.take_while(|ch| ch != '\n');
        }
    }

    /// Consumes one line ending (`\n` or `\r\n`).
    pub fn eat_newline(&mut self) -> bool {
        self.eat("\n") || self.eat("\r\n")
    }

    pub fn at_newline(&self) -> bool {
        self.starts_with("\n") || self.starts_with("\r\n")
    }

    pub fn syntax_error(&self, msg: &str) -> Error {
        Error::syntax(self.position(), msg)
    }

    /// Syntax error describing the character under the cursor.
    pub fn unexpected(&self, expected: &str) -> Error {
        let msg = match self.peek_char() {
            Some('\n') => format!("expected {}, found end of line", expected),
            Some(ch) => format!("expected {}, found `{}`", expected, ch.escape_debug()),
            None => format!("expected {}, found end of input", expected),
        };
        Error::syntax(self.position(), &msg)
    }
}
