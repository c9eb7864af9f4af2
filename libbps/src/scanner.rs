//! Character cursor used by the lexer.
//!
//! The cursor walks the source one character at a time and keeps the
//! zero-based line and column of the next character. Literal scanning
//! consumes one character past the end of a literal to find its end; that
//! character is handed back with [`Cursor::unbump`].

use std::str::Chars;

/// Forward cursor over source text with a one-step undo.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    chars: Chars<'a>,
    source: &'a str,
    /// Byte offset of the next character.
    offset: usize,
    line: usize,
    column: usize,
    /// State before the last `bump`, cleared by `unbump`.
    prev: Option<Mark>,
}

#[derive(Debug, Clone, Copy)]
struct Mark {
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars(),
            source,
            offset: 0,
            line: 0,
            column: 0,
            prev: None,
        }
    }

    /// Look at the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Consume and return the next character.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.prev = Some(Mark {
            offset: self.offset,
            line: self.line,
            column: self.column,
        });
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Hand back the character returned by the last `bump`.
    ///
    /// Only one step can be undone; a second call before the next `bump`
    /// does nothing, as does a call at the start of input.
    pub fn unbump(&mut self) {
        if let Some(mark) = self.prev.take() {
            self.offset = mark.offset;
            self.line = mark.line;
            self.column = mark.column;
            self.chars = self.source[mark.offset..].chars();
        }
    }

    /// Consume characters while `pred` holds.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.bump();
        }
    }

    /// Zero-based (line, column) of the next character.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}
