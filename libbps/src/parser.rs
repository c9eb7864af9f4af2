//! Phase 2: Parser
//!
//! A recursive-descent parser over the token stream, one method per
//! grammar rule:
//!
//! ```text
//! Start     := Statement EOF
//! Statement := Key | ε
//! Key       := KEY DATA_SEP Value END_OF_DATA Statement
//! Value     := OPEN_ARRAY Elements | Scalar
//! Elements  := CLOSE_ARRAY ArraySel | Array
//! Array     := OPEN_ARRAY Elements | Scalar ArraySel
//! Scalar    := STRING | CHAR | INTEGER | FLOAT | BOOL | NULL
//! ArraySel  := ARRAY_SEP Array | CLOSE_ARRAY ArraySel | END_OF_DATA | EOF
//! ```
//!
//! The right-recursive rules (`Statement`, `Array`/`ArraySel`) run as loops.
//! Nested arrays are built on an explicit stack of builders: `[` pushes an
//! empty builder, `]` pops the top one and appends it to the builder below,
//! or hands it to the document when the stack is empty again.

use tracing::debug;

use crate::document::{Document, DocumentSink};
use crate::error::ParseError;
use crate::number::NumberFormat;
use crate::options::ParseOptions;
use crate::token::{Token, TokenCategory};
use crate::value::Value;

/// Where scalars currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Straight to the pending key.
    Key,
    /// Into the builder on top of the stack.
    Array,
}

/// What follows an array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayStep {
    NextElement,
    Done,
}

/// Parser over one token stream.
pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    format: NumberFormat,
    filename: Option<&'a str>,
    key: String,
    context: Context,
    stack: Vec<Vec<Value>>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            index: 0,
            format: NumberFormat::INVARIANT,
            filename: None,
            key: String::new(),
            context: Context::Key,
            stack: Vec::new(),
        }
    }

    pub fn with_options(tokens: &'a [Token], options: &'a ParseOptions) -> Self {
        Self {
            format: options.number_format,
            filename: options.filename.as_deref(),
            ..Self::new(tokens)
        }
    }

    /// Parse into a fresh [`Document`].
    pub fn parse(self) -> Result<Document, ParseError> {
        let mut doc = Document::new();
        self.parse_into(&mut doc)?;
        Ok(doc)
    }

    /// Parse, handing each statement to `sink`.
    ///
    /// On error, whatever `sink` received so far is not a valid document.
    pub fn parse_into<S>(mut self, sink: &mut S) -> Result<(), ParseError>
    where
        S: DocumentSink + ?Sized,
    {
        let statements = self.start(sink)?;
        debug!(statements, "parsed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Grammar rules
    // ------------------------------------------------------------------

    fn start<S: DocumentSink + ?Sized>(&mut self, sink: &mut S) -> Result<usize, ParseError> {
        let statements = self.statement(sink)?;
        self.consume(TokenCategory::Eof)?;
        Ok(statements)
    }

    fn statement<S: DocumentSink + ?Sized>(&mut self, sink: &mut S) -> Result<usize, ParseError> {
        let mut count = 0;
        while self.category() == TokenCategory::Key {
            self.key(sink)?;
            count += 1;
        }
        Ok(count)
    }

    fn key<S: DocumentSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ParseError> {
        self.key = self.current().map(|t| t.lexeme.clone()).unwrap_or_default();
        self.next_token();
        self.consume(TokenCategory::DataSep)?;
        self.value(sink)?;
        self.consume(TokenCategory::EndOfData)?;
        debug_assert!(self.stack.is_empty());
        debug!(key = %self.key, "statement");
        Ok(())
    }

    fn value<S: DocumentSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ParseError> {
        match self.category() {
            TokenCategory::OpenArray => self.array(sink),
            c if c.is_scalar() => self.scalar(sink),
            _ => Err(self.unexpected("a value")),
        }
    }

    /// `Array` followed by `ArraySel`, repeated while separators follow.
    fn array<S: DocumentSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ParseError> {
        loop {
            self.element(sink)?;
            if self.array_sel(sink)? == ArrayStep::Done {
                return Ok(());
            }
        }
    }

    /// One array element: a scalar, or the opening of a nested array.
    ///
    /// An opening bracket directly followed by a closing one is an empty
    /// array and completes the element.
    fn element<S: DocumentSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ParseError> {
        loop {
            match self.category() {
                TokenCategory::OpenArray => {
                    self.open_array();
                    self.next_token();
                    if self.category() == TokenCategory::CloseArray {
                        self.close_array(sink)?;
                        self.next_token();
                        return Ok(());
                    }
                }
                c if c.is_scalar() => return self.scalar(sink),
                _ => return Err(self.unexpected("an array element")),
            }
        }
    }

    fn array_sel<S>(&mut self, sink: &mut S) -> Result<ArrayStep, ParseError>
    where
        S: DocumentSink + ?Sized,
    {
        loop {
            match self.category() {
                TokenCategory::ArraySep if !self.stack.is_empty() => {
                    self.next_token();
                    return Ok(ArrayStep::NextElement);
                }
                TokenCategory::CloseArray if !self.stack.is_empty() => {
                    self.close_array(sink)?;
                    self.next_token();
                }
                TokenCategory::EndOfData | TokenCategory::Eof => {
                    if !self.stack.is_empty() {
                        return Err(self.error("unclosed array"));
                    }
                    return Ok(ArrayStep::Done);
                }
                _ => return Err(self.unexpected("',', ']' or ';'")),
            }
        }
    }

    fn scalar<S: DocumentSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ParseError> {
        let value = self.convert_scalar()?;
        self.set_value(value, sink);
        self.next_token();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Value assembly
    // ------------------------------------------------------------------

    fn convert_scalar(&self) -> Result<Value, ParseError> {
        let Some(token) = self.current() else {
            return Err(self.unexpected("a value"));
        };
        let lexeme = token.lexeme.as_str();
        match token.category {
            TokenCategory::String => Ok(Value::String(strip_quotes(lexeme).to_string())),
            TokenCategory::Char => {
                let unescaped = strip_quotes(lexeme).replace('\\', "");
                let mut chars = unescaped.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(self.error(&format!("invalid char literal {}", lexeme))),
                }
            }
            TokenCategory::Integer => self
                .format
                .parse_integer(lexeme)
                .map(Value::Integer)
                .ok_or_else(|| self.error(&format!("invalid integer '{}'", lexeme))),
            TokenCategory::Float => self
                .format
                .parse_float(lexeme)
                .map(Value::Float)
                .ok_or_else(|| self.error(&format!("invalid float '{}'", lexeme))),
            TokenCategory::Bool => match lexeme {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(self.error(&format!("invalid boolean '{}'", lexeme))),
            },
            TokenCategory::Null => Ok(Value::Null),
            _ => Err(self.unexpected("a value")),
        }
    }

    fn set_value<S: DocumentSink + ?Sized>(&mut self, value: Value, sink: &mut S) {
        match (self.context, self.stack.last_mut()) {
            (Context::Array, Some(top)) => top.push(value),
            _ => sink.add(self.key.clone(), value),
        }
    }

    fn open_array(&mut self) {
        if self.stack.is_empty() {
            self.context = Context::Array;
        }
        self.stack.push(Vec::new());
    }

    fn close_array<S: DocumentSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ParseError> {
        let Some(done) = self.stack.pop() else {
            return Err(self.error("unexpected ']'"));
        };
        match self.stack.last_mut() {
            Some(parent) => parent.push(Value::Array(done)),
            None => {
                self.context = Context::Key;
                sink.add(self.key.clone(), Value::Array(done));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    /// Category of the current token; `Eof` past the end.
    fn category(&self) -> TokenCategory {
        self.current().map_or(TokenCategory::Eof, |t| t.category)
    }

    /// Advance one token; a no-op past the end.
    fn next_token(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    /// Require the current token to be `expected`, then advance.
    fn consume(&mut self, expected: TokenCategory) -> Result<(), ParseError> {
        if self.category() != expected {
            return Err(self.error(&format!(
                "expected {}, found {}",
                expected,
                self.found()
            )));
        }
        self.next_token();
        Ok(())
    }

    fn found(&self) -> String {
        self.current()
            .map_or_else(|| "end of input".to_string(), Token::describe)
    }

    fn unexpected(&self, wanted: &str) -> ParseError {
        self.error(&format!("expected {}, found {}", wanted, self.found()))
    }

    fn error(&self, message: &str) -> ParseError {
        // Past the end, blame the last token (normally `Eof`).
        let token = self
            .current()
            .or_else(|| self.tokens.last())
            .cloned()
            .unwrap_or_else(|| Token::eof(0, 0));
        ParseError::new(message, token).with_filename(self.filename)
    }
}

/// Drop the first and last character (the quotes) of a quoted lexeme.
fn strip_quotes(lexeme: &str) -> &str {
    let mut chars = lexeme.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
