//! Error types for BPS lexing and parsing.

use thiserror::Error;

use crate::token::Token;

/// Result type for BPS operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Format a location suffix for error messages.
///
/// Positions are stored zero-based and printed one-based.
fn loc_suffix(line: usize, col: usize, filename: &Option<String>) -> String {
    match filename {
        Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
        None => format!(" at {}:{}", line + 1, col + 1),
    }
}

/// Invalid character or character sequence found while lexing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", loc_suffix(*.line, *.column, .filename))]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub filename: Option<String>,
}

impl LexError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            filename: None,
        }
    }

    /// Attach the source filename for error reporting.
    pub fn with_filename(mut self, filename: Option<&str>) -> Self {
        self.filename = filename.map(String::from);
        self
    }
}

/// Grammar violation found while parsing the token stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", loc_suffix(.token.line, .token.column, .filename))]
pub struct ParseError {
    pub message: String,
    /// The offending token.
    pub token: Token,
    pub filename: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, token: Token) -> Self {
        Self {
            message: message.into(),
            token,
            filename: None,
        }
    }

    /// Attach the source filename for error reporting.
    pub fn with_filename(mut self, filename: Option<&str>) -> Self {
        self.filename = filename.map(String::from);
        self
    }
}

/// Any error that aborts a parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// Zero-based (line, column) where the error was detected.
    pub fn position(&self) -> (usize, usize) {
        match self {
            Error::Lex(e) => (e.line, e.column),
            Error::Parse(e) => (e.token.line, e.token.column),
        }
    }

    /// The error message without location.
    pub fn message(&self) -> &str {
        match self {
            Error::Lex(e) => &e.message,
            Error::Parse(e) => &e.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenCategory;

    #[test]
    fn test_lex_error_display() {
        let err = LexError::new("double comma in array", 0, 6);
        assert_eq!(err.to_string(), "double comma in array at 1:7");
    }

    #[test]
    fn test_lex_error_display_with_filename() {
        let err = LexError::new("double dot in number", 2, 0).with_filename(Some("a.bps"));
        assert_eq!(err.to_string(), "double dot in number at 3:1 of <a.bps>");
    }

    #[test]
    fn test_parse_error_display() {
        let token = Token::new(TokenCategory::Integer, "2", 4, 9);
        let err: Error = ParseError::new("expected ';', found '2'", token).into();
        assert_eq!(err.to_string(), "expected ';', found '2' at 5:10");
        assert_eq!(err.position(), (4, 9));
        assert_eq!(err.message(), "expected ';', found '2'");
    }
}
