//! Token types shared by the lexer and the parser.

use std::fmt;

/// Category of a token in the lexer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    /// Statement key (`name` in `name: value;`).
    Key,
    /// Quoted literal, lexeme keeps its quotes.
    String,
    /// Single character literal, lexeme keeps its quotes.
    Char,
    /// Integer literal.
    Integer,
    /// Literal containing a decimal point.
    Float,
    /// `true` or `false`.
    Bool,
    /// `null`.
    Null,
    /// `[`
    OpenArray,
    /// `]`
    CloseArray,
    /// `:` between key and value.
    DataSep,
    /// `;` ending a statement.
    EndOfData,
    /// `,` between array elements.
    ArraySep,
    /// End of input.
    Eof,
}

impl TokenCategory {
    /// Returns `true` for the categories that carry a scalar value.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TokenCategory::String
                | TokenCategory::Char
                | TokenCategory::Integer
                | TokenCategory::Float
                | TokenCategory::Bool
                | TokenCategory::Null
        )
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenCategory::Key => "key",
            TokenCategory::String => "string",
            TokenCategory::Char => "char",
            TokenCategory::Integer => "integer",
            TokenCategory::Float => "float",
            TokenCategory::Bool => "boolean",
            TokenCategory::Null => "null",
            TokenCategory::OpenArray => "'['",
            TokenCategory::CloseArray => "']'",
            TokenCategory::DataSep => "':'",
            TokenCategory::EndOfData => "';'",
            TokenCategory::ArraySep => "','",
            TokenCategory::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A single token in the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub category: TokenCategory,
    /// Exact source text of the token.
    pub lexeme: String,
    /// Zero-based line of the token's first character.
    pub line: usize,
    /// Zero-based column of the token's first character.
    pub column: usize,
}

impl Token {
    pub fn new(category: TokenCategory, lexeme: &str, line: usize, column: usize) -> Self {
        Self {
            category,
            lexeme: lexeme.to_string(),
            line,
            column,
        }
    }

    /// End-of-input token at the given position.
    pub fn eof(line: usize, column: usize) -> Self {
        Self::new(TokenCategory::Eof, "", line, column)
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self.category {
            TokenCategory::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}
