//! Phase 1: Lexer
//!
//! The lexer turns source text into a token stream ending in a single
//! `Eof` token. It switches between two modes without an explicit flag:
//!
//! - Key mode (outside any value): skips whitespace and `#` comments and
//!   reads keys. A `:` emits `DataSep` and enters value mode.
//! - Value mode: reads arrays, separators and scalar literals until the
//!   statement's `;`, which emits `EndOfData` and returns to key mode.
//!
//! Number, boolean and null literals are read by maximal munch: the
//! character that ends the literal is consumed and then handed back to the
//! cursor so it can start the next token.

use tracing::{debug, trace};

use crate::error::LexError;
use crate::number::NumberFormat;
use crate::options::ParseOptions;
use crate::scanner::Cursor;
use crate::token::{Token, TokenCategory};

/// Lexer over one input string. Consumed by [`Lexer::tokenize`].
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    format: NumberFormat,
    filename: Option<&'a str>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            format: NumberFormat::INVARIANT,
            filename: None,
            tokens: Vec::new(),
        }
    }

    pub fn with_options(input: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            format: options.number_format,
            filename: options.filename.as_deref(),
            tokens: Vec::new(),
        }
    }

    /// Lex the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.cursor.peek() {
            let (line, column) = self.cursor.position();
            if c.is_whitespace() {
                self.cursor.bump();
            } else if c == '#' {
                self.skip_comment();
            } else if c == ':' {
                self.cursor.bump();
                self.push(TokenCategory::DataSep, ":", line, column);
                self.lex_value()?;
            } else if is_key_start(c) {
                self.lex_key();
            } else {
                return Err(self.error(format!("invalid character '{}'", c), line, column));
            }
        }

        let (line, column) = self.cursor.position();
        self.tokens.push(Token::eof(line, column));
        debug!(tokens = self.tokens.len(), "lexed");
        Ok(self.tokens)
    }

    fn push(&mut self, category: TokenCategory, lexeme: &str, line: usize, column: usize) {
        trace!(?category, lexeme, line, column, "token");
        self.tokens.push(Token::new(category, lexeme, line, column));
    }

    fn error(&self, message: String, line: usize, column: usize) -> LexError {
        LexError::new(message, line, column).with_filename(self.filename)
    }

    /// Skip from `#` up to, not including, the next newline.
    fn skip_comment(&mut self) {
        self.cursor.eat_while(|c| c != '\n');
    }

    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(char::is_whitespace);
    }

    fn lex_key(&mut self) {
        let (line, column) = self.cursor.position();
        let mut lexeme = String::new();
        while let Some(c) = self.cursor.peek() {
            if !is_key_continue(c) {
                break;
            }
            lexeme.push(c);
            self.cursor.bump();
        }
        self.push(TokenCategory::Key, &lexeme, line, column);
    }

    /// Lex one value, from after `:` through the statement's `;`.
    ///
    /// Running out of input is not a lex error here; the parser reports the
    /// missing `;` against the `Eof` token.
    fn lex_value(&mut self) -> Result<(), LexError> {
        loop {
            self.skip_whitespace();
            let (line, column) = self.cursor.position();
            let Some(c) = self.cursor.bump() else {
                return Ok(());
            };

            match c {
                ';' => {
                    self.push(TokenCategory::EndOfData, ";", line, column);
                    return Ok(());
                }
                '[' => self.push(TokenCategory::OpenArray, "[", line, column),
                ']' => self.push(TokenCategory::CloseArray, "]", line, column),
                ',' => {
                    self.push(TokenCategory::ArraySep, ",", line, column);
                    self.skip_whitespace();
                    if self.cursor.peek() == Some(',') {
                        let (line, column) = self.cursor.position();
                        let message = "double comma in array".to_string();
                        return Err(self.error(message, line, column));
                    }
                }
                '\'' | '"' => self.lex_string(c, line, column)?,
                c if self.format.starts_number(c) => self.lex_number(c, line, column)?,
                't' | 'f' => {
                    self.lex_keyword(c, &["true", "false"], TokenCategory::Bool, line, column)?
                }
                'n' => self.lex_keyword(c, &["null"], TokenCategory::Null, line, column)?,
                other => {
                    return Err(self.error(format!("invalid character '{}'", other), line, column));
                }
            }
        }
    }

    /// Lex a quoted literal. The lexeme keeps the quotes and any `\`.
    fn lex_string(&mut self, quote: char, line: usize, column: usize) -> Result<(), LexError> {
        let mut lexeme = String::from(quote);
        loop {
            match self.cursor.bump() {
                None => {
                    return Err(self.error("unterminated string".to_string(), line, column));
                }
                Some('\\') => {
                    lexeme.push('\\');
                    match self.cursor.bump() {
                        Some(escaped) => lexeme.push(escaped),
                        None => {
                            let message = "unterminated string".to_string();
                            return Err(self.error(message, line, column));
                        }
                    }
                }
                Some(c) if c == quote => {
                    lexeme.push(c);
                    break;
                }
                Some(c) => lexeme.push(c),
            }
        }
        self.push(TokenCategory::String, &lexeme, line, column);
        Ok(())
    }

    /// Lex digits with at most one decimal point.
    fn lex_number(&mut self, first: char, line: usize, column: usize) -> Result<(), LexError> {
        let point = self.format.decimal_point();
        let mut lexeme = String::from(first);
        let mut dotted = first == point;
        loop {
            let (at_line, at_column) = self.cursor.position();
            match self.cursor.bump() {
                Some(c) if c.is_ascii_digit() => lexeme.push(c),
                Some(c) if c == point => {
                    if dotted {
                        return Err(self.error(
                            "double dot in number".to_string(),
                            at_line,
                            at_column,
                        ));
                    }
                    dotted = true;
                    lexeme.push(c);
                }
                Some(_) => {
                    self.cursor.unbump();
                    break;
                }
                None => break,
            }
        }

        let category = if dotted {
            TokenCategory::Float
        } else {
            TokenCategory::Integer
        };
        self.push(category, &lexeme, line, column);
        Ok(())
    }

    /// Lex a run of letters that must spell one of `expected`.
    fn lex_keyword(
        &mut self,
        first: char,
        expected: &[&str],
        category: TokenCategory,
        line: usize,
        column: usize,
    ) -> Result<(), LexError> {
        let mut lexeme = String::from(first);
        loop {
            match self.cursor.bump() {
                Some(c) if c.is_alphabetic() => lexeme.push(c),
                Some(_) => {
                    self.cursor.unbump();
                    break;
                }
                None => break,
            }
        }

        if !expected.contains(&lexeme.as_str()) {
            let choices = expected
                .iter()
                .map(|k| format!("'{}'", k))
                .collect::<Vec<_>>()
                .join(" or ");
            return Err(self.error(
                format!("invalid value '{}', expected {}", lexeme, choices),
                line,
                column,
            ));
        }
        self.push(category, &lexeme, line, column);
        Ok(())
    }
}

fn is_key_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_key_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lex `input` with default options.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenCategory::{
        ArraySep, Bool, CloseArray, DataSep, EndOfData, Eof, Float, Integer, Key, Null, OpenArray,
    };

    fn categories(input: &str) -> Vec<TokenCategory> {
        lex(input).unwrap().iter().map(|t| t.category).collect()
    }

    fn lexemes(input: &str) -> Vec<String> {
        lex(input).unwrap().into_iter().map(|t| t.lexeme).collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = lex("").unwrap();
        assert_eq!(tokens, vec![Token::eof(0, 0)]);
    }

    #[test]
    fn test_whitespace_only() {
        let tokens = lex("  \n\n  ").unwrap();
        assert_eq!(tokens, vec![Token::eof(2, 2)]);
    }

    #[test]
    fn test_scalar_statement() {
        assert_eq!(categories("a: 42;"), vec![Key, DataSep, Integer, EndOfData, Eof]);
        assert_eq!(lexemes("a: 42;"), vec!["a", ":", "42", ";", ""]);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(
            categories("a: 3.14; b: \"hi\"; c: true; d: false; e: null; f: -1;"),
            vec![
                Key, DataSep, Float, EndOfData, Key, DataSep, TokenCategory::String, EndOfData,
                Key, DataSep,
                Bool, EndOfData, Key, DataSep, Bool, EndOfData, Key, DataSep, Null, EndOfData,
                Key, DataSep, Integer, EndOfData, Eof
            ]
        );
    }

    #[test]
    fn test_nested_array() {
        assert_eq!(
            categories("x: [1, [2, 3], 4];"),
            vec![
                Key, DataSep, OpenArray, Integer, ArraySep, OpenArray, Integer, ArraySep,
                Integer, CloseArray, ArraySep, Integer, CloseArray, EndOfData, Eof
            ]
        );
    }

    #[test]
    fn test_number_terminator_is_relexed() {
        assert_eq!(lexemes("x:[1.5]"), vec!["x", ":", "[", "1.5", "]", ""]);
        assert_eq!(lexemes("x:true;"), vec!["x", ":", "true", ";", ""]);
        assert_eq!(lexemes("x:[null,1]"), vec!["x", ":", "[", "null", ",", "1", "]", ""]);
    }

    #[test]
    fn test_string_keeps_quotes_and_escapes() {
        let tokens = lex(r#"s: "a\"b"; t: 'it\'s';"#).unwrap();
        assert_eq!(tokens[2].lexeme, r#""a\"b""#);
        assert_eq!(tokens[2].category, TokenCategory::String);
        assert_eq!(tokens[6].lexeme, r"'it\'s'");
    }

    #[test]
    fn test_string_with_separators_inside() {
        let tokens = lex("s: \"a;b,[c]\";").unwrap();
        assert_eq!(tokens[2].lexeme, "\"a;b,[c]\"");
        assert_eq!(tokens[3].category, EndOfData);
    }

    #[test]
    fn test_comments_ignored() {
        assert_eq!(lex("# comment\na: 1;").unwrap().len(), 5);
        assert_eq!(
            categories("# c1\n# c2\na: 1; # trailing\n"),
            categories("a: 1;")
        );
    }

    #[test]
    fn test_positions() {
        let tokens = lex("a: 1;\n  bb: [2];").unwrap();
        let key = &tokens[4];
        assert_eq!((key.lexeme.as_str(), key.line, key.column), ("bb", 1, 2));
        let open = &tokens[6];
        assert_eq!((open.line, open.column), (1, 6));
        let two = &tokens[7];
        assert_eq!((two.line, two.column), (1, 7));
    }

    #[test]
    fn test_value_across_lines() {
        let tokens = lex("x: [\n  1,\n  2\n];").unwrap();
        assert_eq!(tokens[5].lexeme, "2");
        assert_eq!((tokens[5].line, tokens[5].column), (2, 2));
        assert_eq!((tokens[6].line, tokens[6].column), (3, 0));
    }

    #[test]
    fn test_single_eof_at_end() {
        for input in ["", "a: 1;", "a: 1;   \n\n", "# only a comment", "a: [1, 2]"] {
            let tokens = lex(input).unwrap();
            let eofs = tokens.iter().filter(|t| t.category == Eof).count();
            assert_eq!(eofs, 1, "{:?}", input);
            assert_eq!(tokens.last().unwrap().category, Eof);
        }
    }

    #[test]
    fn test_missing_semicolon_is_not_lex_error() {
        assert_eq!(categories("a: 1"), vec![Key, DataSep, Integer, Eof]);
    }

    #[test]
    fn test_negative_numbers_in_arrays() {
        assert_eq!(
            lexemes("x: [-1, -2.5];"),
            vec!["x", ":", "[", "-1", ",", "-2.5", "]", ";", ""]
        );
    }

    #[test]
    fn test_double_comma() {
        let err = lex("x: [1,,2];").unwrap_err();
        assert_eq!(err.message, "double comma in array");
        assert_eq!((err.line, err.column), (0, 6));

        let err = lex("x: [1, ,2];").unwrap_err();
        assert_eq!(err.message, "double comma in array");
        assert_eq!((err.line, err.column), (0, 7));
    }

    #[test]
    fn test_double_dot() {
        let err = lex("x: 1.2.3;").unwrap_err();
        assert_eq!(err.message, "double dot in number");
        assert_eq!((err.line, err.column), (0, 6));
    }

    #[test]
    fn test_bad_keywords() {
        let err = lex("x: tru;").unwrap_err();
        assert_eq!(err.message, "invalid value 'tru', expected 'true' or 'false'");
        assert_eq!((err.line, err.column), (0, 3));

        let err = lex("x: nil;").unwrap_err();
        assert_eq!(err.message, "invalid value 'nil', expected 'null'");

        let err = lex("x: falsey;").unwrap_err();
        assert_eq!(err.message, "invalid value 'falsey', expected 'true' or 'false'");
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex("x: \"abc;").unwrap_err();
        assert_eq!(err.message, "unterminated string");
        assert_eq!((err.line, err.column), (0, 3));

        let err = lex("x: 'abc\\").unwrap_err();
        assert_eq!(err.message, "unterminated string");
    }

    #[test]
    fn test_invalid_characters() {
        let err = lex("x: @;").unwrap_err();
        assert_eq!(err.message, "invalid character '@'");
        assert_eq!((err.line, err.column), (0, 3));

        let err = lex("1abc: 2;").unwrap_err();
        assert_eq!(err.message, "invalid character '1'");

        let err = lex("x: 1 # no comments in values\n;").unwrap_err();
        assert_eq!(err.message, "invalid character '#'");
    }

    #[test]
    fn test_custom_decimal_point() {
        let options = ParseOptions::new()
            .with_number_format(NumberFormat::with_decimal_point('·').unwrap());
        let tokens = Lexer::with_options("x: 1·5;", &options).tokenize().unwrap();
        assert_eq!(tokens[2].category, Float);
        assert_eq!(tokens[2].lexeme, "1·5");

        let err = Lexer::with_options("x: 1.5;", &options).tokenize().unwrap_err();
        assert_eq!(err.message, "invalid character '.'");
    }

    #[test]
    fn test_error_carries_filename() {
        let options = ParseOptions::new().with_filename(Some("conf.bps"));
        let err = Lexer::with_options("x: ?;", &options).tokenize().unwrap_err();
        assert_eq!(err.to_string(), "invalid character '?' at 1:4 of <conf.bps>");
    }

    #[test]
    fn test_idempotent() {
        let input = "a: [1, 'x', [true, null]];\nb: -3.5;";
        assert_eq!(lex(input).unwrap(), lex(input).unwrap());
    }
}
