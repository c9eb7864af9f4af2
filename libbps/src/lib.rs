//! BPS document parser.
//!
//! A BPS document is a sequence of `key: value;` statements. Values are
//! strings, characters, 32-bit integers and floats, booleans, `null`, or
//! arrays of those nested to any depth. `#` starts a comment that runs to
//! the end of the line.
//!
//! # Parsing Pipeline
//!
//! 1. **Lexer**: Converts source text into a token stream, switching
//!    between key and value scanning at `:` and `;`.
//!
//! 2. **Parser**: Recursive descent over the tokens, building values and
//!    handing one `(key, value)` pair per statement to a [`DocumentSink`].
//!
//! Every parse owns its lexer and parser; the numeric convention travels in
//! [`ParseOptions`], so independent documents can be parsed concurrently.

mod document;
mod error;
mod lexer;
mod number;
mod options;
mod parser;
mod scanner;
mod token;
mod value;

pub use document::{Document, DocumentSink};
pub use error::{Error, LexError, ParseError, Result};
pub use lexer::{lex, Lexer};
pub use number::NumberFormat;
pub use options::ParseOptions;
pub use parser::Parser;
pub use token::{Token, TokenCategory};
pub use value::Value;

/// Parse a BPS document from a string.
///
/// # Example
///
/// ```
/// use libbps::{parse, Value};
///
/// let doc = parse("answer: 42;").unwrap();
/// assert_eq!(doc.get("answer"), Some(&Value::Integer(42)));
/// ```
pub fn parse(input: &str) -> Result<Document> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a BPS document from a string with explicit options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Document> {
    let mut doc = Document::new();
    parse_into(input, options, &mut doc)?;
    Ok(doc)
}

/// Parse a BPS document, handing each statement to `sink`.
///
/// On error the sink may already hold some statements; they must not be
/// treated as a valid document.
pub fn parse_into<S: DocumentSink + ?Sized>(
    input: &str,
    options: &ParseOptions,
    sink: &mut S,
) -> Result<()> {
    // Phase 1: Lex source into tokens
    let tokens = Lexer::with_options(input, options).tokenize()?;

    // Phase 2: Parse tokens into the sink
    Parser::with_options(&tokens, options).parse_into(sink)?;
    Ok(())
}
