//! Per-parse configuration.

use crate::number::NumberFormat;

/// Options for a single parse.
///
/// Each parse gets its own copy; there are no process-wide defaults to
/// mutate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Source name shown in error messages.
    pub filename: Option<String>,
    pub number_format: NumberFormat,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filename(mut self, filename: Option<&str>) -> Self {
        self.filename = filename.map(String::from);
        self
    }

    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }
}
