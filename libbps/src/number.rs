//! Numeric convention used to read number literals.
//!
//! A `NumberFormat` is a plain value carried by each parse. Nothing about
//! it lives in process state, so parses with different conventions can
//! run side by side.

use num_traits::Num;

/// Characters that already mean something inside a value.
const RESERVED: &[char] = &[',', ';', ':', '[', ']', '\'', '"', '#', '\\', '-'];

/// How number literals are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    decimal_point: char,
}

impl NumberFormat {
    /// The fixed convention: `.` as decimal point, no digit grouping.
    pub const INVARIANT: NumberFormat = NumberFormat { decimal_point: '.' };

    /// Use `decimal_point` instead of `.`.
    ///
    /// Returns `None` when the character would be ambiguous inside a value.
    pub fn with_decimal_point(decimal_point: char) -> Option<Self> {
        if RESERVED.contains(&decimal_point)
            || decimal_point.is_alphanumeric()
            || decimal_point.is_whitespace()
            || decimal_point == '_'
        {
            return None;
        }
        Some(Self { decimal_point })
    }

    pub fn decimal_point(&self) -> char {
        self.decimal_point
    }

    /// Returns `true` if `c` can start a number literal.
    pub fn starts_number(&self, c: char) -> bool {
        c.is_ascii_digit() || c == '-' || c == self.decimal_point
    }

    pub fn parse_integer(&self, lexeme: &str) -> Option<i32> {
        self.parse_number(lexeme)
    }

    /// Values outside the `f32` range are rejected rather than read as
    /// infinity.
    pub fn parse_float(&self, lexeme: &str) -> Option<f32> {
        self.parse_number(lexeme).filter(|v: &f32| v.is_finite())
    }

    fn parse_number<T: Num>(&self, lexeme: &str) -> Option<T> {
        // Only digits, '-' and the decimal point ever reach here; anything
        // else means the lexeme did not come from this format.
        if lexeme
            .chars()
            .any(|c| !(c.is_ascii_digit() || c == '-' || c == self.decimal_point))
        {
            return None;
        }
        if self.decimal_point == '.' {
            T::from_str_radix(lexeme, 10).ok()
        } else {
            let canonical: String = lexeme
                .chars()
                .map(|c| if c == self.decimal_point { '.' } else { c })
                .collect();
            T::from_str_radix(&canonical, 10).ok()
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::INVARIANT
    }
}
