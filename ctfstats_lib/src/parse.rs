//! Tolerant numeric parsing for text scraped out of markup.
//!
//! Every numeric field in the output flows through these two functions, so
//! malformed text always ends up as `None` instead of an error.

/// Parses a whole number, ignoring surrounding whitespace.
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Parses a finite floating point number, ignoring surrounding whitespace.
///
/// `NaN`, infinities, and literals too large for `f64` yield `None`: JSON has
/// no representation for them.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
