//! Numeric parsing for typed prompts.
//!
//! Pure functions — no I/O, easily testable.
//!
//! The whole string must be a number. A numeric prefix followed by
//! anything else ("12abc", "12.5" as an integer, "3.14xyz" as a float)
//! is rejected, for both integers and floats.

/// Parse a base-10 signed integer, optional leading `+` or `-`.
pub fn parse_int(text: &str) -> Option<i64> {
    text.parse().ok()
}

/// Parse a floating point value: decimal, exponent, `inf` or `nan` forms.
///
/// Trailing text after a valid number makes the whole input invalid.
pub fn parse_float(text: &str) -> Option<f64> {
    text.parse().ok()
}

// ============================================================================
// TESTS
// ============================================================================
