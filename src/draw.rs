//! Box and rule drawing.
//!
//! Pure functions — text in, String out. No I/O, so every glyph can be
//! asserted on directly. The session writes what these return.
//!
//! Widths are counted in `char`s. No wide-character awareness: a CJK
//! character counts as one column, the same as an ASCII letter.

// ============================================================================
// GLYPHS
// ============================================================================

pub const TOP_LEFT: char = '╭';
pub const TOP_RIGHT: char = '╮';
pub const BOTTOM_LEFT: char = '╰';
pub const BOTTOM_RIGHT: char = '╯';
pub const HORIZONTAL: char = '─';
pub const VERTICAL: char = '│';

/// Rule end caps and fill.
pub const RULE_CAP: char = '┅';
pub const RULE_FILL: char = '━';

/// Number of fill glyphs between the rule caps.
pub const RULE_FILL_WIDTH: usize = 77;

/// Dashed vertical connector printed under a menu title.
pub const CONTINUATION: char = '┆';

/// Dotted tail after the closing menu corner.
pub const DOTTED: char = '┄';

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// A full-width horizontal rule, newline-terminated.
pub fn rule() -> String {
    let mut out = String::with_capacity((RULE_FILL_WIDTH + 3) * 3);
    out.push(RULE_CAP);
    out.extend(std::iter::repeat_n(RULE_FILL, RULE_FILL_WIDTH));
    out.push(RULE_CAP);
    out.push('\n');
    out
}

/// Three lines framing `text`, each newline-terminated.
///
/// The borders are two columns wider than the text to account for
/// the single space of padding on each side.
pub fn boxed(text: &str) -> String {
    let border: String = std::iter::repeat_n(HORIZONTAL, text.chars().count() + 2).collect();

    format!(
        "{TOP_LEFT}{border}{TOP_RIGHT}\n\
         {VERTICAL} {text} {VERTICAL}\n\
         {BOTTOM_LEFT}{border}{BOTTOM_RIGHT}\n"
    )
}

/// Right-pad `text` with spaces to `width` characters.
///
/// Text already at or beyond `width` is returned unchanged.
pub fn padded(text: &str, width: usize) -> String {
    format!("{:<width$}", text)
}

// ============================================================================
// TESTS
// ============================================================================
