//! Text metrics estimator.
//!
//! Canvas text is measured with a single average glyph width per weight
//! instead of per-character tables. The estimate is deliberately on the
//! generous side: a box that is a few pixels too tall is harmless, a box that
//! is too short makes the next element overlap it.

// ────────────────────────────────────────────────────────────────────────────
// Constants
// ────────────────────────────────────────────────────────────────────────────

/// Average glyph width in em for regular weight text.
pub const AVG_CHAR_WIDTH_EM: f32 = 0.58;

/// Average glyph width in em for bold text.
pub const AVG_BOLD_CHAR_WIDTH_EM: f32 = 0.65;

/// Padding added below every multi-line estimate.
const HEIGHT_PADDING: f32 = 2.0;

fn avg_char_width(font_size: f32, bold: bool) -> f32 {
    let em = if bold {
        AVG_BOLD_CHAR_WIDTH_EM
    } else {
        AVG_CHAR_WIDTH_EM
    };
    font_size * em
}

// ────────────────────────────────────────────────────────────────────────────
// Estimators
// ────────────────────────────────────────────────────────────────────────────

/// Number of visual lines `text` wraps to inside `max_width`.
///
/// Explicit newlines always break. Each source line occupies at least one
/// visual line, so blank lines still count.
pub fn estimate_lines(text: &str, font_size: f32, max_width: f32, bold: bool) -> usize {
    let avg = avg_char_width(font_size, bold);
    let chars_per_line = if avg > 0.0 {
        ((max_width / avg).floor() as usize).max(1)
    } else {
        1
    };

    text.split('\n')
        .map(|line| line.chars().count().div_ceil(chars_per_line).max(1))
        .sum()
}

/// Estimated rendered height of `text` in px.
///
/// Empty or whitespace-only text is exactly one line tall, with no padding.
pub fn estimate_height(
    text: &str,
    font_size: f32,
    line_height: f32,
    max_width: f32,
    bold: bool,
) -> f32 {
    let line_px = font_size * line_height;
    if text.trim().is_empty() {
        return line_px;
    }
    let lines = estimate_lines(text, font_size, max_width, bold);
    lines as f32 * line_px + HEIGHT_PADDING
}

/// Estimated width of `text` laid out on a single line.
///
/// `char_spacing` is in 1/1000 em, as stored on canvas text.
pub fn estimate_width(text: &str, font_size: f32, bold: bool, char_spacing: f32) -> f32 {
    let longest = text
        .split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let per_char = avg_char_width(font_size, bold) + char_spacing / 1000.0 * font_size;
    longest as f32 * per_char.max(0.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
