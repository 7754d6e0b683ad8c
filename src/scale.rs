//! Block scale: percentages drawn with eighth-cell resolution.
//!
//! A cell is either full (`█`), empty (a space), or, for the single cell at
//! the leading edge, one of the partial glyphs `▏▎▍▌▋▊▉`. A bar `width`
//! cells wide can therefore show `8 * width` distinct levels.

use std::fmt;

/// Glyph for a completely filled cell.
pub const FULL_BLOCK: char = '\u{2588}';

/// Leading-edge glyphs indexed by filled eighths, from empty to full.
pub const EIGHTHS: [char; 9] = [
    ' ', '\u{258F}', '\u{258E}', '\u{258D}', '\u{258C}', '\u{258B}', '\u{258A}', '\u{2589}',
    FULL_BLOCK,
];

/// Write a `width`-cell block bar for `percent` (0 to 100) into `out`.
///
/// Out-of-range and NaN percentages are clamped: `percent <= 0` gives an
/// all-empty bar, `percent >= 100` an all-full bar with no partial glyph.
///
/// # Errors
///
/// Propagates formatter errors from the target.
pub fn write_block_scale(out: &mut impl fmt::Write, percent: f64, width: usize) -> fmt::Result {
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };

    #[allow(clippy::cast_precision_loss)]
    let filled = percent / 100.0 * width as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let full_cells = (filled.floor() as usize).min(width);

    for _ in 0..full_cells {
        out.write_char(FULL_BLOCK)?;
    }
    if full_cells < width {
        #[allow(clippy::cast_precision_loss)]
        let remainder = filled - full_cells as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let eighths = ((remainder * 8.0).round() as usize).min(EIGHTHS.len() - 1);
        out.write_char(EIGHTHS[eighths])?;
        for _ in full_cells + 1..width {
            out.write_char(' ')?;
        }
    }
    Ok(())
}

/// Render a block bar into a new string. See [`write_block_scale`].
#[must_use]
pub fn block_scale(percent: f64, width: usize) -> String {
    let mut out = String::with_capacity(width * FULL_BLOCK.len_utf8());
    // Writing into a String cannot fail.
    let _ = write_block_scale(&mut out, percent, width);
    out
}
