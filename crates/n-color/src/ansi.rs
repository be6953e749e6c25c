// SPDX-License-Identifier: MIT
//
// ANSI true-color escape sequences for palette previews.
//
// Pure functions that write escape sequences to any `impl Write`. The CLI
// uses them to print a row of swatches so a palette can be judged by eye
// without rendering an image.
use std::io::{self, Write};

use crate::color::Rgb;

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Set the foreground (text) color as 24-bit `TrueColor`.
pub fn fg(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    let (r, g, b) = color.to_rgb8();
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

/// Set the background color as 24-bit `TrueColor`.
pub fn bg(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    let (r, g, b) = color.to_rgb8();
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

/// Write a two-cell block painted in `color`, followed by a reset.
pub fn swatch(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    bg(w, color)?;
    w.write_all(b"  ")?;
    reset(w)
}

/// Write a swatch followed by the color's hex code in the color itself.
pub fn labeled_swatch(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    swatch(w, color)?;
    w.write_all(b" ")?;
    fg(w, color)?;
    write!(w, "{}", color.to_hex())?;
    reset(w)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
