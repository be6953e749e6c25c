// SPDX-License-Identifier: MIT
//
// n-color sRGB color type.
//
// Single-character variable names (r, g, b) are the standard mathematical
// convention in color science.
#![allow(clippy::many_single_char_names)]
//
// `Rgb` is the currency of the whole workspace: the candidate pool is a
// grid of `Rgb` values, seeds are `Rgb` rows, and the engine hands `Rgb`
// values back to callers. Channels are gamma-encoded sRGB intensities in
// [0, 1], exactly what a plotting library expects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lab::{Lab, Xyz};

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// A color as three gamma-encoded sRGB channel intensities.
///
/// Values are nominally in [0, 1]. Nothing stops a caller from building an
/// out-of-range value; [`to_rgb8`](Self::to_rgb8) clamps on the way out.
///
/// # Examples
///
/// ```
/// use n_color::Rgb;
///
/// let orange = Rgb::new(1.0, 0.5, 0.0);
/// let teal = Rgb::hex("#008080").unwrap();
///
/// assert_eq!(orange.to_hex(), "#ff8000");
/// assert_eq!(teal.to_rgb8(), (0, 128, 128));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red intensity, 0.0 to 1.0.
    pub r: f64,
    /// Green intensity, 0.0 to 1.0.
    pub g: f64,
    /// Blue intensity, 0.0 to 1.0.
    pub b: f64,
}

impl Rgb {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from channel intensities (0.0 to 1.0).
    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channel values (0 to 255).
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Create a color from a hex string.
    ///
    /// Supports `#RGB` and `#RRGGBB`, with or without the leading `#`.
    /// Returns `None` if the string is not a valid hex color.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Build a color from a matrix row.
    ///
    /// Returns `None` unless the row has exactly three components.
    #[must_use]
    pub fn try_from_slice(row: &[f64]) -> Option<Self> {
        match *row {
            [r, g, b] => Some(Self::new(r, g, b)),
            _ => None,
        }
    }

    /// Pure black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Pure red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);

    /// Pure green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);

    /// Pure blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    // ─── Inspection ──────────────────────────────────────────────────────

    /// Whether every channel is finite and inside [0, 1].
    #[must_use]
    pub fn in_unit_cube(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
    }

    /// The channels as an array, in `[r, g, b]` order.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// Convert to 8-bit channels (clamped to 0–255, rounded).
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Convert to a `#rrggbb` hex string.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to linear-light sRGB (gamma removed).
    #[must_use]
    pub fn to_linear(self) -> (f64, f64, f64) {
        (
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    /// Convert to CIE XYZ (D65 white, Y of white = 1.0).
    #[must_use]
    pub fn to_xyz(self) -> Xyz {
        let (r, g, b) = self.to_linear();
        Xyz::from_linear_srgb(r, g, b)
    }

    /// Convert to CIE Lab (D65).
    #[must_use]
    pub fn to_lab(self) -> Lab {
        self.to_xyz().to_lab()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[f64; 3]> for Rgb {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [f64; 3] {
    fn from(c: Rgb) -> Self {
        c.to_array()
    }
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────
//
// sRGB uses a piecewise transfer function (gamma curve) to encode linear
// light values into the perceptual domain. Every colorimetric conversion
// starts by undoing it.

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Rgb::from_rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Rgb::from_rgb8(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // NaN clamps to 0 through the saturating cast.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Hex ──────────────────────────────────────────────────────────

    #[test]
    fn hex_parsing_rrggbb() {
        let c = Rgb::hex("#ff8000").unwrap();
        assert_eq!(c.to_rgb8(), (255, 128, 0));
    }

    #[test]
    fn hex_parsing_short() {
        let c = Rgb::hex("#f0a").unwrap();
        assert_eq!(c.to_rgb8(), (255, 0, 170));
    }

    #[test]
    fn hex_parsing_no_hash() {
        let c = Rgb::hex("00ff00").unwrap();
        assert_eq!(c, Rgb::GREEN);
    }

    #[test]
    fn hex_parsing_invalid() {
        assert!(Rgb::hex("").is_none());
        assert!(Rgb::hex("#12").is_none());
        assert!(Rgb::hex("#gggggg").is_none());
        assert!(Rgb::hex("#12345678").is_none());
    }

    #[test]
    fn hex_roundtrip_on_byte_grid() {
        for s in ["#000000", "#ffffff", "#112233", "#a0b0c0"] {
            assert_eq!(Rgb::hex(s).unwrap().to_hex(), s);
        }
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(format!("{}", Rgb::RED), "#ff0000");
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn slice_needs_three_components() {
        assert_eq!(Rgb::try_from_slice(&[0.1, 0.2, 0.3]), Some(Rgb::new(0.1, 0.2, 0.3)));
        assert_eq!(Rgb::try_from_slice(&[0.1, 0.2]), None);
        assert_eq!(Rgb::try_from_slice(&[0.1, 0.2, 0.3, 0.4]), None);
    }

    #[test]
    fn unit_cube_check() {
        assert!(Rgb::WHITE.in_unit_cube());
        assert!(!Rgb::new(1.1, 0.0, 0.0).in_unit_cube());
        assert!(!Rgb::new(f64::NAN, 0.0, 0.0).in_unit_cube());
    }

    #[test]
    fn rgb8_clamps_out_of_range() {
        assert_eq!(Rgb::new(-0.5, 2.0, 0.5).to_rgb8(), (0, 255, 128));
    }

    // ── Transfer curve ───────────────────────────────────────────────

    #[test]
    fn gamma_roundtrip() {
        for i in 0..=20 {
            let v = f64::from(i) / 20.0;
            let back = linear_to_srgb(srgb_to_linear(v));
            assert!(approx_eq(v, back, 1e-12), "{v} → {back}");
        }
    }

    #[test]
    fn mid_gray_linearizes_near_0_214() {
        assert!(approx_eq(srgb_to_linear(0.5), 0.214, 0.001));
    }
}
