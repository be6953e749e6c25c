// SPDX-License-Identifier: MIT
//
// CIE XYZ and CIE L*a*b* (D65).
//
// Lab is the comparison space behind three of the four colorimetric
// embedding strategies: plain Euclidean distance (ΔE76), CIE94, and
// CIEDE2000 all take Lab coordinates as input.
#![allow(clippy::many_single_char_names)]

use serde::{Deserialize, Serialize};

// ─── Constants ───────────────────────────────────────────────────────────────

/// D65 reference white, normalized to Y = 1.0.
pub const D65_WHITE: Xyz = Xyz { x: 0.950_47, y: 1.0, z: 1.088_83 };

/// CIE ε = (6/29)³, the linear/cube-root crossover of the Lab transfer.
const EPSILON: f64 = 216.0 / 24_389.0;

/// CIE κ = (29/3)³, the slope of the linear segment.
const KAPPA: f64 = 24_389.0 / 27.0;

// ─── Xyz ─────────────────────────────────────────────────────────────────────

/// A CIE 1931 XYZ tristimulus value, scaled so that Y of white is 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    /// Convert linear-light sRGB to XYZ using the sRGB (D65) primaries.
    #[must_use]
    pub fn from_linear_srgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            x: 0.180_437_5f64.mul_add(b, 0.412_456_4f64.mul_add(r, 0.357_576_1 * g)),
            y: 0.072_175_0f64.mul_add(b, 0.212_672_9f64.mul_add(r, 0.715_152_2 * g)),
            z: 0.950_304_1f64.mul_add(b, 0.019_333_9f64.mul_add(r, 0.119_192_0 * g)),
        }
    }

    /// Convert to CIE Lab relative to the D65 white point.
    #[must_use]
    pub fn to_lab(self) -> Lab {
        let fx = lab_f(self.x / D65_WHITE.x);
        let fy = lab_f(self.y / D65_WHITE.y);
        let fz = lab_f(self.z / D65_WHITE.z);
        Lab {
            l: 116.0f64.mul_add(fy, -16.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

/// The Lab companding function: cube root above ε, linear below.
#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA.mul_add(t, 16.0) / 116.0
    }
}

// ─── Lab ─────────────────────────────────────────────────────────────────────

/// A CIE L*a*b* color.
///
/// - `l`: lightness, 0 (black) to 100 (white)
/// - `a`: green (−) to red (+)
/// - `b`: blue (−) to yellow (+)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Read a Lab value out of a 3-component embedded vector.
    ///
    /// Components past the third are ignored; missing ones read as zero.
    #[must_use]
    pub fn from_slice(v: &[f64]) -> Self {
        let at = |i: usize| v.get(i).copied().unwrap_or(0.0);
        Self::new(at(0), at(1), at(2))
    }

    /// Chroma: distance from the neutral axis.
    #[inline]
    #[must_use]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }

    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
