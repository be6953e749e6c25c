// SPDX-License-Identifier: MIT
//
// Color difference formulas.
//
// All three formulas return a non-negative scalar that is zero for
// identical inputs and symmetric in their arguments. Only the Euclidean
// form is a metric; CIE94 and CIEDE2000 may violate the triangle
// inequality, which the sequencing engine does not rely on.
//
// References:
//   CIE 116-1995 (CIE94)
//   G. Sharma, W. Wu, E. N. Dalal, "The CIEDE2000 Color-Difference
//   Formula: Implementation Notes, Supplementary Test Data, and
//   Mathematical Observations", 2005.
#![allow(clippy::many_single_char_names, clippy::similar_names)]

use crate::lab::Lab;

/// Squared Euclidean distance between two equal-length vectors.
///
/// Extra trailing components on the longer input are ignored.
#[inline]
#[must_use]
pub fn euclidean_sq(p: &[f64], q: &[f64]) -> f64 {
    p.iter()
        .zip(q)
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum()
}

// ─── CIE94 ───────────────────────────────────────────────────────────────────

/// Graphic-arts weighting constants.
const CIE94_K1: f64 = 0.045;
const CIE94_K2: f64 = 0.015;

/// CIE94 color difference (ΔE*94, graphic-arts weights).
///
/// The chroma-dependent weights use the geometric mean of both chromas
/// instead of the reference chroma of the first sample, which makes the
/// formula symmetric.
#[must_use]
pub fn cie94(lab1: Lab, lab2: Lab) -> f64 {
    let c1 = lab1.chroma();
    let c2 = lab2.chroma();
    let c_ref = (c1 * c2).sqrt();

    let dl = lab1.l - lab2.l;
    let dc = c1 - c2;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    // ΔH² can come out slightly negative from rounding.
    let dh_sq = dc.mul_add(-dc, da.mul_add(da, db * db)).max(0.0);

    let sc = CIE94_K1.mul_add(c_ref, 1.0);
    let sh = CIE94_K2.mul_add(c_ref, 1.0);

    let tc = dc / sc;
    (dh_sq / (sh * sh) + dl.mul_add(dl, tc * tc)).sqrt()
}

// ─── CIEDE2000 ───────────────────────────────────────────────────────────────

/// 25⁷, the chroma normalization constant shared by G and R_C.
const POW25_7: f64 = 6_103_515_625.0;

/// CIEDE2000 color difference (ΔE00, kL = kC = kH = 1).
#[must_use]
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    // Step 1: a' and C', h'.
    let c_bar = (lab1.chroma() + lab2.chroma()) * 0.5;
    let c_bar7 = c_bar.powi(7);
    let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + POW25_7)).sqrt());

    let a1p = (1.0 + g) * lab1.a;
    let a2p = (1.0 + g) * lab2.a;
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = hue_degrees(lab1.b, a1p);
    let h2p = hue_degrees(lab2.b, a2p);

    // Step 2: ΔL', ΔC', ΔH'.
    let dlp = lab2.l - lab1.l;
    let dcp = c2p - c1p;
    let chroma_product = c1p * c2p;

    let dhp = if chroma_product == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d > 180.0 {
            d - 360.0
        } else if d < -180.0 {
            d + 360.0
        } else {
            d
        }
    };
    let dhp_big = 2.0 * chroma_product.sqrt() * (dhp.to_radians() * 0.5).sin();

    // Step 3: weighting functions.
    let l_bar_p = (lab1.l + lab2.l) * 0.5;
    let c_bar_p = (c1p + c2p) * 0.5;

    let h_bar_p = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) * 0.5
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) * 0.5
    } else {
        (h1p + h2p - 360.0) * 0.5
    };

    let t = 0.20f64.mul_add(
        -(4.0f64.mul_add(h_bar_p, -63.0)).to_radians().cos(),
        0.32f64.mul_add(
            (3.0f64.mul_add(h_bar_p, 6.0)).to_radians().cos(),
            0.24f64.mul_add(
                (2.0 * h_bar_p).to_radians().cos(),
                0.17f64.mul_add(-(h_bar_p - 30.0).to_radians().cos(), 1.0),
            ),
        ),
    );

    let d_theta = 30.0 * (-((h_bar_p - 275.0) / 25.0).powi(2)).exp();
    let c_bar_p7 = c_bar_p.powi(7);
    let rc = 2.0 * (c_bar_p7 / (c_bar_p7 + POW25_7)).sqrt();

    let l50 = (l_bar_p - 50.0).powi(2);
    let sl = 1.0 + 0.015 * l50 / (20.0 + l50).sqrt();
    let sc = 0.045f64.mul_add(c_bar_p, 1.0);
    let sh = (0.015 * c_bar_p).mul_add(t, 1.0);
    let rt = -(2.0 * d_theta).to_radians().sin() * rc;

    // Step 4: combine.
    let tl = dlp / sl;
    let tc = dcp / sc;
    let th = dhp_big / sh;
    (rt * tc)
        .mul_add(th, th.mul_add(th, tl.mul_add(tl, tc * tc)))
        .max(0.0)
        .sqrt()
}

/// Hue angle in degrees, in [0, 360). Zero for the neutral axis.
#[inline]
fn hue_degrees(b: f64, a: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        0.0
    } else {
        b.atan2(a).to_degrees().rem_euclid(360.0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
