// SPDX-License-Identifier: MIT
//
// n-color — color science for n-colors.
//
// Everything the sequencing engine needs to know about color lives here:
// the `Rgb` type that flows in and out of the engine, the sRGB transfer
// curve, the CIE XYZ / Lab conversion, and the perceptual difference
// formulas used to compare Lab coordinates. Nothing in this crate holds
// state; every function is pure and deterministic.
//
// Conversion pipeline:
//
//   sRGB → Linear sRGB → CIE XYZ (D65) → CIE Lab → ΔE (76 / 94 / 2000)

pub mod ansi;
pub mod color;
pub mod delta;
pub mod lab;

pub use color::Rgb;
pub use lab::{Lab, Xyz};
