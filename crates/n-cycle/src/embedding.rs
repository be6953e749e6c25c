//! Embedding strategies: what "perceptually far apart" means.
//!
//! Each strategy is a pair of functions: `embed` maps raw colors into a
//! comparison space once, and `dist` compares one embedded vector against
//! a whole batch. The selection engine only ever talks to the
//! [`Embedding`] trait, so the five strategies are interchangeable.
//!
//! | Strategy | Space | Distance |
//! |----------|-------|----------|
//! | `rgb` | raw sRGB | squared Euclidean |
//! | `lab` | CIE Lab | squared Euclidean (ΔE76²) |
//! | `cie94` | CIE Lab | ΔE94 |
//! | `ciede2000` | CIE Lab | ΔE00 |
//! | `nn` | learned, unit-normalized | squared Euclidean |

use std::fmt;
use std::str::FromStr;

use n_color::delta::{cie94, ciede2000, euclidean_sq};
use n_color::{Lab, Rgb};
use serde::{Deserialize, Serialize};

use crate::error::{CycleError, Result};
use crate::network::Network;

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// The closed set of embedding/distance pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Identity embedding, squared Euclidean distance in sRGB.
    #[serde(alias = "identity")]
    Rgb,
    /// CIE Lab embedding, squared Euclidean distance.
    Lab,
    /// CIE Lab embedding, CIE94 difference.
    Cie94,
    /// CIE Lab embedding, CIEDE2000 difference.
    #[default]
    Ciede2000,
    /// Learned embedding, unit-normalized, squared Euclidean distance.
    #[serde(rename = "nn", alias = "network", alias = "learned")]
    Network,
}

impl Strategy {
    /// Canonical name of this strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Lab => "lab",
            Self::Cie94 => "cie94",
            Self::Ciede2000 => "ciede2000",
            Self::Network => "nn",
        }
    }

    /// Parse a strategy from its name (case-insensitive, aliases accepted).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "rgb" | "identity" => Some(Self::Rgb),
            "lab" => Some(Self::Lab),
            "cie94" => Some(Self::Cie94),
            "ciede2000" => Some(Self::Ciede2000),
            "nn" | "network" | "learned" => Some(Self::Network),
            _ => None,
        }
    }

    /// All strategies, in documentation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Rgb, Self::Lab, Self::Cie94, Self::Ciede2000, Self::Network]
    }

    /// Whether this strategy needs injected network parameters.
    #[must_use]
    pub const fn needs_network(self) -> bool {
        matches!(self, Self::Network)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = CycleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| CycleError::UnknownStrategy { name: s.to_owned() })
    }
}

// ---------------------------------------------------------------------------
// Embedded
// ---------------------------------------------------------------------------

/// A batch of embedded vectors, stored row-major with a fixed width.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedded {
    dim: usize,
    data: Vec<f64>,
}

impl Embedded {
    /// An empty batch of `dim`-wide vectors. `dim` is raised to at least 1.
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1), data: Vec::new() }
    }

    /// An empty batch with room for `rows` vectors.
    #[must_use]
    pub fn with_capacity(dim: usize, rows: usize) -> Self {
        let dim = dim.max(1);
        Self { dim, data: Vec::with_capacity(dim * rows) }
    }

    /// Append one vector. Short vectors are zero-padded, long ones truncated.
    pub fn push(&mut self, v: &[f64]) {
        let n = v.len().min(self.dim);
        self.data.extend_from_slice(&v[..n]);
        self.data.extend(std::iter::repeat_n(0.0, self.dim - n));
    }

    /// Width of every vector.
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Number of vectors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The `i`-th vector.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterate over all vectors in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.dim)
    }

    /// Scale every row to unit L2 length. Zero rows stay zero.
    pub fn normalize_rows(&mut self) {
        for row in self.data.chunks_exact_mut(self.dim) {
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for v in row {
                    *v /= norm;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Embedding trait
// ---------------------------------------------------------------------------

/// An embedding/distance pair.
///
/// `dist` must return one non-negative, finite value per row of `batch`,
/// in row order, and must be symmetric in the sense that swapping which
/// vector plays `p` gives the same value.
pub trait Embedding {
    /// Map colors into the comparison space, one row per color.
    fn embed(&self, colors: &[Rgb]) -> Embedded;

    /// Distance from `p` to every vector in `batch`.
    fn dist(&self, p: &[f64], batch: &Embedded) -> Vec<f64>;

    /// Width of the embedded vectors.
    fn dim(&self) -> usize;
}

// ---------------------------------------------------------------------------
// Embedder
// ---------------------------------------------------------------------------

/// The built-in strategies behind one type.
#[derive(Debug, Clone)]
pub enum Embedder {
    Rgb,
    Lab,
    Cie94,
    Ciede2000,
    Network(Network),
}

impl Embedder {
    /// Build the embedder for `strategy`.
    ///
    /// `network` is required for [`Strategy::Network`] and ignored otherwise.
    ///
    /// # Errors
    ///
    /// [`CycleError::MissingNetwork`] if the learned strategy is requested
    /// without parameters.
    pub fn new(strategy: Strategy, network: Option<Network>) -> Result<Self> {
        Ok(match strategy {
            Strategy::Rgb => Self::Rgb,
            Strategy::Lab => Self::Lab,
            Strategy::Cie94 => Self::Cie94,
            Strategy::Ciede2000 => Self::Ciede2000,
            Strategy::Network => {
                Self::Network(network.ok_or(CycleError::MissingNetwork { strategy })?)
            }
        })
    }

    /// Which strategy this embedder implements.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Rgb => Strategy::Rgb,
            Self::Lab => Strategy::Lab,
            Self::Cie94 => Strategy::Cie94,
            Self::Ciede2000 => Strategy::Ciede2000,
            Self::Network(_) => Strategy::Network,
        }
    }
}

impl Embedding for Embedder {
    fn embed(&self, colors: &[Rgb]) -> Embedded {
        match self {
            Self::Rgb => {
                let mut out = Embedded::with_capacity(3, colors.len());
                for c in colors {
                    out.push(&c.to_array());
                }
                out
            }
            Self::Lab | Self::Cie94 | Self::Ciede2000 => {
                let mut out = Embedded::with_capacity(3, colors.len());
                for c in colors {
                    out.push(&c.to_lab().to_array());
                }
                out
            }
            Self::Network(net) => {
                let mut out = net.predict(colors);
                out.normalize_rows();
                out
            }
        }
    }

    fn dist(&self, p: &[f64], batch: &Embedded) -> Vec<f64> {
        match self {
            Self::Rgb | Self::Lab | Self::Network(_) => {
                batch.rows().map(|q| euclidean_sq(p, q)).collect()
            }
            Self::Cie94 => {
                let p = Lab::from_slice(p);
                batch.rows().map(|q| cie94(p, Lab::from_slice(q))).collect()
            }
            Self::Ciede2000 => {
                let p = Lab::from_slice(p);
                batch.rows().map(|q| ciede2000(p, Lab::from_slice(q))).collect()
            }
        }
    }

    fn dim(&self) -> usize {
        match self {
            Self::Network(net) => net.output_dim(),
            _ => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::tests::tiny_network;
    use pretty_assertions::assert_eq;

    fn colors() -> Vec<Rgb> {
        vec![Rgb::BLACK, Rgb::WHITE, Rgb::RED, Rgb::new(0.2, 0.4, 0.6)]
    }

    fn all_embedders() -> Vec<Embedder> {
        Strategy::all()
            .iter()
            .map(|&s| Embedder::new(s, Some(tiny_network())).unwrap())
            .collect()
    }

    // ── Strategy names ──────────────────────────────────────────────

    #[test]
    fn names_roundtrip() {
        for &s in Strategy::all() {
            assert_eq!(Strategy::from_name(s.name()), Some(s));
            assert_eq!(s.name().parse::<Strategy>().unwrap(), s);
        }
    }

    #[test]
    fn names_are_case_insensitive_with_aliases() {
        assert_eq!(Strategy::from_name("CIEDE2000"), Some(Strategy::Ciede2000));
        assert_eq!(Strategy::from_name("identity"), Some(Strategy::Rgb));
        assert_eq!(Strategy::from_name("learned"), Some(Strategy::Network));
        assert_eq!(Strategy::from_name("hsv"), None);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "oklab".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, CycleError::UnknownStrategy { .. }));
    }

    #[test]
    fn serde_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&Strategy::Network).unwrap(), "\"nn\"");
        assert_eq!(serde_json::to_string(&Strategy::Cie94).unwrap(), "\"cie94\"");
        let s: Strategy = serde_json::from_str("\"identity\"").unwrap();
        assert_eq!(s, Strategy::Rgb);
    }

    // ── Embedded ────────────────────────────────────────────────────

    #[test]
    fn embedded_rows_are_fixed_width() {
        let mut e = Embedded::new(2);
        e.push(&[1.0, 2.0]);
        e.push(&[3.0]);
        e.push(&[4.0, 5.0, 6.0]);
        assert_eq!(e.len(), 3);
        assert_eq!(e.row(1), &[3.0, 0.0]);
        assert_eq!(e.row(2), &[4.0, 5.0]);
    }

    #[test]
    fn normalize_leaves_zero_rows_alone() {
        let mut e = Embedded::new(2);
        e.push(&[3.0, 4.0]);
        e.push(&[0.0, 0.0]);
        e.normalize_rows();
        assert_eq!(e.row(0), &[0.6, 0.8]);
        assert_eq!(e.row(1), &[0.0, 0.0]);
    }

    // ── Embedder ────────────────────────────────────────────────────

    #[test]
    fn network_strategy_requires_parameters() {
        let err = Embedder::new(Strategy::Network, None).unwrap_err();
        assert!(matches!(err, CycleError::MissingNetwork { .. }));
    }

    #[test]
    fn colorimetric_strategies_ignore_network() {
        let e = Embedder::new(Strategy::Lab, Some(tiny_network())).unwrap();
        assert_eq!(e.strategy(), Strategy::Lab);
        assert_eq!(e.dim(), 3);
    }

    #[test]
    fn identity_embeds_to_itself() {
        let e = Embedder::Rgb.embed(&colors());
        assert_eq!(e.row(2), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn lab_embeds_white_to_l100() {
        let e = Embedder::Lab.embed(&colors());
        assert!((e.row(1)[0] - 100.0).abs() < 1e-3);
    }

    #[test]
    fn network_embeds_to_unit_vectors() {
        let e = Embedder::Network(tiny_network()).embed(&colors());
        for row in e.rows() {
            let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-12, "norm {norm}");
        }
    }

    #[test]
    fn every_strategy_is_zero_on_self_and_non_negative() {
        for embedder in all_embedders() {
            let batch = embedder.embed(&colors());
            for (i, p) in batch.rows().enumerate() {
                let d = embedder.dist(p, &batch);
                assert_eq!(d.len(), batch.len());
                assert!(d[i].abs() < 1e-9, "{:?} self-distance {}", embedder.strategy(), d[i]);
                assert!(d.iter().all(|&v| v >= 0.0 && v.is_finite()));
            }
        }
    }

    #[test]
    fn every_strategy_is_symmetric() {
        for embedder in all_embedders() {
            let batch = embedder.embed(&colors());
            for i in 0..batch.len() {
                let di = embedder.dist(batch.row(i), &batch);
                for j in 0..batch.len() {
                    let dj = embedder.dist(batch.row(j), &batch);
                    assert!((di[j] - dj[i]).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn rgb_distance_is_squared() {
        let batch = Embedder::Rgb.embed(&[Rgb::BLACK, Rgb::WHITE]);
        let d = Embedder::Rgb.dist(batch.row(0), &batch);
        assert_eq!(d, vec![0.0, 3.0]);
    }
}
