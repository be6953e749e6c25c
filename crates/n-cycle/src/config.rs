//! Engine configuration.
//!
//! | Field | Type | Default | Meaning |
//! |-------|------|---------|---------|
//! | `strategy` | [`Strategy`] | `ciede2000` | embedding/distance pair |
//! | `remove_bw` | bool | `true` | reserve black and white as hidden seeds |
//! | `seed` | `[[r, g, b], …]` | primaries | custom seed matrix |
//! | `eps` | f64 | `1e-9` | per-step tie-breaking perturbation |
//! | `levels` | usize | `16` | candidate grid values per channel |
//!
//! Deserializes from JSON with every field optional:
//!
//! ```
//! use n_cycle::{CyclerConfig, Strategy};
//!
//! let config = CyclerConfig::from_json_str(r#"{ "strategy": "lab", "remove_bw": false }"#).unwrap();
//! assert_eq!(config.strategy, Strategy::Lab);
//! assert_eq!(config.eps, 1e-9);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::embedding::Strategy;
use crate::error::{CycleError, Result};
use crate::pool::DEFAULT_LEVELS;

/// Default tie-breaking perturbation.
pub const DEFAULT_EPS: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CyclerConfig {
    pub strategy: Strategy,
    pub remove_bw: bool,
    pub seed: Option<Vec<Vec<f64>>>,
    pub eps: f64,
    pub levels: usize,
}

impl Default for CyclerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            remove_bw: true,
            seed: None,
            eps: DEFAULT_EPS,
            levels: DEFAULT_LEVELS,
        }
    }
}

impl CyclerConfig {
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_remove_bw(mut self, remove_bw: bool) -> Self {
        self.remove_bw = remove_bw;
        self
    }

    /// Replace the default primaries with custom seed rows.
    #[must_use]
    pub fn with_seed(mut self, seed: Vec<Vec<f64>>) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    #[must_use]
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`CycleError::Json`] on malformed input or unknown fields.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// [`CycleError::Io`] if the file can't be read, [`CycleError::Json`]
    /// if it doesn't parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CycleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Check the scalar fields. Seed rows are checked when the seed list
    /// is built.
    ///
    /// # Errors
    ///
    /// [`CycleError::InvalidEpsilon`] or [`CycleError::InvalidLevels`].
    pub fn validate(&self) -> Result<()> {
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(CycleError::InvalidEpsilon { eps: self.eps });
        }
        if self.levels < 2 {
            return Err(CycleError::InvalidLevels { levels: self.levels });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let c = CyclerConfig::default();
        assert_eq!(c.strategy, Strategy::Ciede2000);
        assert!(c.remove_bw);
        assert_eq!(c.seed, None);
        assert_eq!(c.levels, 16);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let c = CyclerConfig::default()
            .with_strategy(Strategy::Rgb)
            .with_remove_bw(false)
            .with_seed(vec![vec![0.5, 0.5, 0.5]])
            .with_eps(0.0)
            .with_levels(4);
        assert_eq!(c.strategy, Strategy::Rgb);
        assert!(!c.remove_bw);
        assert_eq!(c.seed, Some(vec![vec![0.5, 0.5, 0.5]]));
        assert_eq!(c.levels, 4);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(CyclerConfig::from_json_str("{}").unwrap(), CyclerConfig::default());
    }

    #[test]
    fn json_with_seed_matrix() {
        let c = CyclerConfig::from_json_str(r#"{ "strategy": "nn", "seed": [[1, 0.5, 0]] }"#)
            .unwrap();
        assert_eq!(c.strategy, Strategy::Network);
        assert_eq!(c.seed, Some(vec![vec![1.0, 0.5, 0.0]]));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = CyclerConfig::from_json_str(r#"{ "colour": "red" }"#).unwrap_err();
        assert!(matches!(err, CycleError::Json(_)));
    }

    #[test]
    fn negative_or_nan_eps_is_invalid() {
        for eps in [-1e-9, f64::NAN, f64::INFINITY] {
            let err = CyclerConfig::default().with_eps(eps).validate().unwrap_err();
            assert!(matches!(err, CycleError::InvalidEpsilon { .. }));
        }
    }

    #[test]
    fn single_level_is_invalid() {
        let err = CyclerConfig::default().with_levels(1).validate().unwrap_err();
        assert!(matches!(err, CycleError::InvalidLevels { levels: 1 }));
    }
}
