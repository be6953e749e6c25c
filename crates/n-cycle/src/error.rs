//! Error type for every fallible operation in the sequencing engine.
//!
//! | Category | Variants | Raised |
//! |----------|----------|--------|
//! | Configuration | `InvalidSeed`, `SeedOutOfRange`, `InvalidLevels`, `InvalidEpsilon`, `MissingNetwork`, `InvalidNetwork`, `UnknownStrategy` | construction |
//! | Artifact | `Io`, `Json` | loading parameters or config files |
//! | Usage | `InvalidIndex`, `IndexOutOfRange`, `InvalidStep` | call time |
//!
//! None of these are transient. Computation is deterministic and local, so
//! retrying with the same arguments produces the same error.

use std::path::PathBuf;

use thiserror::Error;

use crate::embedding::Strategy;

#[derive(Debug, Error)]
pub enum CycleError {
    // === Configuration ===
    /// A custom seed row does not have exactly three components.
    #[error("seed row {row} has {len} components, expected 3")]
    InvalidSeed { row: usize, len: usize },

    /// A custom seed row has a component outside [0, 1] (or non-finite).
    #[error("seed row {row} is outside the unit RGB cube: {values:?}")]
    SeedOutOfRange { row: usize, values: Vec<f64> },

    /// The candidate grid needs at least two levels per channel.
    #[error("candidate pool needs at least 2 levels per channel, got {levels}")]
    InvalidLevels { levels: usize },

    /// The tie-breaking perturbation must be finite and non-negative.
    #[error("epsilon must be finite and non-negative, got {eps}")]
    InvalidEpsilon { eps: f64 },

    /// The learned strategy was requested without network parameters.
    #[error("strategy `{strategy}` requires network parameters")]
    MissingNetwork { strategy: Strategy },

    /// Network parameters are malformed (shape mismatch, non-finite, ...).
    #[error("invalid network parameters: {reason}")]
    InvalidNetwork { reason: String },

    /// Strategy name not recognized.
    #[error("unknown strategy `{name}` (expected one of rgb, lab, cie94, ciede2000, nn)")]
    UnknownStrategy { name: String },

    // === Artifact ===
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    // === Usage ===
    /// Negative index.
    #[error("index must be non-negative, got {index}")]
    InvalidIndex { index: i64 },

    /// Index above the largest one the engine will compute.
    #[error("index {index} is above the supported maximum {max}")]
    IndexOutOfRange { index: usize, max: usize },

    /// Zero step in a range request.
    #[error("range step must be positive")]
    InvalidStep,
}

pub type Result<T> = std::result::Result<T, CycleError>;

impl CycleError {
    /// Whether this error was raised while building an engine, as opposed
    /// to a bad argument on an existing one.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !matches!(
            self,
            Self::InvalidIndex { .. } | Self::IndexOutOfRange { .. } | Self::InvalidStep
        )
    }
}
