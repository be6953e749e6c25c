//! Learned color embedding, a small feed-forward network.
//!
//! The parameters come from an external training run and are injected as a
//! value ([`NetworkParams`]), usually deserialized from JSON:
//!
//! ```json
//! {
//!   "layers": [
//!     { "weights": [[...], [...]], "bias": [...], "activation": "relu", "dropout": 0.2 },
//!     { "weights": [[...]],        "bias": [...] }
//!   ]
//! }
//! ```
//!
//! `weights` is `out × in`. The first layer takes the three sRGB channels.
//! `dropout` is the training-time rate; inference never applies it, so the
//! forward pass is fully deterministic.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use n_color::Rgb;
use serde::{Deserialize, Serialize};

use crate::embedding::Embedded;
use crate::error::{CycleError, Result};

/// Slope of [`Activation::LeakyRelu`] for negative inputs.
pub const LEAKY_SLOPE: f64 = 0.01;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Nonlinearity applied after a layer's affine map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    LeakyRelu,
    Tanh,
    Sigmoid,
}

impl Activation {
    #[inline]
    #[must_use]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Relu => x.max(0.0),
            Self::LeakyRelu => {
                if x >= 0.0 {
                    x
                } else {
                    LEAKY_SLOPE * x
                }
            }
            Self::Tanh => x.tanh(),
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }
}

/// One dense layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    /// Row-major `out × in` weight matrix.
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
    /// Training-time dropout rate. Recorded, never applied.
    #[serde(default)]
    pub dropout: f64,
}

impl LayerParams {
    #[must_use]
    pub fn inputs(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn outputs(&self) -> usize {
        self.weights.len()
    }
}

/// The serialized form of a trained network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkParams {
    pub layers: Vec<LayerParams>,
}

impl NetworkParams {
    /// Parse parameters from a JSON string.
    ///
    /// # Errors
    ///
    /// [`CycleError::Json`] if the text is not a valid parameter document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse parameters from any reader producing JSON.
    ///
    /// # Errors
    ///
    /// [`CycleError::Json`] on malformed input or read failure.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load parameters from a JSON file.
    ///
    /// # Errors
    ///
    /// [`CycleError::Io`] if the file can't be opened, [`CycleError::Json`]
    /// if its contents don't parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CycleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// A validated network, ready for inference.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<LayerParams>,
}

impl Network {
    /// Validate `params` and build a network.
    ///
    /// # Errors
    ///
    /// [`CycleError::InvalidNetwork`] when there are no layers, the first
    /// layer doesn't take 3 inputs, a weight row or bias has the wrong
    /// length, consecutive layers don't chain, a value isn't finite, or a
    /// dropout rate is outside [0, 1).
    pub fn new(params: NetworkParams) -> Result<Self> {
        validate(&params)?;
        Ok(Self { layers: params.layers })
    }

    /// Load, parse, and validate parameters from a JSON file.
    ///
    /// # Errors
    ///
    /// Any error from [`NetworkParams::from_path`] or [`Network::new`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(NetworkParams::from_path(path)?)
    }

    /// Width of the output vectors.
    #[must_use]
    pub fn output_dim(&self) -> usize {
        self.layers.last().map_or(0, LayerParams::outputs)
    }

    /// Number of layers.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Run the forward pass on one color.
    #[must_use]
    pub fn forward(&self, color: Rgb) -> Vec<f64> {
        let mut x = color.to_array().to_vec();
        for layer in &self.layers {
            x = layer
                .weights
                .iter()
                .zip(&layer.bias)
                .map(|(row, b)| {
                    let z = row.iter().zip(&x).fold(*b, |acc, (w, v)| w.mul_add(*v, acc));
                    layer.activation.apply(z)
                })
                .collect();
        }
        x
    }

    /// Run the forward pass on a batch. Output is not normalized.
    #[must_use]
    pub fn predict(&self, colors: &[Rgb]) -> Embedded {
        let mut out = Embedded::with_capacity(self.output_dim(), colors.len());
        for &c in colors {
            out.push(&self.forward(c));
        }
        out
    }
}

fn invalid(reason: String) -> CycleError {
    CycleError::InvalidNetwork { reason }
}

fn validate(params: &NetworkParams) -> Result<()> {
    if params.layers.is_empty() {
        return Err(invalid("network has no layers".into()));
    }

    let mut expected_inputs = 3;
    for (i, layer) in params.layers.iter().enumerate() {
        let outputs = layer.outputs();
        if outputs == 0 {
            return Err(invalid(format!("layer {i} has no outputs")));
        }
        if let Some((r, row)) = layer
            .weights
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected_inputs)
        {
            return Err(invalid(format!(
                "layer {i} weight row {r} has {} inputs, expected {expected_inputs}",
                row.len()
            )));
        }
        if layer.bias.len() != outputs {
            return Err(invalid(format!(
                "layer {i} bias has {} entries, expected {outputs}",
                layer.bias.len()
            )));
        }
        let finite = layer.weights.iter().flatten().chain(&layer.bias).all(|v| v.is_finite());
        if !finite {
            return Err(invalid(format!("layer {i} has non-finite parameters")));
        }
        if !(0.0..1.0).contains(&layer.dropout) {
            return Err(invalid(format!(
                "layer {i} dropout {} is outside [0, 1)",
                layer.dropout
            )));
        }
        expected_inputs = outputs;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
