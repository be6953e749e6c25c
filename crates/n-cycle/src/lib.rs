//! # n-cycle — Maximally Distinguishable Color Sequences
//!
//! Produces an infinite, deterministic sequence of colors where every new
//! color is as far as possible from all colors already emitted, under a
//! pluggable perceptual distance. Ask for 5 colors or 500: every prefix is
//! a well-spread categorical palette.
//!
//! # Architecture
//!
//! ```text
//! CyclerConfig (strategy, remove_bw, seed, eps, levels)
//!     │
//!     ▼
//! embedding.rs: Strategy → Embedder (rgb / lab / cie94 / ciede2000 / nn)
//!     │                      └── network.rs: feed-forward model, injected
//!     ▼
//! pool.rs:      16×16×16 RGB grid, embedded once
//! seed.rs:      black/white + primaries (or custom rows), embedded once
//!     │
//!     ▼
//! cycler.rs:    greedy farthest-point selection, memoized, lazy
//! ```
//!
//! # Example
//!
//! ```
//! use n_cycle::{Cycler, CyclerConfig, Strategy};
//!
//! let config = CyclerConfig::default().with_strategy(Strategy::Lab);
//! let mut cycler = Cycler::new(&config, None).unwrap();
//!
//! // Black and white are reserved internally; the primaries come first.
//! let palette = cycler.take(8);
//! assert_eq!(palette[0], n_color::Rgb::RED);
//! assert_eq!(palette.len(), 8);
//! ```

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Pool levels and indices are small; usize → f64 is exact here.
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod cycler;
pub mod embedding;
pub mod error;
pub mod network;
pub mod pool;
pub mod seed;

pub use config::CyclerConfig;
pub use cycler::{Cycler, Iter, MAX_INDEX};
pub use embedding::{Embedded, Embedder, Embedding, Strategy};
pub use error::{CycleError, Result};
pub use network::{Activation, LayerParams, Network, NetworkParams};
pub use pool::CandidatePool;
pub use seed::SeedList;
