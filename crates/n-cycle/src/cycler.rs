//! The selection engine: greedy farthest-point sampling, memoized.
//!
//! The engine keeps one running minimum per candidate: the distance from
//! that candidate to the nearest color emitted so far. Each new color is
//! the candidate with the largest running minimum (lowest pool index on
//! ties). After every emission the minima are updated against the new
//! color and nudged up by `eps`, so candidates stuck on a plateau are
//! still told apart by how long they have been waiting.
//!
//! The first colors come from the seed list, in order, without looking at
//! distances. Work is done only on demand: asking for index `k` extends
//! the memoized output up to `k` and never recomputes what is already
//! there.
//!
//! # Reserved black/white
//!
//! With `remove_bw`, the seed list starts with black and white and the
//! caller's index `k` reads internal position `k + 2`. Black and white
//! still push every later pick away from the ends of the lightness axis,
//! but indexed access, ranges, and iteration never return them. The full
//! internal sequence is available through [`Cycler::output`].

use n_color::Rgb;
use tracing::{debug, info};

use crate::config::CyclerConfig;
use crate::embedding::{Embedded, Embedder, Embedding, Strategy};
use crate::error::{CycleError, Result};
use crate::network::Network;
use crate::pool::CandidatePool;
use crate::seed::SeedList;

/// Largest caller index accepted by [`Cycler::try_get`] and
/// [`Cycler::get_range`].
pub const MAX_INDEX: usize = 1 << 20;

// ---------------------------------------------------------------------------
// Cycler
// ---------------------------------------------------------------------------

/// A lazily extended, memoized sequence of maximally distinct colors.
///
/// One instance owns all of its state; two engines built from the same
/// configuration produce the same sequence independently. The engine is
/// single-writer: extending the sequence needs `&mut self`.
#[derive(Debug, Clone)]
pub struct Cycler<E = Embedder> {
    embedding: E,
    pool: CandidatePool,
    pool_embedded: Embedded,
    seed: SeedList,
    seed_embedded: Embedded,
    min_dist: Vec<f64>,
    output: Vec<Rgb>,
    config: CyclerConfig,
}

/// Where an emitted color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Seed(usize),
    Pool(usize),
}

impl Cycler<Embedder> {
    /// Build an engine for `config.strategy`.
    ///
    /// `network` supplies the learned model's parameters; it is required
    /// when the strategy is [`Strategy::Network`](crate::Strategy::Network)
    /// and ignored otherwise.
    ///
    /// # Errors
    ///
    /// Any configuration error: missing network, bad seed rows, invalid
    /// `eps` or `levels`.
    pub fn new(config: &CyclerConfig, network: Option<Network>) -> Result<Self> {
        let embedder = Embedder::new(config.strategy, network)?;
        let cycler = Self::with_embedding(embedder, config)?;
        info!(
            strategy = %config.strategy,
            pool = cycler.pool.len(),
            seeds = cycler.seed.len(),
            "color cycler ready"
        );
        Ok(cycler)
    }

    /// The strategy behind this engine's embedder.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.embedding.strategy()
    }
}

impl<E: Embedding> Cycler<E> {
    /// Build an engine around any embedding. `config.strategy` is ignored.
    ///
    /// Embeds the candidate pool and the seed list once, up front.
    ///
    /// # Errors
    ///
    /// Bad seed rows, invalid `eps` or `levels`.
    pub fn with_embedding(embedding: E, config: &CyclerConfig) -> Result<Self> {
        config.validate()?;
        let pool = CandidatePool::with_levels(config.levels)?;
        let seed = SeedList::new(config.seed.as_deref(), config.remove_bw)?;

        let pool_embedded = embedding.embed(pool.colors());
        let seed_embedded = embedding.embed(seed.colors());

        debug!(
            pool = pool.len(),
            seeds = seed.len(),
            reserved = seed.reserved(),
            dim = embedding.dim(),
            "embedded pool and seeds"
        );

        Ok(Self {
            embedding,
            min_dist: vec![f64::INFINITY; pool.len()],
            pool,
            pool_embedded,
            seed,
            seed_embedded,
            output: Vec::new(),
            config: config.clone(),
        })
    }

    // ── Access ──────────────────────────────────────────────────────

    /// The `index`-th color, extending the sequence as needed.
    ///
    /// Unbounded: the engine computes every color up to `index`. Use
    /// [`try_get`](Self::try_get) for untrusted indices.
    pub fn get(&mut self, index: usize) -> Rgb {
        let target = self.internal(index);
        self.extend_to(target);
        self.output[target]
    }

    /// Like [`get`](Self::get), for callers holding a signed index.
    ///
    /// # Errors
    ///
    /// [`CycleError::InvalidIndex`] if `index` is negative,
    /// [`CycleError::IndexOutOfRange`] if it is above [`MAX_INDEX`].
    pub fn try_get(&mut self, index: i64) -> Result<Rgb> {
        let index = usize::try_from(index).map_err(|_| CycleError::InvalidIndex { index })?;
        check_bound(index)?;
        Ok(self.get(index))
    }

    /// Colors at `start, start + step, …` below `stop`, in ascending order.
    ///
    /// An empty range (`start >= stop`) returns an empty list.
    ///
    /// # Errors
    ///
    /// [`CycleError::InvalidStep`] if `step` is zero,
    /// [`CycleError::IndexOutOfRange`] if the last index is above
    /// [`MAX_INDEX`].
    pub fn get_range(&mut self, start: usize, stop: usize, step: usize) -> Result<Vec<Rgb>> {
        if step == 0 {
            return Err(CycleError::InvalidStep);
        }
        if start >= stop {
            return Ok(Vec::new());
        }

        let last = start + (stop - 1 - start) / step * step;
        check_bound(last)?;
        self.extend_to(self.internal(last));
        Ok((start..stop)
            .step_by(step)
            .map(|i| self.output[self.internal(i)])
            .collect())
    }

    /// The first `n` colors.
    pub fn take(&mut self, n: usize) -> Vec<Rgb> {
        if n == 0 {
            return Vec::new();
        }
        let end = self.internal(n - 1);
        self.extend_to(end);
        self.output[self.reserved()..=end].to_vec()
    }

    /// An endless iterator starting at index 0.
    ///
    /// A fresh iterator re-reads the memoized prefix; it doesn't recompute
    /// it.
    pub fn iter(&mut self) -> Iter<'_, E> {
        Iter { cycler: self, next: 0 }
    }

    // ── Introspection ───────────────────────────────────────────────

    /// Number of caller-visible colors computed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.output.len().saturating_sub(self.reserved())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The full internal sequence, reserved black/white included.
    #[must_use]
    pub fn output(&self) -> &[Rgb] {
        &self.output
    }

    /// Running minimum distance of every candidate to the emitted set.
    ///
    /// All entries are `+∞` until the first color is emitted. A candidate
    /// whose distance ever came back NaN is NaN here and is never picked.
    #[must_use]
    pub fn min_distances(&self) -> &[f64] {
        &self.min_dist
    }

    #[must_use]
    pub const fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    #[must_use]
    pub const fn seed(&self) -> &SeedList {
        &self.seed
    }

    #[must_use]
    pub const fn embedding(&self) -> &E {
        &self.embedding
    }

    /// The configuration this engine was built from.
    #[must_use]
    pub const fn config(&self) -> &CyclerConfig {
        &self.config
    }

    /// Number of seed colors a caller sees before greedy picks begin.
    #[must_use]
    pub fn seed_len(&self) -> usize {
        self.seed.visible().len()
    }

    /// Forget every emitted color. Pool, seeds, and embeddings are kept.
    pub fn reset(&mut self) {
        self.output.clear();
        self.min_dist.fill(f64::INFINITY);
    }

    // ── Selection ───────────────────────────────────────────────────

    const fn reserved(&self) -> usize {
        self.seed.reserved()
    }

    const fn internal(&self, index: usize) -> usize {
        index.saturating_add(self.seed.reserved())
    }

    fn extend_to(&mut self, target: usize) {
        while self.output.len() <= target {
            self.step();
        }
    }

    /// Emit one color and fold it into the running minima.
    fn step(&mut self) {
        let j = self.output.len();
        let source = if j < self.seed_embedded.len() {
            Source::Seed(j)
        } else {
            Source::Pool(argmax(&self.min_dist))
        };

        let (color, embedded) = match source {
            Source::Seed(i) => (self.seed.colors()[i], self.seed_embedded.row(i)),
            Source::Pool(i) => (self.pool.colors()[i], self.pool_embedded.row(i)),
        };
        let score = match source {
            Source::Seed(_) => None,
            Source::Pool(i) => Some(self.min_dist[i]),
        };

        // A NaN distance takes the candidate out of the running for good.
        let eps = self.config.eps;
        let distances = self.embedding.dist(embedded, &self.pool_embedded);
        for (m, d) in self.min_dist.iter_mut().zip(distances) {
            *m = if m.is_nan() || d.is_nan() { f64::NAN } else { m.min(d) + eps };
        }
        self.output.push(color);

        debug!(index = j, ?source, ?score, color = %color, "emitted color");
    }
}

fn check_bound(index: usize) -> Result<()> {
    if index > MAX_INDEX {
        return Err(CycleError::IndexOutOfRange { index, max: MAX_INDEX });
    }
    Ok(())
}

/// Index of the largest value, lowest index on ties. NaN never wins;
/// an all-NaN slice yields 0.
fn argmax(values: &[f64]) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map_or(0, |(i, _)| i)
}

// ---------------------------------------------------------------------------
// Iter
// ---------------------------------------------------------------------------

/// Endless iterator over a [`Cycler`], starting at index 0.
#[derive(Debug)]
pub struct Iter<'a, E> {
    cycler: &'a mut Cycler<E>,
    next: usize,
}

impl<E: Embedding> Iterator for Iter<'_, E> {
    type Item = Rgb;

    fn next(&mut self) -> Option<Rgb> {
        let color = self.cycler.get(self.next);
        self.next += 1;
        Some(color)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<'a, E: Embedding> IntoIterator for &'a mut Cycler<E> {
    type Item = Rgb;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
