//! The candidate pool: every color the engine may pick after the seeds.
//!
//! A regular grid over the RGB cube with `levels` evenly spaced values per
//! channel, ordered red-major (red outermost, blue innermost). With the
//! default 16 levels the values are `0, 17, 34, …, 255` out of 255 and the
//! pool holds 4096 colors.

use n_color::Rgb;

use crate::error::{CycleError, Result};

/// Default number of levels per channel.
pub const DEFAULT_LEVELS: usize = 16;

/// An immutable, ordered grid of candidate colors.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePool {
    levels: usize,
    colors: Vec<Rgb>,
}

impl CandidatePool {
    /// The default 16×16×16 pool.
    #[must_use]
    pub fn new() -> Self {
        Self::build(DEFAULT_LEVELS)
    }

    /// A pool with `levels` values per channel.
    ///
    /// # Errors
    ///
    /// [`CycleError::InvalidLevels`] if `levels < 2`.
    pub fn with_levels(levels: usize) -> Result<Self> {
        if levels < 2 {
            return Err(CycleError::InvalidLevels { levels });
        }
        Ok(Self::build(levels))
    }

    fn build(levels: usize) -> Self {
        let top = (levels - 1) as f64;
        let values: Vec<f64> = (0..levels).map(|i| i as f64 / top).collect();

        let mut colors = Vec::with_capacity(levels.pow(3));
        for &r in &values {
            for &g in &values {
                for &b in &values {
                    colors.push(Rgb::new(r, g, b));
                }
            }
        }
        Self { levels, colors }
    }

    /// Values per channel.
    #[must_use]
    pub const fn levels(&self) -> usize {
        self.levels
    }

    /// All candidates, in pool order.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// The candidate at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Pool index of `color`, if it is exactly a grid point.
    #[must_use]
    pub fn position(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for CandidatePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_pool_has_4096_colors() {
        let pool = CandidatePool::new();
        assert_eq!(pool.len(), 4096);
        assert_eq!(pool.levels(), 16);
    }

    #[test]
    fn default_levels_are_multiples_of_17() {
        let pool = CandidatePool::new();
        for c in pool.colors() {
            let (r, g, b) = c.to_rgb8();
            assert_eq!((r % 17, g % 17, b % 17), (0, 0, 0), "{c}");
        }
    }

    #[test]
    fn ordering_is_red_major() {
        let pool = CandidatePool::new();
        assert_eq!(pool.get(0), Some(Rgb::BLACK));
        assert_eq!(pool.get(1).unwrap().to_rgb8(), (0, 0, 17));
        assert_eq!(pool.get(16).unwrap().to_rgb8(), (0, 17, 0));
        assert_eq!(pool.get(256).unwrap().to_rgb8(), (17, 0, 0));
        assert_eq!(pool.get(4095), Some(Rgb::WHITE));
        assert_eq!(pool.get(4096), None);
    }

    #[test]
    fn corners_are_exact() {
        let pool = CandidatePool::with_levels(2).unwrap();
        assert_eq!(pool.len(), 8);
        assert_eq!(pool.position(Rgb::RED), Some(4));
        assert_eq!(pool.position(Rgb::GREEN), Some(2));
        assert_eq!(pool.position(Rgb::BLUE), Some(1));
    }

    #[test]
    fn too_few_levels_is_an_error() {
        assert!(matches!(
            CandidatePool::with_levels(1),
            Err(CycleError::InvalidLevels { levels: 1 })
        ));
    }
}
