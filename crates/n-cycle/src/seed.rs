//! The seed sequence: colors emitted before any greedy selection.
//!
//! Seeds are emitted in their configured order regardless of how close they
//! are to each other. The default seed is the identity matrix (pure red,
//! green, blue). With `remove_bw`, black and white are prepended: they take
//! part in the distance bookkeeping but are reserved, so callers never see
//! them through indexed access.

use n_color::Rgb;

use crate::error::{CycleError, Result};

/// The built-in primaries, in emission order.
pub const PRIMARIES: [Rgb; 3] = [Rgb::RED, Rgb::GREEN, Rgb::BLUE];

/// The reserved prefix used when black/white removal is on.
pub const BLACK_WHITE: [Rgb; 2] = [Rgb::BLACK, Rgb::WHITE];

/// An ordered, immutable list of seed colors.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedList {
    colors: Vec<Rgb>,
    reserved: usize,
}

impl SeedList {
    /// Build the seed list.
    ///
    /// `custom` replaces the default primaries; each row must hold exactly
    /// three finite components in [0, 1]. An empty matrix means no seeds
    /// beyond black/white. The black/white prefix is added independently
    /// of `custom` when `remove_bw` is set.
    ///
    /// # Errors
    ///
    /// [`CycleError::InvalidSeed`] for a row with the wrong number of
    /// components, [`CycleError::SeedOutOfRange`] for a row outside the
    /// unit cube.
    pub fn new(custom: Option<&[Vec<f64>]>, remove_bw: bool) -> Result<Self> {
        let body = match custom {
            None => PRIMARIES.to_vec(),
            Some(rows) => parse_rows(rows)?,
        };

        let reserved = if remove_bw { BLACK_WHITE.len() } else { 0 };
        let mut colors = Vec::with_capacity(reserved + body.len());
        if remove_bw {
            colors.extend_from_slice(&BLACK_WHITE);
        }
        colors.extend(body);

        Ok(Self { colors, reserved })
    }

    /// Every seed, reserved prefix included.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Number of seeds, reserved prefix included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Size of the reserved black/white prefix (0 or 2).
    #[must_use]
    pub const fn reserved(&self) -> usize {
        self.reserved
    }

    /// Seeds a caller sees through indexed access.
    #[must_use]
    pub fn visible(&self) -> &[Rgb] {
        &self.colors[self.reserved..]
    }
}

impl Default for SeedList {
    fn default() -> Self {
        let mut colors = BLACK_WHITE.to_vec();
        colors.extend_from_slice(&PRIMARIES);
        Self { colors, reserved: BLACK_WHITE.len() }
    }
}

fn parse_rows(rows: &[Vec<f64>]) -> Result<Vec<Rgb>> {
    rows.iter()
        .enumerate()
        .map(|(row, values)| {
            let color = Rgb::try_from_slice(values)
                .ok_or(CycleError::InvalidSeed { row, len: values.len() })?;
            if color.in_unit_cube() {
                Ok(color)
            } else {
                Err(CycleError::SeedOutOfRange { row, values: values.clone() })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_with_black_white() {
        let seeds = SeedList::new(None, true).unwrap();
        assert_eq!(
            seeds.colors(),
            &[Rgb::BLACK, Rgb::WHITE, Rgb::RED, Rgb::GREEN, Rgb::BLUE]
        );
        assert_eq!(seeds.reserved(), 2);
        assert_eq!(seeds.visible(), &PRIMARIES);
        assert_eq!(seeds, SeedList::default());
    }

    #[test]
    fn default_without_black_white() {
        let seeds = SeedList::new(None, false).unwrap();
        assert_eq!(seeds.colors(), &PRIMARIES);
        assert_eq!(seeds.reserved(), 0);
    }

    #[test]
    fn custom_rows_replace_primaries_but_keep_black_white() {
        let rows = vec![vec![0.5, 0.25, 0.0], vec![0.0, 0.5, 1.0]];
        let seeds = SeedList::new(Some(rows.as_slice()), true).unwrap();
        assert_eq!(
            seeds.colors(),
            &[Rgb::BLACK, Rgb::WHITE, Rgb::new(0.5, 0.25, 0.0), Rgb::new(0.0, 0.5, 1.0)]
        );
    }

    #[test]
    fn empty_custom_matrix_is_allowed() {
        let seeds = SeedList::new(Some(&[][..]), true).unwrap();
        assert_eq!(seeds.colors(), &BLACK_WHITE);
        assert!(seeds.visible().is_empty());
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let rows = vec![vec![0.5, 0.5, 0.5], vec![0.1, 0.2]];
        let err = SeedList::new(Some(rows.as_slice()), true).unwrap_err();
        assert!(matches!(err, CycleError::InvalidSeed { row: 1, len: 2 }));
    }

    #[test]
    fn out_of_cube_is_rejected() {
        let rows = vec![vec![0.5, 1.5, 0.0]];
        let err = SeedList::new(Some(rows.as_slice()), false).unwrap_err();
        assert!(matches!(err, CycleError::SeedOutOfRange { row: 0, .. }));
    }
}
