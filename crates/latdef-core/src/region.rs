//! The cuboidal simulation region shared by both configurations.

use crate::boundary::Boundary;
use crate::error::InputError;
use crate::id::Axis;
use crate::Position;

/// Axis-aligned simulation region: bounds, boundary conditions and cell
/// lengths for each of the three axes.
///
/// On a periodic axis the effective bounds are `[0, cell_length)`
/// whatever `min`/`max` were supplied; on a bounded axis they are
/// `[min, max]`.
///
/// # Examples
///
/// ```
/// use latdef_core::{Axis, Boundary, Region};
///
/// let region = Region::new(
///     [-1.0, -1.0, -1.0],
///     [11.0, 11.0, 11.0],
///     [Boundary::Periodic, Boundary::Periodic, Boundary::Bounded],
///     [10.0, 10.0, 10.0],
/// )
/// .unwrap();
/// assert_eq!(region.effective_bounds(Axis::X), (0.0, 10.0));
/// assert_eq!(region.effective_bounds(Axis::Z), (-1.0, 11.0));
///
/// // x separation wraps, z does not.
/// let d2 = region.separation2(&[0.5, 0.0, 0.5], &[9.5, 0.0, 9.5]);
/// assert!((d2 - (1.0 + 81.0)).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    min: [f64; 3],
    max: [f64; 3],
    boundaries: [Boundary; 3],
    cell_lengths: [f64; 3],
}

impl Region {
    /// Create a region, validating every axis.
    ///
    /// Returns `Err(InputError::InvalidRegion)` if any value is non-finite,
    /// a bounded axis has `min > max`, or a periodic axis has a cell length
    /// that is not strictly positive.
    pub fn new(
        min: [f64; 3],
        max: [f64; 3],
        boundaries: [Boundary; 3],
        cell_lengths: [f64; 3],
    ) -> Result<Self, InputError> {
        for axis in Axis::ALL {
            let i = axis.index();
            let invalid = |reason: String| InputError::InvalidRegion { axis, reason };
            if !min[i].is_finite() || !max[i].is_finite() || !cell_lengths[i].is_finite() {
                return Err(invalid(format!(
                    "bounds and cell length must be finite, got min {}, max {}, cell {}",
                    min[i], max[i], cell_lengths[i]
                )));
            }
            match boundaries[i] {
                Boundary::Periodic if cell_lengths[i] <= 0.0 => {
                    return Err(invalid(format!(
                        "periodic cell length must be positive, got {}",
                        cell_lengths[i]
                    )));
                }
                Boundary::Bounded if min[i] > max[i] => {
                    return Err(invalid(format!("min {} exceeds max {}", min[i], max[i])));
                }
                _ => {}
            }
        }
        Ok(Self {
            min,
            max,
            boundaries,
            cell_lengths,
        })
    }

    /// A fully periodic region spanning `[0, cell_lengths)` on every axis.
    pub fn periodic(cell_lengths: [f64; 3]) -> Result<Self, InputError> {
        Self::new(
            [0.0; 3],
            cell_lengths,
            [Boundary::Periodic; 3],
            cell_lengths,
        )
    }

    /// A fully bounded region `[min, max]` with cell lengths equal to the extents.
    pub fn bounded(min: [f64; 3], max: [f64; 3]) -> Result<Self, InputError> {
        let cell = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
        Self::new(min, max, [Boundary::Bounded; 3], cell)
    }

    /// Supplied lower bound on `axis`.
    pub fn min(&self, axis: Axis) -> f64 {
        self.min[axis.index()]
    }

    /// Supplied upper bound on `axis`.
    pub fn max(&self, axis: Axis) -> f64 {
        self.max[axis.index()]
    }

    /// Boundary condition on `axis`.
    pub fn boundary(&self, axis: Axis) -> Boundary {
        self.boundaries[axis.index()]
    }

    /// Cell (lattice) length on `axis`.
    pub fn cell_length(&self, axis: Axis) -> f64 {
        self.cell_lengths[axis.index()]
    }

    /// Effective `(min, max)` on `axis`: `(0, cell_length)` when periodic.
    pub fn effective_bounds(&self, axis: Axis) -> (f64, f64) {
        let i = axis.index();
        match self.boundaries[i] {
            Boundary::Periodic => (0.0, self.cell_lengths[i]),
            Boundary::Bounded => (self.min[i], self.max[i]),
        }
    }

    /// Squared separation of `a` and `b`, using the nearest periodic image
    /// on periodic axes only.
    pub fn separation2(&self, a: &Position, b: &Position) -> f64 {
        let mut r2 = 0.0;
        for axis in Axis::ALL {
            let i = axis.index();
            let d = self.boundaries[i].minimum_image(a[i] - b[i], self.cell_lengths[i]);
            r2 += d * d;
        }
        r2
    }
}
