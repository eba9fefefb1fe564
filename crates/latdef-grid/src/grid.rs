//! The box grid itself: construction, point assignment and neighbourhoods.

use std::fmt;

use latdef_core::{Axis, Boundary, Position, Region};
use smallvec::SmallVec;

use crate::error::GridError;

/// Per-axis box-count cap: `floor(cbrt(i32::MAX))`.
///
/// Keeps the total box count inside the `i32` range used by the C ABI.
pub const MAX_AXIS_BOXES: usize = 1290;

/// Box indices around one box, in x-outer, y-middle, z-inner order.
///
/// Never more than 27 entries, so it always stays inline. May contain
/// repeats on an axis with two boxes and wrap-around.
pub type Neighbourhood = SmallVec<[usize; 27]>;

/// Integer coordinates of one box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoxCoord {
    /// Box column along x.
    pub x: usize,
    /// Box column along y.
    pub y: usize,
    /// Box column along z.
    pub z: usize,
}

impl BoxCoord {
    /// Create a box coordinate.
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    fn get(self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl fmt::Display for BoxCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A uniform decomposition of a [`Region`] into boxes.
///
/// Points are stored in a compact adjacency layout: one flat member
/// buffer holding every point index grouped by box, plus `total + 1`
/// offsets so box `b` owns `members[offsets[b]..offsets[b + 1]]`. Within
/// a box, points keep the order in which they were assigned.
///
/// # Examples
///
/// ```
/// use latdef_core::Region;
/// use latdef_grid::BoxGrid;
///
/// let region = Region::periodic([10.0, 10.0, 10.0]).unwrap();
/// let mut grid = BoxGrid::build(2.5, &region).unwrap();
/// assert_eq!(grid.counts(), [4, 4, 4]);
/// assert_eq!(grid.total_boxes(), 64);
///
/// grid.assign(&[[0.1, 0.1, 0.1], [9.9, 0.1, 0.1], [0.2, 0.3, 0.1]]).unwrap();
/// let b = grid.locate(&[0.0, 0.0, 0.0]).unwrap();
/// assert_eq!(grid.box_points(b), &[0, 2]);
///
/// // The wrapped neighbourhood of box 0 reaches the far x edge.
/// let far = grid.locate(&[9.9, 0.1, 0.1]).unwrap();
/// assert!(grid.neighbourhood(b).unwrap().contains(&far));
/// ```
#[derive(Clone, Debug)]
pub struct BoxGrid {
    counts: [usize; 3],
    widths: [f64; 3],
    min: [f64; 3],
    max: [f64; 3],
    boundaries: [Boundary; 3],
    cell_lengths: [f64; 3],
    total: usize,
    offsets: Vec<usize>,
    members: Vec<usize>,
}

impl BoxGrid {
    /// Build an empty grid over `region` with boxes about `approx_box_width` wide.
    ///
    /// Per axis the effective length (floored at 1.0) is divided into
    /// `floor(length / approx_box_width)` boxes, at least one and at most
    /// [`MAX_AXIS_BOXES`]. Periodic axes always span `[0, cell_length)`.
    ///
    /// Returns `Err(GridError::InvalidBoxWidth)` for a width that is not
    /// finite and positive, and `Err(GridError::AllocationFailed)` if the
    /// per-box offsets cannot be allocated.
    pub fn build(approx_box_width: f64, region: &Region) -> Result<Self, GridError> {
        if !approx_box_width.is_finite() || approx_box_width <= 0.0 {
            return Err(GridError::InvalidBoxWidth {
                value: approx_box_width,
            });
        }

        let mut counts = [1usize; 3];
        let mut widths = [0.0f64; 3];
        let mut min = [0.0f64; 3];
        let mut max = [0.0f64; 3];
        let mut boundaries = [Boundary::Bounded; 3];
        let mut cell_lengths = [0.0f64; 3];
        for axis in Axis::ALL {
            let i = axis.index();
            let (lo, hi) = region.effective_bounds(axis);
            min[i] = lo;
            max[i] = hi;
            boundaries[i] = region.boundary(axis);
            cell_lengths[i] = region.cell_length(axis);

            let length = (hi - lo).max(1.0);
            counts[i] = if approx_box_width * MAX_AXIS_BOXES as f64 <= length {
                MAX_AXIS_BOXES
            } else {
                ((length / approx_box_width) as usize).max(1)
            };
            widths[i] = length / counts[i] as f64;
        }

        let total = counts[0]
            .checked_mul(counts[1])
            .and_then(|n| n.checked_mul(counts[2]))
            .ok_or(GridError::AllocationFailed {
                what: "box offsets",
                len: usize::MAX,
            })?;
        let mut offsets = Vec::new();
        offsets
            .try_reserve_exact(total + 1)
            .map_err(|_| GridError::AllocationFailed {
                what: "box offsets",
                len: total + 1,
            })?;
        offsets.resize(total + 1, 0);

        log::debug!(
            "box grid: {}x{}x{} boxes ({total} total), widths {:.3}/{:.3}/{:.3}",
            counts[0],
            counts[1],
            counts[2],
            widths[0],
            widths[1],
            widths[2],
        );

        Ok(Self {
            counts,
            widths,
            min,
            max,
            boundaries,
            cell_lengths,
            total,
            offsets,
            members: Vec::new(),
        })
    }

    /// Box counts `[Nx, Ny, Nz]`.
    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    /// Box widths `[wx, wy, wz]`.
    pub fn widths(&self) -> [f64; 3] {
        self.widths
    }

    /// Total number of boxes, `Nx * Ny * Nz`.
    pub fn total_boxes(&self) -> usize {
        self.total
    }

    /// Number of points currently assigned.
    pub fn point_count(&self) -> usize {
        self.members.len()
    }

    /// Index of the box containing `position`.
    ///
    /// Coordinates outside the grid bounds are wrapped on periodic axes
    /// and moved to the centre of the nearest edge box on bounded axes.
    /// A non-finite or negative box coordinate is reported as
    /// `Err(GridError::IndexInconsistency)`.
    pub fn locate(&self, position: &Position) -> Result<usize, GridError> {
        let mut coord = [0usize; 3];
        for axis in Axis::ALL {
            let i = axis.index();
            let mut x = position[i];
            if x > self.max[i] || x < self.min[i] {
                x = match self.boundaries[i] {
                    Boundary::Periodic => {
                        x - (x / self.cell_lengths[i]).floor() * self.cell_lengths[i]
                    }
                    Boundary::Bounded if x > self.max[i] => self.max[i] - 0.5 * self.widths[i],
                    Boundary::Bounded => self.min[i] + 0.5 * self.widths[i],
                };
            }
            let raw = (x - self.min[i]) / self.widths[i];
            if !raw.is_finite() || raw <= -1.0 {
                log::error!(
                    "box grid: position {position:?} gives {axis} box coordinate {raw} \
                     (widths {:?}, counts {:?}, min {:?})",
                    self.widths,
                    self.counts,
                    self.min,
                );
                return Err(GridError::IndexInconsistency {
                    position: *position,
                    axis,
                    value: raw,
                });
            }
            // Truncation: anything in (-1, 0) belongs to box 0.
            coord[i] = (raw as usize).min(self.counts[i] - 1);
        }
        Ok(self.index_of(coord[0], coord[1], coord[2]))
    }

    /// Assign `positions` to boxes, replacing any previous assignment.
    ///
    /// Point `i` of the slice is stored as index `i`. Built in two passes
    /// (count, then fill) into a single flat buffer.
    pub fn assign(&mut self, positions: &[Position]) -> Result<(), GridError> {
        let n = positions.len();
        let mut located = Vec::new();
        located
            .try_reserve_exact(n)
            .map_err(|_| GridError::AllocationFailed {
                what: "point boxes",
                len: n,
            })?;
        for p in positions {
            located.push(self.locate(p)?);
        }

        self.offsets.fill(0);
        for &b in &located {
            self.offsets[b] += 1;
        }
        // Running sum: offsets[b] becomes the end of box b.
        let mut running = 0;
        for slot in &mut self.offsets[..self.total] {
            running += *slot;
            *slot = running;
        }
        self.offsets[self.total] = n;

        self.members.clear();
        self.members
            .try_reserve_exact(n)
            .map_err(|_| GridError::AllocationFailed {
                what: "box members",
                len: n,
            })?;
        self.members.resize(n, 0);
        // Filling back to front leaves offsets[b] at the start of box b
        // and keeps assignment order within each box.
        for (point, &b) in located.iter().enumerate().rev() {
            self.offsets[b] -= 1;
            self.members[self.offsets[b]] = point;
        }
        Ok(())
    }

    /// Points stored in box `box_index`, in assignment order.
    ///
    /// Out-of-range indices yield an empty slice.
    pub fn box_points(&self, box_index: usize) -> &[usize] {
        if box_index >= self.total {
            return &[];
        }
        &self.members[self.offsets[box_index]..self.offsets[box_index + 1]]
    }

    /// The boxes around `box_index`, itself included.
    ///
    /// Per axis the offsets are `{0}` with one box, `{0, +1}` with two and
    /// `{-1, 0, +1}` otherwise, wrapping cyclically over box coordinates on
    /// every axis whatever its physical boundary.
    pub fn neighbourhood(&self, box_index: usize) -> Result<Neighbourhood, GridError> {
        let centre = self.decode(box_index)?;
        let [ox, oy, oz] = Axis::ALL.map(|a| axis_offsets(self.counts[a.index()]));

        let mut out = Neighbourhood::new();
        for &dx in ox {
            let x = wrap(centre.get(Axis::X), dx, self.counts[0]);
            for &dy in oy {
                let y = wrap(centre.get(Axis::Y), dy, self.counts[1]);
                for &dz in oz {
                    let z = wrap(centre.get(Axis::Z), dz, self.counts[2]);
                    out.push(self.index_of(x, y, z));
                }
            }
        }
        Ok(out)
    }

    /// The neighbourhood of the box containing `position`.
    pub fn neighbourhood_of(&self, position: &Position) -> Result<Neighbourhood, GridError> {
        self.neighbourhood(self.locate(position)?)
    }

    /// Linear index of `coord`.
    pub fn encode(&self, coord: BoxCoord) -> Result<usize, GridError> {
        if coord.x >= self.counts[0] || coord.y >= self.counts[1] || coord.z >= self.counts[2] {
            return Err(GridError::CoordOutOfRange {
                coord,
                counts: self.counts,
            });
        }
        Ok(self.index_of(coord.x, coord.y, coord.z))
    }

    /// Box coordinate of `box_index`; the exact inverse of [`encode`](Self::encode).
    pub fn decode(&self, box_index: usize) -> Result<BoxCoord, GridError> {
        if box_index >= self.total {
            return Err(GridError::BoxOutOfRange {
                index: box_index,
                total: self.total,
            });
        }
        let plane = self.counts[0] * self.counts[2];
        let y = box_index / plane;
        let rest = box_index - y * plane;
        let z = rest / self.counts[0];
        let x = rest - z * self.counts[0];
        Ok(BoxCoord { x, y, z })
    }

    fn index_of(&self, x: usize, y: usize, z: usize) -> usize {
        x + z * self.counts[0] + y * self.counts[0] * self.counts[2]
    }
}

fn axis_offsets(count: usize) -> &'static [isize] {
    match count {
        1 => &[0],
        2 => &[0, 1],
        _ => &[-1, 0, 1],
    }
}

fn wrap(centre: usize, offset: isize, count: usize) -> usize {
    (centre as isize + offset).rem_euclid(count as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn cube(n: usize, spacing: f64) -> Vec<Position> {
        let mut out = Vec::with_capacity(n * n * n);
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    out.push([i as f64 * spacing, j as f64 * spacing, k as f64 * spacing]);
                }
            }
        }
        out
    }

    // ── Construction ─────────────────────────────────────────────

    #[test]
    fn counts_and_widths_follow_length() {
        let region = Region::bounded([0.0; 3], [10.0, 5.0, 0.2]).unwrap();
        let grid = BoxGrid::build(3.0, &region).unwrap();
        // z length is floored at 1.0.
        assert_eq!(grid.counts(), [3, 1, 1]);
        let w = grid.widths();
        assert!((w[0] - 10.0 / 3.0).abs() < 1e-12);
        assert!((w[1] - 5.0).abs() < 1e-12);
        assert!((w[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn counts_capped_at_max_axis_boxes() {
        let region = Region::bounded([0.0; 3], [2000.0, 1.0, 1.0]).unwrap();
        let grid = BoxGrid::build(1.0, &region).unwrap();
        assert_eq!(grid.counts()[0], MAX_AXIS_BOXES);
    }

    #[test]
    fn rejects_bad_width() {
        let region = Region::periodic([5.0; 3]).unwrap();
        for w in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                BoxGrid::build(w, &region),
                Err(GridError::InvalidBoxWidth { .. })
            ));
        }
    }

    #[test]
    fn periodic_axis_uses_cell_not_supplied_bounds() {
        let region = Region::new(
            [3.0, 0.0, 0.0],
            [4.0, 8.0, 8.0],
            [Boundary::Periodic, Boundary::Bounded, Boundary::Bounded],
            [8.0, 8.0, 8.0],
        )
        .unwrap();
        let grid = BoxGrid::build(2.0, &region).unwrap();
        assert_eq!(grid.counts(), [4, 4, 4]);
    }

    // ── Locate ───────────────────────────────────────────────────

    #[test]
    fn periodic_coordinate_past_cell_wraps() {
        let l = 6.0;
        let region = Region::periodic([l; 3]).unwrap();
        let grid = BoxGrid::build(1.5, &region).unwrap();
        let a = grid.locate(&[l + 0.1, 1.0, 1.0]).unwrap();
        let b = grid.locate(&[0.1, 1.0, 1.0]).unwrap();
        assert_eq!(a, b);
        let c = grid.locate(&[-0.1, 1.0, 1.0]).unwrap();
        assert_eq!(grid.decode(c).unwrap().x, grid.counts()[0] - 1);
    }

    #[test]
    fn bounded_coordinate_outside_goes_to_edge_box() {
        let region = Region::bounded([0.0; 3], [9.0; 3]).unwrap();
        let grid = BoxGrid::build(3.0, &region).unwrap();
        let hi = grid.decode(grid.locate(&[50.0, 1.0, 1.0]).unwrap()).unwrap();
        let lo = grid.decode(grid.locate(&[-50.0, 1.0, 1.0]).unwrap()).unwrap();
        assert_eq!(hi.x, 2);
        assert_eq!(lo.x, 0);
    }

    #[test]
    fn upper_bound_lands_in_last_box() {
        let region = Region::bounded([0.0; 3], [9.0; 3]).unwrap();
        let grid = BoxGrid::build(3.0, &region).unwrap();
        let c = grid.decode(grid.locate(&[9.0, 9.0, 9.0]).unwrap()).unwrap();
        assert_eq!(c, BoxCoord::new(2, 2, 2));
    }

    #[test]
    fn flat_bounded_axis_tolerates_outliers() {
        let region = Region::bounded([0.0, 0.0, 2.0], [4.0, 4.0, 2.0]).unwrap();
        let grid = BoxGrid::build(0.5, &region).unwrap();
        assert!(grid.locate(&[1.0, 1.0, 2.4]).is_ok());
        assert!(grid.locate(&[1.0, 1.0, 1.6]).is_ok());
    }

    #[test]
    fn non_finite_position_is_index_inconsistency() {
        let region = Region::periodic([5.0; 3]).unwrap();
        let grid = BoxGrid::build(1.0, &region).unwrap();
        let err = grid.locate(&[1.0, f64::NAN, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            GridError::IndexInconsistency { axis: Axis::Y, .. }
        ));
    }

    // ── Assignment ───────────────────────────────────────────────

    #[test]
    fn assign_preserves_order_and_replaces_contents() {
        let region = Region::bounded([0.0; 3], [4.0; 3]).unwrap();
        let mut grid = BoxGrid::build(2.0, &region).unwrap();
        grid.assign(&[[0.5; 3], [3.5; 3], [0.6; 3], [0.7; 3]]).unwrap();
        let b = grid.locate(&[0.5; 3]).unwrap();
        assert_eq!(grid.box_points(b), &[0, 2, 3]);
        assert_eq!(grid.point_count(), 4);

        grid.assign(&[[3.5; 3]]).unwrap();
        assert!(grid.box_points(b).is_empty());
        assert_eq!(grid.point_count(), 1);
    }

    #[test]
    fn box_points_out_of_range_is_empty() {
        let region = Region::periodic([3.0; 3]).unwrap();
        let grid = BoxGrid::build(1.0, &region).unwrap();
        assert!(grid.box_points(grid.total_boxes()).is_empty());
    }

    // ── Neighbourhood ────────────────────────────────────────────

    #[test]
    fn neighbourhood_sizes_by_axis_count() {
        let region = Region::bounded([0.0; 3], [1.0, 2.0, 9.0]).unwrap();
        let grid = BoxGrid::build(1.0, &region).unwrap();
        assert_eq!(grid.counts(), [1, 2, 9]);
        let n = grid.neighbourhood(0).unwrap();
        assert_eq!(n.len(), 2 * 3);
        assert!(!n.spilled());
    }

    #[test]
    fn neighbourhood_order_is_x_then_y_then_z() {
        let region = Region::periodic([3.0; 3]).unwrap();
        let grid = BoxGrid::build(1.0, &region).unwrap();
        let centre = grid.encode(BoxCoord::new(1, 1, 1)).unwrap();
        let n = grid.neighbourhood(centre).unwrap();
        assert_eq!(n.len(), 27);
        assert_eq!(n[0], grid.encode(BoxCoord::new(0, 0, 0)).unwrap());
        assert_eq!(n[1], grid.encode(BoxCoord::new(0, 0, 1)).unwrap());
        assert_eq!(n[3], grid.encode(BoxCoord::new(0, 1, 0)).unwrap());
        assert_eq!(n[9], grid.encode(BoxCoord::new(1, 0, 0)).unwrap());
        assert_eq!(n[13], centre);
    }

    #[test]
    fn neighbourhood_wraps_bounded_axes_too() {
        let region = Region::bounded([0.0; 3], [4.0, 1.0, 1.0]).unwrap();
        let grid = BoxGrid::build(1.0, &region).unwrap();
        let n = grid.neighbourhood(0).unwrap();
        assert_eq!(n.as_slice(), &[3, 0, 1]);
    }

    #[test]
    fn two_box_axis_repeats_are_kept() {
        let region = Region::bounded([0.0; 3], [2.0, 1.0, 1.0]).unwrap();
        let grid = BoxGrid::build(1.0, &region).unwrap();
        assert_eq!(grid.neighbourhood(1).unwrap().as_slice(), &[1, 0]);
    }

    #[test]
    fn decode_out_of_range() {
        let region = Region::periodic([2.0; 3]).unwrap();
        let grid = BoxGrid::build(1.0, &region).unwrap();
        assert!(matches!(
            grid.decode(8),
            Err(GridError::BoxOutOfRange { index: 8, total: 8 })
        ));
        assert!(grid.encode(BoxCoord::new(0, 2, 0)).is_err());
        assert!(grid.neighbourhood(8).is_err());
    }

    // ── Compliance ───────────────────────────────────────────────

    #[test]
    fn compliance_simple_cubic_periodic() {
        let region = Region::periodic([8.0; 3]).unwrap();
        let mut grid = BoxGrid::build(1.1 * 1.2, &region).unwrap();
        let points = cube(4, 2.0);
        grid.assign(&points).unwrap();
        compliance::run_full_compliance(&grid, &region, &points);
    }

    #[test]
    fn compliance_mixed_boundaries_with_outliers() {
        let region = Region::new(
            [0.0, -2.0, 0.0],
            [6.0, 4.0, 0.5],
            [Boundary::Periodic, Boundary::Bounded, Boundary::Bounded],
            [6.0, 6.0, 0.5],
        )
        .unwrap();
        let mut grid = BoxGrid::build(1.7, &region).unwrap();
        let points = vec![
            [-0.5, 0.0, 0.0],
            [6.5, -3.0, 0.25],
            [3.0, 9.0, -1.0],
            [5.999, 3.999, 0.5],
        ];
        grid.assign(&points).unwrap();
        compliance::run_full_compliance(&grid, &region, &points);
    }

    proptest! {
        #[test]
        fn compliance_holds_for_random_grids(
            lx in 0.5f64..20.0, ly in 0.5f64..20.0, lz in 0.5f64..20.0,
            width in 1.0f64..8.0,
            periodic in prop::array::uniform3(any::<bool>()),
            raw in prop::collection::vec(prop::array::uniform3(-40.0f64..40.0), 0..64),
        ) {
            let boundaries = periodic.map(|p| if p { Boundary::Periodic } else { Boundary::Bounded });
            let region = Region::new([0.0; 3], [lx, ly, lz], boundaries, [lx, ly, lz]).unwrap();
            let mut grid = BoxGrid::build(width, &region).unwrap();
            grid.assign(&raw).unwrap();
            compliance::run_full_compliance(&grid, &region, &raw);
        }

        #[test]
        fn periodic_images_share_a_box(
            x in 0.0f64..10.0, y in 0.0f64..10.0, z in 0.0f64..10.0,
            shift in -3i32..=3,
        ) {
            let region = Region::periodic([10.0; 3]).unwrap();
            let grid = BoxGrid::build(1.3, &region).unwrap();
            let base = grid.locate(&[x, y, z]).unwrap();
            let moved = [x + 10.0 * f64::from(shift), y, z];
            let image = grid.locate(&moved).unwrap();
            // Floating-point wrap can land on either side of a box face.
            let bx = grid.decode(base).unwrap().x as isize;
            let ix = grid.decode(image).unwrap().x as isize;
            let n = grid.counts()[0] as isize;
            prop_assert!((bx - ix).rem_euclid(n) <= 1 || (ix - bx).rem_euclid(n) <= 1);
        }
    }
}
