//! Grid invariant test helpers.
//!
//! These functions verify the laws every [`BoxGrid`] must satisfy after
//! construction and assignment. Reused by the unit tests and the
//! property tests in `grid.rs`.

use latdef_core::{Axis, Position, Region};

use crate::grid::BoxGrid;

/// Assert that `encode(decode(b)) == b` for every box.
pub fn assert_round_trip(grid: &BoxGrid) {
    for b in 0..grid.total_boxes() {
        let coord = grid.decode(b).expect("decode of in-range box");
        let back = grid.encode(coord).expect("encode of decoded coord");
        assert_eq!(back, b, "round trip {b} -> {coord} -> {back}");
    }
}

/// Assert that the total is the product of the counts and that
/// `width * count` equals the floored effective length on every axis.
pub fn assert_count_width_law(grid: &BoxGrid, region: &Region) {
    let counts = grid.counts();
    assert_eq!(
        grid.total_boxes(),
        counts[0] * counts[1] * counts[2],
        "total_boxes != product of counts {counts:?}"
    );
    let widths = grid.widths();
    for axis in Axis::ALL {
        let i = axis.index();
        let (lo, hi) = region.effective_bounds(axis);
        let length = (hi - lo).max(1.0);
        assert!(counts[i] >= 1, "{axis} count is zero");
        let span = widths[i] * counts[i] as f64;
        assert!(
            (span - length).abs() <= 1e-9 * length,
            "{axis}: width {} * count {} = {span}, expected {length}",
            widths[i],
            counts[i]
        );
    }
}

/// Assert that every assigned point is stored in the box `locate` reports,
/// exactly once.
pub fn assert_locate_matches_assignment(grid: &BoxGrid, points: &[Position]) {
    assert_eq!(grid.point_count(), points.len());
    let mut seen = vec![0usize; points.len()];
    for b in 0..grid.total_boxes() {
        for &p in grid.box_points(b) {
            seen[p] += 1;
            let located = grid.locate(&points[p]).expect("locate of assigned point");
            assert_eq!(located, b, "point {p} stored in box {b}, located in {located}");
        }
    }
    assert!(seen.iter().all(|&n| n == 1), "points stored {seen:?} times");
}

/// Assert that within each box points appear in ascending (assignment) order.
pub fn assert_box_order_stable(grid: &BoxGrid) {
    for b in 0..grid.total_boxes() {
        let members = grid.box_points(b);
        assert!(
            members.windows(2).all(|w| w[0] < w[1]),
            "box {b} members out of order: {members:?}"
        );
    }
}

/// Assert the neighbourhood size law and that every entry is a valid box.
///
/// The length must equal the product of per-axis offset-range sizes
/// (1, 2 or 3), and the box itself is always included.
pub fn assert_neighbourhood_sizes(grid: &BoxGrid) {
    let counts = grid.counts();
    let expected: usize = counts.iter().map(|&n| n.min(3)).product();
    for b in 0..grid.total_boxes() {
        let nb = grid.neighbourhood(b).expect("neighbourhood of in-range box");
        assert_eq!(nb.len(), expected, "box {b}: {nb:?}");
        assert!((1..=27).contains(&nb.len()));
        assert!(nb.contains(&b), "box {b} missing from its own neighbourhood");
        assert!(nb.iter().all(|&n| n < grid.total_boxes()));
    }
}

/// Assert that no axis with at most two boxes reaches a lower neighbour.
pub fn assert_small_axes_look_forward_only(grid: &BoxGrid) {
    let counts = grid.counts();
    for b in 0..grid.total_boxes() {
        let centre = grid.decode(b).expect("decode of in-range box");
        let nb = grid.neighbourhood(b).expect("neighbourhood of in-range box");
        for n in nb {
            let c = grid.decode(n).expect("decode of neighbour");
            for (axis, (got, from)) in [(c.x, centre.x), (c.y, centre.y), (c.z, centre.z)]
                .into_iter()
                .enumerate()
            {
                if counts[axis] <= 2 {
                    let forward = (from + 1) % counts[axis];
                    assert!(
                        got == from || got == forward,
                        "axis {axis} with {} boxes reached {} from {}",
                        counts[axis],
                        c,
                        centre
                    );
                }
            }
        }
    }
}

/// Run every check on a grid that has had `points` assigned.
pub fn run_full_compliance(grid: &BoxGrid, region: &Region, points: &[Position]) {
    assert_round_trip(grid);
    assert_count_width_law(grid, region);
    assert_locate_matches_assignment(grid, points);
    assert_box_order_stable(grid);
    assert_neighbourhood_sizes(grid);
    assert_small_axes_look_forward_only(grid);
}
