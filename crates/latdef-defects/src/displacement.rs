//! Moved-atom detection between two snapshots of the same atoms.

use latdef_core::{InputError, Position, Region};

/// An atom whose displacement exceeded the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovedAtom {
    /// Atom index, shared by both snapshots.
    pub index: usize,
    /// Displacement, using the nearest periodic image on periodic axes.
    pub distance: f64,
}

/// Atoms displaced strictly more than `threshold` between `initial` and
/// `current`, in index order.
///
/// Both slices must describe the same atoms in the same order.
///
/// # Examples
///
/// ```
/// use latdef_core::Region;
/// use latdef_defects::find_moved_atoms;
///
/// let region = Region::periodic([10.0, 10.0, 10.0]).unwrap();
/// let before = [[1.0, 1.0, 1.0], [5.0, 5.0, 5.0]];
/// let after = [[9.5, 1.0, 1.0], [5.1, 5.0, 5.0]];
/// let moved = find_moved_atoms(&before, &after, &region, 1.0).unwrap();
/// assert_eq!(moved.len(), 1);
/// assert_eq!(moved[0].index, 0);
/// assert!((moved[0].distance - 1.5).abs() < 1e-12);
/// ```
pub fn find_moved_atoms(
    initial: &[Position],
    current: &[Position],
    region: &Region,
    threshold: f64,
) -> Result<Vec<MovedAtom>, InputError> {
    if initial.len() != current.len() {
        return Err(InputError::LengthMismatch {
            what: "current positions",
            expected: initial.len(),
            actual: current.len(),
        });
    }
    let threshold2 = threshold * threshold;
    let moved: Vec<MovedAtom> = initial
        .iter()
        .zip(current)
        .enumerate()
        .filter_map(|(index, (a, b))| {
            let d2 = region.separation2(a, b);
            (d2 > threshold2).then(|| MovedAtom {
                index,
                distance: d2.sqrt(),
            })
        })
        .collect();
    log::debug!(
        "moved atoms: {} of {} beyond {threshold}",
        moved.len(),
        initial.len()
    );
    Ok(moved)
}
