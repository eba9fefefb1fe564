//! Moved-atom detection between two snapshots.

use latdef_core::Position;
use latdef_defects::find_moved_atoms;

use crate::defects::write_indices;
use crate::status::LatdefStatus;
use crate::types::{raw_slice, LatdefRegion};

/// Report atoms displaced by more than `threshold` between `initial` and
/// `current`, each `3 * n_atoms` flat coordinates.
///
/// Indices and distances are written in index order. `*n_moved` is always
/// set on `Ok` and `BufferTooSmall`; on `BufferTooSmall` nothing else is
/// written.
#[no_mangle]
#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn latdef_find_moved_atoms(
    n_atoms: usize,
    initial: *const f64,
    current: *const f64,
    region: *const LatdefRegion,
    threshold: f64,
    indices: *mut usize,
    distances: *mut f64,
    cap: usize,
    n_moved: *mut usize,
) -> i32 {
    ffi_guard!({
        if region.is_null() || n_moved.is_null() || !threshold.is_finite() {
            return LatdefStatus::InvalidArgument as i32;
        }
        let Some(n_coords) = n_atoms.checked_mul(3) else {
            return LatdefStatus::InvalidArgument as i32;
        };
        // SAFETY: the caller guarantees both arrays hold 3 * n_atoms values.
        let arrays = unsafe { (raw_slice(initial, n_coords), raw_slice(current, n_coords)) };
        let (initial, current) = match arrays {
            (Ok(a), Ok(b)) => (positions(a), positions(b)),
            (Err(status), _) | (_, Err(status)) => return status as i32,
        };
        // SAFETY: checked non-null above.
        let region = match unsafe { &*region }.to_region() {
            Ok(r) => r,
            Err(status) => return status as i32,
        };

        let moved = match find_moved_atoms(&initial, &current, &region, threshold) {
            Ok(m) => m,
            Err(e) => return LatdefStatus::from(&e) as i32,
        };
        // SAFETY: checked non-null above.
        unsafe { *n_moved = moved.len() };
        if cap < moved.len() {
            return LatdefStatus::BufferTooSmall as i32;
        }

        let index_out: Vec<usize> = moved.iter().map(|m| m.index).collect();
        let distance_out: Vec<f64> = moved.iter().map(|m| m.distance).collect();
        // SAFETY: both buffers hold cap elements.
        let written = unsafe {
            write_indices(indices, cap, &index_out)
                .and_then(|()| write_indices(distances, cap, &distance_out))
        };
        match written {
            Ok(()) => LatdefStatus::Ok as i32,
            Err(status) => status as i32,
        }
    })
}

fn positions(flat: &[f64]) -> Vec<Position> {
    flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defects::tests::periodic_region;

    #[test]
    fn reports_wrapped_displacement() {
        let initial = [1.0, 1.0, 1.0, 5.0, 5.0, 5.0];
        let current = [9.5, 1.0, 1.0, 5.1, 5.0, 5.0];
        let mut indices = [usize::MAX; 2];
        let mut distances = [0.0; 2];
        let mut n_moved = 0;
        let rc = latdef_find_moved_atoms(
            2,
            initial.as_ptr(),
            current.as_ptr(),
            &periodic_region(10.0),
            1.0,
            indices.as_mut_ptr(),
            distances.as_mut_ptr(),
            indices.len(),
            &mut n_moved,
        );
        assert_eq!(rc, LatdefStatus::Ok as i32);
        assert_eq!(n_moved, 1);
        assert_eq!(indices[0], 0);
        assert!((distances[0] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn small_buffer_still_reports_count() {
        let initial = [0.0; 6];
        let current = [2.0, 0.0, 0.0, 0.0, 2.0, 0.0];
        let mut n_moved = 0;
        let rc = latdef_find_moved_atoms(
            2,
            initial.as_ptr(),
            current.as_ptr(),
            &periodic_region(10.0),
            1.0,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            0,
            &mut n_moved,
        );
        assert_eq!(rc, LatdefStatus::BufferTooSmall as i32);
        assert_eq!(n_moved, 2);
    }

    #[test]
    fn null_positions_rejected() {
        let mut n_moved = 0;
        let rc = latdef_find_moved_atoms(
            1,
            std::ptr::null(),
            std::ptr::null(),
            &periodic_region(10.0),
            1.0,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            0,
            &mut n_moved,
        );
        assert_eq!(rc, LatdefStatus::InvalidArgument as i32);
    }

    #[test]
    fn nothing_moved_with_empty_input() {
        let mut n_moved = usize::MAX;
        let rc = latdef_find_moved_atoms(
            0,
            std::ptr::null(),
            std::ptr::null(),
            &periodic_region(10.0),
            0.5,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            0,
            &mut n_moved,
        );
        assert_eq!(rc, LatdefStatus::Ok as i32);
        assert_eq!(n_moved, 0);
    }
}
