//! Batch defect search over caller-owned arrays.

use latdef_defects::DefectClassifier;

use crate::status::LatdefStatus;
use crate::types::{LatdefAtoms, LatdefOptions, LatdefOutput, LatdefRegion};

/// Copy `src` into a caller buffer of `cap` elements.
///
/// # Safety
///
/// When non-null, `dst` must point to `cap` writable elements.
#[allow(unsafe_code)]
pub(crate) unsafe fn write_indices<T: Copy>(
    dst: *mut T,
    cap: usize,
    src: &[T],
) -> Result<(), LatdefStatus> {
    if src.is_empty() {
        return Ok(());
    }
    if cap < src.len() {
        return Err(LatdefStatus::BufferTooSmall);
    }
    if dst.is_null() {
        return Err(LatdefStatus::InvalidArgument);
    }
    // SAFETY: dst is non-null and holds at least cap >= src.len() elements.
    unsafe { std::slice::from_raw_parts_mut(dst, src.len()) }.copy_from_slice(src);
    Ok(())
}

/// Classify `input` against `reference` and fill `output`.
///
/// Returns `InvalidArgument` for a null argument or malformed arrays,
/// `ConfigError` for bad radii or unknown filter species, and
/// `BufferTooSmall` when any index array lacks capacity. On
/// `BufferTooSmall` the counts and `sub_system_len` are still written so
/// the caller can size its buffers and retry.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn latdef_find_defects(
    reference: *const LatdefAtoms,
    input: *const LatdefAtoms,
    region: *const LatdefRegion,
    options: *const LatdefOptions,
    output: *mut LatdefOutput,
) -> i32 {
    ffi_guard!({
        if reference.is_null()
            || input.is_null()
            || region.is_null()
            || options.is_null()
            || output.is_null()
        {
            return LatdefStatus::InvalidArgument as i32;
        }
        // SAFETY: all five pointers were checked non-null above.
        let status = unsafe { find_defects(&*reference, &*input, &*region, &*options, &mut *output) };
        match status {
            Ok(()) => LatdefStatus::Ok as i32,
            Err(status) => status as i32,
        }
    })
}

/// # Safety
///
/// The arrays described by each argument must be valid for their stated
/// lengths and capacities.
#[allow(unsafe_code)]
unsafe fn find_defects(
    reference: &LatdefAtoms,
    input: &LatdefAtoms,
    region: &LatdefRegion,
    options: &LatdefOptions,
    output: &mut LatdefOutput,
) -> Result<(), LatdefStatus> {
    // SAFETY: forwarded from the caller.
    let (reference, input, config) = unsafe {
        (
            reference.to_configuration()?,
            input.to_configuration()?,
            options.to_config()?,
        )
    };
    let region = region.to_region()?;

    let result = DefectClassifier::new(config)
        .and_then(|c| c.classify(&reference, &input, &region))
        .map_err(|e| {
            log::debug!("latdef_find_defects failed: {e}");
            LatdefStatus::from(&e)
        })?;

    output.counts = result.counts().to_array();
    output.sub_system_len = result.sub_system.len();
    let too_small = output.vacancies_cap < result.vacancies.len()
        || output.interstitials_cap < result.interstitials.len()
        || output.antisites_cap < result.antisites.len()
        || output.on_antisites_cap < result.antisites.len()
        || output.sub_system_cap < result.sub_system.len();
    if too_small {
        return Err(LatdefStatus::BufferTooSmall);
    }

    let sites: Vec<usize> = result.antisites.iter().map(|a| a.site).collect();
    let occupants: Vec<usize> = result.antisites.iter().map(|a| a.occupant).collect();
    // SAFETY: each buffer pointer is paired with its caller-stated capacity.
    unsafe {
        write_indices(output.vacancies, output.vacancies_cap, &result.vacancies)?;
        write_indices(output.interstitials, output.interstitials_cap, &result.interstitials)?;
        write_indices(output.antisites, output.antisites_cap, &sites)?;
        write_indices(output.on_antisites, output.on_antisites_cap, &occupants)?;
        write_indices(output.sub_system, output.sub_system_cap, &result.sub_system)?;
    }
    Ok(())
}
