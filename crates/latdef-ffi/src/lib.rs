//! C FFI bindings for latdef.
//!
//! Exposes the batch defect search as a C-compatible API: callers pass
//! flat position/species arrays and caller-allocated output buffers,
//! and every function returns a [`LatdefStatus`] code. This is the only
//! crate in the workspace that may contain `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run `$body` (which evaluates to an `i32` status), converting a panic
/// into [`LatdefStatus::Panicked`] instead of unwinding into C.
macro_rules! ffi_guard {
    ($body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(code) => code,
            Err(_) => {
                log::error!("panic caught at the FFI boundary");
                $crate::status::LatdefStatus::Panicked as i32
            }
        }
    };
}

pub mod defects;
pub mod moved;
pub mod status;
pub mod types;

pub use defects::latdef_find_defects;
pub use moved::latdef_find_moved_atoms;
pub use status::{latdef_status_message, LatdefStatus};
pub use types::{LatdefAtoms, LatdefOptions, LatdefOutput, LatdefRegion};

#[cfg(test)]
mod tests {
    use crate::status::LatdefStatus;

    #[test]
    fn panic_in_guarded_body_becomes_status() {
        let status = ffi_guard!({
            panic!("deliberate panic inside an FFI body");
        });
        assert_eq!(status, LatdefStatus::Panicked as i32);
    }

    #[test]
    fn guarded_body_returns_its_code() {
        let status = ffi_guard!({ LatdefStatus::BufferTooSmall as i32 });
        assert_eq!(status, LatdefStatus::BufferTooSmall as i32);
    }
}
