//! C-compatible status codes.
//!
//! [`LatdefStatus`] is a `repr(i32)` enum covering every way a latdef
//! call can fail. Conversions from the Rust error types are provided.

use std::ffi::{c_char, CStr};

use latdef_core::InputError;
use latdef_defects::ClassifyError;
use latdef_grid::GridError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatdefStatus {
    /// Success.
    Ok = 0,
    /// An argument is null, out of range, or otherwise malformed.
    InvalidArgument = -1,
    /// A caller-provided output buffer is too small.
    BufferTooSmall = -2,
    /// Grid storage could not be allocated.
    AllocationFailed = -3,
    /// A position mapped to an invalid box index.
    IndexInconsistency = -4,
    /// Radii or species filters are invalid.
    ConfigError = -5,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl LatdefStatus {
    const ALL: [Self; 7] = [
        Self::Ok,
        Self::InvalidArgument,
        Self::BufferTooSmall,
        Self::AllocationFailed,
        Self::IndexInconsistency,
        Self::ConfigError,
        Self::Panicked,
    ];

    /// The status with numeric value `code`, if any.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| *s as i32 == code)
    }

    /// Static description of the status.
    pub fn message(self) -> &'static CStr {
        match self {
            Self::Ok => c"ok",
            Self::InvalidArgument => c"invalid argument",
            Self::BufferTooSmall => c"output buffer too small",
            Self::AllocationFailed => c"allocation failed",
            Self::IndexInconsistency => c"position mapped to an invalid box index",
            Self::ConfigError => c"invalid configuration",
            Self::Panicked => c"panic caught at the FFI boundary",
        }
    }
}

impl From<&InputError> for LatdefStatus {
    fn from(_e: &InputError) -> Self {
        LatdefStatus::InvalidArgument
    }
}

impl From<&GridError> for LatdefStatus {
    fn from(e: &GridError) -> Self {
        match e {
            GridError::AllocationFailed { .. } => LatdefStatus::AllocationFailed,
            GridError::IndexInconsistency { .. } => LatdefStatus::IndexInconsistency,
            GridError::InvalidBoxWidth { .. } => LatdefStatus::ConfigError,
            GridError::BoxOutOfRange { .. } | GridError::CoordOutOfRange { .. } => {
                LatdefStatus::IndexInconsistency
            }
        }
    }
}

impl From<&ClassifyError> for LatdefStatus {
    fn from(e: &ClassifyError) -> Self {
        match e {
            ClassifyError::Config(_) => LatdefStatus::ConfigError,
            ClassifyError::UnknownFilterSpecies { .. } => LatdefStatus::ConfigError,
            ClassifyError::Input(e) => LatdefStatus::from(e),
            ClassifyError::Grid(e) => LatdefStatus::from(e),
        }
    }
}

/// Static NUL-terminated description of a status code.
///
/// Unknown codes yield `"unknown status"`. The returned pointer is valid
/// for the life of the program and must not be freed.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn latdef_status_message(code: i32) -> *const c_char {
    LatdefStatus::from_code(code)
        .map_or(c"unknown status", LatdefStatus::message)
        .as_ptr()
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use latdef_core::{Axis, SpeciesId};
    use latdef_defects::ConfigError;
    use proptest::prelude::*;

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(LatdefStatus::Ok as i32, 0);
        assert_eq!(LatdefStatus::InvalidArgument as i32, -1);
        assert_eq!(LatdefStatus::BufferTooSmall as i32, -2);
        assert_eq!(LatdefStatus::AllocationFailed as i32, -3);
        assert_eq!(LatdefStatus::IndexInconsistency as i32, -4);
        assert_eq!(LatdefStatus::ConfigError as i32, -5);
    }

    #[test]
    fn panicked_status_is_negative_128() {
        assert_eq!(LatdefStatus::Panicked as i32, -128);
    }

    #[test]
    fn from_code_round_trips() {
        for s in LatdefStatus::ALL {
            assert_eq!(LatdefStatus::from_code(s as i32), Some(s));
        }
        assert_eq!(LatdefStatus::from_code(7), None);
    }

    #[test]
    fn classify_error_to_status() {
        assert_eq!(
            LatdefStatus::from(&ClassifyError::Config(ConfigError::InvalidRadius {
                name: "vacancy_radius",
                value: 0.0
            })),
            LatdefStatus::ConfigError
        );
        assert_eq!(
            LatdefStatus::from(&ClassifyError::UnknownFilterSpecies {
                filter: "exclude_input",
                id: SpeciesId(4)
            }),
            LatdefStatus::ConfigError
        );
        assert_eq!(
            LatdefStatus::from(&ClassifyError::Grid(GridError::AllocationFailed {
                what: "box offsets",
                len: 10
            })),
            LatdefStatus::AllocationFailed
        );
        assert_eq!(
            LatdefStatus::from(&ClassifyError::Grid(GridError::IndexInconsistency {
                position: [0.0, f64::NAN, 0.0],
                axis: Axis::Y,
                value: f64::NAN
            })),
            LatdefStatus::IndexInconsistency
        );
        assert_eq!(
            LatdefStatus::from(&ClassifyError::Input(InputError::InvalidSymbol {
                position: 0
            })),
            LatdefStatus::InvalidArgument
        );
    }

    #[test]
    fn messages_are_nul_terminated_text() {
        let text = |code| {
            // SAFETY: latdef_status_message always returns a static C string.
            unsafe { CStr::from_ptr(latdef_status_message(code)) }
                .to_str()
                .unwrap()
        };
        assert_eq!(text(LatdefStatus::BufferTooSmall as i32), "output buffer too small");
        assert_eq!(text(0), "ok");
        assert_eq!(text(99), "unknown status");
    }

    proptest! {
        #[test]
        fn any_code_has_a_message(code in any::<i32>()) {
            // SAFETY: latdef_status_message always returns a static C string.
            let text = unsafe { CStr::from_ptr(latdef_status_message(code)) };
            match LatdefStatus::from_code(code) {
                Some(s) => {
                    prop_assert_eq!(s as i32, code);
                    prop_assert_eq!(text, s.message());
                }
                None => prop_assert_eq!(text, c"unknown status"),
            }
        }
    }
}
