//! Error types for grid construction and queries.

use latdef_core::{Axis, Position};
use std::fmt;

use crate::grid::BoxCoord;

/// Errors arising from grid construction, point assignment or box lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The requested box width is zero, negative or not finite.
    InvalidBoxWidth {
        /// The rejected width.
        value: f64,
    },
    /// Grid storage could not be allocated.
    AllocationFailed {
        /// Which buffer failed.
        what: &'static str,
        /// Number of elements requested.
        len: usize,
    },
    /// A position produced a negative or non-finite box coordinate.
    IndexInconsistency {
        /// The position being located.
        position: Position,
        /// The axis on which the computation went wrong.
        axis: Axis,
        /// The raw box coordinate that was computed.
        value: f64,
    },
    /// A box index is outside `[0, total_boxes)`.
    BoxOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of boxes in the grid.
        total: usize,
    },
    /// A box coordinate exceeds the per-axis box counts.
    CoordOutOfRange {
        /// The offending coordinate.
        coord: BoxCoord,
        /// Box counts `[Nx, Ny, Nz]`.
        counts: [usize; 3],
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBoxWidth { value } => {
                write!(f, "box width must be finite and positive, got {value}")
            }
            Self::AllocationFailed { what, len } => {
                write!(f, "could not allocate {what} ({len} elements)")
            }
            Self::IndexInconsistency {
                position,
                axis,
                value,
            } => write!(
                f,
                "position {position:?} maps to invalid {axis} box coordinate {value}"
            ),
            Self::BoxOutOfRange { index, total } => {
                write!(f, "box index {index} out of range (grid has {total} boxes)")
            }
            Self::CoordOutOfRange { coord, counts } => {
                write!(f, "box coordinate {coord} out of range for counts {counts:?}")
            }
        }
    }
}

impl std::error::Error for GridError {}
