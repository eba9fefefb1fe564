//! Error type for malformed caller input.

use std::error::Error;
use std::fmt;

use crate::id::{Axis, SpeciesId};

/// Errors raised while validating caller-supplied positions, species or
/// region bounds.
///
/// Every public constructor in this crate checks its preconditions and
/// returns one of these instead of proceeding with inconsistent data.
#[derive(Clone, Debug, PartialEq)]
pub enum InputError {
    /// Two arrays that must have matching lengths do not.
    LengthMismatch {
        /// What was being compared, e.g. `"species"`.
        what: &'static str,
        /// The expected length.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },
    /// A position component is NaN or infinite.
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
        /// The offending axis.
        axis: Axis,
    },
    /// A species id does not exist in the configuration's table.
    UnknownSpecies {
        /// Index of the offending point.
        index: usize,
        /// The unknown id.
        id: SpeciesId,
        /// Number of entries in the table.
        table_len: usize,
    },
    /// A species symbol appears twice in one table.
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: String,
    },
    /// A species symbol is empty or not valid text.
    InvalidSymbol {
        /// Position of the symbol in the table.
        position: usize,
    },
    /// Region bounds are unusable on one axis.
    InvalidRegion {
        /// The offending axis.
        axis: Axis,
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                what,
                expected,
                actual,
            } => write!(f, "{what} length mismatch: expected {expected}, got {actual}"),
            Self::NonFiniteCoordinate { index, axis } => {
                write!(f, "point {index} has a non-finite {axis} coordinate")
            }
            Self::UnknownSpecies {
                index,
                id,
                table_len,
            } => write!(
                f,
                "point {index} has species id {id}, but the table has {table_len} entries"
            ),
            Self::DuplicateSymbol { symbol } => {
                write!(f, "species symbol '{symbol}' appears more than once")
            }
            Self::InvalidSymbol { position } => {
                write!(f, "species symbol at position {position} is empty or not UTF-8")
            }
            Self::InvalidRegion { axis, reason } => {
                write!(f, "invalid region on {axis} axis: {reason}")
            }
        }
    }
}

impl Error for InputError {}
