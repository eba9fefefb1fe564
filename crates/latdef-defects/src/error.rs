//! Error type for a classification run.

use std::error::Error;
use std::fmt;

use latdef_core::{InputError, SpeciesId};
use latdef_grid::GridError;

use crate::config::ConfigError;

/// Errors that abort a classification. No partial result is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// Caller-supplied positions, species or region were malformed.
    Input(InputError),
    /// A spatial grid could not be built or queried.
    Grid(GridError),
    /// A species filter names an id missing from the table it filters.
    UnknownFilterSpecies {
        /// Which filter, e.g. `"exclude_reference"`.
        filter: &'static str,
        /// The unknown id.
        id: SpeciesId,
    },
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::UnknownFilterSpecies { filter, id } => {
                write!(f, "{filter} names species id {id}, which is not in its table")
            }
        }
    }
}

impl Error for ClassifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Input(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::UnknownFilterSpecies { .. } => None,
        }
    }
}

impl From<ConfigError> for ClassifyError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<InputError> for ClassifyError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

impl From<GridError> for ClassifyError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
