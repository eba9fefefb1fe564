//! Core types for the latdef defect-analysis workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the spatial grid and the defect classifier:
//! species identifiers and symbol tables, per-axis boundary conditions,
//! the simulation [`Region`], atom [`Configuration`]s, and the
//! [`InputError`] raised when caller-supplied data is malformed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod configuration;
pub mod error;
pub mod id;
pub mod region;
pub mod species;

pub use boundary::Boundary;
pub use configuration::Configuration;
pub use error::InputError;
pub use id::{Axis, SpeciesId};
pub use region::Region;
pub use species::{SpeciesTable, PACKED_SYMBOL_WIDTH};

/// A position in Cartesian space, `[x, y, z]`.
pub type Position = [f64; 3];
