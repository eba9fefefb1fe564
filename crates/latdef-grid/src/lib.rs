//! Uniform spatial grid for fixed-radius neighbour searches.
//!
//! A [`BoxGrid`] splits the simulation [`Region`](latdef_core::Region)
//! into axis-aligned boxes roughly one search radius wide, assigns every
//! point to exactly one box, and enumerates the (up to) 27 boxes around
//! any box. Candidates within a radius of a point are then found by
//! scanning [`BoxGrid::neighbourhood`] instead of every point.
//!
//! Boxes are numbered x-fastest, then z, then y:
//! `index = x + Nx·z + Nx·Nz·y`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::GridError;
pub use grid::{BoxCoord, BoxGrid, Neighbourhood, MAX_AXIS_BOXES};
