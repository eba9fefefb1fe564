//! Test utilities for latdef development.
//!
//! Provides perfect-lattice fixtures ([`simple_cubic`], [`rock_salt`]),
//! a [`ScenarioBuilder`] that derives defective inputs from a reference,
//! and a brute-force [`atoms_within`] oracle to check grid-based
//! searches against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod scenario;

pub use fixtures::{atoms_within, rock_salt, simple_cubic, LatticeFixture};
pub use scenario::{nearest_atom, ScenarioBuilder};
