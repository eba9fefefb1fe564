//! Point-defect classification for atomistic configurations.
//!
//! Compares an *input* configuration against a *reference* lattice in
//! two phases:
//!
//! 1. [`match_sites`] pairs each input atom with the first free reference
//!    site within the vacancy radius, marking sites occupied or antisite.
//! 2. [`DefectClassifier::classify`] turns the matching into vacancies,
//!    interstitials and antisites, applies species filters, and gathers
//!    every input atom within the inclusion radius of a defect into a
//!    sub-system.
//!
//! Both phases search through a [`BoxGrid`](latdef_grid::BoxGrid) built
//! for that phase's radius.
//!
//! [`find_moved_atoms`] compares two snapshots of the same atoms and
//! reports those displaced beyond a threshold.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classifier;
pub mod config;
pub mod displacement;
pub mod error;
pub mod matching;
pub mod result;

pub use classifier::DefectClassifier;
pub use config::{ClassifyConfig, ConfigError};
pub use displacement::{find_moved_atoms, MovedAtom};
pub use error::ClassifyError;
pub use matching::{match_sites, SiteMatching, SiteState};
pub use result::{Antisite, DefectCounts, DefectResult};
