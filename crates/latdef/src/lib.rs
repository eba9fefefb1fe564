//! latdef: point-defect classification for atomistic configurations.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the latdef sub-crates. Compare an input configuration against a perfect
//! reference lattice and get back vacancies, interstitials, antisites and
//! the sub-system of atoms surrounding them.
//!
//! # Quick start
//!
//! ```rust
//! use latdef::prelude::*;
//!
//! // Eight Fe sites in a periodic 4x4x4 cell.
//! let table = SpeciesTable::new(["Fe"]).unwrap();
//! let mut sites = Vec::new();
//! for x in [1.0, 3.0] {
//!     for y in [1.0, 3.0] {
//!         for z in [1.0, 3.0] {
//!             sites.push([x, y, z]);
//!         }
//!     }
//! }
//! let species = vec![SpeciesId(0); sites.len()];
//! let reference = Configuration::new(sites.clone(), species.clone(), table.clone()).unwrap();
//!
//! // Drop the last site.
//! sites.pop();
//! let input = Configuration::new(sites, species[1..].to_vec(), table).unwrap();
//!
//! let region = Region::periodic([4.0; 3]).unwrap();
//! let classifier = DefectClassifier::new(
//!     ClassifyConfig::default()
//!         .with_vacancy_radius(0.5)
//!         .with_inclusion_radius(2.1),
//! )
//! .unwrap();
//! let result = classifier.classify(&reference, &input, &region).unwrap();
//! assert_eq!(result.vacancies, vec![7]);
//! assert_eq!(result.counts().total, 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `latdef-core` | Configurations, species tables, regions, input errors |
//! | [`grid`] | `latdef-grid` | Box-grid spatial index with periodic wrap |
//! | [`defects`] | `latdef-defects` | Site matching, defect classification, moved atoms |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`latdef-core`).
///
/// [`types::Configuration`], [`types::SpeciesTable`], [`types::Region`]
/// and the [`types::InputError`] they validate with.
pub use latdef_core as types;

/// Box-grid spatial index (`latdef-grid`).
///
/// [`grid::BoxGrid`] partitions a region into boxes no narrower than a
/// requested width and answers 27-neighbourhood queries.
pub use latdef_grid as grid;

/// Defect classification (`latdef-defects`).
///
/// [`defects::DefectClassifier`] runs the two-phase search;
/// [`defects::find_moved_atoms`] compares two snapshots of the same atoms.
pub use latdef_defects as defects;

/// Common imports for typical latdef usage.
///
/// ```rust
/// use latdef::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use latdef_core::{
        Axis, Boundary, Configuration, Position, Region, SpeciesId, SpeciesTable,
    };

    // Errors
    pub use latdef_core::InputError;
    pub use latdef_defects::{ClassifyError, ConfigError};
    pub use latdef_grid::GridError;

    // Grid
    pub use latdef_grid::BoxGrid;

    // Classification
    pub use latdef_defects::{
        find_moved_atoms, Antisite, ClassifyConfig, DefectClassifier, DefectCounts,
        DefectResult, MovedAtom,
    };
}
