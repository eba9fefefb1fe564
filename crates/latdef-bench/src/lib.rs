//! Benchmark profiles for latdef.
//!
//! - [`reference_profile`]: 20³ rock-salt lattice (8K sites) with a handful
//!   of vacancies and interstitials
//! - [`stress_profile`]: 40³ lattice (64K sites) with the same defect density
//! - [`damaged_rock_salt`]: the generator both profiles use

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use latdef_core::{Configuration, Region};
use latdef_defects::ClassifyConfig;
use latdef_test_utils::{rock_salt, ScenarioBuilder};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Lattice spacing of every profile.
pub const SPACING: f64 = 2.0;

/// A reference lattice, a damaged copy of it, and their shared region.
#[derive(Clone, Debug)]
pub struct DefectProfile {
    /// Perfect lattice.
    pub reference: Configuration,
    /// Jittered lattice with defects introduced.
    pub input: Configuration,
    /// Periodic cell holding both.
    pub region: Region,
}

/// Classifier settings sized for [`SPACING`].
pub fn bench_config() -> ClassifyConfig {
    ClassifyConfig::default()
        .with_vacancy_radius(0.8)
        .with_inclusion_radius(2.5)
}

/// Build a 20³ profile (8K sites, 8 vacancies, 8 interstitials).
pub fn reference_profile(seed: u64) -> DefectProfile {
    damaged_rock_salt(20, 8, 8, seed)
}

/// Build a 40³ profile (64K sites, 64 vacancies, 64 interstitials).
pub fn stress_profile(seed: u64) -> DefectProfile {
    damaged_rock_salt(40, 64, 64, seed)
}

/// An `n³` rock-salt lattice, jittered by up to 0.1 per axis, with
/// `vacancies` distinct sites removed and `interstitials` atoms added at
/// cube centres. All choices are deterministic in `seed`.
pub fn damaged_rock_salt(
    n: usize,
    vacancies: usize,
    interstitials: usize,
    seed: u64,
) -> DefectProfile {
    let fixture = rock_salt(n, SPACING, ["Na", "Cl"]);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let sites = fixture.reference.len();

    let mut builder = ScenarioBuilder::from_reference(&fixture.reference).jitter(0.1, seed);
    for _ in 0..interstitials {
        let centre = [0; 3].map(|_| rng.random_range(0..n) as f64 * SPACING + SPACING);
        let symbol = if rng.random_bool(0.5) { "Na" } else { "Cl" };
        builder = builder.add_atom(centre, symbol);
    }
    let mut removed = index::sample(&mut rng, sites, vacancies.min(sites)).into_vec();
    removed.sort_unstable_by(|a, b| b.cmp(a));
    for site in removed {
        builder = builder.remove(site);
    }

    DefectProfile {
        reference: fixture.reference,
        input: builder.build(),
        region: fixture.region,
    }
}
