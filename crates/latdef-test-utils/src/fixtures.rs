//! Perfect-lattice fixtures.
//!
//! - [`simple_cubic`]: one species on an `n³` cubic lattice.
//! - [`rock_salt`]: two species alternating on an `n³` cubic lattice.
//!
//! Both fill a fully periodic cell of side `n * spacing` with sites at
//! `(i + 0.5) * spacing`, ordered x-outer, y-middle, z-inner.

use latdef_core::{Configuration, Position, Region, SpeciesId, SpeciesTable};

/// A reference lattice and the periodic region it fills.
#[derive(Clone, Debug)]
pub struct LatticeFixture {
    pub reference: Configuration,
    pub region: Region,
    pub spacing: f64,
    pub n: usize,
}

impl LatticeFixture {
    /// Index of the site at lattice coordinate `(i, j, k)`.
    pub fn site(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.n + j) * self.n + k
    }
}

fn lattice(
    n: usize,
    spacing: f64,
    symbols: &[&str],
    species: impl Fn(usize, usize, usize) -> u32,
) -> LatticeFixture {
    let mut positions = Vec::with_capacity(n * n * n);
    let mut ids = Vec::with_capacity(n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                positions.push([
                    (i as f64 + 0.5) * spacing,
                    (j as f64 + 0.5) * spacing,
                    (k as f64 + 0.5) * spacing,
                ]);
                ids.push(SpeciesId(species(i, j, k)));
            }
        }
    }
    let table = SpeciesTable::new(symbols).expect("fixture symbols are distinct");
    let side = n as f64 * spacing;
    LatticeFixture {
        reference: Configuration::new(positions, ids, table).expect("fixture lattice is valid"),
        region: Region::periodic([side; 3]).expect("fixture cell is positive"),
        spacing,
        n,
    }
}

/// `n³` sites of `symbol` with the given spacing.
pub fn simple_cubic(n: usize, spacing: f64, symbol: &str) -> LatticeFixture {
    lattice(n, spacing, &[symbol], |_, _, _| 0)
}

/// `n³` sites alternating `symbols[0]` / `symbols[1]` by parity of `i + j + k`.
pub fn rock_salt(n: usize, spacing: f64, symbols: [&str; 2]) -> LatticeFixture {
    lattice(n, spacing, &symbols, |i, j, k| ((i + j + k) % 2) as u32)
}

/// Brute-force list of atoms in `config` strictly within `radius` of `centre`.
pub fn atoms_within(
    config: &Configuration,
    region: &Region,
    centre: &Position,
    radius: f64,
) -> Vec<usize> {
    let r2 = radius * radius;
    config
        .positions()
        .iter()
        .enumerate()
        .filter(|(_, p)| region.separation2(p, centre) < r2)
        .map(|(i, _)| i)
        .collect()
}
