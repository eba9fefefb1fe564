//! Build defective input configurations from a perfect reference.

use latdef_core::{Configuration, Position, Region, SpeciesId};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Derives an input configuration from a reference by applying edits in
/// order.
///
/// Indices passed to later edits refer to the configuration as it stands
/// after earlier ones, so remove atoms last (or highest index first) when
/// combining edits.
///
/// Panics on invalid edits: this is test scaffolding.
#[derive(Clone, Debug)]
pub struct ScenarioBuilder {
    config: Configuration,
}

impl ScenarioBuilder {
    pub fn from_reference(reference: &Configuration) -> Self {
        Self {
            config: reference.clone(),
        }
    }

    /// Delete atom `index`; later atoms shift down by one.
    pub fn remove(mut self, index: usize) -> Self {
        self.config.remove(index);
        self
    }

    /// Give atom `index` the species named `symbol`.
    pub fn swap_species(mut self, index: usize, symbol: &str) -> Self {
        let id = self.id(symbol);
        self.config
            .set_species(index, id)
            .expect("swap_species index in range");
        self
    }

    /// Append an atom of `symbol` at `position`.
    pub fn add_atom(mut self, position: Position, symbol: &str) -> Self {
        let id = self.id(symbol);
        self.config.push(position, id).expect("add_atom position finite");
        self
    }

    /// Move atom `index` to `position`.
    pub fn move_atom(mut self, index: usize, position: Position) -> Self {
        self.config
            .set_position(index, position)
            .expect("move_atom index in range");
        self
    }

    /// Displace every atom by a uniform random offset in
    /// `[-amplitude, amplitude)` per axis, seeded for reproducibility.
    pub fn jitter(mut self, amplitude: f64, seed: u64) -> Self {
        if amplitude <= 0.0 {
            return self;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for i in 0..self.config.len() {
            let p = *self.config.position(i);
            let q = p.map(|x| x + rng.random_range(-amplitude..amplitude));
            self.config.set_position(i, q).expect("jittered index in range");
        }
        self
    }

    pub fn build(self) -> Configuration {
        self.config
    }

    fn id(&self, symbol: &str) -> SpeciesId {
        self.config
            .table()
            .id(symbol)
            .unwrap_or_else(|| panic!("symbol {symbol} not in fixture table"))
    }
}

/// Index of the atom in `config` nearest to `centre`.
pub fn nearest_atom(config: &Configuration, region: &Region, centre: &Position) -> Option<usize> {
    config
        .positions()
        .iter()
        .enumerate()
        .map(|(i, p)| (i, region.separation2(p, centre)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::rock_salt;

    #[test]
    fn edits_apply_in_order() {
        let f = rock_salt(2, 2.0, ["Mg", "O"]);
        let c = ScenarioBuilder::from_reference(&f.reference)
            .swap_species(0, "O")
            .add_atom([2.0, 2.0, 2.0], "Mg")
            .remove(1)
            .build();
        assert_eq!(c.len(), 8);
        assert_eq!(c.symbol_of(0), "O");
        assert_eq!(c.symbol_of(7), "Mg");
    }

    #[test]
    fn jitter_is_bounded_and_reproducible() {
        let f = rock_salt(3, 2.0, ["Mg", "O"]);
        let a = ScenarioBuilder::from_reference(&f.reference).jitter(0.1, 7).build();
        let b = ScenarioBuilder::from_reference(&f.reference).jitter(0.1, 7).build();
        assert_eq!(a, b);
        for (p, q) in a.positions().iter().zip(f.reference.positions()) {
            for axis in 0..3 {
                assert!((p[axis] - q[axis]).abs() <= 0.1);
            }
        }
    }

    #[test]
    fn nearest_atom_uses_periodic_image() {
        let f = rock_salt(4, 1.0, ["Mg", "O"]);
        let i = nearest_atom(&f.reference, &f.region, &[4.3, 0.5, 0.5]).unwrap();
        assert_eq!(i, f.site(0, 0, 0));
    }
}
