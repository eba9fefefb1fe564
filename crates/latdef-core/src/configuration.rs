//! Atom configurations: positions, species ids and their symbol table.

use crate::error::InputError;
use crate::id::{Axis, SpeciesId};
use crate::species::SpeciesTable;
use crate::Position;

/// A validated set of atoms.
///
/// Positions and species ids are parallel arrays; every id is guaranteed
/// to exist in the configuration's own [`SpeciesTable`] and every
/// coordinate is finite.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    positions: Vec<Position>,
    species: Vec<SpeciesId>,
    table: SpeciesTable,
}

impl Configuration {
    /// Build a configuration from parallel position and species arrays.
    pub fn new(
        positions: Vec<Position>,
        species: Vec<SpeciesId>,
        table: SpeciesTable,
    ) -> Result<Self, InputError> {
        if species.len() != positions.len() {
            return Err(InputError::LengthMismatch {
                what: "species",
                expected: positions.len(),
                actual: species.len(),
            });
        }
        for (index, p) in positions.iter().enumerate() {
            if let Some(axis) = Axis::ALL.into_iter().find(|a| !p[a.index()].is_finite()) {
                return Err(InputError::NonFiniteCoordinate { index, axis });
            }
        }
        for (index, &id) in species.iter().enumerate() {
            if !table.contains(id) {
                return Err(InputError::UnknownSpecies {
                    index,
                    id,
                    table_len: table.len(),
                });
            }
        }
        Ok(Self {
            positions,
            species,
            table,
        })
    }

    /// Build a configuration from a flat `[x0, y0, z0, x1, ...]` slice.
    pub fn from_flat(
        flat_positions: &[f64],
        species: Vec<SpeciesId>,
        table: SpeciesTable,
    ) -> Result<Self, InputError> {
        if flat_positions.len() != 3 * species.len() {
            return Err(InputError::LengthMismatch {
                what: "flat positions",
                expected: 3 * species.len(),
                actual: flat_positions.len(),
            });
        }
        let positions = flat_positions
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::new(positions, species, table)
    }

    /// An empty configuration with the given table.
    pub fn empty(table: SpeciesTable) -> Self {
        Self {
            positions: Vec::new(),
            species: Vec::new(),
            table,
        }
    }

    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no atoms.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All positions in atom order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Position of atom `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn position(&self, index: usize) -> &Position {
        &self.positions[index]
    }

    /// All species ids in atom order.
    pub fn species(&self) -> &[SpeciesId] {
        &self.species
    }

    /// Species id of atom `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn species_of(&self, index: usize) -> SpeciesId {
        self.species[index]
    }

    /// Symbol of atom `index`. Always present: ids are validated at construction.
    pub fn symbol_of(&self, index: usize) -> &str {
        self.table.symbol(self.species[index]).unwrap_or_default()
    }

    /// The configuration's species table.
    pub fn table(&self) -> &SpeciesTable {
        &self.table
    }

    /// Append one atom, validating it like [`new`](Self::new).
    pub fn push(&mut self, position: Position, species: SpeciesId) -> Result<(), InputError> {
        let index = self.positions.len();
        if let Some(axis) = Axis::ALL.into_iter().find(|a| !position[a.index()].is_finite()) {
            return Err(InputError::NonFiniteCoordinate { index, axis });
        }
        if !self.table.contains(species) {
            return Err(InputError::UnknownSpecies {
                index,
                id: species,
                table_len: self.table.len(),
            });
        }
        self.positions.push(position);
        self.species.push(species);
        Ok(())
    }

    /// Remove atom `index`, shifting later atoms down by one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn remove(&mut self, index: usize) -> (Position, SpeciesId) {
        (self.positions.remove(index), self.species.remove(index))
    }

    /// Change the species of atom `index`.
    pub fn set_species(&mut self, index: usize, species: SpeciesId) -> Result<(), InputError> {
        if index >= self.len() {
            return Err(InputError::LengthMismatch {
                what: "atom index",
                expected: self.len(),
                actual: index,
            });
        }
        if !self.table.contains(species) {
            return Err(InputError::UnknownSpecies {
                index,
                id: species,
                table_len: self.table.len(),
            });
        }
        self.species[index] = species;
        Ok(())
    }

    /// Move atom `index` to `position`.
    pub fn set_position(&mut self, index: usize, position: Position) -> Result<(), InputError> {
        if index >= self.len() {
            return Err(InputError::LengthMismatch {
                what: "atom index",
                expected: self.len(),
                actual: index,
            });
        }
        if let Some(axis) = Axis::ALL.into_iter().find(|a| !position[a.index()].is_finite()) {
            return Err(InputError::NonFiniteCoordinate { index, axis });
        }
        self.positions[index] = position;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SpeciesTable {
        SpeciesTable::new(["Fe", "C"]).unwrap()
    }

    #[test]
    fn from_flat_splits_triples() {
        let c = Configuration::from_flat(
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![SpeciesId(0), SpeciesId(1)],
            table(),
        )
        .unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.position(1), &[3.0, 4.0, 5.0]);
        assert_eq!(c.symbol_of(1), "C");
    }

    #[test]
    fn from_flat_rejects_ragged_positions() {
        let err = Configuration::from_flat(&[0.0, 1.0], vec![SpeciesId(0)], table()).unwrap_err();
        assert!(matches!(
            err,
            InputError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn rejects_species_length_mismatch() {
        let err = Configuration::new(vec![[0.0; 3]; 2], vec![SpeciesId(0)], table()).unwrap_err();
        assert!(matches!(err, InputError::LengthMismatch { what: "species", .. }));
    }

    #[test]
    fn rejects_unknown_species() {
        let err = Configuration::new(vec![[0.0; 3]], vec![SpeciesId(2)], table()).unwrap_err();
        assert!(matches!(err, InputError::UnknownSpecies { index: 0, .. }));
    }

    #[test]
    fn rejects_non_finite_coordinate() {
        let err = Configuration::new(
            vec![[0.0; 3], [0.0, 0.0, f64::INFINITY]],
            vec![SpeciesId(0); 2],
            table(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            InputError::NonFiniteCoordinate {
                index: 1,
                axis: Axis::Z
            }
        );
    }

    #[test]
    fn edits_are_validated() {
        let mut c = Configuration::empty(table());
        c.push([1.0, 1.0, 1.0], SpeciesId(0)).unwrap();
        assert!(c.push([0.0; 3], SpeciesId(5)).is_err());
        assert!(c.set_species(0, SpeciesId(1)).is_ok());
        assert_eq!(c.symbol_of(0), "C");
        assert!(c.set_position(3, [0.0; 3]).is_err());
        let (p, s) = c.remove(0);
        assert_eq!(p, [1.0, 1.0, 1.0]);
        assert_eq!(s, SpeciesId(1));
        assert!(c.is_empty());
    }
}
