//! Species symbol tables.

use indexmap::IndexSet;

use crate::error::InputError;
use crate::id::SpeciesId;

/// Width of one symbol in the packed legacy encoding.
pub const PACKED_SYMBOL_WIDTH: usize = 2;

/// Maps table-local [`SpeciesId`]s to short element symbols (`"Fe"`, `"O"`).
///
/// Ids are assigned in insertion order, so `SpeciesId(n)` is the n-th
/// symbol. Lookups are O(1) in both directions.
///
/// # Examples
///
/// ```
/// use latdef_core::{SpeciesId, SpeciesTable};
///
/// let table = SpeciesTable::new(["Mg", "O"]).unwrap();
/// assert_eq!(table.symbol(SpeciesId(1)), Some("O"));
/// assert_eq!(table.id("Mg"), Some(SpeciesId(0)));
///
/// // Legacy packed form: two bytes per symbol, blank padded.
/// let packed = SpeciesTable::from_packed(b"MgO ").unwrap();
/// assert_eq!(packed, table);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpeciesTable {
    symbols: IndexSet<String>,
}

impl SpeciesTable {
    /// Build a table from symbols in id order.
    ///
    /// Returns `Err(InputError::InvalidSymbol)` for an empty symbol and
    /// `Err(InputError::DuplicateSymbol)` if a symbol repeats.
    pub fn new<I, S>(symbols: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for (position, symbol) in symbols.into_iter().enumerate() {
            table.push(position, symbol.as_ref().trim())?;
        }
        Ok(table)
    }

    /// Parse the fixed-width packed form: [`PACKED_SYMBOL_WIDTH`] bytes per
    /// species, padded with blanks or NULs.
    pub fn from_packed(packed: &[u8]) -> Result<Self, InputError> {
        if packed.len() % PACKED_SYMBOL_WIDTH != 0 {
            return Err(InputError::LengthMismatch {
                what: "packed species symbols",
                expected: packed.len().next_multiple_of(PACKED_SYMBOL_WIDTH),
                actual: packed.len(),
            });
        }
        let mut table = Self::default();
        for (position, chunk) in packed.chunks_exact(PACKED_SYMBOL_WIDTH).enumerate() {
            let text = std::str::from_utf8(chunk)
                .map_err(|_| InputError::InvalidSymbol { position })?;
            table.push(position, text.trim_matches(|c: char| c == '\0' || c.is_whitespace()))?;
        }
        Ok(table)
    }

    fn push(&mut self, position: usize, symbol: &str) -> Result<(), InputError> {
        if symbol.is_empty() {
            return Err(InputError::InvalidSymbol { position });
        }
        if !self.symbols.insert(symbol.to_owned()) {
            return Err(InputError::DuplicateSymbol {
                symbol: symbol.to_owned(),
            });
        }
        Ok(())
    }

    /// Symbol for `id`, or `None` if the id is not in this table.
    pub fn symbol(&self, id: SpeciesId) -> Option<&str> {
        self.symbols.get_index(id.index()).map(String::as_str)
    }

    /// Id of `symbol`, or `None` if absent.
    pub fn id(&self, symbol: &str) -> Option<SpeciesId> {
        self.symbols
            .get_index_of(symbol)
            .map(|i| SpeciesId(i as u32))
    }

    /// Whether `id` names an entry of this table.
    pub fn contains(&self, id: SpeciesId) -> bool {
        id.index() < self.symbols.len()
    }

    /// Number of species.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table has no species.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate `(id, symbol)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &str)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SpeciesId(i as u32), s.as_str()))
    }

    /// Whether `id` in this table and `other_id` in `other` name the same element.
    ///
    /// Unknown ids never match.
    pub fn same_species(&self, id: SpeciesId, other: &SpeciesTable, other_id: SpeciesId) -> bool {
        match (self.symbol(id), other.symbol(other_id)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

// `IndexSet` equality ignores order; ids are positional, so tables compare in order.
impl PartialEq for SpeciesTable {
    fn eq(&self, other: &Self) -> bool {
        self.symbols.iter().eq(other.symbols.iter())
    }
}

impl Eq for SpeciesTable {}
