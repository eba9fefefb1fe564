//! `repr(C)` argument structs and their conversion into latdef types.
//!
//! Every conversion validates pointers and lengths before touching the
//! memory behind them, and reports failure as a [`LatdefStatus`].

use std::slice;

use latdef_core::{Boundary, Configuration, Region, SpeciesId, SpeciesTable, PACKED_SYMBOL_WIDTH};
use latdef_defects::ClassifyConfig;

use crate::status::LatdefStatus;

/// One configuration of atoms: flat positions, species ids and the packed
/// symbol table those ids index.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct LatdefAtoms {
    /// Number of atoms.
    pub n_atoms: usize,
    /// `3 * n_atoms` coordinates, `[x0, y0, z0, x1, ...]`.
    pub positions: *const f64,
    /// `n_atoms` species ids, each in `[0, n_species)`.
    pub species: *const i32,
    /// Number of entries in the symbol table.
    pub n_species: usize,
    /// `2 * n_species` bytes of blank- or NUL-padded element symbols.
    pub symbols: *const u8,
}

/// Simulation region: bounds, per-axis periodicity and cell lengths.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct LatdefRegion {
    /// Lower bound per axis.
    pub min: [f64; 3],
    /// Upper bound per axis.
    pub max: [f64; 3],
    /// Nonzero marks an axis periodic.
    pub periodic: [i32; 3],
    /// Cell length per axis, used on periodic axes.
    pub cell: [f64; 3],
}

/// Classification options. Filter arrays hold reference or input species
/// ids and may be null when their length is zero.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct LatdefOptions {
    /// Match radius between an atom and a lattice site.
    pub vacancy_radius: f64,
    /// Sub-system gathering radius around each defect.
    pub inclusion_radius: f64,
    /// Nonzero to report vacancies.
    pub include_vacancies: i32,
    /// Nonzero to report interstitials.
    pub include_interstitials: i32,
    /// Nonzero to report antisites.
    pub include_antisites: i32,
    /// Input species always reported as interstitials.
    pub force_interstitial: *const i32,
    /// Length of `force_interstitial`.
    pub n_force_interstitial: usize,
    /// Input species never reported as interstitials.
    pub exclude_input: *const i32,
    /// Length of `exclude_input`.
    pub n_exclude_input: usize,
    /// Reference species never reported as vacancies or antisites.
    pub exclude_reference: *const i32,
    /// Length of `exclude_reference`.
    pub n_exclude_reference: usize,
    /// Summary logging level; values above 2 log at info.
    pub verbosity: i32,
}

/// Caller-allocated output buffers for `latdef_find_defects`.
///
/// `counts` and `sub_system_len` are always written on `Ok` and on
/// `BufferTooSmall`. Index arrays are written only on `Ok`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct LatdefOutput {
    /// `[total, vacancies, interstitials, antisites]`.
    pub counts: [usize; 4],
    /// Vacant reference site indices.
    pub vacancies: *mut usize,
    /// Capacity of `vacancies`.
    pub vacancies_cap: usize,
    /// Interstitial input atom indices.
    pub interstitials: *mut usize,
    /// Capacity of `interstitials`.
    pub interstitials_cap: usize,
    /// Reference site index of each antisite.
    pub antisites: *mut usize,
    /// Capacity of `antisites`.
    pub antisites_cap: usize,
    /// Input atom occupying each antisite, parallel to `antisites`.
    pub on_antisites: *mut usize,
    /// Capacity of `on_antisites`.
    pub on_antisites_cap: usize,
    /// Input atom indices of the defect sub-system.
    pub sub_system: *mut usize,
    /// Capacity of `sub_system`.
    pub sub_system_cap: usize,
    /// Number of sub-system atoms found.
    pub sub_system_len: usize,
}

/// Borrow `len` elements at `ptr`, allowing null only for an empty slice.
///
/// # Safety
///
/// When non-null, `ptr` must point to `len` initialized values that stay
/// valid and unaliased by writers for the returned lifetime.
#[allow(unsafe_code)]
pub(crate) unsafe fn raw_slice<'a, T>(ptr: *const T, len: usize) -> Result<&'a [T], LatdefStatus> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(LatdefStatus::InvalidArgument);
    }
    // SAFETY: non-null and the caller guarantees `len` valid elements.
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

fn species_ids(raw: &[i32]) -> Result<Vec<SpeciesId>, LatdefStatus> {
    raw.iter()
        .map(|&id| {
            u32::try_from(id)
                .map(SpeciesId)
                .map_err(|_| LatdefStatus::InvalidArgument)
        })
        .collect()
}

fn flag(value: i32) -> bool {
    value != 0
}

impl LatdefAtoms {
    /// Copy the arrays into an owned [`Configuration`].
    ///
    /// # Safety
    ///
    /// Every non-null pointer must cover the length its field documents.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn to_configuration(&self) -> Result<Configuration, LatdefStatus> {
        let n_coords = self
            .n_atoms
            .checked_mul(3)
            .ok_or(LatdefStatus::InvalidArgument)?;
        let n_symbol_bytes = self
            .n_species
            .checked_mul(PACKED_SYMBOL_WIDTH)
            .ok_or(LatdefStatus::InvalidArgument)?;
        // SAFETY: lengths come from the struct, validity from the caller.
        let (positions, species, symbols) = unsafe {
            (
                raw_slice(self.positions, n_coords)?,
                raw_slice(self.species, self.n_atoms)?,
                raw_slice(self.symbols, n_symbol_bytes)?,
            )
        };
        let table = SpeciesTable::from_packed(symbols).map_err(|e| LatdefStatus::from(&e))?;
        Configuration::from_flat(positions, species_ids(species)?, table)
            .map_err(|e| LatdefStatus::from(&e))
    }
}

impl LatdefRegion {
    /// Validate into a [`Region`].
    pub fn to_region(&self) -> Result<Region, LatdefStatus> {
        Region::new(
            self.min,
            self.max,
            self.periodic.map(Boundary::from_flag),
            self.cell,
        )
        .map_err(|e| LatdefStatus::from(&e))
    }
}

impl LatdefOptions {
    /// Options matching [`ClassifyConfig::default`], with empty filters.
    pub fn defaults() -> Self {
        let d = ClassifyConfig::default();
        Self {
            vacancy_radius: d.vacancy_radius,
            inclusion_radius: d.inclusion_radius,
            include_vacancies: d.include_vacancies.into(),
            include_interstitials: d.include_interstitials.into(),
            include_antisites: d.include_antisites.into(),
            force_interstitial: std::ptr::null(),
            n_force_interstitial: 0,
            exclude_input: std::ptr::null(),
            n_exclude_input: 0,
            exclude_reference: std::ptr::null(),
            n_exclude_reference: 0,
            verbosity: d.verbosity.into(),
        }
    }

    /// Build a [`ClassifyConfig`]. Radii are validated later by the
    /// classifier; negative filter ids are rejected here.
    ///
    /// # Safety
    ///
    /// Each non-null filter pointer must cover its paired length.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn to_config(&self) -> Result<ClassifyConfig, LatdefStatus> {
        // SAFETY: lengths come from the struct, validity from the caller.
        let (force, exclude_input, exclude_reference) = unsafe {
            (
                raw_slice(self.force_interstitial, self.n_force_interstitial)?,
                raw_slice(self.exclude_input, self.n_exclude_input)?,
                raw_slice(self.exclude_reference, self.n_exclude_reference)?,
            )
        };
        let verbosity = u8::try_from(self.verbosity.max(0)).unwrap_or(u8::MAX);
        Ok(ClassifyConfig::default()
            .with_vacancy_radius(self.vacancy_radius)
            .with_inclusion_radius(self.inclusion_radius)
            .with_kinds(
                flag(self.include_vacancies),
                flag(self.include_interstitials),
                flag(self.include_antisites),
            )
            .with_force_interstitial(species_ids(force)?)
            .with_exclude_input(species_ids(exclude_input)?)
            .with_exclude_reference(species_ids(exclude_reference)?)
            .with_verbosity(verbosity))
    }
}
