//! Phase one: pair input atoms with reference sites.

use latdef_core::{Configuration, Region, SpeciesId};
use latdef_grid::BoxGrid;

use crate::config::ConfigError;
use crate::error::ClassifyError;

/// What phase one concluded about one reference site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SiteState {
    /// No input atom claimed the site.
    Vacant,
    /// Claimed by an atom of the site's own species.
    Occupied,
    /// Claimed by an atom of a different species.
    Antisite {
        /// Input-atom index of the occupant.
        occupant: usize,
    },
}

/// Outcome of [`match_sites`]: a state per reference site and the site
/// (if any) each input atom claimed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteMatching {
    sites: Vec<SiteState>,
    atoms: Vec<Option<usize>>,
}

impl SiteMatching {
    /// State of every reference site, in reference order.
    pub fn sites(&self) -> &[SiteState] {
        &self.sites
    }

    /// State of reference site `site`.
    ///
    /// # Panics
    ///
    /// Panics if `site` is not a reference index.
    pub fn site(&self, site: usize) -> SiteState {
        self.sites[site]
    }

    /// The site claimed by input atom `atom`, or `None` if it is unmatched.
    ///
    /// # Panics
    ///
    /// Panics if `atom` is not an input index.
    pub fn matched_site(&self, atom: usize) -> Option<usize> {
        self.atoms[atom]
    }

    /// Whether input atom `atom` claimed a site.
    pub fn is_matched(&self, atom: usize) -> bool {
        self.matched_site(atom).is_some()
    }

    /// Reference sites nobody claimed.
    pub fn vacant_sites(&self) -> impl Iterator<Item = usize> + '_ {
        self.sites
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == SiteState::Vacant)
            .map(|(i, _)| i)
    }

    /// Input atoms that claimed no site.
    pub fn unmatched_atoms(&self) -> impl Iterator<Item = usize> + '_ {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
    }

    /// Number of input atoms that claimed a site.
    pub fn matched_count(&self) -> usize {
        self.atoms.iter().filter(|s| s.is_some()).count()
    }
}

/// Pair each input atom with the first free reference site within
/// `vacancy_radius`.
///
/// Input atoms are visited in order. For each one, the neighbourhood of
/// its box is scanned in enumeration order and each box's sites in
/// assignment order; the first unclaimed site closer than the radius
/// wins. This is a greedy first match, not a global nearest match, so
/// results depend on input order.
///
/// Species are compared by symbol, so the two configurations may use
/// different [`SpeciesTable`](latdef_core::SpeciesTable)s.
pub fn match_sites(
    reference: &Configuration,
    input: &Configuration,
    region: &Region,
    vacancy_radius: f64,
) -> Result<SiteMatching, ClassifyError> {
    if !vacancy_radius.is_finite() || vacancy_radius <= 0.0 {
        return Err(ConfigError::InvalidRadius {
            name: "vacancy_radius",
            value: vacancy_radius,
        }
        .into());
    }

    let mut grid = BoxGrid::build(1.1 * vacancy_radius, region)?;
    grid.assign(reference.positions())?;

    // Input species id -> reference species id with the same symbol.
    let to_reference: Vec<Option<SpeciesId>> = input
        .table()
        .iter()
        .map(|(_, symbol)| reference.table().id(symbol))
        .collect();

    let radius2 = vacancy_radius * vacancy_radius;
    let mut sites = vec![SiteState::Vacant; reference.len()];
    let mut atoms = vec![None; input.len()];

    for (atom, position) in input.positions().iter().enumerate() {
        let own = to_reference[input.species_of(atom).index()];
        'search: for b in grid.neighbourhood_of(position)? {
            for &site in grid.box_points(b) {
                if sites[site] != SiteState::Vacant {
                    continue;
                }
                if region.separation2(position, reference.position(site)) < radius2 {
                    sites[site] = if own == Some(reference.species_of(site)) {
                        SiteState::Occupied
                    } else {
                        SiteState::Antisite { occupant: atom }
                    };
                    atoms[atom] = Some(site);
                    break 'search;
                }
            }
        }
    }

    let matching = SiteMatching { sites, atoms };
    log::debug!(
        "site matching: {} of {} input atoms matched, {} of {} sites vacant",
        matching.matched_count(),
        input.len(),
        matching.vacant_sites().count(),
        reference.len(),
    );
    Ok(matching)
}
