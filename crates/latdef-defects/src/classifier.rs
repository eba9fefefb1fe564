//! Phase two: classify, filter and expand into a sub-system.

use indexmap::IndexSet;
use latdef_core::{Configuration, Position, Region, SpeciesId, SpeciesTable};
use latdef_grid::BoxGrid;

use crate::config::ClassifyConfig;
use crate::error::ClassifyError;
use crate::matching::{match_sites, SiteMatching, SiteState};
use crate::result::{Antisite, DefectResult};

/// Classifies point defects in an input configuration against a
/// reference lattice.
///
/// Holds only its validated [`ClassifyConfig`]; all scratch state lives
/// inside each [`classify`](Self::classify) call, so one classifier can
/// be shared across threads.
///
/// # Examples
///
/// ```
/// use latdef_core::{Configuration, Region, SpeciesId, SpeciesTable};
/// use latdef_defects::{ClassifyConfig, DefectClassifier};
///
/// let table = SpeciesTable::new(["Fe"]).unwrap();
/// let sites = vec![[1.0, 1.0, 1.0], [3.0, 1.0, 1.0], [1.0, 3.0, 1.0]];
/// let reference = Configuration::new(sites.clone(), vec![SpeciesId(0); 3], table.clone()).unwrap();
/// let input = Configuration::new(sites[..2].to_vec(), vec![SpeciesId(0); 2], table).unwrap();
///
/// let region = Region::periodic([4.0, 4.0, 4.0]).unwrap();
/// let classifier = DefectClassifier::new(
///     ClassifyConfig::default().with_vacancy_radius(0.5).with_inclusion_radius(2.5),
/// )
/// .unwrap();
/// let result = classifier.classify(&reference, &input, &region).unwrap();
///
/// assert_eq!(result.vacancies, vec![2]);
/// assert_eq!(result.counts().total, 1);
/// // Atom 0 sits 2.0 from the vacant site, atom 1 about 2.83.
/// assert_eq!(result.sub_system, vec![0]);
/// ```
#[derive(Clone, Debug)]
pub struct DefectClassifier {
    config: ClassifyConfig,
}

impl DefectClassifier {
    /// Create a classifier, validating `config`.
    pub fn new(config: ClassifyConfig) -> Result<Self, ClassifyError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ClassifyConfig {
        &self.config
    }

    /// Run phase one alone with this classifier's vacancy radius.
    pub fn match_sites(
        &self,
        reference: &Configuration,
        input: &Configuration,
        region: &Region,
    ) -> Result<SiteMatching, ClassifyError> {
        match_sites(reference, input, region, self.config.vacancy_radius)
    }

    /// Classify `input` against `reference` inside `region`.
    ///
    /// Reference sites are walked in order: excluded species are skipped,
    /// vacant sites become vacancies and wrongly occupied sites become
    /// antisites, each only when that kind is enabled. A vacant site is
    /// never an antisite. Input atoms are then walked in order for
    /// interstitials: excluded species are skipped, forced species always
    /// qualify, anything else qualifies when unmatched.
    ///
    /// Every reported defect pulls the input atoms within the inclusion
    /// radius of it into the sub-system; reported interstitials are
    /// members themselves.
    pub fn classify(
        &self,
        reference: &Configuration,
        input: &Configuration,
        region: &Region,
    ) -> Result<DefectResult, ClassifyError> {
        let cfg = &self.config;
        check_filter("force_interstitial", &cfg.force_interstitial, input.table())?;
        check_filter("exclude_input", &cfg.exclude_input, input.table())?;
        check_filter("exclude_reference", &cfg.exclude_reference, reference.table())?;

        let level = cfg.summary_level();
        log::log!(
            level,
            "finding defects: {} reference sites, {} input atoms, vacancy radius {}, inclusion radius {}",
            reference.len(),
            input.len(),
            cfg.vacancy_radius,
            cfg.inclusion_radius,
        );

        let matching = self.match_sites(reference, input, region)?;

        let mut grid = BoxGrid::build(1.1 * cfg.inclusion_radius, region)?;
        grid.assign(input.positions())?;
        let mut expansion = Expansion {
            grid: &grid,
            region,
            input,
            radius2: cfg.inclusion_radius * cfg.inclusion_radius,
            member: vec![false; input.len()],
        };

        let mut result = DefectResult::default();
        for (site, state) in matching.sites().iter().enumerate() {
            if cfg.exclude_reference.contains(&reference.species_of(site)) {
                continue;
            }
            match *state {
                SiteState::Vacant => {
                    if cfg.include_vacancies {
                        result.vacancies.push(site);
                        expansion.gather(reference.position(site), None)?;
                    }
                }
                SiteState::Antisite { occupant } if cfg.include_antisites => {
                    result.antisites.push(Antisite { site, occupant });
                    expansion.gather(reference.position(site), None)?;
                }
                _ => {}
            }
        }

        if cfg.include_interstitials {
            for atom in 0..input.len() {
                let species = input.species_of(atom);
                if cfg.exclude_input.contains(&species) {
                    continue;
                }
                if matching.is_matched(atom) && !cfg.force_interstitial.contains(&species) {
                    continue;
                }
                result.interstitials.push(atom);
                expansion.member[atom] = true;
                expansion.gather(input.position(atom), Some(atom))?;
            }
        }

        result.sub_system = expansion
            .member
            .iter()
            .enumerate()
            .filter(|(_, m)| **m)
            .map(|(i, _)| i)
            .collect();

        let counts = result.counts();
        log::log!(
            level,
            "found {} defects ({} vacancies, {} interstitials, {} antisites); {} atoms in sub-system",
            counts.total,
            counts.vacancies,
            counts.interstitials,
            counts.antisites,
            result.sub_system.len(),
        );
        Ok(result)
    }
}

fn check_filter(
    filter: &'static str,
    ids: &IndexSet<SpeciesId>,
    table: &SpeciesTable,
) -> Result<(), ClassifyError> {
    match ids.iter().find(|id| !table.contains(**id)) {
        Some(&id) => Err(ClassifyError::UnknownFilterSpecies { filter, id }),
        None => Ok(()),
    }
}

/// Sub-system membership plus the input grid used to grow it.
struct Expansion<'a> {
    grid: &'a BoxGrid,
    region: &'a Region,
    input: &'a Configuration,
    radius2: f64,
    member: Vec<bool>,
}

impl Expansion<'_> {
    /// Add every input atom within the inclusion radius of `centre`,
    /// other than `skip`.
    fn gather(&mut self, centre: &Position, skip: Option<usize>) -> Result<(), ClassifyError> {
        for b in self.grid.neighbourhood_of(centre)? {
            for &atom in self.grid.box_points(b) {
                if Some(atom) == skip || self.member[atom] {
                    continue;
                }
                if self.region.separation2(self.input.position(atom), centre) < self.radius2 {
                    self.member[atom] = true;
                }
            }
        }
        Ok(())
    }
}
