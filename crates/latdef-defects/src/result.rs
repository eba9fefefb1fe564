//! Classification output.

/// A reference site occupied by an atom of the wrong species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Antisite {
    /// Reference-site index.
    pub site: usize,
    /// Input-atom index of the occupant.
    pub occupant: usize,
}

/// Number of defects found, by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefectCounts {
    /// `vacancies + interstitials + antisites`.
    pub total: usize,
    /// Number of vacancies.
    pub vacancies: usize,
    /// Number of interstitials.
    pub interstitials: usize,
    /// Number of antisites.
    pub antisites: usize,
}

impl DefectCounts {
    /// Counts in the legacy flat order `[total, vacancies, interstitials, antisites]`.
    pub fn to_array(self) -> [usize; 4] {
        [self.total, self.vacancies, self.interstitials, self.antisites]
    }
}

/// Everything one classification found.
///
/// Vacancies and antisite sites are reference indices in ascending
/// order; interstitials and the sub-system are input indices in
/// ascending order. The sub-system holds no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefectResult {
    /// Vacant reference sites.
    pub vacancies: Vec<usize>,
    /// Interstitial input atoms.
    pub interstitials: Vec<usize>,
    /// Antisite sites and their occupants.
    pub antisites: Vec<Antisite>,
    /// Input atoms within the inclusion radius of any reported defect,
    /// reported interstitials included.
    pub sub_system: Vec<usize>,
}

impl DefectResult {
    /// Per-kind defect counts.
    pub fn counts(&self) -> DefectCounts {
        let vacancies = self.vacancies.len();
        let interstitials = self.interstitials.len();
        let antisites = self.antisites.len();
        DefectCounts {
            total: vacancies + interstitials + antisites,
            vacancies,
            interstitials,
            antisites,
        }
    }

    /// Whether no defect of any kind was reported.
    pub fn is_perfect(&self) -> bool {
        self.counts().total == 0
    }
}
