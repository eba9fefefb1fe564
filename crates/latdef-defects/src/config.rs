//! Classifier configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use indexmap::IndexSet;
use latdef_core::SpeciesId;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ClassifyConfig::validate()`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A search radius is NaN, infinite, zero, or negative.
    InvalidRadius {
        /// Which radius, `"vacancy_radius"` or `"inclusion_radius"`.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── ClassifyConfig ─────────────────────────────────────────────────

/// Complete configuration for a [`DefectClassifier`](crate::DefectClassifier).
///
/// Species filters hold ids local to the table they filter:
/// `force_interstitial` and `exclude_input` refer to the input
/// configuration's table, `exclude_reference` to the reference table.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifyConfig {
    /// Maximum separation for an input atom to occupy a reference site. Default: 1.3.
    pub vacancy_radius: f64,
    /// Radius around each defect gathered into the sub-system. Default: 1.75.
    pub inclusion_radius: f64,
    /// Report vacancies. Default: true.
    pub include_vacancies: bool,
    /// Report interstitials. Default: true.
    pub include_interstitials: bool,
    /// Report antisites. Default: true.
    pub include_antisites: bool,
    /// Input species always reported as interstitial, matched or not.
    pub force_interstitial: IndexSet<SpeciesId>,
    /// Input species never reported as interstitial.
    pub exclude_input: IndexSet<SpeciesId>,
    /// Reference species whose sites are never reported.
    pub exclude_reference: IndexSet<SpeciesId>,
    /// Above 2, phase summaries are logged at `info` instead of `debug`.
    pub verbosity: u8,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            vacancy_radius: 1.3,
            inclusion_radius: 1.75,
            include_vacancies: true,
            include_interstitials: true,
            include_antisites: true,
            force_interstitial: IndexSet::new(),
            exclude_input: IndexSet::new(),
            exclude_reference: IndexSet::new(),
            verbosity: 0,
        }
    }
}

impl ClassifyConfig {
    /// Set the vacancy radius.
    pub fn with_vacancy_radius(mut self, radius: f64) -> Self {
        self.vacancy_radius = radius;
        self
    }

    /// Set the inclusion radius.
    pub fn with_inclusion_radius(mut self, radius: f64) -> Self {
        self.inclusion_radius = radius;
        self
    }

    /// Choose which defect kinds are reported.
    pub fn with_kinds(mut self, vacancies: bool, interstitials: bool, antisites: bool) -> Self {
        self.include_vacancies = vacancies;
        self.include_interstitials = interstitials;
        self.include_antisites = antisites;
        self
    }

    /// Always report these input species as interstitials.
    pub fn with_force_interstitial(mut self, ids: impl IntoIterator<Item = SpeciesId>) -> Self {
        self.force_interstitial.extend(ids);
        self
    }

    /// Never report these input species as interstitials.
    pub fn with_exclude_input(mut self, ids: impl IntoIterator<Item = SpeciesId>) -> Self {
        self.exclude_input.extend(ids);
        self
    }

    /// Never report sites of these reference species.
    pub fn with_exclude_reference(mut self, ids: impl IntoIterator<Item = SpeciesId>) -> Self {
        self.exclude_reference.extend(ids);
        self
    }

    /// Set the log verbosity.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Validate all structural invariants.
    ///
    /// Species filters can only be checked against concrete tables, so
    /// they are validated by [`classify`](crate::DefectClassifier::classify).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("vacancy_radius", self.vacancy_radius),
            ("inclusion_radius", self.inclusion_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidRadius { name, value });
            }
        }
        Ok(())
    }

    /// Log level for phase summaries at this verbosity.
    pub(crate) fn summary_level(&self) -> log::Level {
        if self.verbosity > 2 {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}
