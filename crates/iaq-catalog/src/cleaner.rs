//! Air-cleaner removal efficiencies per compound.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use iaq_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::normalize_key;

/// Kind of air-cleaning device installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanerType {
    /// Reference cleaner with tabulated per-compound efficiencies.
    #[default]
    Generic,
    /// Device rated by one efficiency for every compound (the global `Ef`).
    Uniform,
}

impl fmt::Display for CleanerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => write!(f, "generic"),
            Self::Uniform => write!(f, "uniform"),
        }
    }
}

impl FromStr for CleanerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "reference" | "default" => Ok(Self::Generic),
            "uniform" | "global" => Ok(Self::Uniform),
            other => Err(other.to_string()),
        }
    }
}

const GENERIC_EFFICIENCIES: &[(&str, f64)] = &[
    ("acetaldehyde", 0.315),
    ("acetone", 0.525),
    ("benzene", 0.986),
    ("dichloromethane", 0.398),
    ("formaldehyde", 0.397),
    ("naphthalene", 0.987),
    ("phenol", 0.259),
    ("tetrachloroethylene", 0.977),
    ("toluene", 0.985),
    ("1,1,1-trichloroethane", 0.41),
    ("xylene, total", 0.981),
    ("carbon monoxide", 0.007),
    ("pm2.5", 0.77),
    ("ozone", 0.985),
    ("ammonia", 0.12),
];

/// Read-only map (compound, cleaner type) -> removal efficiency in [0, 1].
#[derive(Debug, Clone, Default)]
pub struct CleanerEfficiencyTable {
    entries: HashMap<(CleanerType, String), Real>,
}

impl CleanerEfficiencyTable {
    /// Table with no entries: every lookup falls back to the global efficiency.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reference cleaner efficiencies for the design compounds.
    pub fn standard() -> Self {
        let entries = GENERIC_EFFICIENCIES
            .iter()
            .map(|(c, e)| ((CleanerType::Generic, normalize_key(c)), *e))
            .collect();
        Self { entries }
    }

    /// Add or replace one entry.
    pub fn with_entry(
        mut self,
        compound: &str,
        cleaner: CleanerType,
        efficiency: Real,
    ) -> CatalogResult<Self> {
        if !(0.0..=1.0).contains(&efficiency) {
            return Err(CatalogError::InvalidRecord {
                name: compound.to_string(),
                what: "cleaner efficiency must lie in [0, 1]",
            });
        }
        self.entries
            .insert((cleaner, normalize_key(compound)), efficiency);
        Ok(self)
    }

    /// Tabulated efficiency, if any.
    pub fn efficiency(&self, compound: &str, cleaner: CleanerType) -> Option<Real> {
        self.entries
            .get(&(cleaner, normalize_key(compound)))
            .copied()
    }

    /// Efficiency applied to `compound`.
    ///
    /// A global efficiency of zero disables cleaning outright; otherwise the
    /// tabulated value wins and the global value fills the gaps.
    pub fn effective_efficiency(
        &self,
        compound: &str,
        cleaner: CleanerType,
        global: Real,
    ) -> Real {
        if global == 0.0 {
            return 0.0;
        }
        self.efficiency(compound, cleaner).unwrap_or(global)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_lookup_ignores_case() {
        let table = CleanerEfficiencyTable::standard();
        assert_eq!(
            table.efficiency("Benzene", CleanerType::Generic),
            Some(0.986)
        );
        assert_eq!(table.efficiency("benzene", CleanerType::Uniform), None);
    }

    #[test]
    fn zero_global_disables_cleaning() {
        let table = CleanerEfficiencyTable::standard();
        assert_eq!(
            table.effective_efficiency("ozone", CleanerType::Generic, 0.0),
            0.0
        );
    }

    #[test]
    fn missing_entry_falls_back_to_global() {
        let table = CleanerEfficiencyTable::standard();
        assert_eq!(
            table.effective_efficiency("radon", CleanerType::Generic, 0.5),
            0.5
        );
        assert_eq!(
            table.effective_efficiency("ozone", CleanerType::Uniform, 0.5),
            0.5
        );
        assert_eq!(
            table.effective_efficiency("ozone", CleanerType::Generic, 0.5),
            0.985
        );
    }

    #[test]
    fn out_of_range_entry_is_rejected() {
        let err = CleanerEfficiencyTable::empty()
            .with_entry("ozone", CleanerType::Generic, 1.2)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { .. }));
    }

    #[test]
    fn cleaner_type_parses() {
        assert_eq!("Uniform".parse::<CleanerType>(), Ok(CleanerType::Uniform));
        assert!("hepa-9000".parse::<CleanerType>().is_err());
    }
}
