use std::collections::HashMap;

use iaq_core::Real;
use serde::Serialize;
use tracing::{debug, warn};

use crate::compound::{
    CompoundSpec, MixtureGroup, standard_area_emissions, standard_compounds,
    standard_mixture_groups,
};
use crate::error::{CatalogError, CatalogResult};
use crate::normalize_key;
use crate::occupancy::{OccupancyProfile, standard_profiles};

/// A design compound as seen by one occupancy category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContaminantRecord {
    pub compound: String,
    /// Mixture groups this compound belongs to (empty when ungrouped)
    pub groups: Vec<String>,
    /// Design limit [ug/m3]
    pub design_limit: Real,
    /// Default outdoor concentration [ug/m3]
    pub outdoor_concentration: Real,
    /// Area-specific emission [ug/(m2 h)]
    pub area_emission: Real,
    /// Per-occupant emission [ug/(h person)]
    pub occupant_emission: Real,
}

impl ContaminantRecord {
    /// Total generation rate `N` [ug/h] for a zone.
    pub fn emission_rate(&self, area_m2: Real, population: u32) -> Real {
        self.area_emission * area_m2 + self.occupant_emission * Real::from(population)
    }
}

/// Read-only store of occupancy profiles, design compounds, area emission
/// rates and mixture groups.
///
/// Built once and shared by reference; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct ContaminantCatalog {
    occupancies: Vec<OccupancyProfile>,
    compounds: Vec<CompoundSpec>,
    area_emissions: HashMap<String, HashMap<String, Real>>,
    groups: Vec<MixtureGroup>,
}

impl ContaminantCatalog {
    /// Catalog from explicit tables, without any area emission data.
    pub fn new(
        occupancies: Vec<OccupancyProfile>,
        compounds: Vec<CompoundSpec>,
        groups: Vec<MixtureGroup>,
    ) -> CatalogResult<Self> {
        for c in &compounds {
            c.validate()?;
        }
        for o in &occupancies {
            let rates = [
                o.rp_cfm_per_person,
                o.ra_cfm_per_ft2,
                o.default_density_per_1000ft2,
            ];
            if rates.iter().any(|r| !r.is_finite() || *r < 0.0) {
                return Err(CatalogError::InvalidRecord {
                    name: o.name.clone(),
                    what: "occupancy rates must be finite and >= 0",
                });
            }
        }
        Ok(Self {
            occupancies,
            compounds,
            area_emissions: HashMap::new(),
            groups,
        })
    }

    /// The tabulated design compounds, occupancy categories and emission data.
    pub fn standard() -> CatalogResult<Self> {
        let mut catalog = Self::new(
            standard_profiles(),
            standard_compounds()?,
            standard_mixture_groups(),
        )?;
        for (occupancy, rates) in standard_area_emissions() {
            catalog = catalog.with_area_emissions(&occupancy, rates)?;
        }
        Ok(catalog)
    }

    /// Attach area-specific emission rates [ug/(m2 h)] to an occupancy.
    ///
    /// Rates for compounds outside the design set are kept but never reported.
    pub fn with_area_emissions<I, S>(mut self, occupancy: &str, rates: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = (S, Real)>,
        S: AsRef<str>,
    {
        let key = normalize_key(self.occupancy(occupancy)?.name.as_str());
        let mut table = HashMap::new();
        for (compound, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(CatalogError::InvalidRecord {
                    name: compound.as_ref().to_string(),
                    what: "area emission rate must be finite and >= 0",
                });
            }
            table.insert(normalize_key(compound.as_ref()), rate);
        }
        self.area_emissions.insert(key, table);
        Ok(self)
    }

    pub fn occupancy(&self, name: &str) -> CatalogResult<&OccupancyProfile> {
        let key = normalize_key(name);
        self.occupancies
            .iter()
            .find(|o| normalize_key(&o.name) == key)
            .ok_or_else(|| CatalogError::UnknownOccupancy {
                name: name.to_string(),
            })
    }

    pub fn occupancies(&self) -> &[OccupancyProfile] {
        &self.occupancies
    }

    pub fn filter_occupancies(&self, query: &str) -> Vec<&OccupancyProfile> {
        self.occupancies
            .iter()
            .filter(|o| o.matches_query(query))
            .collect()
    }

    pub fn compound(&self, name: &str) -> CatalogResult<&CompoundSpec> {
        let key = normalize_key(name);
        self.compounds
            .iter()
            .find(|c| normalize_key(&c.name) == key)
            .ok_or_else(|| CatalogError::UnknownCompound {
                name: name.to_string(),
            })
    }

    pub fn compounds(&self) -> &[CompoundSpec] {
        &self.compounds
    }

    pub fn mixture_groups(&self) -> &[MixtureGroup] {
        &self.groups
    }

    pub fn has_area_emissions(&self, occupancy: &str) -> bool {
        self.area_emissions.contains_key(&normalize_key(occupancy))
    }

    /// Every design compound with the emission data of `occupancy`.
    pub fn contaminants(&self, occupancy: &str) -> CatalogResult<Vec<ContaminantRecord>> {
        let profile = self.occupancy(occupancy)?;
        let area_rates = self.area_emissions.get(&normalize_key(&profile.name));
        if area_rates.is_none() {
            warn!(
                occupancy = %profile.name,
                "no area emission data for occupancy; area emissions set to zero"
            );
        }

        let records = self
            .compounds
            .iter()
            .map(|spec| {
                let key = normalize_key(&spec.name);
                let area_emission = area_rates
                    .and_then(|rates| rates.get(&key))
                    .copied()
                    .unwrap_or(0.0);
                let groups = self
                    .groups
                    .iter()
                    .filter(|g| g.contains(&spec.name))
                    .map(|g| g.name.clone())
                    .collect();
                ContaminantRecord {
                    compound: spec.name.clone(),
                    groups,
                    design_limit: spec.design_limit,
                    outdoor_concentration: spec.outdoor_concentration,
                    area_emission,
                    occupant_emission: spec.occupant_emission,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            occupancy = %profile.name,
            count = records.len(),
            "resolved contaminant records"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_builds() {
        let catalog = ContaminantCatalog::standard().unwrap();
        assert_eq!(catalog.compounds().len(), 14);
        assert_eq!(catalog.mixture_groups().len(), 3);
        assert!(catalog.has_area_emissions("office space"));
        assert!(!catalog.has_area_emissions("Warehouses"));
    }

    #[test]
    fn occupancy_lookup_trims_and_ignores_case() {
        let catalog = ContaminantCatalog::standard().unwrap();
        let office = catalog.occupancy("  OFFICE SPACE ").unwrap();
        assert_eq!(office.name, "Office space");
        assert_eq!(office.rp_cfm_per_person, 5.0);
        assert_eq!(office.ra_cfm_per_ft2, 0.06);
    }

    #[test]
    fn unknown_names_are_reported() {
        let catalog = ContaminantCatalog::standard().unwrap();
        assert_eq!(
            catalog.occupancy("Moon base").unwrap_err(),
            CatalogError::UnknownOccupancy {
                name: "Moon base".into()
            }
        );
        assert!(matches!(
            catalog.compound("radon"),
            Err(CatalogError::UnknownCompound { .. })
        ));
    }

    #[test]
    fn office_records_carry_area_and_occupant_emission() {
        let catalog = ContaminantCatalog::standard().unwrap();
        let records = catalog.contaminants("Office space").unwrap();
        let acetone = records.iter().find(|r| r.compound == "acetone").unwrap();
        assert_eq!(acetone.area_emission, 37.70);
        assert_eq!(acetone.occupant_emission, 1060.0);
        assert_eq!(acetone.groups.len(), 3);
        let tol = iaq_core::Tolerances::default();
        assert!(iaq_core::nearly_equal(
            acetone.emission_rate(10.0, 2),
            377.0 + 2120.0,
            tol
        ));

        let benzene = records.iter().find(|r| r.compound == "benzene").unwrap();
        assert!(benzene.groups.is_empty());
    }

    #[test]
    fn missing_area_data_means_zero_area_emission() {
        let catalog = ContaminantCatalog::standard().unwrap();
        let records = catalog.contaminants("Warehouses").unwrap();
        assert!(records.iter().all(|r| r.area_emission == 0.0));
    }

    #[test]
    fn filter_finds_classrooms() {
        let catalog = ContaminantCatalog::standard().unwrap();
        let hits = catalog.filter_occupancies("classroom");
        assert!(hits.len() >= 4);
    }
}
