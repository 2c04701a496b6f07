//! Design compounds: limits, outdoor levels, emission rates and
//! additive-effect mixture groups.

use iaq_core::{ConcentrationUnit, Real, to_ug_per_m3};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// One design compound, normalised to ug/m3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundSpec {
    pub name: String,
    /// Body that published the design limit
    pub authority: String,
    /// Breathing-zone design limit [ug/m3], > 0
    pub design_limit: Real,
    /// Default outdoor concentration [ug/m3], >= 0
    pub outdoor_concentration: Real,
    /// Emission per occupant [ug/(h person)], >= 0
    pub occupant_emission: Real,
}

impl CompoundSpec {
    pub fn new(name: impl Into<String>, design_limit: Real, outdoor_concentration: Real) -> Self {
        Self {
            name: name.into(),
            authority: String::new(),
            design_limit,
            outdoor_concentration,
            occupant_emission: 0.0,
        }
    }

    pub fn with_occupant_emission(mut self, rate: Real) -> Self {
        self.occupant_emission = rate;
        self
    }

    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into();
        self
    }

    pub(crate) fn validate(&self) -> CatalogResult<()> {
        let invalid = |what| CatalogError::InvalidRecord {
            name: self.name.clone(),
            what,
        };
        if !(self.design_limit.is_finite() && self.design_limit > 0.0) {
            return Err(invalid("design limit must be finite and > 0"));
        }
        if !(self.outdoor_concentration.is_finite() && self.outdoor_concentration >= 0.0) {
            return Err(invalid("outdoor concentration must be finite and >= 0"));
        }
        if !(self.occupant_emission.is_finite() && self.occupant_emission >= 0.0) {
            return Err(invalid("occupant emission must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Set of compounds whose health effects add up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureGroup {
    pub name: String,
    pub members: Vec<String>,
}

impl MixtureGroup {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, compound: &str) -> bool {
        let key = crate::normalize_key(compound);
        self.members.iter().any(|m| crate::normalize_key(m) == key)
    }
}

struct CompoundRow {
    name: &'static str,
    authority: &'static str,
    limit: f64,
    limit_unit: ConcentrationUnit,
    outdoor: f64,
    outdoor_unit: ConcentrationUnit,
    molar_mass: Option<f64>,
    per_person: f64,
}

use iaq_core::ConcentrationUnit::{Ppb, Ppm, UgPerM3};

const CAL_EPA: &str = "Cal EPA CREL (June 2016)";
const AGBB: &str = "AgBB LCI";

// 1,1,1-trichloroethane was removed from the design compounds (addendum q,
// Oct 2024); it still appears in emission data and one mixture group.
const DESIGN_COMPOUNDS: &[CompoundRow] = &[
    CompoundRow {
        name: "acetaldehyde",
        authority: CAL_EPA,
        limit: 140.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 114.0,
    },
    CompoundRow {
        name: "acetone",
        authority: AGBB,
        limit: 1200.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 1060.0,
    },
    CompoundRow {
        name: "benzene",
        authority: CAL_EPA,
        limit: 3.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 0.0,
    },
    CompoundRow {
        name: "dichloromethane",
        authority: CAL_EPA,
        limit: 400.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 0.0,
    },
    CompoundRow {
        name: "formaldehyde",
        authority: "Cal EPA 8-hour CREL (2004)",
        limit: 33.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 0.0,
    },
    CompoundRow {
        name: "naphthalene",
        authority: CAL_EPA,
        limit: 9.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 0.0,
    },
    CompoundRow {
        name: "phenol",
        authority: AGBB,
        limit: 70.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 0.0,
    },
    CompoundRow {
        name: "tetrachloroethylene",
        authority: CAL_EPA,
        limit: 35.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 0.0,
    },
    CompoundRow {
        name: "toluene",
        authority: CAL_EPA,
        limit: 300.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 7.7,
    },
    CompoundRow {
        name: "xylene, total",
        authority: AGBB,
        limit: 500.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 0.0,
    },
    CompoundRow {
        name: "carbon monoxide",
        authority: "U.S. EPA NAAQS",
        limit: 9.0,
        limit_unit: Ppm,
        outdoor: 1.0,
        outdoor_unit: Ppm,
        molar_mass: Some(28.01),
        per_person: 560.0,
    },
    CompoundRow {
        name: "pm2.5",
        authority: "U.S. EPA NAAQS (annual mean)",
        limit: 12.0,
        limit_unit: UgPerM3,
        outdoor: 10.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 0.0,
    },
    CompoundRow {
        name: "ozone",
        authority: "U.S. EPA NAAQS",
        limit: 70.0,
        limit_unit: Ppb,
        outdoor: 50.0,
        outdoor_unit: Ppb,
        molar_mass: Some(48.00),
        per_person: 0.0,
    },
    CompoundRow {
        name: "ammonia",
        authority: CAL_EPA,
        limit: 200.0,
        limit_unit: UgPerM3,
        outdoor: 0.0,
        outdoor_unit: UgPerM3,
        molar_mass: None,
        per_person: 1342.0,
    },
];

pub(crate) fn standard_compounds() -> CatalogResult<Vec<CompoundSpec>> {
    DESIGN_COMPOUNDS
        .iter()
        .map(|row| {
            Ok(CompoundSpec {
                name: row.name.to_string(),
                authority: row.authority.to_string(),
                design_limit: to_ug_per_m3(row.limit, row.limit_unit, row.molar_mass)?,
                outdoor_concentration: to_ug_per_m3(row.outdoor, row.outdoor_unit, row.molar_mass)?,
                occupant_emission: row.per_person,
            })
        })
        .collect()
}

pub(crate) fn standard_mixture_groups() -> Vec<MixtureGroup> {
    vec![
        MixtureGroup::new(
            "Upper Respiratory Tract Irritation",
            ["acetaldehyde", "acetone", "xylene, total", "ozone"],
        ),
        MixtureGroup::new(
            "Eye Irritation",
            ["acetaldehyde", "acetone", "formaldehyde", "xylene, total", "ozone"],
        ),
        MixtureGroup::new(
            "Central Nervous System",
            [
                "acetone",
                "dichloromethane",
                "xylene, total",
                "1,1,1-trichloroethane",
                "toluene",
            ],
        ),
    ]
}

// Area-specific emission rates [ug/(m2 h)].
type EmissionRow = &'static [(&'static str, f64)];

const CLASSROOM: EmissionRow = &[
    ("acetaldehyde", 16.5),
    ("acetone", 37.70),
    ("benzene", 0.21),
    ("dichloromethane", 1.18),
    ("formaldehyde", 59.2),
    ("naphthalene", 0.38),
    ("phenol", 6.25),
    ("tetrachloroethylene", 0.14),
    ("toluene", 3.84),
    ("1,1,1-trichloroethane", 0.12),
    ("xylene, total", 3.13),
];

const FOOD_SERVICE: EmissionRow = &[
    ("acetaldehyde", 260.0),
    ("acetone", 57.20),
    ("benzene", 3.14),
    ("dichloromethane", 2.95),
    ("formaldehyde", 65.1),
    ("naphthalene", 0.24),
    ("phenol", 4.32),
    ("tetrachloroethylene", 0.24),
    ("toluene", 10.20),
    ("1,1,1-trichloroethane", 0.11),
    ("xylene, total", 3.72),
];

const HEALTH_CARE: EmissionRow = &[
    ("acetaldehyde", 25.90),
    ("acetone", 433.00),
    ("benzene", 0.51),
    ("dichloromethane", 0.51),
    ("formaldehyde", 54.90),
    ("naphthalene", 0.46),
    ("phenol", 6.21),
    ("tetrachloroethylene", 1.82),
    ("toluene", 7.63),
    ("1,1,1-trichloroethane", 0.18),
    ("xylene, total", 12.80),
];

const HEALTH_CLUB: EmissionRow = &[
    ("acetaldehyde", 14.10),
    ("acetone", 75.60),
    ("benzene", 1.59),
    ("dichloromethane", 0.99),
    ("formaldehyde", 60.80),
    ("naphthalene", 0.46),
    ("phenol", 1.44),
    ("tetrachloroethylene", 0.27),
    ("toluene", 8.55),
    ("1,1,1-trichloroethane", 0.00),
    ("xylene, total", 4.43),
];

const OFFICE: EmissionRow = &[
    ("acetaldehyde", 22.10),
    ("acetone", 37.70),
    ("benzene", 0.21),
    ("dichloromethane", 1.18),
    ("formaldehyde", 37.50),
    ("naphthalene", 0.38),
    ("phenol", 6.25),
    ("tetrachloroethylene", 0.14),
    ("toluene", 3.84),
    ("1,1,1-trichloroethane", 0.12),
    ("xylene, total", 3.13),
];

// Carried as published; no xylene entry.
const RECEPTION: EmissionRow = &[
    ("acetaldehyde", 57.20),
    ("acetone", 3.14),
    ("benzene", 2.95),
    ("dichloromethane", 65.1),
    ("formaldehyde", 0.24),
    ("naphthalene", 4.32),
    ("phenol", 0.24),
    ("tetrachloroethylene", 10.20),
    ("toluene", 0.11),
    ("1,1,1-trichloroethane", 3.72),
];

const SALES: EmissionRow = &[
    ("acetaldehyde", 14.80),
    ("acetone", 50.9),
    ("benzene", 0.41),
    ("dichloromethane", 0.66),
    ("formaldehyde", 83.2),
    ("naphthalene", 1.06),
    ("phenol", 3.40),
    ("tetrachloroethylene", 1.40),
    ("toluene", 32.70),
    ("1,1,1-trichloroethane", 0.28),
    ("xylene, total", 11.14),
];

const AREA_EMISSIONS: &[(&str, EmissionRow)] = &[
    ("Art classroom", CLASSROOM),
    ("Bars, cocktail lounges", FOOD_SERVICE),
    ("Cafeteria/fast-food dining", FOOD_SERVICE),
    ("Classrooms (age 9 plus)", CLASSROOM),
    ("Classrooms (ages 5–8)", CLASSROOM),
    ("Dental operatory", HEALTH_CARE),
    ("General examination room", HEALTH_CARE),
    ("Health club/aerobics room", HEALTH_CLUB),
    ("Health club/weight rooms", HEALTH_CLUB),
    ("Office space", OFFICE),
    ("Reception areas", RECEPTION),
    ("Restaurant dining rooms", FOOD_SERVICE),
    ("Sales (except as below)", SALES),
];

pub(crate) fn standard_area_emissions() -> Vec<(String, Vec<(String, Real)>)> {
    AREA_EMISSIONS
        .iter()
        .map(|(occ, rows)| {
            (
                occ.to_string(),
                rows.iter().map(|(c, r)| (c.to_string(), *r)).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use iaq_core::{Tolerances, nearly_equal};

    #[test]
    fn standard_compounds_are_valid() {
        let compounds = standard_compounds().unwrap();
        assert_eq!(compounds.len(), 14);
        for c in &compounds {
            c.validate().unwrap();
        }
    }

    #[test]
    fn volumetric_limits_are_converted() {
        let compounds = standard_compounds().unwrap();
        let tol = Tolerances {
            abs: 1e-6,
            rel: 1e-9,
        };
        let co = compounds.iter().find(|c| c.name == "carbon monoxide").unwrap();
        assert!(nearly_equal(co.design_limit, 9.0 * 28.01 / 24.45 * 1000.0, tol));
        assert!(nearly_equal(co.outdoor_concentration, 28.01 / 24.45 * 1000.0, tol));

        let ozone = compounds.iter().find(|c| c.name == "ozone").unwrap();
        assert!(nearly_equal(ozone.design_limit, 70.0 * 48.0 / 24.45, tol));
    }

    #[test]
    fn mixture_membership_is_case_insensitive() {
        let groups = standard_mixture_groups();
        let eye = groups.iter().find(|g| g.name == "Eye Irritation").unwrap();
        assert!(eye.contains("Formaldehyde"));
        assert!(!eye.contains("benzene"));
    }

    #[test]
    fn invalid_limit_is_rejected() {
        let bad = CompoundSpec::new("nothing", 0.0, 0.0);
        assert!(matches!(
            bad.validate(),
            Err(CatalogError::InvalidRecord { .. })
        ));
    }
}
