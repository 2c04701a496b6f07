//! Scenario definition: raw parameters in, canonical scenario out.

use std::fmt;
use std::str::FromStr;

use iaq_catalog::{CleanerType, OccupancyProfile};
use iaq_core::{Area, Real, VolumeRate};
use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// Where the air-cleaning device sits relative to the point where outdoor
/// and recirculated air mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterPosition {
    /// Downstream of mixing: the cleaner treats the mixed supply air.
    A,
    /// Upstream of mixing: the cleaner treats recirculated air only.
    B,
}

impl fmt::Display for FilterPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

impl FromStr for FilterPosition {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            _ => Err(SolverError::UnsupportedVariant {
                what: "filter position",
                value: s.to_string(),
            }),
        }
    }
}

/// Air-handling system type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SystemType {
    /// Constant supply volume.
    ConstantVolume,
    /// Variable air volume at `flow_reduction` of design supply, in (0, 1].
    VariableAirVolume { flow_reduction: Real },
}

impl SystemType {
    /// Design flow-reduction fraction `Fr` (1 for constant volume).
    pub fn flow_reduction(&self) -> Real {
        match self {
            Self::ConstantVolume => 1.0,
            Self::VariableAirVolume { flow_reduction } => *flow_reduction,
        }
    }

    pub fn is_vav(&self) -> bool {
        matches!(self, Self::VariableAirVolume { .. })
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstantVolume => write!(f, "constant volume"),
            Self::VariableAirVolume { flow_reduction } => {
                write!(f, "VAV (Fr = {:.2})", flow_reduction)
            }
        }
    }
}

/// Airflow units the presentation layer should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputUnits {
    Cfm,
    Cmh,
    #[default]
    Both,
}

impl FromStr for OutputUnits {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cfm" => Ok(Self::Cfm),
            "cmh" | "m3/h" => Ok(Self::Cmh),
            "both" => Ok(Self::Both),
            _ => Err(SolverError::UnsupportedVariant {
                what: "output units",
                value: s.to_string(),
            }),
        }
    }
}

/// Scenario parameters exactly as a user or scenario file supplies them.
///
/// Every field is optional; gaps are filled from [`ResolverDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawParams {
    /// Label used in batch output
    pub name: Option<String>,
    pub occupancy: Option<String>,
    pub area_m2: Option<Real>,
    pub area_ft2: Option<Real>,
    pub num_people: Option<u32>,
    /// Recirculated share of supply air, `R`
    #[serde(alias = "R")]
    pub recirculation_ratio: Option<Real>,
    /// Recirculation airflow [cfm]; wins over `recirc_cmh` and the ratio
    pub recirc_cfm: Option<Real>,
    /// Recirculation airflow [m3/h]
    pub recirc_cmh: Option<Real>,
    /// Global cleaner efficiency `Ef`
    #[serde(alias = "Ef")]
    pub ef: Option<Real>,
    /// Zone air-distribution effectiveness `Ez`
    #[serde(alias = "Ez")]
    pub ez: Option<Real>,
    #[serde(alias = "safe_factor")]
    pub safety_factor: Option<Real>,
    #[serde(alias = "loc")]
    pub filter_position: Option<String>,
    /// `cv` or `vav`
    pub system: Option<String>,
    /// VAV flow-reduction fraction `Fr`
    pub flow_reduction: Option<Real>,
    pub cleaner: Option<String>,
    pub units: Option<String>,
}

/// Fallback values used when a raw parameter is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverDefaults {
    pub occupancy: String,
    pub area_m2: Option<Real>,
    pub recirculation_ratio: Real,
    pub ef: Real,
    pub ez: Real,
    pub safety_factor: Real,
    pub filter_position: String,
    pub system: String,
    pub flow_reduction: Real,
    pub cleaner: String,
    pub units: String,
}

impl Default for ResolverDefaults {
    fn default() -> Self {
        Self {
            occupancy: "Classrooms (age 9 plus)".to_string(),
            area_m2: Some(90.0),
            recirculation_ratio: 0.0,
            ef: 0.5,
            ez: 1.0,
            safety_factor: 1.0,
            filter_position: "A".to_string(),
            system: "cv".to_string(),
            flow_reduction: 1.0,
            cleaner: "generic".to_string(),
            units: "both".to_string(),
        }
    }
}

/// Canonical, validated scenario. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub name: Option<String>,
    pub occupancy: OccupancyProfile,
    pub area: Area,
    pub population: u32,
    /// Recirculated share of supply air, in [0, 1)
    pub recirculation_ratio: Real,
    /// Absolute recirculation airflow `R` was derived from, if one was given
    pub recirculation_airflow: Option<VolumeRate>,
    /// Global cleaner efficiency `Ef`, 0 disables cleaning
    pub efficiency: Real,
    pub cleaner: CleanerType,
    /// Zone air-distribution effectiveness `Ez`
    pub ez: Real,
    pub safety_factor: Real,
    pub filter_position: FilterPosition,
    pub system: SystemType,
    pub units: OutputUnits,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_position_parses_loosely() {
        assert_eq!(" a ".parse::<FilterPosition>().unwrap(), FilterPosition::A);
        assert_eq!("B".parse::<FilterPosition>().unwrap(), FilterPosition::B);
    }

    #[test]
    fn unknown_filter_position_is_unsupported() {
        let err = "C".parse::<FilterPosition>().unwrap_err();
        assert!(matches!(
            err,
            SolverError::UnsupportedVariant {
                what: "filter position",
                ..
            }
        ));
    }

    #[test]
    fn flow_reduction_defaults_to_one_for_constant_volume() {
        assert_eq!(SystemType::ConstantVolume.flow_reduction(), 1.0);
        let vav = SystemType::VariableAirVolume {
            flow_reduction: 0.4,
        };
        assert_eq!(vav.flow_reduction(), 0.4);
        assert!(vav.is_vav());
    }

    #[test]
    fn output_units_parse() {
        assert_eq!("CFM".parse::<OutputUnits>().unwrap(), OutputUnits::Cfm);
        assert_eq!("cmh".parse::<OutputUnits>().unwrap(), OutputUnits::Cmh);
        assert!("furlongs".parse::<OutputUnits>().is_err());
    }

    #[test]
    fn built_in_defaults() {
        let d = ResolverDefaults::default();
        assert_eq!(d.area_m2, Some(90.0));
        assert_eq!(d.ef, 0.5);
        assert_eq!(d.ez, 1.0);
        assert_eq!(d.safety_factor, 1.0);
        assert_eq!(d.filter_position, "A");
    }
}
