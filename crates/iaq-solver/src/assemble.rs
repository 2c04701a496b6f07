//! Sizing result: every model evaluated at the governing airflow.

use iaq_core::{Real, VolumeRate, flow_cfm, flow_m3ph, m3ph};
use serde::{Serialize, Serializer};

use crate::error::Constraint;
use crate::mass_balance::AffineConcentrationModel;
use crate::mixture::{LimitTerm, combined_fraction};
use crate::scenario::{OutputUnits, Scenario};
use crate::select::Selection;

fn as_m3h<S: Serializer>(q: &VolumeRate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(flow_m3ph(*q))
}

/// One compound, sized and evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContaminantReport {
    pub compound: String,
    pub groups: Vec<String>,
    /// Generation rate `N` [ug/h]
    pub emission_rate: Real,
    /// Outdoor concentration `Co` [ug/m3]
    pub outdoor_concentration: Real,
    /// Cleaner efficiency applied to this compound
    pub efficiency: Real,
    /// Design limit [ug/m3]
    pub design_limit: Real,
    pub model: AffineConcentrationModel,
    /// Airflow this compound alone needs [m3/h]
    pub required_airflow_m3h: Real,
    /// Breathing-zone concentration at `Voz*` [ug/m3]
    pub concentration: Real,
    pub percent_of_limit: Real,
}

/// One mixture group, sized and evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub name: String,
    /// Members present in the resolved contaminant set
    pub members: Vec<String>,
    pub required_airflow_m3h: Real,
    /// `sum(C_i / limit_i)` at `Voz*`
    pub combined_fraction: Real,
    /// Allowed fraction (the safety factor)
    pub allowed: Real,
}

/// Outdoor, recirculated and total airflows at `Voz*` [m3/h].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirflowSummary {
    pub outdoor_m3h: Real,
    /// Supply airflow `Vr = Voz / (1 - R)`
    pub supply_m3h: Real,
    pub recirculated_m3h: Real,
    pub total_m3h: Real,
    /// Outdoor share of the total airflow
    pub outdoor_fraction: Real,
}

impl AirflowSummary {
    pub fn at(voz_m3h: Real, recirculation_ratio: Real) -> Self {
        let supply = voz_m3h / (1.0 - recirculation_ratio);
        let recirculated = recirculation_ratio * supply;
        let total = voz_m3h + recirculated;
        let outdoor_fraction = if total > 0.0 { voz_m3h / total } else { 0.0 };
        Self {
            outdoor_m3h: voz_m3h,
            supply_m3h: supply,
            recirculated_m3h: recirculated,
            total_m3h: total,
            outdoor_fraction,
        }
    }
}

/// Complete sizing of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    pub name: Option<String>,
    pub occupancy: String,
    /// Governing outdoor airflow `Voz*`
    #[serde(rename = "outdoor_airflow_m3h", serialize_with = "as_m3h")]
    pub outdoor_airflow: VolumeRate,
    #[serde(rename = "baseline_airflow_m3h", serialize_with = "as_m3h")]
    pub baseline_airflow: VolumeRate,
    pub governing: Constraint,
    pub safety_factor: Real,
    /// Preferred airflow units for presentation
    pub units: OutputUnits,
    pub airflows: AirflowSummary,
    pub contaminants: Vec<ContaminantReport>,
    pub groups: Vec<GroupReport>,
}

impl SizingResult {
    pub fn outdoor_airflow_cfm(&self) -> Real {
        flow_cfm(self.outdoor_airflow)
    }

    pub fn outdoor_airflow_m3h(&self) -> Real {
        flow_m3ph(self.outdoor_airflow)
    }

    pub fn baseline_airflow_cfm(&self) -> Real {
        flow_cfm(self.baseline_airflow)
    }

    pub fn contaminant(&self, compound: &str) -> Option<&ContaminantReport> {
        self.contaminants
            .iter()
            .find(|c| c.compound.eq_ignore_ascii_case(compound.trim()))
    }

    pub fn group(&self, name: &str) -> Option<&GroupReport> {
        self.groups
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Per-compound solver output handed to [`assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContaminantSizing {
    pub compound: String,
    pub groups: Vec<String>,
    pub emission_rate: Real,
    pub outdoor_concentration: Real,
    pub efficiency: Real,
    pub term: LimitTerm,
    pub required_airflow_m3h: Real,
}

/// Per-group solver output handed to [`assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSizing {
    pub name: String,
    pub members: Vec<String>,
    pub terms: Vec<LimitTerm>,
    pub required_airflow_m3h: Real,
}

pub fn assemble(
    scenario: &Scenario,
    baseline: VolumeRate,
    selection: Selection,
    contaminants: Vec<ContaminantSizing>,
    groups: Vec<GroupSizing>,
) -> SizingResult {
    let voz = selection.airflow;

    let contaminants = contaminants
        .into_iter()
        .map(|c| {
            let concentration = c.term.model.concentration_at(voz);
            ContaminantReport {
                compound: c.compound,
                groups: c.groups,
                emission_rate: c.emission_rate,
                outdoor_concentration: c.outdoor_concentration,
                efficiency: c.efficiency,
                design_limit: c.term.limit,
                model: c.term.model,
                required_airflow_m3h: c.required_airflow_m3h,
                concentration,
                percent_of_limit: concentration / c.term.limit * 100.0,
            }
        })
        .collect();

    let groups = groups
        .into_iter()
        .map(|g| GroupReport {
            combined_fraction: combined_fraction(&g.terms, voz),
            name: g.name,
            members: g.members,
            required_airflow_m3h: g.required_airflow_m3h,
            allowed: scenario.safety_factor,
        })
        .collect();

    SizingResult {
        name: scenario.name.clone(),
        occupancy: scenario.occupancy.name.clone(),
        outdoor_airflow: m3ph(voz),
        baseline_airflow: baseline,
        governing: selection.governing,
        safety_factor: scenario.safety_factor,
        units: scenario.units,
        airflows: AirflowSummary::at(voz, scenario.recirculation_ratio),
        contaminants,
        groups,
    }
}
