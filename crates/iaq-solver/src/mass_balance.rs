//! Steady-state zone mass balance.
//!
//! For a well-mixed zone with outdoor airflow `Voz` [m3/h], the breathing-zone
//! concentration of one compound is affine in `1 / Voz`:
//!
//! ```text
//! Cbz(Voz) = intercept + slope / Voz
//! ```
//!
//! Which intercept and slope apply depends on where the air cleaner sits and
//! on the air-handling system. Each of the four (position, system) pairs maps
//! to one pure formula through [`MassBalanceVariant`].

use iaq_core::{Real, ensure_finite};
use serde::Serialize;

use crate::error::{SolverError, SolverResult};
use crate::scenario::{FilterPosition, SystemType};

/// `Cbz(Voz) = intercept + slope / Voz`, concentrations in ug/m3, `Voz` in m3/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AffineConcentrationModel {
    /// Concentration as `Voz` grows without bound [ug/m3]
    pub intercept: Real,
    /// Emission-driven term [ug/h]
    pub slope: Real,
}

impl AffineConcentrationModel {
    /// Concentration at `voz_m3h`. A flat model (`slope == 0`) returns its
    /// intercept for any airflow, including zero.
    pub fn concentration_at(&self, voz_m3h: Real) -> Real {
        if self.slope == 0.0 {
            return self.intercept;
        }
        self.intercept + self.slope / voz_m3h
    }

    /// True when the concentration does not depend on the outdoor airflow.
    pub fn is_flat(&self) -> bool {
        self.slope == 0.0
    }
}

/// Per-compound source terms plus the scenario's design conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBalanceInputs {
    /// Generation rate `N` [ug/h]
    pub emission_rate: Real,
    /// Outdoor concentration `Co` [ug/m3]
    pub outdoor_concentration: Real,
    /// Recirculated share of supply air `R`, in [0, 1)
    pub recirculation_ratio: Real,
    /// Effective cleaner efficiency `Ef` for this compound, in [0, 1]
    pub efficiency: Real,
    /// Zone air-distribution effectiveness `Ez`
    pub ez: Real,
}

impl MassBalanceInputs {
    fn check(&self) -> SolverResult<()> {
        ensure_finite(self.emission_rate, "emission rate")?;
        ensure_finite(self.outdoor_concentration, "outdoor concentration")?;
        ensure_finite(self.recirculation_ratio, "recirculation ratio")?;
        ensure_finite(self.efficiency, "cleaner efficiency")?;
        ensure_finite(self.ez, "Ez")?;
        if self.emission_rate < 0.0 {
            return Err(SolverError::invalid(
                "emission_rate",
                format!("must be >= 0, got {}", self.emission_rate),
            ));
        }
        if self.outdoor_concentration < 0.0 {
            return Err(SolverError::invalid(
                "outdoor_concentration",
                format!("must be >= 0, got {}", self.outdoor_concentration),
            ));
        }
        if !(0.0..1.0).contains(&self.recirculation_ratio) {
            return Err(SolverError::invalid(
                "recirculation_ratio",
                format!("must lie in [0, 1), got {}", self.recirculation_ratio),
            ));
        }
        if !(0.0..=1.0).contains(&self.efficiency) {
            return Err(SolverError::invalid(
                "ef",
                format!("must lie in [0, 1], got {}", self.efficiency),
            ));
        }
        if self.ez <= 0.0 {
            return Err(SolverError::invalid(
                "ez",
                format!("must be > 0, got {}", self.ez),
            ));
        }
        Ok(())
    }
}

type Formula = fn(&MassBalanceInputs, Real) -> AffineConcentrationModel;

/// The four mass-balance formulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MassBalanceVariant {
    /// Cleaner on mixed supply air, constant volume
    MixedConstant,
    /// Cleaner on mixed supply air, VAV
    MixedVav,
    /// Cleaner on recirculated air only, constant volume
    RecirculatedConstant,
    /// Cleaner on recirculated air only, VAV
    RecirculatedVav,
}

impl MassBalanceVariant {
    pub fn select(position: FilterPosition, system: &SystemType) -> Self {
        match (position, system.is_vav()) {
            (FilterPosition::A, false) => Self::MixedConstant,
            (FilterPosition::A, true) => Self::MixedVav,
            (FilterPosition::B, false) => Self::RecirculatedConstant,
            (FilterPosition::B, true) => Self::RecirculatedVav,
        }
    }

    fn formula(self) -> Formula {
        match self {
            Self::MixedConstant => mixed_constant_volume,
            Self::MixedVav => mixed_vav,
            Self::RecirculatedConstant => recirculated_constant_volume,
            Self::RecirculatedVav => recirculated_vav,
        }
    }
}

/// Cleaning credit of the recirculation loop, `k = Fr R Ef / (1 - R)`.
fn cleaning_credit(inputs: &MassBalanceInputs, fr: Real) -> Real {
    let r = inputs.recirculation_ratio;
    if r == 0.0 || inputs.efficiency == 0.0 {
        return 0.0;
    }
    fr * r * inputs.efficiency / (1.0 - r)
}

fn mixed_constant_volume(inputs: &MassBalanceInputs, _fr: Real) -> AffineConcentrationModel {
    let k = cleaning_credit(inputs, 1.0);
    AffineConcentrationModel {
        intercept: (1.0 - inputs.efficiency) * inputs.outdoor_concentration / (1.0 + k),
        slope: inputs.emission_rate / (inputs.ez * (1.0 + k)),
    }
}

fn recirculated_constant_volume(
    inputs: &MassBalanceInputs,
    _fr: Real,
) -> AffineConcentrationModel {
    let k = cleaning_credit(inputs, 1.0);
    AffineConcentrationModel {
        intercept: inputs.outdoor_concentration / (1.0 + k),
        slope: inputs.emission_rate / (inputs.ez * (1.0 + k)),
    }
}

fn mixed_vav(inputs: &MassBalanceInputs, fr: Real) -> AffineConcentrationModel {
    let outdoor = (1.0 - inputs.efficiency) * inputs.outdoor_concentration;
    if inputs.recirculation_ratio == 0.0 {
        // 100 % outdoor air: Ez acts on the reduced instantaneous airflow
        return AffineConcentrationModel {
            intercept: outdoor,
            slope: inputs.emission_rate / (inputs.ez * fr),
        };
    }
    let k = cleaning_credit(inputs, fr);
    AffineConcentrationModel {
        intercept: outdoor / (1.0 + k),
        slope: inputs.emission_rate / (inputs.ez * (1.0 + k)),
    }
}

fn recirculated_vav(inputs: &MassBalanceInputs, fr: Real) -> AffineConcentrationModel {
    if inputs.recirculation_ratio == 0.0 {
        return AffineConcentrationModel {
            intercept: inputs.outdoor_concentration,
            slope: inputs.emission_rate / (inputs.ez * fr),
        };
    }
    let k = cleaning_credit(inputs, fr);
    AffineConcentrationModel {
        intercept: inputs.outdoor_concentration / (1.0 + k),
        slope: inputs.emission_rate / (inputs.ez * (1.0 + k)),
    }
}

/// Build the concentration model for one compound.
pub fn concentration_model(
    inputs: &MassBalanceInputs,
    position: FilterPosition,
    system: &SystemType,
) -> SolverResult<AffineConcentrationModel> {
    inputs.check()?;
    let fr = ensure_finite(system.flow_reduction(), "flow reduction")?;
    let variant = MassBalanceVariant::select(position, system);
    let model = (variant.formula())(inputs, fr);
    ensure_finite(model.intercept, "model intercept")?;
    ensure_finite(model.slope, "model slope")?;
    Ok(model)
}
