//! IAQP outdoor-airflow sizing.
//!
//! Given an occupancy, zone geometry and air-handling configuration, finds the
//! minimum outdoor airflow that keeps every design compound, and every
//! additive-effect mixture group, under its limit, never going below the
//! prescriptive ventilation baseline.
//!
//! Pipeline:
//! 1. [`resolve_scenario`]: raw parameters to a validated [`Scenario`]
//! 2. [`baseline_airflow`]: `Rp * P + Ra * A`
//! 3. [`concentration_model`]: one affine model per compound
//! 4. [`required_airflow`]: per compound and per group
//! 5. [`select_airflow`]: the governing maximum
//! 6. [`assemble`]: concentrations and limit fractions at `Voz*`

pub mod assemble;
pub mod baseline;
pub mod error;
pub mod mass_balance;
pub mod mixture;
pub mod resolve;
pub mod scenario;
pub mod select;
pub mod solve;

pub use assemble::{AirflowSummary, ContaminantReport, GroupReport, SizingResult, assemble};
pub use baseline::baseline_airflow;
pub use error::{Constraint, InfeasibilityReport, InfeasibleConstraint, SolverError, SolverResult};
pub use mass_balance::{
    AffineConcentrationModel, MassBalanceInputs, MassBalanceVariant, concentration_model,
};
pub use mixture::{Infeasibility, LimitTerm, combined_fraction, required_airflow};
pub use resolve::{recirculation_airflow_for_ratio, resolve_scenario};
pub use scenario::{FilterPosition, OutputUnits, RawParams, ResolverDefaults, Scenario, SystemType};
pub use select::{ConstraintRequirement, Selection, select_airflow};
pub use solve::{solve, solve_raw};
