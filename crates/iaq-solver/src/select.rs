//! Governing outdoor airflow: the largest of the baseline and every limit
//! requirement.

use iaq_core::Real;
use tracing::debug;

use crate::error::{Constraint, InfeasibilityReport, InfeasibleConstraint};
use crate::mixture::Infeasibility;

/// Outcome of sizing one constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRequirement {
    pub constraint: Constraint,
    /// Required outdoor airflow [m3/h], or why none exists
    pub outcome: Result<Real, Infeasibility>,
}

/// The selected airflow and the constraint that set it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Governing outdoor airflow `Voz*` [m3/h]
    pub airflow: Real,
    pub governing: Constraint,
}

/// Pick `Voz* = max(baseline, singles, groups)`.
///
/// Candidates are scanned baseline first, then singles, then groups; a later
/// candidate only wins when strictly larger. Every infeasible constraint is
/// collected before failing.
pub fn select_airflow(
    baseline_m3h: Real,
    singles: &[ConstraintRequirement],
    groups: &[ConstraintRequirement],
) -> Result<Selection, InfeasibilityReport> {
    let mut best = Selection {
        airflow: baseline_m3h,
        governing: Constraint::Baseline,
    };
    let mut infeasible = Vec::new();

    for req in singles.iter().chain(groups) {
        match &req.outcome {
            Ok(airflow) => {
                debug!(constraint = %req.constraint, airflow_m3h = airflow, "requirement");
                if *airflow > best.airflow {
                    best = Selection {
                        airflow: *airflow,
                        governing: req.constraint.clone(),
                    };
                }
            }
            Err(inf) => infeasible.push(InfeasibleConstraint {
                constraint: req.constraint.clone(),
                asymptotic_fraction: inf.asymptotic_fraction,
                allowed: inf.allowed,
            }),
        }
    }

    if infeasible.is_empty() {
        Ok(best)
    } else {
        Err(InfeasibilityReport {
            constraints: infeasible,
        })
    }
}
