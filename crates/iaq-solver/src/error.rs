//! Error types for scenario resolution and sizing.

use std::fmt;

use iaq_catalog::CatalogError;
use iaq_core::{CoreError, Real};
use serde::Serialize;
use thiserror::Error;

/// Constraint that can set the outdoor airflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Constraint {
    /// Prescriptive per-person + per-area rate
    Baseline,
    /// One design compound against its own limit
    Contaminant(String),
    /// Additive-effect mixture group against the safety factor
    Group(String),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => write!(f, "ventilation baseline"),
            Self::Contaminant(name) => write!(f, "compound '{}'", name),
            Self::Group(name) => write!(f, "mixture group '{}'", name),
        }
    }
}

/// A constraint no finite outdoor airflow can satisfy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfeasibleConstraint {
    pub constraint: Constraint,
    /// Limit fraction reached as the outdoor airflow grows without bound
    pub asymptotic_fraction: Real,
    /// Allowed fraction (the safety factor)
    pub allowed: Real,
}

/// Every infeasible constraint found while sizing one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfeasibilityReport {
    pub constraints: Vec<InfeasibleConstraint>,
}

impl fmt::Display for InfeasibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "limits cannot be met by dilution alone: ")?;
        for (i, c) in self.constraints.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(
                f,
                "{} reaches {:.3} of its limit at infinite airflow (allowed {:.3})",
                c.constraint, c.asymptotic_fraction, c.allowed
            )?;
        }
        Ok(())
    }
}

/// Errors that can occur while resolving or solving a scenario.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid input for {parameter}: {reason}")]
    InvalidInput {
        parameter: &'static str,
        reason: String,
    },

    #[error("Unsupported {what} '{value}'")]
    UnsupportedVariant { what: &'static str, value: String },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] CoreError),

    #[error("Infeasible scenario: {0}")]
    Infeasible(InfeasibilityReport),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter,
            reason: reason.into(),
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_names_parameter() {
        let err = SolverError::invalid("safety_factor", "must lie in (0, 1]");
        let msg = err.to_string();
        assert!(msg.contains("safety_factor"));
        assert!(msg.contains("(0, 1]"));
    }

    #[test]
    fn infeasibility_lists_every_constraint() {
        let report = InfeasibilityReport {
            constraints: vec![
                InfeasibleConstraint {
                    constraint: Constraint::Contaminant("ozone".into()),
                    asymptotic_fraction: 0.71,
                    allowed: 0.5,
                },
                InfeasibleConstraint {
                    constraint: Constraint::Group("Eye Irritation".into()),
                    asymptotic_fraction: 0.8,
                    allowed: 0.5,
                },
            ],
        };
        let msg = SolverError::Infeasible(report).to_string();
        assert!(msg.contains("compound 'ozone'"));
        assert!(msg.contains("mixture group 'Eye Irritation'"));
    }

    #[test]
    fn catalog_errors_convert() {
        let err: SolverError = CatalogError::UnknownOccupancy {
            name: "Moon base".into(),
        }
        .into();
        assert!(matches!(
            err,
            SolverError::Catalog(CatalogError::UnknownOccupancy { .. })
        ));
    }
}
