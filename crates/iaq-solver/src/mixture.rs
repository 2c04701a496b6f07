//! Required outdoor airflow for additive-effect limits.
//!
//! A set of compounds with models `C_i = a_i + b_i / Voz` meets a combined
//! limit when `sum(C_i / limit_i) <= allowed`. Solving for `Voz`:
//!
//! ```text
//! margin = allowed - sum(a_i / limit_i)
//! Voz    = sum(b_i / limit_i) / margin        (margin > 0)
//! ```
//!
//! A single compound is the one-term case with `allowed = safety_factor`.

use iaq_core::Real;
use serde::Serialize;

use crate::mass_balance::AffineConcentrationModel;

/// One compound's model and the limit it is held against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitTerm {
    pub model: AffineConcentrationModel,
    /// Design limit [ug/m3], > 0
    pub limit: Real,
}

/// The combined limit cannot be met at any finite airflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Infeasibility {
    /// `sum(a_i / limit_i)`: fraction of the limit reached at infinite airflow
    pub asymptotic_fraction: Real,
    pub allowed: Real,
}

/// Minimum outdoor airflow [m3/h] meeting `sum(C_i / limit_i) <= allowed`.
///
/// Returns 0 when no term depends on airflow and the intercepts already fit.
pub fn required_airflow(terms: &[LimitTerm], allowed: Real) -> Result<Real, Infeasibility> {
    let (asymptotic_fraction, emission_fraction) =
        terms.iter().fold((0.0, 0.0), |(a, b), t| {
            (a + t.model.intercept / t.limit, b + t.model.slope / t.limit)
        });
    let margin = allowed - asymptotic_fraction;
    if margin <= 0.0 {
        return Err(Infeasibility {
            asymptotic_fraction,
            allowed,
        });
    }
    if emission_fraction == 0.0 {
        return Ok(0.0);
    }
    Ok(emission_fraction / margin)
}

/// `sum(C_i / limit_i)` at outdoor airflow `voz_m3h`.
pub fn combined_fraction(terms: &[LimitTerm], voz_m3h: Real) -> Real {
    terms
        .iter()
        .map(|t| t.model.concentration_at(voz_m3h) / t.limit)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use iaq_core::{Tolerances, nearly_equal};

    fn term(intercept: Real, slope: Real, limit: Real) -> LimitTerm {
        LimitTerm {
            model: AffineConcentrationModel { intercept, slope },
            limit,
        }
    }

    #[test]
    fn single_term_matches_closed_form() {
        // 10 + 900 / V = 100  ->  V = 10
        let v = required_airflow(&[term(10.0, 900.0, 100.0)], 1.0).unwrap();
        assert!(nearly_equal(v, 10.0, Tolerances::default()));
    }

    #[test]
    fn safety_factor_raises_the_requirement() {
        let t = [term(10.0, 900.0, 100.0)];
        let full = required_airflow(&t, 1.0).unwrap();
        let derated = required_airflow(&t, 0.5).unwrap();
        assert!(derated > full);
        // 10 + 900 / V = 50
        assert!(nearly_equal(derated, 22.5, Tolerances::default()));
    }

    #[test]
    fn group_sits_on_the_boundary_at_its_requirement() {
        let terms = [
            term(5.0, 400.0, 50.0),
            term(1.0, 2000.0, 300.0),
            term(0.0, 0.0, 10.0),
        ];
        let v = required_airflow(&terms, 0.8).unwrap();
        let at = combined_fraction(&terms, v);
        assert!(nearly_equal(at, 0.8, Tolerances::default()));
    }

    #[test]
    fn flat_terms_need_no_airflow() {
        let terms = [term(2.0, 0.0, 10.0), term(1.0, 0.0, 10.0)];
        assert_eq!(required_airflow(&terms, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn empty_group_needs_no_airflow() {
        assert_eq!(required_airflow(&[], 1.0).unwrap(), 0.0);
        assert_eq!(combined_fraction(&[], 10.0), 0.0);
    }

    #[test]
    fn intercepts_at_the_limit_are_infeasible() {
        let err = required_airflow(&[term(60.0, 10.0, 100.0), term(40.0, 0.0, 100.0)], 1.0)
            .unwrap_err();
        assert_eq!(err.asymptotic_fraction, 1.0);
        assert_eq!(err.allowed, 1.0);

        let err = required_airflow(&[term(60.0, 10.0, 100.0)], 0.5).unwrap_err();
        assert!(err.asymptotic_fraction > err.allowed);
    }
}
