use crate::CoreError;

/// Scalar type for concentrations, rates and ratios.
pub type Real = f64;

/// Absolute and relative comparison tolerances.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// `|a - b|` within `tol.abs`, or within `tol.rel` of the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if !v.is_finite() {
        return Err(CoreError::NonFinite { what, value: v });
    }
    Ok(v)
}

/// Finite and within `[lo, hi]`.
pub fn ensure_in_range(
    v: Real,
    lo: Real,
    hi: Real,
    what: &'static str,
    expected: &'static str,
) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if !(lo..=hi).contains(&v) {
        return Err(CoreError::OutOfRange {
            what,
            value: v,
            expected,
        });
    }
    Ok(v)
}

/// Finite and within `[0, 1]`: efficiencies, shares.
pub fn ensure_fraction(v: Real, what: &'static str) -> Result<Real, CoreError> {
    ensure_in_range(v, 0.0, 1.0, what, "a fraction in [0, 1]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerances_scale_with_magnitude() {
        let tol = Tolerances::default();
        // 1 ppb of a 1200 ug/m3 limit
        assert!(nearly_equal(1200.0, 1200.0 + 1.2e-6, tol));
        assert!(!nearly_equal(1200.0, 1200.1, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
    }

    #[test]
    fn non_finite_values_are_named() {
        let err = ensure_finite(Real::INFINITY, "outdoor airflow").unwrap_err();
        assert!(err.to_string().contains("outdoor airflow"));
        assert!(ensure_finite(Real::NAN, "ez").is_err());
    }

    #[test]
    fn fractions_include_both_ends() {
        assert_eq!(ensure_fraction(0.0, "ef").unwrap(), 0.0);
        assert_eq!(ensure_fraction(1.0, "ef").unwrap(), 1.0);
        let err = ensure_fraction(1.5, "ef").unwrap_err();
        assert!(matches!(err, CoreError::OutOfRange { what: "ef", .. }));
        assert!(matches!(
            ensure_fraction(Real::NAN, "ef"),
            Err(CoreError::NonFinite { .. })
        ));
    }
}
