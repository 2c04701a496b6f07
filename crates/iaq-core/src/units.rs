// iaq-core/src/units.rs

use crate::{CoreError, Real};
use uom::si::f64::{Area as UomArea, VolumeRate as UomVolumeRate};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn ft2(v: f64) -> Area {
    use uom::si::area::square_foot;
    Area::new::<square_foot>(v)
}

#[inline]
pub fn m3ph(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_hour;
    VolumeRate::new::<cubic_meter_per_hour>(v)
}

#[inline]
pub fn cfm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_foot_per_minute;
    VolumeRate::new::<cubic_foot_per_minute>(v)
}

#[inline]
pub fn area_m2(a: Area) -> f64 {
    use uom::si::area::square_meter;
    a.get::<square_meter>()
}

#[inline]
pub fn area_ft2(a: Area) -> f64 {
    use uom::si::area::square_foot;
    a.get::<square_foot>()
}

#[inline]
pub fn flow_m3ph(q: VolumeRate) -> f64 {
    use uom::si::volume_rate::cubic_meter_per_hour;
    q.get::<cubic_meter_per_hour>()
}

#[inline]
pub fn flow_cfm(q: VolumeRate) -> f64 {
    use uom::si::volume_rate::cubic_foot_per_minute;
    q.get::<cubic_foot_per_minute>()
}

/// Unit a tabulated gas-phase concentration is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConcentrationUnit {
    /// Micrograms per cubic metre (canonical)
    UgPerM3,
    /// Parts per million by volume
    Ppm,
    /// Parts per billion by volume
    Ppb,
}

impl std::str::FromStr for ConcentrationUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ug/m3" | "µg/m3" | "ug/m^3" => Ok(Self::UgPerM3),
            "ppm" => Ok(Self::Ppm),
            "ppb" => Ok(Self::Ppb),
            other => Err(CoreError::UnknownUnit {
                unit: other.to_string(),
            }),
        }
    }
}

pub mod constants {
    /// Molar volume of an ideal gas at 25 °C, 1 atm [L/mol]
    pub const MOLAR_VOLUME_25C_L: f64 = 24.45;
}

/// Convert a concentration to ug/m3 at 25 °C and 1 atm.
///
/// `molar_mass` (g/mol) is only consulted for volumetric units.
pub fn to_ug_per_m3(
    value: Real,
    unit: ConcentrationUnit,
    molar_mass: Option<Real>,
) -> Result<Real, CoreError> {
    let per_ppb = |m: Real| m / constants::MOLAR_VOLUME_25C_L;
    match (unit, molar_mass) {
        (ConcentrationUnit::UgPerM3, _) => Ok(value),
        (ConcentrationUnit::Ppb, Some(m)) => Ok(value * per_ppb(m)),
        (ConcentrationUnit::Ppm, Some(m)) => Ok(value * per_ppb(m) * 1000.0),
        (_, None) => Err(CoreError::OutOfRange {
            what: "molar mass",
            value: Real::NAN,
            expected: "a molar mass for ppm/ppb conversion",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tolerances, nearly_equal};

    #[test]
    fn constructors_smoke() {
        let _a = m2(19.4);
        let _b = ft2(209.0);
        let _q = m3ph(100.0);
        let _c = cfm(50.0);
    }

    #[test]
    fn area_round_trip() {
        let tol = Tolerances::default();
        let a = ft2(1000.0);
        assert!(nearly_equal(area_m2(a), 92.903_04, tol));
        assert!(nearly_equal(area_ft2(m2(area_m2(a))), 1000.0, tol));
    }

    #[test]
    fn cfm_to_m3ph() {
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        // 1 cfm = 0.028316846592 m3/min
        assert!(nearly_equal(flow_m3ph(cfm(1.0)), 1.699_010_795_52, tol));
        assert!(nearly_equal(flow_cfm(m3ph(flow_m3ph(cfm(42.0)))), 42.0, tol));
    }

    #[test]
    fn ppm_and_ppb_conversion() {
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        let co = to_ug_per_m3(9.0, ConcentrationUnit::Ppm, Some(28.01)).unwrap();
        assert!(nearly_equal(co, 9.0 * 28.01 / 24.45 * 1000.0, tol));
        let o3 = to_ug_per_m3(70.0, ConcentrationUnit::Ppb, Some(48.0)).unwrap();
        assert!(nearly_equal(o3, 70.0 * 48.0 / 24.45, tol));
        assert_eq!(
            to_ug_per_m3(12.0, ConcentrationUnit::UgPerM3, None).unwrap(),
            12.0
        );
        assert!(to_ug_per_m3(1.0, ConcentrationUnit::Ppm, None).is_err());
    }

    #[test]
    fn unit_parsing() {
        assert_eq!(
            "PPB".parse::<ConcentrationUnit>().unwrap(),
            ConcentrationUnit::Ppb
        );
        assert!("mg/l".parse::<ConcentrationUnit>().is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ppm_is_a_thousand_ppb(value in 0.0_f64..1e4, molar_mass in 1.0_f64..500.0) {
            let ppm = to_ug_per_m3(value, ConcentrationUnit::Ppm, Some(molar_mass)).unwrap();
            let ppb = to_ug_per_m3(value * 1000.0, ConcentrationUnit::Ppb, Some(molar_mass)).unwrap();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(ppm, ppb, tol));
        }

        #[test]
        fn airflow_units_agree_on_ordering(a in 0.0_f64..1e5, b in 0.0_f64..1e5) {
            prop_assume!(a < b);
            prop_assert!(flow_cfm(m3ph(a)) <= flow_cfm(m3ph(b)));
            prop_assert!(area_ft2(m2(a)) <= area_ft2(m2(b)));
        }
    }
}
