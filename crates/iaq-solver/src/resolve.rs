//! Raw parameters -> canonical [`Scenario`].

use iaq_catalog::{CleanerType, ContaminantCatalog, OccupancyProfile};
use iaq_core::{
    Area, Real, VolumeRate, area_ft2, cfm, ensure_fraction, flow_m3ph, ft2, m2, m3ph,
};
use tracing::debug;

use crate::baseline::baseline_airflow;
use crate::error::{SolverError, SolverResult};
use crate::scenario::{
    FilterPosition, OutputUnits, RawParams, ResolverDefaults, Scenario, SystemType,
};

/// Resolve and validate raw parameters against the catalog.
///
/// Order matters: the baseline airflow needs occupancy, population and area,
/// and an absolute recirculation airflow is only meaningful relative to it.
pub fn resolve_scenario(
    raw: &RawParams,
    defaults: &ResolverDefaults,
    catalog: &ContaminantCatalog,
) -> SolverResult<Scenario> {
    let occupancy_name = raw.occupancy.as_deref().unwrap_or(&defaults.occupancy);
    let occupancy = catalog.occupancy(occupancy_name)?.clone();

    let area = resolve_area(raw, defaults)?;
    let population = resolve_population(raw.num_people, &occupancy, area)?;

    let efficiency = check_closed_unit(raw.ef.unwrap_or(defaults.ef), "ef")?;
    let ez = check_finite(raw.ez.unwrap_or(defaults.ez), "ez")?;
    if ez <= 0.0 {
        return Err(SolverError::invalid("ez", format!("must be > 0, got {ez}")));
    }
    let safety_factor = check_finite(
        raw.safety_factor.unwrap_or(defaults.safety_factor),
        "safety_factor",
    )?;
    if safety_factor <= 0.0 || safety_factor > 1.0 {
        return Err(SolverError::invalid(
            "safety_factor",
            format!("must lie in (0, 1], got {safety_factor}"),
        ));
    }

    let filter_position: FilterPosition = raw
        .filter_position
        .as_deref()
        .unwrap_or(&defaults.filter_position)
        .parse()?;
    let system = resolve_system(raw, defaults)?;
    let cleaner = resolve_cleaner(raw.cleaner.as_deref().unwrap_or(&defaults.cleaner))?;
    let units: OutputUnits = raw.units.as_deref().unwrap_or(&defaults.units).parse()?;

    let baseline = baseline_airflow(&occupancy, population, area);
    let (recirculation_ratio, recirculation_airflow) =
        resolve_recirculation(raw, defaults, baseline)?;

    debug!(
        occupancy = %occupancy.name,
        area_m2 = iaq_core::area_m2(area),
        population,
        recirculation_ratio,
        %filter_position,
        %system,
        "resolved scenario"
    );

    Ok(Scenario {
        name: raw.name.clone(),
        occupancy,
        area,
        population,
        recirculation_ratio,
        recirculation_airflow,
        efficiency,
        cleaner,
        ez,
        safety_factor,
        filter_position,
        system,
        units,
    })
}

fn check_finite(value: Real, parameter: &'static str) -> SolverResult<Real> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::invalid(parameter, format!("must be finite, got {value}")))
    }
}

fn check_closed_unit(value: Real, parameter: &'static str) -> SolverResult<Real> {
    ensure_fraction(value, parameter).map_err(|e| SolverError::invalid(parameter, e.to_string()))
}

fn resolve_area(raw: &RawParams, defaults: &ResolverDefaults) -> SolverResult<Area> {
    let area = match (raw.area_m2, raw.area_ft2, defaults.area_m2) {
        (Some(v), _, _) => m2(check_finite(v, "area")?),
        (None, Some(v), _) => ft2(check_finite(v, "area")?),
        (None, None, Some(v)) => m2(check_finite(v, "area")?),
        (None, None, None) => {
            return Err(SolverError::invalid(
                "area",
                "no area given and no default configured",
            ));
        }
    };
    if iaq_core::area_m2(area) <= 0.0 {
        return Err(SolverError::invalid(
            "area",
            format!("must be > 0, got {} m2", iaq_core::area_m2(area)),
        ));
    }
    Ok(area)
}

fn resolve_population(
    explicit: Option<u32>,
    occupancy: &OccupancyProfile,
    area: Area,
) -> SolverResult<u32> {
    if let Some(n) = explicit {
        return Ok(n);
    }
    let density = occupancy.default_density_per_1000ft2;
    if density <= 0.0 {
        return Err(SolverError::invalid(
            "num_people",
            format!(
                "no default occupant density for '{}'; give the population explicitly",
                occupancy.name
            ),
        ));
    }
    let people = (density * area_ft2(area) / 1000.0).ceil();
    if !people.is_finite() || people > Real::from(u32::MAX) {
        return Err(SolverError::invalid(
            "num_people",
            format!("derived population {people} is out of range"),
        ));
    }
    debug!(density, people, "population derived from default density");
    Ok(people as u32)
}

fn resolve_system(raw: &RawParams, defaults: &ResolverDefaults) -> SolverResult<SystemType> {
    let kind = raw.system.as_deref().unwrap_or(&defaults.system);
    match kind.trim().to_ascii_lowercase().as_str() {
        "cv" | "constant" | "constant_volume" | "constant-volume" => {
            Ok(SystemType::ConstantVolume)
        }
        "vav" | "variable_air_volume" | "variable-air-volume" => {
            let fr = check_finite(
                raw.flow_reduction.unwrap_or(defaults.flow_reduction),
                "flow_reduction",
            )?;
            if fr <= 0.0 || fr > 1.0 {
                return Err(SolverError::invalid(
                    "flow_reduction",
                    format!("must lie in (0, 1], got {fr}"),
                ));
            }
            Ok(SystemType::VariableAirVolume { flow_reduction: fr })
        }
        _ => Err(SolverError::UnsupportedVariant {
            what: "system type",
            value: kind.to_string(),
        }),
    }
}

fn resolve_cleaner(value: &str) -> SolverResult<CleanerType> {
    value
        .parse()
        .map_err(|value| SolverError::UnsupportedVariant {
            what: "cleaner type",
            value,
        })
}

/// Recirculated share of supply air and the airflow it came from.
///
/// An absolute recirculation airflow `Vrc` is converted against the baseline
/// outdoor airflow `Vbz`: `R = Vrc / (Vbz + Vrc)`. It takes precedence over a
/// ratio given alongside it.
fn resolve_recirculation(
    raw: &RawParams,
    defaults: &ResolverDefaults,
    baseline: VolumeRate,
) -> SolverResult<(Real, Option<VolumeRate>)> {
    let airflow = match (raw.recirc_cfm, raw.recirc_cmh) {
        (Some(q), _) => Some(cfm(check_finite(q, "recirculation_airflow")?)),
        (None, Some(q)) => Some(m3ph(check_finite(q, "recirculation_airflow")?)),
        (None, None) => None,
    };

    let ratio = match airflow {
        Some(q) => {
            if raw.recirculation_ratio.is_some() {
                debug!("recirculation airflow given; explicit ratio ignored");
            }
            let recirc = flow_m3ph(q);
            if recirc < 0.0 {
                return Err(SolverError::invalid(
                    "recirculation_airflow",
                    format!("must be >= 0, got {recirc} m3/h"),
                ));
            }
            let outdoor = flow_m3ph(baseline);
            if outdoor <= 0.0 {
                return Err(SolverError::invalid(
                    "recirculation_airflow",
                    "baseline outdoor airflow is zero; give the ratio instead",
                ));
            }
            recirc / (outdoor + recirc)
        }
        None => raw
            .recirculation_ratio
            .unwrap_or(defaults.recirculation_ratio),
    };

    let ratio = check_finite(ratio, "recirculation_ratio")?;
    if !(0.0..1.0).contains(&ratio) {
        return Err(SolverError::invalid(
            "recirculation_ratio",
            format!("must lie in [0, 1), got {ratio}"),
        ));
    }
    Ok((ratio, airflow))
}

/// Recirculation airflow that resolves to `ratio` at the given baseline.
pub fn recirculation_airflow_for_ratio(ratio: Real, baseline: VolumeRate) -> VolumeRate {
    m3ph(ratio / (1.0 - ratio) * flow_m3ph(baseline))
}
