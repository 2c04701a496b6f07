//! End-to-end sizing pipeline.

use iaq_catalog::{CleanerEfficiencyTable, ContaminantCatalog, normalize_key};
use iaq_core::{Real, area_m2, flow_cfm, flow_m3ph};
use tracing::{debug, info};

use crate::assemble::{ContaminantSizing, GroupSizing, SizingResult, assemble};
use crate::baseline::baseline_airflow;
use crate::error::{Constraint, SolverError, SolverResult};
use crate::mass_balance::{MassBalanceInputs, concentration_model};
use crate::mixture::{LimitTerm, required_airflow};
use crate::resolve::resolve_scenario;
use crate::scenario::{RawParams, ResolverDefaults, Scenario};
use crate::select::{ConstraintRequirement, select_airflow};

/// Size the outdoor airflow for a resolved scenario.
///
/// Fails with [`SolverError::Infeasible`] when any compound or mixture group
/// cannot be held under its limit by dilution alone; the report lists all of
/// them.
pub fn solve(
    scenario: &Scenario,
    catalog: &ContaminantCatalog,
    cleaners: &CleanerEfficiencyTable,
) -> SolverResult<SizingResult> {
    let baseline = baseline_airflow(&scenario.occupancy, scenario.population, scenario.area);
    let records = catalog.contaminants(&scenario.occupancy.name)?;
    let area = area_m2(scenario.area);

    let mut sizings = Vec::with_capacity(records.len());
    let mut singles = Vec::with_capacity(records.len());
    for record in records {
        let efficiency =
            cleaners.effective_efficiency(&record.compound, scenario.cleaner, scenario.efficiency);
        let inputs = MassBalanceInputs {
            emission_rate: record.emission_rate(area, scenario.population),
            outdoor_concentration: record.outdoor_concentration,
            recirculation_ratio: scenario.recirculation_ratio,
            efficiency,
            ez: scenario.ez,
        };
        let model = concentration_model(&inputs, scenario.filter_position, &scenario.system)?;
        let term = LimitTerm {
            model,
            limit: record.design_limit,
        };
        let outcome = required_airflow(&[term], scenario.safety_factor);

        singles.push(ConstraintRequirement {
            constraint: Constraint::Contaminant(record.compound.clone()),
            outcome,
        });
        sizings.push(ContaminantSizing {
            compound: record.compound,
            groups: record.groups,
            emission_rate: inputs.emission_rate,
            outdoor_concentration: inputs.outdoor_concentration,
            efficiency,
            term,
            // infeasible constraints never reach assembly
            required_airflow_m3h: outcome.unwrap_or(Real::INFINITY),
        });
    }

    let mut group_sizings = Vec::with_capacity(catalog.mixture_groups().len());
    let mut groups = Vec::with_capacity(catalog.mixture_groups().len());
    for group in catalog.mixture_groups() {
        let mut members = Vec::with_capacity(group.members.len());
        let mut terms = Vec::with_capacity(group.members.len());
        for member in &group.members {
            let key = normalize_key(member);
            match sizings.iter().find(|s| normalize_key(&s.compound) == key) {
                Some(s) => {
                    members.push(s.compound.clone());
                    terms.push(s.term);
                }
                None => debug!(
                    group = %group.name,
                    member = %member,
                    "group member not among design compounds; skipped"
                ),
            }
        }
        let outcome = required_airflow(&terms, scenario.safety_factor);
        groups.push(ConstraintRequirement {
            constraint: Constraint::Group(group.name.clone()),
            outcome,
        });
        group_sizings.push(GroupSizing {
            name: group.name.clone(),
            members,
            terms,
            required_airflow_m3h: outcome.unwrap_or(Real::INFINITY),
        });
    }

    let selection = select_airflow(flow_m3ph(baseline), &singles, &groups)
        .map_err(SolverError::Infeasible)?;

    info!(
        occupancy = %scenario.occupancy.name,
        governing = %selection.governing,
        outdoor_airflow_m3h = selection.airflow,
        baseline_cfm = flow_cfm(baseline),
        "outdoor airflow selected"
    );

    Ok(assemble(scenario, baseline, selection, sizings, group_sizings))
}

/// Resolve raw parameters and size them in one call.
pub fn solve_raw(
    raw: &RawParams,
    defaults: &ResolverDefaults,
    catalog: &ContaminantCatalog,
    cleaners: &CleanerEfficiencyTable,
) -> SolverResult<SizingResult> {
    let scenario = resolve_scenario(raw, defaults, catalog)?;
    solve(&scenario, catalog, cleaners)
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::resolve::recirculation_airflow_for_ratio;
    use iaq_core::{Tolerances, flow_cfm, nearly_equal};
    use proptest::prelude::*;

    const OCCUPANCIES: [&str; 4] = [
        "Office space",
        "Classrooms (age 9 plus)",
        "Health club/aerobics room",
        "Restaurant dining rooms",
    ];

    proptest! {
        #[test]
        fn governing_airflow_never_below_baseline(
            occ in 0usize..OCCUPANCIES.len(),
            area in 5.0_f64..2000.0,
            people in 0u32..200,
            r in 0.0_f64..0.9,
            ef in 0.0_f64..=1.0,
            ez in 0.5_f64..1.2,
            sf in 0.9_f64..=1.0,
            mixed in any::<bool>(),
        ) {
            let catalog = ContaminantCatalog::standard().unwrap();
            let cleaners = CleanerEfficiencyTable::standard();
            let raw = RawParams {
                occupancy: Some(OCCUPANCIES[occ].into()),
                area_m2: Some(area),
                num_people: Some(people),
                recirculation_ratio: Some(r),
                ef: Some(ef),
                ez: Some(ez),
                safety_factor: Some(sf),
                filter_position: Some(if mixed { "A" } else { "B" }.into()),
                ..RawParams::default()
            };
            if let Ok(result) = solve_raw(&raw, &ResolverDefaults::default(), &catalog, &cleaners) {
                prop_assert!(result.outdoor_airflow_m3h() >= flow_m3ph(result.baseline_airflow));
                for g in &result.groups {
                    prop_assert!(g.combined_fraction <= sf * (1.0 + 1e-9));
                }
            }
        }

        #[test]
        fn imperial_and_metric_area_agree(metric_area in 1.0_f64..5000.0) {
            let catalog = ContaminantCatalog::standard().unwrap();
            let defaults = ResolverDefaults::default();
            let metric = RawParams { area_m2: Some(metric_area), ..RawParams::default() };
            let ft2 = iaq_core::area_ft2(iaq_core::m2(metric_area));
            let imperial = RawParams { area_ft2: Some(ft2), ..RawParams::default() };
            let a = resolve_scenario(&metric, &defaults, &catalog).unwrap();
            let b = resolve_scenario(&imperial, &defaults, &catalog).unwrap();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(area_m2(a.area), area_m2(b.area), tol));
        }

        #[test]
        fn recirculation_airflow_resolves_to_its_ratio(
            r in 0.0_f64..0.95,
            people in 1u32..50,
        ) {
            let catalog = ContaminantCatalog::standard().unwrap();
            let defaults = ResolverDefaults::default();
            let base = RawParams {
                occupancy: Some("Office space".into()),
                area_m2: Some(40.0),
                num_people: Some(people),
                ..RawParams::default()
            };
            let scenario = resolve_scenario(&base, &defaults, &catalog).unwrap();
            let baseline = baseline_airflow(&scenario.occupancy, people, scenario.area);
            let recirc = recirculation_airflow_for_ratio(r, baseline);
            let raw = RawParams { recirc_cfm: Some(flow_cfm(recirc)), ..base };
            let resolved = resolve_scenario(&raw, &defaults, &catalog).unwrap();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(resolved.recirculation_ratio, r, tol));
        }
    }
}
