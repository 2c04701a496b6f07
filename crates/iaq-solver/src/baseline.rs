//! Prescriptive outdoor-air requirement for an occupancy.

use iaq_catalog::OccupancyProfile;
use iaq_core::{Area, Real, VolumeRate, area_ft2, cfm};

/// Breathing-zone outdoor airflow `Rp * P + Ra * A`.
///
/// Serves as the floor for the governing airflow and as the reference
/// outdoor airflow when a recirculation airflow is converted to a ratio.
pub fn baseline_airflow(profile: &OccupancyProfile, population: u32, area: Area) -> VolumeRate {
    let people = profile.rp_cfm_per_person * Real::from(population);
    let floor = profile.ra_cfm_per_ft2 * area_ft2(area);
    cfm(people + floor)
}
