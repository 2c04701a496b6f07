//! Occupancy categories and their prescriptive outdoor-air rates.
//!
//! Rates are tabulated in inch-pound units (cfm/person, cfm/ft², people per
//! 1000 ft²); conversion to SI happens in the baseline calculator.

use serde::{Deserialize, Serialize};

/// Reference outdoor-air rates for one occupancy category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyProfile {
    pub name: String,
    /// People outdoor-air rate `Rp` [cfm/person]
    pub rp_cfm_per_person: f64,
    /// Area outdoor-air rate `Ra` [cfm/ft²]
    pub ra_cfm_per_ft2: f64,
    /// Default occupant density [people / 1000 ft²]
    pub default_density_per_1000ft2: f64,
}

impl OccupancyProfile {
    pub fn new(
        name: impl Into<String>,
        rp_cfm_per_person: f64,
        ra_cfm_per_ft2: f64,
        default_density_per_1000ft2: f64,
    ) -> Self {
        Self {
            name: name.into(),
            rp_cfm_per_person,
            ra_cfm_per_ft2,
            default_density_per_1000ft2,
        }
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.name.to_lowercase().contains(&query)
    }
}

pub(crate) struct OccupancyRow {
    pub name: &'static str,
    pub rp: f64,
    pub ra: f64,
    pub density: f64,
}

const fn row(name: &'static str, rp: f64, ra: f64, density: f64) -> OccupancyRow {
    OccupancyRow {
        name,
        rp,
        ra,
        density,
    }
}

pub(crate) const VENTILATION_RATES: &[OccupancyRow] = &[
    // Animal facilities
    row("Animal exam room (veterinary office)", 10.0, 0.12, 20.0),
    row("Animal imaging (MRI/CT/PET)", 10.0, 0.18, 20.0),
    row("Animal operating rooms", 10.0, 0.18, 20.0),
    row("Animal postoperative recovery room", 10.0, 0.18, 20.0),
    row("Animal preparation rooms", 10.0, 0.18, 20.0),
    row("Animal procedure room", 10.0, 0.18, 20.0),
    row("Animal surgery scrub", 10.0, 0.18, 20.0),
    row("Large-animal holding room", 10.0, 0.18, 20.0),
    row("Necropsy", 10.0, 0.18, 20.0),
    row("Small-animal-cage room (static cages)", 10.0, 0.18, 20.0),
    row("Small-animal-cage room (ventilated cages)", 10.0, 0.18, 20.0),
    // Correctional facilities
    row("Booking/waiting", 7.5, 0.06, 50.0),
    row("Cell", 5.0, 0.12, 25.0),
    row("Dayroom", 5.0, 0.06, 30.0),
    row("Guard stations", 5.0, 0.06, 15.0),
    // Educational facilities
    row("Art classroom", 10.0, 0.18, 20.0),
    row("Classrooms (ages 5–8)", 10.0, 0.12, 25.0),
    row("Classrooms (age 9 plus)", 10.0, 0.12, 35.0),
    row("Computer lab", 10.0, 0.12, 25.0),
    row("Daycare sickroom", 10.0, 0.18, 25.0),
    row("Daycare (through age 4)", 10.0, 0.18, 25.0),
    row("Lecture classroom", 7.5, 0.06, 65.0),
    row("Lecture hall (fixed seats)", 7.5, 0.06, 150.0),
    row("Libraries", 5.0, 0.12, 10.0),
    row("Media center", 10.0, 0.12, 25.0),
    row("Multiuse assembly", 7.5, 0.06, 100.0),
    row("Music/theater/dance", 10.0, 0.06, 35.0),
    row("Science laboratories", 10.0, 0.18, 25.0),
    row("University/college laboratories", 10.0, 0.18, 25.0),
    row("Wood/metal shop", 10.0, 0.18, 20.0),
    row("Corridors (ages 5 plus)", 10.0, 0.12, 25.0),
    // Food and beverage service
    row("Bars, cocktail lounges", 7.5, 0.18, 100.0),
    row("Cafeteria/fast-food dining", 7.5, 0.18, 100.0),
    row("Kitchen (cooking)", 7.5, 0.12, 20.0),
    row("Restaurant dining rooms", 7.5, 0.18, 70.0),
    // General
    row("Break rooms (General)", 5.0, 0.06, 25.0),
    row("Coffee stations", 5.0, 0.06, 20.0),
    row("Conference/meeting", 5.0, 0.06, 50.0),
    row("Corridors", 0.0, 0.06, 0.0),
    row("Occupiable storage rooms for liquids or gels", 5.0, 0.12, 2.0),
    // Hotels, motels, resorts, dormitories
    row("Barracks sleeping areas", 5.0, 0.06, 20.0),
    row("Bedroom/living room", 5.0, 0.06, 10.0),
    row("Laundry rooms, central", 5.0, 0.12, 10.0),
    row("Laundry rooms within dwelling units", 5.0, 0.12, 10.0),
    row("Lobbies/prefunction", 7.5, 0.06, 30.0),
    row("Multipurpose assembly", 5.0, 0.06, 120.0),
    // Miscellaneous spaces
    row("Banks or bank lobbies", 7.5, 0.06, 15.0),
    row("Bank vaults/safe deposit", 5.0, 0.06, 5.0),
    row("Computer (not printing)", 5.0, 0.06, 4.0),
    row("Freezer and refrigerated spaces (<50°F [10°C])", 10.0, 0.0, 0.0),
    row("Manufacturing where hazardous materials are not used", 10.0, 0.18, 7.0),
    row(
        "Manufacturing where hazardous materials are used (excludes heavy industrial and chemical processes)",
        10.0,
        0.18,
        7.0,
    ),
    row("Pharmacy (prep. area)", 5.0, 0.18, 10.0),
    row("Photo studios", 5.0, 0.12, 10.0),
    row("Shipping/receiving", 10.0, 0.12, 2.0),
    row("Sorting, packing, light assembly", 7.5, 0.12, 7.0),
    row("Telephone closets", 0.0, 0.0, 0.0),
    row("Transportation waiting", 7.5, 0.06, 100.0),
    row("Warehouses", 10.0, 0.06, 0.0),
    // Office buildings
    row("Main entry lobbies", 5.0, 0.06, 10.0),
    row("Occupiable storage rooms for dry materials", 5.0, 0.06, 2.0),
    row("Office space", 5.0, 0.06, 5.0),
    row("Reception areas", 5.0, 0.06, 30.0),
    row("Telephone/data entry", 5.0, 0.06, 60.0),
    // Public assembly spaces
    row("Auditorium seating area", 5.0, 0.06, 150.0),
    row("Courtrooms", 5.0, 0.06, 70.0),
    row("Legislative chambers", 5.0, 0.06, 50.0),
    row("Lobbies", 5.0, 0.06, 150.0),
    row("Museums (children’s)", 7.5, 0.12, 40.0),
    row("Museums/galleries", 7.5, 0.06, 40.0),
    row("Places of religious worship", 5.0, 0.06, 120.0),
    // Residential
    row("Common corridors", 0.0, 0.06, 0.0),
    // Retail
    row("Sales (except as below)", 7.5, 0.12, 15.0),
    row("Barbershop", 7.5, 0.06, 25.0),
    row("Beauty and nail salons", 20.0, 0.12, 25.0),
    row("Coin-operated laundries", 7.5, 0.12, 20.0),
    row("Mall common areas", 7.5, 0.06, 40.0),
    row("Pet shops (animal areas)", 7.5, 0.18, 10.0),
    row("Supermarket", 7.5, 0.06, 8.0),
    row("Bowling alley (seating)", 10.0, 0.12, 40.0),
    // Sports and entertainment
    row("Disco/dance floors", 20.0, 0.06, 100.0),
    row("Gambling casinos", 7.5, 0.18, 120.0),
    row("Game arcades", 7.5, 0.18, 20.0),
    row("Gym, sports arena (play area)", 20.0, 0.18, 7.0),
    row("Health club/aerobics room", 20.0, 0.06, 40.0),
    row("Health club/weight rooms", 20.0, 0.06, 10.0),
    row("Spectator areas", 7.5, 0.06, 150.0),
    row("Stages, studios", 10.0, 0.06, 70.0),
    row("Swimming (pool & deck)", 0.0, 0.48, 0.0),
    // Outpatient health care
    row("Birthing room", 10.0, 0.18, 15.0),
    row("Class 1 imaging rooms", 7.5, 0.12, 5.0),
    row("Dental operatory", 10.0, 0.18, 20.0),
    row("General examination room", 7.5, 0.12, 20.0),
    row("Other dental treatment areas", 5.0, 0.06, 5.0),
    row("Physical therapy exercise area", 20.0, 0.18, 7.0),
    row("Physical therapy individual room", 10.0, 0.12, 20.0),
    // no people rate or density published for the pool area
    row("Physical therapeutic pool area", 0.0, 0.48, 0.0),
    row("Prosthetics and orthotics room", 10.0, 0.18, 20.0),
    row("Psychiatric consultation room", 5.0, 0.06, 20.0),
    row("Psychiatric examination room", 5.0, 0.06, 20.0),
    row("Psychiatric group room", 5.0, 0.06, 50.0),
    row("Psychiatric seclusion room", 10.0, 0.12, 5.0),
    row("Speech therapy room", 5.0, 0.06, 20.0),
    row("Urgent care examination room", 7.5, 0.12, 20.0),
    row("Urgent care observation room", 5.0, 0.06, 20.0),
    row("Urgent care treatment room", 7.5, 0.12, 20.0),
    row("Urgent care triage room", 10.0, 0.18, 20.0),
];

pub(crate) fn standard_profiles() -> Vec<OccupancyProfile> {
    VENTILATION_RATES
        .iter()
        .map(|r| OccupancyProfile::new(r.name, r.rp, r.ra, r.density))
        .collect()
}
