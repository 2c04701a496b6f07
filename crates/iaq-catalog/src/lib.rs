//! iaq-catalog: reference data for IAQP sizing.
//!
//! Provides:
//! - occupancy categories with prescriptive outdoor-air rates
//! - design compounds (limits, outdoor levels, emission rates)
//! - additive-effect mixture groups
//! - air-cleaner removal efficiencies
//!
//! All tables are plain values. The standard tables come from
//! [`ContaminantCatalog::standard`] and [`CleanerEfficiencyTable::standard`];
//! tests and callers can build synthetic ones with the same constructors.

pub mod catalog;
pub mod cleaner;
pub mod compound;
pub mod error;
pub mod occupancy;

// Re-exports for ergonomics
pub use catalog::{ContaminantCatalog, ContaminantRecord};
pub use cleaner::{CleanerEfficiencyTable, CleanerType};
pub use compound::{CompoundSpec, MixtureGroup};
pub use error::{CatalogError, CatalogResult};
pub use occupancy::OccupancyProfile;

/// Lookup key for names: trimmed and lower-cased.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}
