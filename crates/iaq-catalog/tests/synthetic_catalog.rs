//! Integration tests for catalogs built from synthetic tables.

use iaq_catalog::{
    CatalogError, CleanerEfficiencyTable, CleanerType, CompoundSpec, ContaminantCatalog,
    MixtureGroup, OccupancyProfile,
};

fn lab_catalog() -> ContaminantCatalog {
    ContaminantCatalog::new(
        vec![OccupancyProfile::new("Test lab", 10.0, 0.12, 20.0)],
        vec![
            CompoundSpec::new("alpha", 100.0, 5.0).with_occupant_emission(50.0),
            CompoundSpec::new("beta", 10.0, 0.0),
            CompoundSpec::new("gamma", 1.0, 0.2),
        ],
        vec![MixtureGroup::new("irritants", ["alpha", "Beta", "delta"])],
    )
    .unwrap()
    .with_area_emissions("test LAB", [("alpha", 2.0), ("beta", 0.5)])
    .unwrap()
}

#[test]
fn synthetic_records_resolve_membership_and_rates() {
    let catalog = lab_catalog();
    let records = catalog.contaminants("Test lab").unwrap();
    assert_eq!(records.len(), 3);

    let alpha = &records[0];
    assert_eq!(alpha.groups, vec!["irritants".to_string()]);
    assert_eq!(alpha.area_emission, 2.0);
    assert_eq!(alpha.emission_rate(4.0, 3), 8.0 + 150.0);

    let beta = &records[1];
    assert_eq!(beta.groups.len(), 1);

    let gamma = &records[2];
    assert!(gamma.groups.is_empty());
    assert_eq!(gamma.area_emission, 0.0);
}

#[test]
fn area_emissions_for_unknown_occupancy_fail() {
    let err = lab_catalog()
        .with_area_emissions("Nowhere", [("alpha", 1.0)])
        .unwrap_err();
    assert!(matches!(err, CatalogError::UnknownOccupancy { .. }));
}

#[test]
fn negative_rates_are_rejected() {
    let err = ContaminantCatalog::new(
        vec![OccupancyProfile::new("Bad", -1.0, 0.0, 0.0)],
        vec![],
        vec![],
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRecord { .. }));

    let err = lab_catalog()
        .with_area_emissions("Test lab", [("alpha", -2.0)])
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRecord { .. }));
}

#[test]
fn catalogs_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContaminantCatalog>();
    assert_send_sync::<CleanerEfficiencyTable>();
}

#[test]
fn custom_cleaner_entries_override_fallback() {
    let table = CleanerEfficiencyTable::empty()
        .with_entry("alpha", CleanerType::Uniform, 0.9)
        .unwrap();
    assert_eq!(
        table.effective_efficiency("ALPHA", CleanerType::Uniform, 0.3),
        0.9
    );
    assert_eq!(
        table.effective_efficiency("beta", CleanerType::Uniform, 0.3),
        0.3
    );
}
