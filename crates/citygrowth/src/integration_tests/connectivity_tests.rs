//! Connectivity cache refresh under live edits.

use crate::structures::StructureKind;
use crate::test_harness::TestCity;

/// Road along the top of a residential zone, wind turbine on its west side.
fn powered_zone() -> TestCity {
    TestCity::new()
        .with_road((10, 9), (20, 9))
        .with_zone(crate::structures::ZoneKind::Residential, 12, 10)
        .with_structure(StructureKind::WindTurbine, 11, 11)
}

#[test]
fn edits_force_recalculation_before_the_interval() {
    let mut city = powered_zone().with_params(|p| p.connectivity.recalc_interval_ticks = 1000);
    city.tick(1);
    city.assert_connected(12, 10);
    let generation = city.engine().generation();

    city.demolish(11, 11).unwrap();
    city.tick(1);
    assert!(city.engine().generation() > generation);
    city.assert_no_energy(12, 10);
}

#[test]
fn quiet_ticks_recalculate_on_the_interval() {
    let mut city = powered_zone().with_params(|p| p.connectivity.recalc_interval_ticks = 5);
    city.tick(1);
    let first = city.engine().generation();
    city.tick(10);
    assert_eq!(city.engine().generation(), first + 2);
}

#[test]
fn power_line_carries_energy_to_distant_zone() {
    let mut city = TestCity::new()
        .with_road((30, 9), (34, 9))
        .with_zone(crate::structures::ZoneKind::Commercial, 30, 10)
        .with_structure(StructureKind::CoalPlant, 40, 10)
        .with_power_line((33, 11), (39, 11));
    city.tick(1);
    city.assert_connected(31, 11);

    // Break the line in the middle.
    city.demolish(36, 11).unwrap();
    city.tick(1);
    assert!(city.has_transport(31, 11));
    city.assert_no_energy(31, 11);
}

#[test]
fn every_cell_of_a_zone_reports_the_same_access() {
    let mut city = powered_zone();
    city.tick(1);
    for y in 10..13 {
        for x in 12..15 {
            city.assert_connected(x, y);
        }
    }
}

#[test]
fn water_blocks_placement() {
    let mut city = TestCity::new().with_water(0, 0, 5, 5);
    assert!(city.place(StructureKind::Road, 2, 2).is_err());
    assert!(city.place(StructureKind::Road, 6, 6).is_ok());
}
