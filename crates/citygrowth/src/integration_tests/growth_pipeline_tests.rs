//! End-to-end zone growth: placement → connectivity → demand → growth.

use crate::notifications::FlavorLog;
use crate::structures::{StructureKind, ZoneKind};
use crate::test_harness::TestCity;
use crate::zones::ZonePhase;

/// Road (5,5), turbine (5,6), line (5,7), residential zone at (6,5).
fn starter_city() -> TestCity {
    TestCity::new()
        .with_structure(StructureKind::Road, 5, 5)
        .with_structure(StructureKind::WindTurbine, 5, 6)
        .with_structure(StructureKind::PowerLine, 5, 7)
        .with_zone(ZoneKind::Residential, 6, 5)
}

#[test]
fn connected_zone_grows_past_small_phases() {
    let mut city = starter_city();
    city.tick(1);
    city.assert_connected(6, 5);

    let ticks = city.tick_until_phase(6, 5, ZonePhase::Small3, 400);
    assert!(ticks.is_some(), "zone stuck at {:?}", city.zone_phase(6, 5));
    assert!(city.stats().population >= 12);
    assert_eq!(city.stats().energized_zones, 1);
}

#[test]
fn unconnected_zone_trickles_to_first_phase_then_stops() {
    let mut city = TestCity::new().with_zone(ZoneKind::Residential, 50, 50);
    assert!(city.tick_until_phase(51, 51, ZonePhase::Small1, 800).is_some());

    city.tick(300);
    city.assert_zone_phase(51, 51, ZonePhase::Small1);
    assert_eq!(city.zone(51, 51).map(|z| z.progress), Some(0.0));
}

#[test]
fn losing_power_freezes_growth() {
    let mut city = starter_city();
    assert!(city.tick_until_phase(6, 5, ZonePhase::Small1, 200).is_some());

    city.demolish(5, 6).unwrap();
    city.tick(1);
    let frozen = city.zone(6, 5).unwrap();
    city.tick(200);
    let later = city.zone(6, 5).unwrap();
    assert_eq!(later.phase, frozen.phase);
    assert!(later.progress <= frozen.progress);
}

#[test]
fn demolished_zone_leaves_the_registry() {
    let mut city = starter_city();
    city.tick(20);
    assert_eq!(city.registry().len(), 1);

    city.demolish(7, 6).unwrap();
    city.tick(1);
    assert!(city.registry().is_empty());
    assert!(city.zone(6, 5).is_none());
}

#[test]
fn growth_produces_flavor_messages() {
    let mut city = starter_city().with_params(|p| p.growth.flavor_chance = 1.0);
    assert!(city.tick_until_phase(6, 5, ZonePhase::Small2, 300).is_some());
    city.tick(1);

    let log = city.resource::<FlavorLog>();
    assert!(log.entries.len() >= 2);
    assert!(log.entries.iter().all(|e| e.contains("residential zone at (6, 5)")));
}

#[test]
fn flavor_fires_once_per_advance_and_never_while_steady() {
    let mut city = starter_city().with_params(|p| p.growth.flavor_chance = 1.0);
    let mut advances = 0;
    let mut phase = ZonePhase::Empty;
    for _ in 0..400 {
        city.tick(1);
        let now = city.zone_phase(6, 5).unwrap();
        if now > phase {
            advances += 1;
        }
        phase = now;
        if phase >= ZonePhase::Small3 {
            break;
        }
    }
    assert!(advances >= 3, "only {} advances", advances);
    assert_eq!(city.resource::<FlavorLog>().entries.len(), advances);

    // Without power the zone holds its phase, so nothing more is logged.
    city.demolish(5, 6).unwrap();
    city.tick(200);
    assert_eq!(city.zone_phase(6, 5), Some(phase));
    assert_eq!(city.resource::<FlavorLog>().entries.len(), advances);
}

#[test]
fn mixed_city_fills_every_kind() {
    let mut city = TestCity::new()
        .with_road((10, 20), (40, 20))
        .with_zone(ZoneKind::Residential, 10, 17)
        .with_zone(ZoneKind::Commercial, 20, 17)
        .with_zone(ZoneKind::Industrial, 30, 17)
        .with_power_line((10, 16), (33, 16))
        .with_structure(StructureKind::SolarFarm, 34, 15);
    city.tick(600);

    for x in [10, 20, 30] {
        city.assert_connected(x, 17);
        city.assert_zone_phase_at_least(x, 17, ZonePhase::Small1);
    }
    let stats = city.stats();
    assert!(stats.population > 0);
    assert!(stats.commercial_jobs > 0);
    assert!(stats.industrial_jobs > 0);
}
