use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::connectivity::ConnectivityEngine;
use crate::structures::ZoneKind;
use crate::zones::ZoneRegistry;

/// City-wide totals aggregated from the zone registry and connectivity cache.
#[derive(Resource, Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub population: u32,
    pub commercial_jobs: u32,
    pub industrial_jobs: u32,
    pub tax_revenue: f32,
    pub production: f32,
    pub pollution: f32,
    pub residential_zones: u32,
    pub commercial_zones: u32,
    pub industrial_zones: u32,
    /// Zones with both transport and energy access.
    pub energized_zones: u32,
    pub transport_networks: u32,
    pub energy_grids: u32,
    pub powered_grids: u32,
}

impl CityStats {
    pub fn total_jobs(&self) -> u32 {
        self.commercial_jobs + self.industrial_jobs
    }

    pub fn zone_count(&self, kind: ZoneKind) -> u32 {
        match kind {
            ZoneKind::Residential => self.residential_zones,
            ZoneKind::Commercial => self.commercial_zones,
            ZoneKind::Industrial => self.industrial_zones,
        }
    }
}

pub fn gather_city_stats(registry: &ZoneRegistry, engine: &ConnectivityEngine) -> CityStats {
    let mut stats = CityStats {
        transport_networks: engine.networks().len() as u32,
        energy_grids: engine.energy_grids().len() as u32,
        powered_grids: engine.powered_grid_count() as u32,
        ..Default::default()
    };

    for zone in registry.iter() {
        let out = zone.output;
        match zone.kind {
            ZoneKind::Residential => {
                stats.residential_zones += 1;
                stats.population += out.population;
                stats.tax_revenue += out.tax_or_production;
            }
            ZoneKind::Commercial => {
                stats.commercial_zones += 1;
                stats.commercial_jobs += out.jobs;
                stats.tax_revenue += out.tax_or_production;
            }
            ZoneKind::Industrial => {
                stats.industrial_zones += 1;
                stats.industrial_jobs += out.jobs;
                stats.production += out.tax_or_production;
            }
        }
        stats.pollution += out.pollution;
        if engine.has_transport_access(zone.origin) && engine.has_energy_access(zone.origin) {
            stats.energized_zones += 1;
        }
    }
    stats
}

pub fn update_stats(
    registry: Res<ZoneRegistry>,
    engine: Res<ConnectivityEngine>,
    mut stats: ResMut<CityStats>,
) {
    *stats = gather_city_stats(&registry, &engine);
}

pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CityStats>().add_systems(
            FixedUpdate,
            update_stats.in_set(crate::SimulationSet::PostSim),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WorldGrid;
    use crate::identity::BuildingId;
    use crate::structures::StructureKind;
    use crate::zones::{advance_phase, ZonePhase};

    #[test]
    fn test_stats_default() {
        let stats = CityStats::default();
        assert_eq!(stats.population, 0);
        assert_eq!(stats.total_jobs(), 0);
    }

    #[test]
    fn test_stats_sum_zone_outputs() {
        let mut grid = WorldGrid::new(32, 32);
        grid.place_line(StructureKind::Road, (0, 3), (20, 3)).unwrap();
        grid.place_structure(StructureKind::Residential, 0, 0).unwrap();
        grid.place_structure(StructureKind::Industrial, 4, 0).unwrap();

        let mut registry = ZoneRegistry::default();
        registry.sync_with_grid(&grid);
        for _ in 0..2 {
            advance_phase(registry.get_mut(BuildingId::new(0, 0)).unwrap());
        }
        advance_phase(registry.get_mut(BuildingId::new(4, 0)).unwrap());

        let engine = ConnectivityEngine::new(&grid);
        let stats = gather_city_stats(&registry, &engine);
        assert_eq!(stats.residential_zones, 1);
        assert_eq!(stats.industrial_zones, 1);
        assert_eq!(registry.get(BuildingId::new(0, 0)).unwrap().phase, ZonePhase::Small2);
        assert_eq!(stats.population, 8);
        assert_eq!(stats.industrial_jobs, 5);
        assert_eq!(stats.transport_networks, 1);
        // Nothing generates power yet.
        assert_eq!(stats.energized_zones, 0);
    }
}
