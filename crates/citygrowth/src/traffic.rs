use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::connectivity::{ConnectivityEngine, NetworkId};
use crate::game_params::{GameParams, TrafficParams};
use crate::zones::ZoneRegistry;

/// Vehicle density on each transport network, in vehicles per road cell.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkTraffic {
    pub density: BTreeMap<NetworkId, f32>,
    /// Density that maps to a congestion level of 1.0.
    pub saturation: f32,
}

impl Default for NetworkTraffic {
    fn default() -> Self {
        Self {
            density: BTreeMap::new(),
            saturation: TrafficParams::default().saturation_density,
        }
    }
}

impl NetworkTraffic {
    pub fn density(&self, network: NetworkId) -> f32 {
        self.density.get(&network).copied().unwrap_or(0.0)
    }

    /// 0 = free flowing, 1.0 = fully congested.
    pub fn congestion_level(&self, network: NetworkId) -> f32 {
        if self.saturation <= 0.0 {
            return 0.0;
        }
        (self.density(network) / self.saturation).min(1.0)
    }
}

/// Trips come from residents and jobs of the zones fronting a network,
/// spread over its cells.
pub fn compute_network_traffic(
    engine: &ConnectivityEngine,
    registry: &ZoneRegistry,
    params: &TrafficParams,
) -> NetworkTraffic {
    let density = engine
        .networks()
        .iter()
        .filter(|network| !network.is_empty())
        .map(|network| {
            let people: u32 = network
                .adjacent
                .iter()
                .filter_map(|id| registry.get(*id))
                .map(|zone| zone.output.population + zone.output.jobs)
                .sum();
            let vehicles = people as f32 * params.trips_per_capita;
            (network.id, vehicles / network.len() as f32)
        })
        .collect();
    NetworkTraffic {
        density,
        saturation: params.saturation_density,
    }
}

pub fn update_network_traffic(
    engine: Res<ConnectivityEngine>,
    registry: Res<ZoneRegistry>,
    params: Res<GameParams>,
    mut traffic: ResMut<NetworkTraffic>,
) {
    *traffic = compute_network_traffic(&engine, &registry, &params.traffic);
}

pub struct TrafficPlugin;

impl Plugin for TrafficPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NetworkTraffic>().add_systems(
            FixedUpdate,
            update_network_traffic.in_set(crate::SimulationSet::PostSim),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WorldGrid;
    use crate::identity::BuildingId;
    use crate::structures::StructureKind;
    use crate::zones::advance_phase;

    #[test]
    fn test_density_spreads_over_network_cells() {
        let mut grid = WorldGrid::new(32, 32);
        grid.place_line(StructureKind::Road, (0, 3), (9, 3)).unwrap();
        grid.place_structure(StructureKind::Residential, 0, 0).unwrap();
        grid.place_structure(StructureKind::Commercial, 4, 4).unwrap();

        let mut registry = ZoneRegistry::default();
        registry.sync_with_grid(&grid);
        // Residential Small1 = 4 residents, commercial Small1 = 3 jobs.
        advance_phase(registry.get_mut(BuildingId::new(0, 0)).unwrap());
        advance_phase(registry.get_mut(BuildingId::new(4, 4)).unwrap());

        let engine = ConnectivityEngine::new(&grid);
        let params = TrafficParams {
            trips_per_capita: 1.0,
            ..Default::default()
        };
        let traffic = compute_network_traffic(&engine, &registry, &params);
        let id = engine.networks()[0].id;
        assert!((traffic.density(id) - 0.7).abs() < 1e-6);
        assert!(traffic.congestion_level(id) < 0.1);

        // A lower saturation point makes the same flow congested.
        let tight = TrafficParams {
            trips_per_capita: 1.0,
            saturation_density: 0.35,
        };
        let traffic = compute_network_traffic(&engine, &registry, &tight);
        assert_eq!(traffic.congestion_level(id), 1.0);
    }

    #[test]
    fn test_unknown_network_has_no_traffic() {
        let traffic = NetworkTraffic::default();
        assert_eq!(traffic.density(NetworkId(7)), 0.0);
    }
}
