use bevy::prelude::*;

use crate::connectivity::ConnectivityEngine;
use crate::game_params::GameParams;
use crate::notifications::ZoneFlavorEvent;
use crate::sim_rng::SimRng;
use crate::stats::gather_city_stats;

use super::demand::{DemandSignals, ZoneDemand};
use super::growth::GrowthInputs;
use super::market::compute_zone_demand;
use super::phases::{tick, TickOutcome};
use super::registry::ZoneRegistry;

/// Ease the market balance toward the target implied by the zones as they
/// stand before this tick's growth.
pub fn update_zone_demand(
    registry: Res<ZoneRegistry>,
    engine: Res<ConnectivityEngine>,
    params: Res<GameParams>,
    mut demand: ResMut<ZoneDemand>,
) {
    let target = compute_zone_demand(&gather_city_stats(&registry, &engine));
    demand.approach(&target, params.growth.demand_damping);
}

/// Advance every registered zone by one tick, in origin order.
pub fn grow_zones(
    engine: Res<ConnectivityEngine>,
    demand: Res<ZoneDemand>,
    params: Res<GameParams>,
    mut registry: ResMut<ZoneRegistry>,
    mut rng: ResMut<SimRng>,
    mut flavor: EventWriter<ZoneFlavorEvent>,
) {
    let signals = DemandSignals::gather(&registry);
    let growth = &params.growth;

    for zone in registry.iter_mut() {
        let inputs = GrowthInputs {
            has_transport: engine.has_transport_access(zone.origin),
            has_energy: engine.has_energy_access(zone.origin),
            demand_signal: signals.signal_for(zone.kind),
            demand_balance: demand.demand_for(zone.kind),
        };
        match tick(zone, &inputs, growth, &mut rng.0) {
            TickOutcome::Advanced(phase) => {
                debug!("Zone {} advanced to {:?}", zone.origin, phase);
                if rng.chance(growth.flavor_chance) {
                    if let Some(event) = ZoneFlavorEvent::for_zone(zone) {
                        flavor.send(event);
                    }
                }
            }
            TickOutcome::Regressed(phase) => {
                debug!("Zone {} regressed to {:?}", zone.origin, phase);
            }
            TickOutcome::Steady => {}
        }
    }
}
