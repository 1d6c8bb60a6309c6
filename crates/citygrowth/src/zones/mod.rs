//! Zone development: each 3x3 zone climbs a fixed ladder of phases as its
//! progress accumulates, gated by transport and energy access.

pub mod demand;
pub mod growth;
pub mod market;
pub mod phases;
pub mod registry;
pub mod systems;
pub mod tables;
pub mod types;


pub use demand::{DemandSignals, ZoneDemand};
pub use growth::{decline_rate, growth_delta, growth_rate, GrowthInputs};
pub use market::compute_zone_demand;
pub use phases::{advance_phase, apply_progress, regress_phase, tick, TickOutcome};
pub use registry::{sync_zone_registry, ZoneRegistry};
pub use systems::{grow_zones, update_zone_demand};
pub use tables::{lot_label, output_for};
pub use types::{
    BuildingTier, Composition, SubBuilding, ZoneInstance, ZoneOutput, ZonePhase, ZoneSnapshot,
};

use bevy::prelude::*;

pub struct ZonesPlugin;

impl Plugin for ZonesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZoneRegistry>()
            .init_resource::<ZoneDemand>()
            .add_systems(
                FixedUpdate,
                (
                    sync_zone_registry.in_set(crate::SimulationSet::PreSim),
                    update_zone_demand
                        .after(crate::connectivity::recalculate_connectivity)
                        .in_set(crate::SimulationSet::PreSim),
                    grow_zones.in_set(crate::SimulationSet::Simulation),
                ),
            );

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<ZoneRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<ZoneDemand>();
    }
}
