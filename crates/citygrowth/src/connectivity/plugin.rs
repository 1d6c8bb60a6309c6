use bevy::prelude::*;

use crate::game_params::GameParams;
use crate::grid::WorldGrid;

use super::engine::ConnectivityEngine;

/// Counter-based throttle for scheduled recalculations.
#[derive(Resource, Default)]
pub struct ConnectivityTimer {
    pub counter: u32,
}

impl ConnectivityTimer {
    /// Advance one tick; true when a scheduled recalculation is due.
    pub fn tick(&mut self, interval: u32) -> bool {
        self.counter = self.counter.wrapping_add(1);
        self.counter.is_multiple_of(interval.max(1))
    }
}

/// Rebuild the connectivity cache on the fixed cadence, or immediately when
/// the grid was edited since the last run so growth never reads stale
/// networks.
pub fn recalculate_connectivity(
    grid: Res<WorldGrid>,
    params: Res<GameParams>,
    mut timer: ResMut<ConnectivityTimer>,
    mut engine: ResMut<ConnectivityEngine>,
) {
    let due = timer.tick(params.connectivity.recalc_interval_ticks);
    if !due && !grid.is_changed() {
        return;
    }
    engine.recalculate(&grid);
    debug!(
        "Connectivity recalculated (gen {}): {} transport networks, {} energy grids ({} powered)",
        engine.generation(),
        engine.networks().len(),
        engine.energy_grids().len(),
        engine.powered_grid_count()
    );
}

pub struct ConnectivityPlugin;

impl Plugin for ConnectivityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConnectivityTimer>()
            .init_resource::<ConnectivityEngine>()
            .add_systems(
                FixedUpdate,
                recalculate_connectivity
                    .after(crate::zones::sync_zone_registry)
                    .in_set(crate::SimulationSet::PreSim),
            );
    }
}
