//! Query and simulation-tick methods for `TestCity`.

use bevy::prelude::*;

use crate::connectivity::ConnectivityEngine;
use crate::grid::WorldGrid;
use crate::identity::resolve_building;
use crate::stats::CityStats;
use crate::zones::{ZonePhase, ZoneRegistry, ZoneSnapshot};
use crate::TickCounter;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed ticks by executing the `FixedUpdate` schedule directly,
    /// independent of wall-clock time.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Tick until the zone covering (x, y) reaches `phase`, or `max_ticks`
    /// pass. Returns the ticks taken, or `None` on timeout.
    pub fn tick_until_phase(
        &mut self,
        x: usize,
        y: usize,
        phase: ZonePhase,
        max_ticks: u32,
    ) -> Option<u32> {
        for n in 1..=max_ticks {
            self.tick(1);
            if self.zone_phase(x, y).is_some_and(|p| p >= phase) {
                return Some(n);
            }
        }
        None
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn grid(&self) -> &WorldGrid {
        self.resource::<WorldGrid>()
    }

    pub fn engine(&self) -> &ConnectivityEngine {
        self.resource::<ConnectivityEngine>()
    }

    pub fn registry(&self) -> &ZoneRegistry {
        self.resource::<ZoneRegistry>()
    }

    pub fn stats(&self) -> &CityStats {
        self.resource::<CityStats>()
    }

    pub fn tick_count(&self) -> u64 {
        self.resource::<TickCounter>().0
    }

    /// Snapshot of the zone covering cell (x, y).
    pub fn zone(&self, x: usize, y: usize) -> Option<ZoneSnapshot> {
        self.registry().zone_snapshot_at(self.grid(), x, y)
    }

    pub fn zone_phase(&self, x: usize, y: usize) -> Option<ZonePhase> {
        self.zone(x, y).map(|z| z.phase)
    }

    pub fn has_transport(&self, x: usize, y: usize) -> bool {
        resolve_building(self.grid(), x, y)
            .is_some_and(|id| self.engine().has_transport_access(id))
    }

    pub fn has_energy(&self, x: usize, y: usize) -> bool {
        resolve_building(self.grid(), x, y)
            .is_some_and(|id| self.engine().has_energy_access(id))
    }
}
