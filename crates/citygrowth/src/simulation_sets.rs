//! Ordering of the fixed-tick systems.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim**: Tick counter, zone registry sync, connectivity
//!   recalculation, market demand. Everything growth reads this tick.
//! * **Simulation**: Zone growth and port activation.
//! * **PostSim**: Aggregation and reporting: city stats, network traffic,
//!   flavor notifications. These only read simulation state, so the next
//!   tick's demand update sees a consistent picture.
//!
//! Within `PreSim` the order is fixed with explicit `.after()` constraints:
//! `sync_zone_registry` → `recalculate_connectivity` → `update_zone_demand`.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain by `SimulationPlugin`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}
