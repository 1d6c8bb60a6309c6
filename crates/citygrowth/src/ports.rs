//! Ports are special facilities: one only operates when its road network
//! also reaches energized commercial and industrial zones.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::connectivity::ConnectivityEngine;
use crate::grid::WorldGrid;
use crate::identity::BuildingId;
use crate::structures::StructureKind;

/// Kinds a port needs on its own transport network, each with power.
pub const PORT_REQUIREMENTS: [StructureKind; 2] =
    [StructureKind::Commercial, StructureKind::Industrial];

/// Operating state of every port on the map.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PortStatus {
    pub ports: BTreeMap<BuildingId, bool>,
}

impl PortStatus {
    pub fn is_active(&self, port: BuildingId) -> bool {
        self.ports.get(&port).copied().unwrap_or(false)
    }

    pub fn active_count(&self) -> usize {
        self.ports.values().filter(|active| **active).count()
    }

    /// Re-evaluate every port. Returns the ports whose state flipped.
    pub fn refresh(
        &mut self,
        grid: &WorldGrid,
        engine: &ConnectivityEngine,
    ) -> Vec<(BuildingId, bool)> {
        let current: BTreeMap<BuildingId, bool> = grid
            .structures()
            .filter(|(_, s)| s.kind == StructureKind::Port)
            .map(|(_, s)| {
                let id = BuildingId::from(s.origin);
                (id, engine.can_operate_special_facility(id, &PORT_REQUIREMENTS))
            })
            .collect();

        let changed = current
            .iter()
            .filter(|(id, active)| self.ports.get(id).copied().unwrap_or(false) != **active)
            .map(|(id, active)| (*id, *active))
            .collect();
        self.ports = current;
        changed
    }
}

/// Only re-evaluates after the connectivity cache was rebuilt.
pub fn update_port_status(
    grid: Res<WorldGrid>,
    engine: Res<ConnectivityEngine>,
    mut status: ResMut<PortStatus>,
) {
    if !engine.is_changed() {
        return;
    }
    for (port, active) in status.refresh(&grid, &engine) {
        if active {
            info!("Port at {} is now operating", port);
        } else {
            info!("Port at {} stopped operating", port);
        }
    }
}

pub struct PortsPlugin;

impl Plugin for PortsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PortStatus>().add_systems(
            FixedUpdate,
            update_port_status.in_set(crate::SimulationSet::Simulation),
        );
    }
}
