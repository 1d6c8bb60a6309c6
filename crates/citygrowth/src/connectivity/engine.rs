use std::collections::HashMap;

use bevy::prelude::*;

use crate::grid::WorldGrid;
use crate::identity::{resolve_identity, BuildingId};
use crate::structures::StructureKind;

use super::networks::{
    discover_energy_grids, discover_transport_networks, EnergyGrid, EnergyGridId, NetworkId,
    TransportNetwork,
};

/// Per-building view of both networks. A building may touch several networks
/// at once, so the references are lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub has_transport: bool,
    pub has_energy: bool,
    pub transport_networks: Vec<NetworkId>,
    pub energy_grids: Vec<EnergyGridId>,
}

/// Everything one recalculation produces. Built whole and swapped in whole.
#[derive(Debug, Default)]
struct ConnectivitySnapshot {
    networks: Vec<TransportNetwork>,
    energy_grids: Vec<EnergyGrid>,
    records: HashMap<BuildingId, ConnectionRecord>,
    kinds: HashMap<BuildingId, StructureKind>,
}

impl ConnectivitySnapshot {
    fn build(grid: &WorldGrid) -> Self {
        let networks = discover_transport_networks(grid);
        let energy_grids = discover_energy_grids(grid);

        let kinds: HashMap<BuildingId, StructureKind> = grid
            .structures()
            .map(|(_, s)| (BuildingId::from(s.origin), s.kind))
            .collect();

        let mut records: HashMap<BuildingId, ConnectionRecord> = HashMap::new();
        for network in &networks {
            for id in network.members.iter().chain(&network.adjacent) {
                let record = records.entry(*id).or_default();
                record.has_transport = true;
                record.transport_networks.push(network.id);
            }
        }
        for energy in &energy_grids {
            let powered = energy.is_powered();
            for id in energy.members.iter().chain(&energy.adjacent) {
                let record = records.entry(*id).or_default();
                record.has_energy |= powered;
                record.energy_grids.push(energy.id);
            }
        }

        Self {
            networks,
            energy_grids,
            records,
            kinds,
        }
    }
}

/// Cached answer to "which buildings reach roads and power".
///
/// The cache is regenerated from the grid by [`ConnectivityEngine::recalculate`]
/// and never patched in place, so a query can never see a mix of old and new
/// networks.
#[derive(Resource, Debug, Default)]
pub struct ConnectivityEngine {
    snapshot: ConnectivitySnapshot,
    generation: u64,
}

impl ConnectivityEngine {
    pub fn new(grid: &WorldGrid) -> Self {
        let mut engine = Self::default();
        engine.recalculate(grid);
        engine
    }

    /// Rescan the whole grid and replace every cached network, grid and record.
    pub fn recalculate(&mut self, grid: &WorldGrid) {
        self.snapshot = ConnectivitySnapshot::build(grid);
        self.generation += 1;
    }

    /// Number of completed recalculations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn record(&self, id: BuildingId) -> Option<&ConnectionRecord> {
        self.snapshot.records.get(&id)
    }

    pub fn has_transport_access(&self, id: BuildingId) -> bool {
        self.record(id).is_some_and(|r| r.has_transport)
    }

    pub fn has_energy_access(&self, id: BuildingId) -> bool {
        self.record(id).is_some_and(|r| r.has_energy)
    }

    /// True when one transport network touching `id` also touches an
    /// energized instance of every kind in `required`.
    pub fn can_operate_special_facility(&self, id: BuildingId, required: &[StructureKind]) -> bool {
        let Some(record) = self.record(id) else {
            return false;
        };
        record.transport_networks.iter().any(|network_id| {
            let Some(network) = self.network(*network_id) else {
                return false;
            };
            required.iter().all(|kind| {
                network.adjacent.iter().any(|other| {
                    *other != id
                        && self.snapshot.kinds.get(other) == Some(kind)
                        && self.has_energy_access(*other)
                })
            })
        })
    }

    /// Coordinate-based transport query; anything outside the grid is
    /// unconnected.
    pub fn has_transport_access_at(&self, grid: &WorldGrid, x: i64, y: i64) -> bool {
        self.identity_at(grid, x, y)
            .is_some_and(|id| self.has_transport_access(id))
    }

    /// Coordinate-based energy query; anything outside the grid is unpowered.
    pub fn has_energy_access_at(&self, grid: &WorldGrid, x: i64, y: i64) -> bool {
        self.identity_at(grid, x, y)
            .is_some_and(|id| self.has_energy_access(id))
    }

    fn identity_at(&self, grid: &WorldGrid, x: i64, y: i64) -> Option<BuildingId> {
        grid.cell_at(x, y)?;
        resolve_identity(grid, x as usize, y as usize)
    }

    pub fn networks(&self) -> &[TransportNetwork] {
        &self.snapshot.networks
    }

    pub fn energy_grids(&self) -> &[EnergyGrid] {
        &self.snapshot.energy_grids
    }

    pub fn network(&self, id: NetworkId) -> Option<&TransportNetwork> {
        self.snapshot.networks.get(id.0 as usize)
    }

    pub fn energy_grid(&self, id: EnergyGridId) -> Option<&EnergyGrid> {
        self.snapshot.energy_grids.get(id.0 as usize)
    }

    /// Kind of the building recorded under `id` at the last recalculation.
    pub fn kind_of(&self, id: BuildingId) -> Option<StructureKind> {
        self.snapshot.kinds.get(&id).copied()
    }

    pub fn powered_grid_count(&self) -> usize {
        self.snapshot
            .energy_grids
            .iter()
            .filter(|g| g.is_powered())
            .count()
    }
}
