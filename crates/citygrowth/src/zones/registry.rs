use std::collections::{BTreeMap, BTreeSet};

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::grid::WorldGrid;
use crate::identity::{resolve_building, BuildingId};
use crate::structures::ZoneKind;

use super::types::{ZoneInstance, ZonePhase, ZoneSnapshot};

/// Every growable zone on the map, keyed by origin.
///
/// Ordered so that iteration (and therefore RNG consumption during growth)
/// is the same on every run.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[serde(from = "Vec<ZoneInstance>", into = "Vec<ZoneInstance>")]
pub struct ZoneRegistry {
    zones: BTreeMap<BuildingId, ZoneInstance>,
}

impl From<Vec<ZoneInstance>> for ZoneRegistry {
    fn from(zones: Vec<ZoneInstance>) -> Self {
        Self {
            zones: zones.into_iter().map(|z| (z.origin, z)).collect(),
        }
    }
}

impl From<ZoneRegistry> for Vec<ZoneInstance> {
    fn from(registry: ZoneRegistry) -> Self {
        registry.zones.into_values().collect()
    }
}

impl ZoneRegistry {
    /// Register a fresh zone. An existing zone at the same origin is kept.
    pub fn register(&mut self, origin: BuildingId, kind: ZoneKind) -> &mut ZoneInstance {
        self.zones
            .entry(origin)
            .or_insert_with(|| ZoneInstance::new(origin, kind))
    }

    pub fn remove(&mut self, origin: BuildingId) -> Option<ZoneInstance> {
        self.zones.remove(&origin)
    }

    pub fn get(&self, origin: BuildingId) -> Option<&ZoneInstance> {
        self.zones.get(&origin)
    }

    pub fn get_mut(&mut self, origin: BuildingId) -> Option<&mut ZoneInstance> {
        self.zones.get_mut(&origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneInstance> {
        self.zones.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ZoneInstance> {
        self.zones.values_mut()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Snapshot of the zone whose origin is `origin`, if one is registered.
    pub fn zone_snapshot(&self, origin: BuildingId) -> Option<ZoneSnapshot> {
        self.get(origin).map(ZoneInstance::snapshot)
    }

    /// Snapshot of the zone covering cell (x, y), resolving through the
    /// zone's footprint.
    pub fn zone_snapshot_at(&self, grid: &WorldGrid, x: usize, y: usize) -> Option<ZoneSnapshot> {
        resolve_building(grid, x, y).and_then(|id| self.zone_snapshot(id))
    }

    /// Zones of `kind` past the `Empty` phase.
    pub fn developed_count(&self, kind: ZoneKind) -> u32 {
        self.iter()
            .filter(|z| z.kind == kind && z.phase > ZonePhase::Empty)
            .count() as u32
    }

    /// Bring the registry in line with the zone structures on the grid.
    /// Returns the number of zones added and removed.
    pub fn sync_with_grid(&mut self, grid: &WorldGrid) -> (usize, usize) {
        let present: BTreeMap<BuildingId, ZoneKind> = grid
            .structures()
            .filter_map(|(_, s)| {
                let kind = s.kind.zone_kind()?;
                Some((BuildingId::from(s.origin), kind))
            })
            .collect();

        let stale: BTreeSet<BuildingId> = self
            .zones
            .iter()
            .filter(|(id, zone)| present.get(id) != Some(&zone.kind))
            .map(|(id, _)| *id)
            .collect();
        for id in &stale {
            self.zones.remove(id);
        }

        let before = self.zones.len();
        for (id, kind) in present {
            self.register(id, kind);
        }
        (self.zones.len() - before, stale.len())
    }
}

impl crate::Saveable for ZoneRegistry {
    const SAVE_KEY: &'static str = "zone_registry";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if self.is_empty() {
            return None;
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

/// Register zones for newly placed zone structures and drop zones whose
/// structure was demolished. Only runs after a grid edit.
pub fn sync_zone_registry(grid: Res<WorldGrid>, mut registry: ResMut<ZoneRegistry>) {
    if !grid.is_changed() {
        return;
    }
    let (added, removed) = registry.sync_with_grid(&grid);
    if added + removed > 0 {
        debug!(
            "Zone registry synced: +{} -{} ({} zones)",
            added,
            removed,
            registry.len()
        );
    }
}
