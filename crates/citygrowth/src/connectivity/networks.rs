use std::collections::{BTreeSet, VecDeque};

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::grid::WorldGrid;
use crate::identity::{resolve_building, BuildingId};
use crate::structures::{StructureKind, ZoneKind};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub struct NetworkId(pub u32);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub struct EnergyGridId(pub u32);

/// A maximal 4-connected set of transport cells and the buildings touching it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportNetwork {
    pub id: NetworkId,
    pub cells: Vec<(usize, usize)>,
    /// Identities of the road structures forming the network.
    pub members: BTreeSet<BuildingId>,
    /// Identities of non-network buildings adjacent to any member cell.
    pub adjacent: BTreeSet<BuildingId>,
    pub has_port: bool,
    pub has_energy_source: bool,
    pub zone_kinds: BTreeSet<ZoneKind>,
}

impl TransportNetwork {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn has_adjacent_zone(&self, kind: ZoneKind) -> bool {
        self.zone_kinds.contains(&kind)
    }
}

/// A maximal 4-connected set of conductor cells (lines and sources).
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyGrid {
    pub id: EnergyGridId,
    pub cells: Vec<(usize, usize)>,
    /// Identities of the lines and sources forming the grid.
    pub members: BTreeSet<BuildingId>,
    pub sources: BTreeSet<BuildingId>,
    /// Total generation in MW, one contribution per source structure.
    pub capacity: u32,
    pub adjacent: BTreeSet<BuildingId>,
}

impl EnergyGrid {
    /// Dead wiring (no capacity) powers nothing.
    pub fn is_powered(&self) -> bool {
        self.capacity > 0
    }
}

/// Raw output of one flood fill before it is typed as a network or grid.
struct Component {
    cells: Vec<(usize, usize)>,
    members: BTreeSet<BuildingId>,
    adjacent: BTreeSet<BuildingId>,
}

const UNLABELED: u32 = u32::MAX;

/// Partition every cell accepted by `is_member` into 4-connected components.
///
/// Neighbouring cells that hold a non-member structure are recorded as
/// adjacent by canonical identity. Cells only join a component through
/// member-to-member adjacency, so a building touching two segments never
/// merges them.
fn flood_components(grid: &WorldGrid, is_member: impl Fn(StructureKind) -> bool) -> Vec<Component> {
    let w = grid.width;
    let member_at =
        |x: usize, y: usize| grid.structure_kind(x, y).is_some_and(|kind| is_member(kind));

    let mut labels = vec![UNLABELED; w * grid.height];
    let mut components = Vec::new();
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();

    for y in 0..grid.height {
        for x in 0..w {
            if labels[y * w + x] != UNLABELED || !member_at(x, y) {
                continue;
            }
            let label = components.len() as u32;
            let mut component = Component {
                cells: Vec::new(),
                members: BTreeSet::new(),
                adjacent: BTreeSet::new(),
            };
            labels[y * w + x] = label;
            queue.push_back((x, y));

            while let Some((cx, cy)) = queue.pop_front() {
                component.cells.push((cx, cy));
                if let Some(id) = resolve_building(grid, cx, cy) {
                    component.members.insert(id);
                }

                let (neighbors, ncount) = grid.neighbors4(cx, cy);
                for &(nx, ny) in &neighbors[..ncount] {
                    let nidx = ny * w + nx;
                    if member_at(nx, ny) {
                        if labels[nidx] == UNLABELED {
                            labels[nidx] = label;
                            queue.push_back((nx, ny));
                        }
                    } else if let Some(id) = resolve_building(grid, nx, ny) {
                        component.adjacent.insert(id);
                    }
                }
            }

            components.push(component);
        }
    }

    components
}

/// Flood fill over transport cells.
pub fn discover_transport_networks(grid: &WorldGrid) -> Vec<TransportNetwork> {
    flood_components(grid, StructureKind::is_transport)
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let mut has_port = false;
            let mut has_energy_source = false;
            let mut zone_kinds = BTreeSet::new();
            for id in &c.adjacent {
                let Some(kind) = grid.structure_kind(id.x, id.y) else {
                    continue;
                };
                has_port |= kind == StructureKind::Port;
                has_energy_source |= kind.is_power_source();
                if let Some(zone) = kind.zone_kind() {
                    zone_kinds.insert(zone);
                }
            }
            TransportNetwork {
                id: NetworkId(i as u32),
                cells: c.cells,
                members: c.members,
                adjacent: c.adjacent,
                has_port,
                has_energy_source,
                zone_kinds,
            }
        })
        .collect()
}

/// Flood fill over conductor cells; capacity is summed per source identity.
pub fn discover_energy_grids(grid: &WorldGrid) -> Vec<EnergyGrid> {
    flood_components(grid, StructureKind::is_conductor)
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let sources: BTreeSet<BuildingId> = c
                .members
                .iter()
                .copied()
                .filter(|id| {
                    grid.structure_kind(id.x, id.y)
                        .is_some_and(StructureKind::is_power_source)
                })
                .collect();
            let capacity = sources
                .iter()
                .filter_map(|id| grid.structure_kind(id.x, id.y))
                .map(StructureKind::generation_capacity)
                .sum();
            EnergyGrid {
                id: EnergyGridId(i as u32),
                cells: c.cells,
                members: c.members,
                sources,
                capacity,
                adjacent: c.adjacent,
            }
        })
        .collect()
}
