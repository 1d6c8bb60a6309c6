//! Canonical building identity.
//!
//! A multi-tile structure is addressed by its origin cell everywhere in the
//! connectivity cache and the zone registry. Resolving through raw cell
//! coordinates would split one building into several identities.

use std::fmt;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::grid::WorldGrid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub struct BuildingId {
    pub x: usize,
    pub y: usize,
}

impl BuildingId {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Identity of an unoccupied cell: its own coordinates.
    pub fn from_cell(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for BuildingId {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Resolve the canonical identity of the building at (x, y).
///
/// Occupied cells resolve to the structure's recorded origin; empty cells to
/// themselves. Returns `None` outside the grid, or when the grid's topology is
/// inconsistent (the recorded origin does not hold the same structure). The
/// latter is a contract violation: it asserts in debug builds.
pub fn resolve_identity(grid: &WorldGrid, x: usize, y: usize) -> Option<BuildingId> {
    if !grid.in_bounds(x, y) {
        return None;
    }
    let Some(handle) = grid.get(x, y).structure else {
        return Some(BuildingId::from_cell(x, y));
    };
    let Some(structure) = grid.structure(handle) else {
        topology_violation(x, y, "cell references a missing structure");
        return None;
    };
    let (ox, oy) = structure.origin;
    if !grid.in_bounds(ox, oy) || grid.get(ox, oy).structure != Some(handle) {
        topology_violation(x, y, "origin cell does not hold the structure");
        return None;
    }
    Some(BuildingId::new(ox, oy))
}

/// Like [`resolve_identity`] but only for occupied cells.
pub fn resolve_building(grid: &WorldGrid, x: usize, y: usize) -> Option<BuildingId> {
    if !grid.in_bounds(x, y) || grid.get(x, y).structure.is_none() {
        return None;
    }
    resolve_identity(grid, x, y)
}

fn topology_violation(x: usize, y: usize, reason: &str) {
    warn!("Topology inconsistency at ({}, {}): {}", x, y, reason);
    debug_assert!(false, "topology inconsistency at ({x}, {y}): {reason}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::StructureKind;

    #[test]
    fn test_every_footprint_cell_resolves_to_origin() {
        let mut grid = WorldGrid::new(16, 16);
        grid.place_structure(StructureKind::Commercial, 6, 5).unwrap();
        for y in 5..8 {
            for x in 6..9 {
                assert_eq!(resolve_identity(&grid, x, y), Some(BuildingId::new(6, 5)));
            }
        }
    }

    #[test]
    fn test_empty_cell_resolves_to_itself() {
        let grid = WorldGrid::new(16, 16);
        assert_eq!(resolve_identity(&grid, 3, 9), Some(BuildingId::new(3, 9)));
        assert_eq!(resolve_building(&grid, 3, 9), None);
    }

    #[test]
    fn test_out_of_bounds_is_unresolved() {
        let grid = WorldGrid::new(16, 16);
        assert_eq!(resolve_identity(&grid, 16, 0), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "topology inconsistency")]
    fn test_broken_origin_asserts_in_debug() {
        let mut grid = WorldGrid::new(16, 16);
        grid.place_structure(StructureKind::Industrial, 2, 2).unwrap();
        grid.get_mut(2, 2).structure = None;
        let _ = resolve_identity(&grid, 3, 3);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_broken_origin_is_unresolved_in_release() {
        let mut grid = WorldGrid::new(16, 16);
        grid.place_structure(StructureKind::Industrial, 2, 2).unwrap();
        grid.get_mut(2, 2).structure = None;
        assert_eq!(resolve_identity(&grid, 3, 3), None);
    }
}
