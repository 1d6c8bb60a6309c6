use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::structures::StructureKind;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode,
)]
pub enum TerrainKind {
    #[default]
    Land,
    Water,
}

/// Index into the grid's structure arena. Every cell of a footprint stores the
/// same handle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub struct StructureHandle(pub u32);

/// One placed building, stored once regardless of how many cells it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Structure {
    pub kind: StructureKind,
    pub origin: (usize, usize),
    pub width: usize,
    pub height: usize,
}

impl Structure {
    pub fn new(kind: StructureKind, x: usize, y: usize) -> Self {
        let (width, height) = kind.footprint();
        Self {
            kind,
            origin: (x, y),
            width,
            height,
        }
    }

    /// All covered cells in row-major order, origin first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (ox, oy) = self.origin;
        (oy..oy + self.height).flat_map(move |y| (ox..ox + self.width).map(move |x| (x, y)))
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        let (ox, oy) = self.origin;
        x >= ox && x < ox + self.width && y >= oy && y < oy + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Cell {
    pub terrain: TerrainKind,
    pub structure: Option<StructureHandle>,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct WorldGrid {
    pub cells: Vec<Cell>,
    pub width: usize,
    pub height: usize,
    pub(crate) structures: BTreeMap<StructureHandle, Structure>,
    pub(crate) next_handle: u32,
}

impl Default for WorldGrid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

impl WorldGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
            structures: BTreeMap::new(),
            next_handle: 0,
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    /// Bounds-checked lookup with signed coordinates, for callers probing
    /// neighbours near the edge. `None` outside the grid.
    pub fn cell_at(&self, x: i64, y: i64) -> Option<&Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.get(x, y))
    }

    pub fn structure(&self, handle: StructureHandle) -> Option<&Structure> {
        self.structures.get(&handle)
    }

    pub fn structure_at(&self, x: usize, y: usize) -> Option<&Structure> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.get(x, y).structure.and_then(|h| self.structure(h))
    }

    pub fn structure_kind(&self, x: usize, y: usize) -> Option<StructureKind> {
        self.structure_at(x, y).map(|s| s.kind)
    }

    /// Recorded origin of the structure covering (x, y), `None` for empty cells.
    pub fn structure_origin(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        self.structure_at(x, y).map(|s| s.origin)
    }

    /// All placed structures in handle order.
    pub fn structures(&self) -> impl Iterator<Item = (StructureHandle, &Structure)> {
        self.structures.iter().map(|(h, s)| (*h, s))
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    pub fn set_terrain(&mut self, x: usize, y: usize, terrain: TerrainKind) {
        if self.in_bounds(x, y) {
            self.get_mut(x, y).terrain = terrain;
        }
    }

    /// Returns up to 4 cardinal neighbors and the count of valid entries.
    /// Use `&result[..count]` to iterate over valid neighbors.
    pub fn neighbors4(&self, x: usize, y: usize) -> ([(usize, usize); 4], usize) {
        let mut result = [(0, 0); 4];
        let mut count = 0;
        if x > 0 {
            result[count] = (x - 1, y);
            count += 1;
        }
        if x + 1 < self.width {
            result[count] = (x + 1, y);
            count += 1;
        }
        if y > 0 {
            result[count] = (x, y - 1);
            count += 1;
        }
        if y + 1 < self.height {
            result[count] = (x, y + 1);
            count += 1;
        }
        (result, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let grid = WorldGrid::new(GRID_WIDTH, GRID_HEIGHT);
        assert!(!grid.in_bounds(GRID_WIDTH, 0));
        assert!(!grid.in_bounds(0, GRID_HEIGHT));
    }

    #[test]
    fn test_cell_at_rejects_negative_and_overflow() {
        let grid = WorldGrid::new(16, 16);
        assert!(grid.cell_at(-1, 0).is_none());
        assert!(grid.cell_at(0, -1).is_none());
        assert!(grid.cell_at(16, 3).is_none());
        assert!(grid.cell_at(15, 15).is_some());
    }

    #[test]
    fn test_neighbors() {
        let grid = WorldGrid::new(GRID_WIDTH, GRID_HEIGHT);
        assert_eq!(grid.neighbors4(0, 0).1, 2);
        assert_eq!(grid.neighbors4(128, 128).1, 4);
        assert_eq!(grid.neighbors4(255, 255).1, 2);
    }

    #[test]
    fn test_structure_cells_row_major() {
        let s = Structure::new(StructureKind::CoalPlant, 4, 7);
        let cells: Vec<_> = s.cells().collect();
        assert_eq!(cells, vec![(4, 7), (5, 7), (4, 8), (5, 8)]);
        assert!(s.contains(5, 8));
        assert!(!s.contains(6, 8));
    }
}
