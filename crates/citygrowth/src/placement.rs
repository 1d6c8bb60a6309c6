//! Placement and demolition of structures on the [`WorldGrid`].
//!
//! These are the structural edits that change network topology. Going
//! through `ResMut<WorldGrid>` flags the grid as changed, which forces a
//! connectivity recalculation on the next simulation tick.

use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::grid::{Structure, StructureHandle, TerrainKind, WorldGrid};
use crate::structures::StructureKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Encode, Decode)]
pub enum PlacementError {
    /// Some footprint cell lies outside the grid.
    OutOfBounds,
    BlockedByWater,
    /// Some footprint cell already holds a structure.
    Occupied,
    /// Demolition target holds no structure.
    NotFound,
    /// Line endpoints share neither a row nor a column.
    NotStraight,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "footprint extends outside the grid"),
            PlacementError::BlockedByWater => write!(f, "footprint covers water"),
            PlacementError::Occupied => write!(f, "footprint overlaps an existing structure"),
            PlacementError::NotFound => write!(f, "no structure at the given cell"),
            PlacementError::NotStraight => write!(f, "line endpoints are not axis-aligned"),
        }
    }
}

impl std::error::Error for PlacementError {}

impl WorldGrid {
    /// Validate a footprint without touching the grid.
    fn check_footprint(
        &self,
        kind: StructureKind,
        x: usize,
        y: usize,
    ) -> Result<Structure, PlacementError> {
        let (w, h) = kind.footprint();
        let far = x.checked_add(w - 1).zip(y.checked_add(h - 1));
        match far {
            Some((fx, fy)) if self.in_bounds(fx, fy) => {}
            _ => return Err(PlacementError::OutOfBounds),
        }
        let structure = Structure::new(kind, x, y);
        for (cx, cy) in structure.cells() {
            let cell = self.get(cx, cy);
            if cell.terrain == TerrainKind::Water {
                return Err(PlacementError::BlockedByWater);
            }
            if cell.structure.is_some() {
                return Err(PlacementError::Occupied);
            }
        }
        Ok(structure)
    }

    /// Place `kind` with its origin at (x, y). The whole footprint must be in
    /// bounds, on land, and empty.
    pub fn place_structure(
        &mut self,
        kind: StructureKind,
        x: usize,
        y: usize,
    ) -> Result<StructureHandle, PlacementError> {
        let structure = self.check_footprint(kind, x, y)?;
        let handle = StructureHandle(self.next_handle);
        self.next_handle += 1;
        let cells: Vec<(usize, usize)> = structure.cells().collect();
        for (cx, cy) in cells {
            self.get_mut(cx, cy).structure = Some(handle);
        }
        self.structures.insert(handle, structure);
        Ok(handle)
    }

    /// Remove the structure covering (x, y), clearing every cell of its
    /// footprint. Any cell of a multi-tile structure may be targeted.
    pub fn demolish(&mut self, x: usize, y: usize) -> Result<Structure, PlacementError> {
        if !self.in_bounds(x, y) {
            return Err(PlacementError::OutOfBounds);
        }
        let handle = self.get(x, y).structure.ok_or(PlacementError::NotFound)?;
        let structure = self
            .structures
            .remove(&handle)
            .ok_or(PlacementError::NotFound)?;
        // Sweep by handle rather than by footprint so stray references left by
        // a damaged grid are cleared too.
        for cell in self.cells.iter_mut() {
            if cell.structure == Some(handle) {
                cell.structure = None;
            }
        }
        Ok(structure)
    }

    /// Place a straight run of 1x1 structures from (x0, y0) to (x1, y1).
    /// Only axis-aligned runs are supported; cells that are already occupied
    /// by the same kind are skipped. Every remaining cell is checked before
    /// any is written, so a failed line leaves the grid untouched. Returns
    /// the number of cells placed.
    pub fn place_line(
        &mut self,
        kind: StructureKind,
        (x0, y0): (usize, usize),
        (x1, y1): (usize, usize),
    ) -> Result<usize, PlacementError> {
        let cells: Vec<(usize, usize)> = if y0 == y1 {
            (x0.min(x1)..=x0.max(x1)).map(|x| (x, y0)).collect()
        } else if x0 == x1 {
            (y0.min(y1)..=y0.max(y1)).map(|y| (x0, y)).collect()
        } else {
            return Err(PlacementError::NotStraight);
        };

        let mut pending = Vec::with_capacity(cells.len());
        for (x, y) in cells {
            if self.in_bounds(x, y) && self.structure_kind(x, y) == Some(kind) {
                continue;
            }
            self.check_footprint(kind, x, y)?;
            pending.push((x, y));
        }
        for &(x, y) in &pending {
            self.place_structure(kind, x, y)?;
        }
        Ok(pending.len())
    }
}
