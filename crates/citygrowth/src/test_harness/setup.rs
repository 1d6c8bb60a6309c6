//! Map-building methods for `TestCity`.

use crate::game_params::GameParams;
use crate::grid::{Structure, StructureHandle, TerrainKind, WorldGrid};
use crate::placement::PlacementError;
use crate::sim_rng::SimRng;
use crate::structures::{StructureKind, ZoneKind};

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Builders (consume and return Self)
    // -----------------------------------------------------------------------

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.insert_resource(SimRng::seeded(seed));
        self
    }

    /// Tweak the growth and connectivity tunables.
    pub fn with_params(mut self, tweak: impl FnOnce(&mut GameParams)) -> Self {
        tweak(&mut self.app.world_mut().resource_mut::<GameParams>());
        self
    }

    /// Straight road from `from` to `to` (inclusive, axis-aligned).
    pub fn with_road(mut self, from: (usize, usize), to: (usize, usize)) -> Self {
        self.place_line(StructureKind::Road, from, to);
        self
    }

    /// Straight power line from `from` to `to` (inclusive, axis-aligned).
    pub fn with_power_line(mut self, from: (usize, usize), to: (usize, usize)) -> Self {
        self.place_line(StructureKind::PowerLine, from, to);
        self
    }

    /// Any structure with its origin at (x, y).
    pub fn with_structure(mut self, kind: StructureKind, x: usize, y: usize) -> Self {
        if let Err(e) = self.place(kind, x, y) {
            panic!("Failed to place {kind:?} at ({x}, {y}): {e}");
        }
        self
    }

    /// A 3x3 zone with its origin at (x, y).
    pub fn with_zone(self, kind: ZoneKind, x: usize, y: usize) -> Self {
        self.with_structure(kind.structure_kind(), x, y)
    }

    /// Turn a rectangle of cells (inclusive) into water.
    pub fn with_water(mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        {
            let mut grid = self.app.world_mut().resource_mut::<WorldGrid>();
            for y in y0..=y1 {
                for x in x0..=x1 {
                    grid.set_terrain(x, y, TerrainKind::Water);
                }
            }
        }
        self
    }

    // -----------------------------------------------------------------------
    // Edits between ticks
    // -----------------------------------------------------------------------

    pub fn place(
        &mut self,
        kind: StructureKind,
        x: usize,
        y: usize,
    ) -> Result<StructureHandle, PlacementError> {
        self.app
            .world_mut()
            .resource_mut::<WorldGrid>()
            .place_structure(kind, x, y)
    }

    pub fn demolish(&mut self, x: usize, y: usize) -> Result<Structure, PlacementError> {
        self.app.world_mut().resource_mut::<WorldGrid>().demolish(x, y)
    }

    fn place_line(&mut self, kind: StructureKind, from: (usize, usize), to: (usize, usize)) {
        let mut grid = self.app.world_mut().resource_mut::<WorldGrid>();
        if let Err(e) = grid.place_line(kind, from, to) {
            panic!("Failed to place {kind:?} line {from:?} -> {to:?}: {e}");
        }
    }
}
