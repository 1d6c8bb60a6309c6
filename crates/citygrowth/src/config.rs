pub const GRID_WIDTH: usize = 256;
pub const GRID_HEIGHT: usize = 256;

/// Side length, in cells, of every zone footprint.
pub const ZONE_FOOTPRINT: usize = 3;
/// Number of lots in a zone composition (`ZONE_FOOTPRINT` squared).
pub const ZONE_LOTS: usize = ZONE_FOOTPRINT * ZONE_FOOTPRINT;

/// Progress at which a zone advances to its next phase.
pub const PROGRESS_ADVANCE: f32 = 100.0;
/// Progress at which a zone regresses to its previous phase.
pub const PROGRESS_REGRESS: f32 = -50.0;
/// Progress a zone restarts from after regressing.
pub const PROGRESS_AFTER_REGRESS: f32 = 50.0;
