use rand::Rng;

use crate::config::{PROGRESS_ADVANCE, PROGRESS_AFTER_REGRESS, PROGRESS_REGRESS};
use crate::game_params::GrowthParams;
use crate::identity::BuildingId;
use crate::structures::ZoneKind;

use super::growth::{growth_delta, GrowthInputs};
use super::tables::{style_count, COMPLEX_LAYOUT, FACILITY_LAYOUT};
use super::types::{BuildingTier, Composition, SubBuilding, ZoneInstance, ZonePhase};

/// What a single tick did to a zone's phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Steady,
    Advanced(ZonePhase),
    Regressed(ZonePhase),
}

/// Style of a slot-filled lot. Depends only on the zone's origin and the slot
/// so a zone rebuilds the same lots after regressing.
fn lot_for(origin: BuildingId, kind: ZoneKind, tier: BuildingTier, slot: usize) -> SubBuilding {
    let count = style_count(kind, tier).max(1);
    let variant = (origin.x + origin.y + slot) % count;
    SubBuilding::new(tier, variant as u8)
}

/// Composition of a zone that reached `phase` one lot at a time.
fn slot_layout(origin: BuildingId, kind: ZoneKind, phase: ZonePhase) -> Composition {
    let mut composition = Composition::default();
    let reached = &ZonePhase::ALL[1..=phase.index() as usize];
    for (slot, step) in reached.iter().enumerate() {
        if let Some(tier) = step.tier().filter(|_| step.fills_single_lot()) {
            composition.set(slot, Some(lot_for(origin, kind, tier, slot)));
        }
    }
    composition
}

/// Move a zone one phase forward. Returns false at the terminal phase.
pub fn advance_phase(zone: &mut ZoneInstance) -> bool {
    let Some(next) = zone.phase.next() else {
        return false;
    };
    match next {
        ZonePhase::Facility => zone.composition = FACILITY_LAYOUT,
        ZonePhase::Complex => zone.composition = COMPLEX_LAYOUT,
        _ => {
            if let (Some(tier), Some(slot)) = (next.tier(), zone.composition.first_vacant()) {
                let lot = lot_for(zone.origin, zone.kind, tier, slot);
                zone.composition.set(slot, Some(lot));
            }
        }
    }
    zone.phase = next;
    zone.refresh_output();
    true
}

/// Move a zone one phase back. Returns false at `Empty`, which is the floor.
pub fn regress_phase(zone: &mut ZoneInstance) -> bool {
    let Some(prev) = zone.phase.prev() else {
        return false;
    };
    match zone.phase {
        ZonePhase::Complex => zone.composition = FACILITY_LAYOUT,
        ZonePhase::Facility => zone.composition = slot_layout(zone.origin, zone.kind, prev),
        _ => {
            if let Some(slot) = zone.composition.last_built() {
                zone.composition.set(slot, None);
            }
        }
    }
    zone.phase = prev;
    zone.refresh_output();
    true
}

/// Add `delta` to a zone's progress and resolve any phase change.
///
/// Reaching 100 advances and restarts at 0; reaching -50 regresses and
/// restarts at 50. Where no transition is possible (terminal phase, or
/// `Empty` on the way down) progress is held at the bound instead.
pub fn apply_progress(zone: &mut ZoneInstance, delta: f32) -> TickOutcome {
    zone.progress += delta;
    let mut outcome = TickOutcome::Steady;

    if zone.progress >= PROGRESS_ADVANCE {
        if advance_phase(zone) {
            zone.progress = 0.0;
            outcome = TickOutcome::Advanced(zone.phase);
        }
    } else if zone.progress <= PROGRESS_REGRESS && regress_phase(zone) {
        zone.progress = PROGRESS_AFTER_REGRESS;
        outcome = TickOutcome::Regressed(zone.phase);
    }

    zone.progress = zone.progress.clamp(PROGRESS_REGRESS, PROGRESS_ADVANCE);
    zone.refresh_output();
    outcome
}

/// Run one simulation tick for a zone.
pub fn tick(
    zone: &mut ZoneInstance,
    inputs: &GrowthInputs,
    params: &GrowthParams,
    rng: &mut impl Rng,
) -> TickOutcome {
    let delta = growth_delta(zone.kind, zone.phase, inputs, params, rng);
    apply_progress(zone, delta)
}
