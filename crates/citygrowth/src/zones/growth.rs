use rand::Rng;

use crate::game_params::GrowthParams;
use crate::structures::ZoneKind;

use super::types::ZonePhase;

/// Everything a zone's growth depends on for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrowthInputs {
    pub has_transport: bool,
    pub has_energy: bool,
    /// Kind-specific pull: population for residential, the complementary
    /// zone count for commercial and industrial.
    pub demand_signal: f32,
    /// Market balance for the kind in `[-1, 1]`; negative means oversupply.
    pub demand_balance: f32,
}

/// Progress gained this tick. Never negative.
///
/// An unconnected empty zone gets a small trickle so it still shows activity.
/// Any other zone missing transport or energy gets exactly zero. Connected
/// zones get base + bonus + demand, slowed down at later phases, plus a
/// symmetric jitter; only the final result is floored at zero.
pub fn growth_rate(
    kind: ZoneKind,
    phase: ZonePhase,
    inputs: &GrowthInputs,
    params: &GrowthParams,
    rng: &mut impl Rng,
) -> f32 {
    let kind_params = params.for_kind(kind);

    if !inputs.has_transport && phase == ZonePhase::Empty {
        return kind_params.base_rate * params.trickle_fraction;
    }
    if !inputs.has_transport || !inputs.has_energy {
        return 0.0;
    }

    let demand = (kind_params.demand_coeff * inputs.demand_signal.max(0.0))
        .min(kind_params.demand_cap);
    let mut rate = kind_params.base_rate + params.connected_bonus + demand;

    if phase >= ZonePhase::Medium1 {
        rate *= params.decel_medium;
    }
    if phase >= ZonePhase::Facility {
        rate *= params.decel_facility;
    }

    if params.jitter > 0.0 {
        rate += rng.gen_range(-params.jitter..=params.jitter);
    }
    rate.max(0.0)
}

/// Progress lost this tick to oversupply. Missing infrastructure alone never
/// causes decline.
pub fn decline_rate(inputs: &GrowthInputs, params: &GrowthParams) -> f32 {
    params.decline_weight * (-inputs.demand_balance).clamp(0.0, 1.0)
}

/// Net change in progress for one tick.
pub fn growth_delta(
    kind: ZoneKind,
    phase: ZonePhase,
    inputs: &GrowthInputs,
    params: &GrowthParams,
    rng: &mut impl Rng,
) -> f32 {
    growth_rate(kind, phase, inputs, params, rng) - decline_rate(inputs, params)
}
