//! Data-driven game parameters.
//!
//! Growth and connectivity tunables live in a single [`GameParams`] resource
//! so they can be adjusted without recompilation. The resource is registered
//! via the `Saveable` trait so overrides persist across save/load cycles.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::structures::ZoneKind;

// ---------------------------------------------------------------------------
// Connectivity parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct ConnectivityParams {
    /// Ticks between scheduled recalculations. Structural edits force one
    /// regardless of this cadence.
    pub recalc_interval_ticks: u32,
}

impl Default for ConnectivityParams {
    fn default() -> Self {
        Self {
            recalc_interval_ticks: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Zone growth parameters
// ---------------------------------------------------------------------------

/// Per-zone-kind growth tunables.
#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct ZoneGrowthParams {
    /// Progress points per tick before bonuses.
    pub base_rate: f32,
    /// Progress points per unit of the kind's demand signal.
    pub demand_coeff: f32,
    /// Upper bound on the demand term. The term is proportional to the
    /// signal below the cap; residential signals are raw population, so
    /// without it a large city would grow zones in a handful of ticks.
    pub demand_cap: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct GrowthParams {
    pub residential: ZoneGrowthParams,
    pub commercial: ZoneGrowthParams,
    pub industrial: ZoneGrowthParams,
    /// Fraction of the base rate applied to unconnected empty zones.
    pub trickle_fraction: f32,
    /// Flat bonus once a zone reaches both transport and energy.
    pub connected_bonus: f32,
    /// Multiplier applied from the first medium phase on.
    pub decel_medium: f32,
    /// Additional multiplier applied from the facility phase on.
    pub decel_facility: f32,
    /// Half-width of the symmetric random jitter.
    pub jitter: f32,
    /// Progress lost per tick at full negative demand.
    pub decline_weight: f32,
    /// Chance that a phase advance emits a flavor notification.
    pub flavor_chance: f32,
    /// Fraction of the gap to the market target closed per demand update.
    pub demand_damping: f32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            residential: ZoneGrowthParams {
                base_rate: 1.0,
                demand_coeff: 0.002,
                demand_cap: 2.0,
            },
            commercial: ZoneGrowthParams {
                base_rate: 0.8,
                demand_coeff: 0.25,
                demand_cap: 2.0,
            },
            industrial: ZoneGrowthParams {
                base_rate: 0.9,
                demand_coeff: 0.25,
                demand_cap: 2.0,
            },
            trickle_fraction: 0.15,
            connected_bonus: 1.5,
            decel_medium: 0.6,
            decel_facility: 0.5,
            jitter: 0.25,
            decline_weight: 3.0,
            flavor_chance: 0.35,
            demand_damping: 0.15,
        }
    }
}

impl GrowthParams {
    pub fn for_kind(&self, kind: ZoneKind) -> &ZoneGrowthParams {
        match kind {
            ZoneKind::Residential => &self.residential,
            ZoneKind::Commercial => &self.commercial,
            ZoneKind::Industrial => &self.industrial,
        }
    }
}

// ---------------------------------------------------------------------------
// Traffic parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct TrafficParams {
    /// Vehicles generated per resident or job on an adjacent zone.
    pub trips_per_capita: f32,
    /// Vehicles per road cell at which a network counts as fully congested.
    pub saturation_density: f32,
}

impl Default for TrafficParams {
    fn default() -> Self {
        Self {
            trips_per_capita: 0.3,
            saturation_density: 20.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level GameParams resource
// ---------------------------------------------------------------------------

#[derive(
    Resource, Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode, Default,
)]
pub struct GameParams {
    pub connectivity: ConnectivityParams,
    pub growth: GrowthParams,
    pub traffic: TrafficParams,
}

impl crate::Saveable for GameParams {
    const SAVE_KEY: &'static str = "game_params";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        // Defaults are saved too, so a save made with tuned params restores them.
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

pub struct GameParamsPlugin;

impl Plugin for GameParamsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameParams>();

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<GameParams>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Saveable;

    #[test]
    fn test_trickle_is_below_base_for_every_kind() {
        let params = GameParams::default();
        let fraction = params.growth.trickle_fraction;
        assert!(fraction > 0.0 && fraction < 1.0);
        for kind in ZoneKind::ALL {
            assert!(params.growth.for_kind(kind).base_rate > 0.0);
        }
    }

    #[test]
    fn test_saveable_roundtrip() {
        let mut params = GameParams::default();
        params.connectivity.recalc_interval_ticks = 3;
        params.growth.industrial.base_rate = 4.5;

        let bytes = params.save_to_bytes().expect("should produce bytes");
        let restored = GameParams::load_from_bytes(&bytes);

        assert_eq!(restored.connectivity.recalc_interval_ticks, 3);
        assert!((restored.growth.industrial.base_rate - 4.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_bytes_fall_back_to_default() {
        let restored = GameParams::load_from_bytes(&[]);
        assert_eq!(restored.connectivity.recalc_interval_ticks, 10);
    }
}
