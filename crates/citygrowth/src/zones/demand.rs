use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::structures::ZoneKind;

use super::registry::ZoneRegistry;

/// Market balance per zone kind in `[-1, 1]`. Positive values mean the city
/// wants more of the kind; negative values mean oversupply and drive decline.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ZoneDemand {
    pub residential: f32,
    pub commercial: f32,
    pub industrial: f32,
}

impl ZoneDemand {
    pub fn demand_for(&self, kind: ZoneKind) -> f32 {
        match kind {
            ZoneKind::Residential => self.residential,
            ZoneKind::Commercial => self.commercial,
            ZoneKind::Industrial => self.industrial,
        }
    }

    /// Move each value a `damping` fraction toward `target`.
    pub fn approach(&mut self, target: &ZoneDemand, damping: f32) {
        let damping = damping.clamp(0.0, 1.0);
        self.residential += (target.residential - self.residential) * damping;
        self.commercial += (target.commercial - self.commercial) * damping;
        self.industrial += (target.industrial - self.industrial) * damping;

        self.residential = self.residential.clamp(-1.0, 1.0);
        self.commercial = self.commercial.clamp(-1.0, 1.0);
        self.industrial = self.industrial.clamp(-1.0, 1.0);
    }
}

impl crate::Saveable for ZoneDemand {
    const SAVE_KEY: &'static str = "zone_demand";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if *self == Self::default() {
            return None;
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

/// Per-kind pull fed into the growth formula.
///
/// Residential zones follow the city's population; commercial zones follow
/// the number of developed residential zones; industrial zones follow the
/// number of developed commercial zones.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DemandSignals {
    pub population: u32,
    pub residential_zones: u32,
    pub commercial_zones: u32,
}

impl DemandSignals {
    pub fn gather(registry: &ZoneRegistry) -> Self {
        Self {
            population: registry.iter().map(|z| z.output.population).sum(),
            residential_zones: registry.developed_count(ZoneKind::Residential),
            commercial_zones: registry.developed_count(ZoneKind::Commercial),
        }
    }

    pub fn signal_for(&self, kind: ZoneKind) -> f32 {
        match kind {
            ZoneKind::Residential => self.population as f32,
            ZoneKind::Commercial => self.residential_zones as f32,
            ZoneKind::Industrial => self.commercial_zones as f32,
        }
    }
}
