use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::{ZONE_FOOTPRINT, ZONE_LOTS};
use crate::identity::BuildingId;
use crate::structures::ZoneKind;

use super::tables::output_for;

/// Development stage of a zone. Transitions move exactly one step at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(u8)]
pub enum ZonePhase {
    #[default]
    Empty = 0,
    Small1 = 1,
    Small2 = 2,
    Small3 = 3,
    Medium1 = 4,
    Medium2 = 5,
    Facility = 6,
    Complex = 7,
}

impl ZonePhase {
    pub const ALL: [ZonePhase; 8] = [
        ZonePhase::Empty,
        ZonePhase::Small1,
        ZonePhase::Small2,
        ZonePhase::Small3,
        ZonePhase::Medium1,
        ZonePhase::Medium2,
        ZonePhase::Facility,
        ZonePhase::Complex,
    ];

    pub const TERMINAL: ZonePhase = ZonePhase::Complex;

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_terminal(self) -> bool {
        self == Self::TERMINAL
    }

    /// Tier of the lot constructed when a zone enters this phase.
    pub fn tier(self) -> Option<BuildingTier> {
        match self {
            ZonePhase::Empty => None,
            ZonePhase::Small1 | ZonePhase::Small2 | ZonePhase::Small3 => Some(BuildingTier::Small),
            ZonePhase::Medium1 | ZonePhase::Medium2 => Some(BuildingTier::Medium),
            ZonePhase::Facility => Some(BuildingTier::Facility),
            ZonePhase::Complex => Some(BuildingTier::Complex),
        }
    }

    /// Phases reached by filling one lot at a time. `Facility` and `Complex`
    /// replace the whole composition instead.
    pub fn fills_single_lot(self) -> bool {
        matches!(
            self.tier(),
            Some(BuildingTier::Small) | Some(BuildingTier::Medium)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum BuildingTier {
    Small,
    Medium,
    Facility,
    Complex,
}

/// What stands on one lot of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct SubBuilding {
    pub tier: BuildingTier,
    /// Style index for small/medium lots; part index for fixed layouts.
    pub variant: u8,
}

impl SubBuilding {
    pub const fn new(tier: BuildingTier, variant: u8) -> Self {
        Self { tier, variant }
    }
}

/// The 3x3 lots of a zone, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct Composition {
    pub lots: [[Option<SubBuilding>; ZONE_FOOTPRINT]; ZONE_FOOTPRINT],
}

impl Composition {
    pub const fn from_lots(lots: [[Option<SubBuilding>; ZONE_FOOTPRINT]; ZONE_FOOTPRINT]) -> Self {
        Self { lots }
    }

    pub fn get(&self, slot: usize) -> Option<SubBuilding> {
        self.lots[slot / ZONE_FOOTPRINT][slot % ZONE_FOOTPRINT]
    }

    pub fn set(&mut self, slot: usize, lot: Option<SubBuilding>) {
        self.lots[slot / ZONE_FOOTPRINT][slot % ZONE_FOOTPRINT] = lot;
    }

    /// First vacant lot in row-major order.
    pub fn first_vacant(&self) -> Option<usize> {
        (0..ZONE_LOTS).find(|&slot| self.get(slot).is_none())
    }

    /// Last built lot in row-major order.
    pub fn last_built(&self) -> Option<usize> {
        (0..ZONE_LOTS).rev().find(|&slot| self.get(slot).is_some())
    }

    pub fn built_count(&self) -> usize {
        (0..ZONE_LOTS).filter(|&slot| self.get(slot).is_some()).count()
    }

    pub fn is_vacant(&self) -> bool {
        self.built_count() == 0
    }
}

/// Derived per-phase figures consumed by economy aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct ZoneOutput {
    pub population: u32,
    pub jobs: u32,
    /// Tax for residential and commercial zones, goods for industrial zones.
    pub tax_or_production: f32,
    pub pollution: f32,
}

/// A registered 3x3 growable zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ZoneInstance {
    pub origin: BuildingId,
    pub kind: ZoneKind,
    pub phase: ZonePhase,
    /// Accumulated growth in `[-50, 100]`.
    pub progress: f32,
    pub composition: Composition,
    pub output: ZoneOutput,
}

impl ZoneInstance {
    pub fn new(origin: BuildingId, kind: ZoneKind) -> Self {
        Self {
            origin,
            kind,
            phase: ZonePhase::Empty,
            progress: 0.0,
            composition: Composition::default(),
            output: output_for(kind, ZonePhase::Empty),
        }
    }

    pub fn refresh_output(&mut self) {
        self.output = output_for(self.kind, self.phase);
    }

    pub fn snapshot(&self) -> ZoneSnapshot {
        ZoneSnapshot {
            kind: self.kind,
            phase: self.phase,
            progress: self.progress,
            population: self.output.population,
            jobs: self.output.jobs,
            tax_or_production: self.output.tax_or_production,
            pollution: self.output.pollution,
        }
    }
}

/// Read-only view of a zone for rendering and economy aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSnapshot {
    pub kind: ZoneKind,
    pub phase: ZonePhase,
    pub progress: f32,
    pub population: u32,
    pub jobs: u32,
    pub tax_or_production: f32,
    pub pollution: f32,
}
