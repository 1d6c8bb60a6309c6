use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::ZONE_FOOTPRINT;

/// The three growable zone families.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub enum ZoneKind {
    Residential,
    Commercial,
    Industrial,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 3] = [
        ZoneKind::Residential,
        ZoneKind::Commercial,
        ZoneKind::Industrial,
    ];

    pub fn structure_kind(self) -> StructureKind {
        match self {
            ZoneKind::Residential => StructureKind::Residential,
            ZoneKind::Commercial => StructureKind::Commercial,
            ZoneKind::Industrial => StructureKind::Industrial,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ZoneKind::Residential => "Residential",
            ZoneKind::Commercial => "Commercial",
            ZoneKind::Industrial => "Industrial",
        }
    }
}

/// Everything that can be placed on the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub enum StructureKind {
    Road,
    PowerLine,
    CoalPlant,
    SolarFarm,
    WindTurbine,
    NuclearPlant,
    Residential,
    Commercial,
    Industrial,
    Port,
    Park,
}

impl StructureKind {
    /// Footprint as (width, height) in cells. The origin is the top-left cell.
    pub fn footprint(self) -> (usize, usize) {
        match self {
            StructureKind::Road
            | StructureKind::PowerLine
            | StructureKind::WindTurbine
            | StructureKind::Park => (1, 1),
            StructureKind::CoalPlant | StructureKind::SolarFarm | StructureKind::Port => (2, 2),
            StructureKind::NuclearPlant => (3, 3),
            StructureKind::Residential | StructureKind::Commercial | StructureKind::Industrial => {
                (ZONE_FOOTPRINT, ZONE_FOOTPRINT)
            }
        }
    }

    /// Cells that join transport networks.
    pub fn is_transport(self) -> bool {
        matches!(self, StructureKind::Road)
    }

    pub fn is_power_source(self) -> bool {
        self.generation_capacity() > 0
    }

    /// Cells that carry power without generating it.
    pub fn carries_power(self) -> bool {
        matches!(self, StructureKind::PowerLine)
    }

    /// Cells that join energy grids: lines and sources.
    pub fn is_conductor(self) -> bool {
        self.carries_power() || self.is_power_source()
    }

    /// Output in MW, counted once per placed structure.
    pub fn generation_capacity(self) -> u32 {
        match self {
            StructureKind::CoalPlant => 100,
            StructureKind::SolarFarm => 30,
            StructureKind::WindTurbine => 10,
            StructureKind::NuclearPlant => 400,
            _ => 0,
        }
    }

    pub fn zone_kind(self) -> Option<ZoneKind> {
        match self {
            StructureKind::Residential => Some(ZoneKind::Residential),
            StructureKind::Commercial => Some(ZoneKind::Commercial),
            StructureKind::Industrial => Some(ZoneKind::Industrial),
            _ => None,
        }
    }

    pub fn is_zone(self) -> bool {
        self.zone_kind().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Road => "Road",
            StructureKind::PowerLine => "Power Line",
            StructureKind::CoalPlant => "Coal Plant",
            StructureKind::SolarFarm => "Solar Farm",
            StructureKind::WindTurbine => "Wind Turbine",
            StructureKind::NuclearPlant => "Nuclear Plant",
            StructureKind::Residential => "Residential Zone",
            StructureKind::Commercial => "Commercial Zone",
            StructureKind::Industrial => "Industrial Zone",
            StructureKind::Port => "Port",
            StructureKind::Park => "Park",
        }
    }
}
