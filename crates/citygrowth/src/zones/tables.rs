//! Static per-kind, per-phase lookup tables: outputs, lot styles and the
//! fixed layouts used by the facility and complex phases.

use crate::structures::ZoneKind;

use super::types::{BuildingTier, Composition, SubBuilding, ZoneOutput, ZonePhase};

// Indexed by `ZonePhase::index()`.
const RESIDENTIAL_POPULATION: [u32; 8] = [0, 4, 8, 12, 24, 36, 80, 150];
const RESIDENTIAL_TAX: [f32; 8] = [0.0, 1.0, 2.0, 3.0, 6.0, 9.0, 20.0, 40.0];
const RESIDENTIAL_POLLUTION: [f32; 8] = [0.0, 0.0, 0.0, 0.0, 0.5, 0.5, 1.0, 2.0];

const COMMERCIAL_JOBS: [u32; 8] = [0, 3, 6, 9, 18, 27, 60, 110];
const COMMERCIAL_TAX: [f32; 8] = [0.0, 2.0, 4.0, 6.0, 12.0, 18.0, 40.0, 75.0];
const COMMERCIAL_POLLUTION: [f32; 8] = [0.0, 0.0, 0.0, 1.0, 1.0, 2.0, 3.0, 4.0];

const INDUSTRIAL_JOBS: [u32; 8] = [0, 5, 10, 15, 30, 45, 90, 160];
const INDUSTRIAL_PRODUCTION: [f32; 8] = [0.0, 2.0, 4.0, 6.0, 12.0, 18.0, 40.0, 70.0];
const INDUSTRIAL_POLLUTION: [f32; 8] = [0.0, 2.0, 4.0, 6.0, 10.0, 14.0, 25.0, 40.0];

pub fn output_for(kind: ZoneKind, phase: ZonePhase) -> ZoneOutput {
    let i = phase.index() as usize;
    match kind {
        ZoneKind::Residential => ZoneOutput {
            population: RESIDENTIAL_POPULATION[i],
            jobs: 0,
            tax_or_production: RESIDENTIAL_TAX[i],
            pollution: RESIDENTIAL_POLLUTION[i],
        },
        ZoneKind::Commercial => ZoneOutput {
            population: 0,
            jobs: COMMERCIAL_JOBS[i],
            tax_or_production: COMMERCIAL_TAX[i],
            pollution: COMMERCIAL_POLLUTION[i],
        },
        ZoneKind::Industrial => ZoneOutput {
            population: 0,
            jobs: INDUSTRIAL_JOBS[i],
            tax_or_production: INDUSTRIAL_PRODUCTION[i],
            pollution: INDUSTRIAL_POLLUTION[i],
        },
    }
}

const RESIDENTIAL_SMALL: [&str; 3] = ["cottage", "bungalow", "duplex"];
const RESIDENTIAL_MEDIUM: [&str; 2] = ["townhouse row", "walk-up apartments"];
const COMMERCIAL_SMALL: [&str; 3] = ["corner shop", "bakery", "diner"];
const COMMERCIAL_MEDIUM: [&str; 2] = ["grocery store", "office suites"];
const INDUSTRIAL_SMALL: [&str; 3] = ["workshop", "storage shed", "machine shop"];
const INDUSTRIAL_MEDIUM: [&str; 2] = ["warehouse", "assembly plant"];

fn styles(kind: ZoneKind, tier: BuildingTier) -> &'static [&'static str] {
    match (kind, tier) {
        (ZoneKind::Residential, BuildingTier::Small) => &RESIDENTIAL_SMALL,
        (ZoneKind::Residential, BuildingTier::Medium) => &RESIDENTIAL_MEDIUM,
        (ZoneKind::Commercial, BuildingTier::Small) => &COMMERCIAL_SMALL,
        (ZoneKind::Commercial, BuildingTier::Medium) => &COMMERCIAL_MEDIUM,
        (ZoneKind::Industrial, BuildingTier::Small) => &INDUSTRIAL_SMALL,
        (ZoneKind::Industrial, BuildingTier::Medium) => &INDUSTRIAL_MEDIUM,
        (_, BuildingTier::Facility) | (_, BuildingTier::Complex) => &[],
    }
}

/// Number of styles a small or medium lot can take for `kind`.
pub fn style_count(kind: ZoneKind, tier: BuildingTier) -> usize {
    styles(kind, tier).len()
}

/// Human-readable name of a lot, used by flavor notifications.
pub fn lot_label(kind: ZoneKind, lot: SubBuilding) -> &'static str {
    match lot.tier {
        BuildingTier::Small | BuildingTier::Medium => {
            let names = styles(kind, lot.tier);
            names[lot.variant as usize % names.len()]
        }
        BuildingTier::Facility => match kind {
            ZoneKind::Residential => "apartment block",
            ZoneKind::Commercial => "shopping arcade",
            ZoneKind::Industrial => "factory",
        },
        BuildingTier::Complex => match kind {
            ZoneKind::Residential => "residential towers",
            ZoneKind::Commercial => "commercial plaza",
            ZoneKind::Industrial => "industrial park",
        },
    }
}

const fn facility(part: u8) -> Option<SubBuilding> {
    Some(SubBuilding::new(BuildingTier::Facility, part))
}

const fn medium(variant: u8) -> Option<SubBuilding> {
    Some(SubBuilding::new(BuildingTier::Medium, variant))
}

const fn small(variant: u8) -> Option<SubBuilding> {
    Some(SubBuilding::new(BuildingTier::Small, variant))
}

const fn complex(part: u8) -> Option<SubBuilding> {
    Some(SubBuilding::new(BuildingTier::Complex, part))
}

/// A 2x2 facility in the north-west corner, ringed by older buildings.
pub const FACILITY_LAYOUT: Composition = Composition::from_lots([
    [facility(0), facility(1), medium(0)],
    [facility(2), facility(3), medium(1)],
    [small(0), small(1), small(2)],
]);

/// The terminal layout: one structure covering every lot.
pub const COMPLEX_LAYOUT: Composition = Composition::from_lots([
    [complex(0), complex(1), complex(2)],
    [complex(3), complex(4), complex(5)],
    [complex(6), complex(7), complex(8)],
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_grow_with_phase() {
        for kind in ZoneKind::ALL {
            let mut prev = output_for(kind, ZonePhase::Empty);
            assert_eq!(prev, ZoneOutput::default());
            for phase in &ZonePhase::ALL[1..] {
                let out = output_for(kind, *phase);
                assert!(out.population + out.jobs > prev.population + prev.jobs);
                assert!(out.tax_or_production > prev.tax_or_production);
                prev = out;
            }
        }
    }

    #[test]
    fn test_residential_has_no_jobs_and_job_zones_no_residents() {
        for phase in ZonePhase::ALL {
            assert_eq!(output_for(ZoneKind::Residential, phase).jobs, 0);
            assert_eq!(output_for(ZoneKind::Commercial, phase).population, 0);
            assert_eq!(output_for(ZoneKind::Industrial, phase).population, 0);
        }
    }

    #[test]
    fn test_fixed_layouts_fill_every_lot() {
        assert_eq!(FACILITY_LAYOUT.built_count(), 9);
        assert_eq!(COMPLEX_LAYOUT.built_count(), 9);
    }

    #[test]
    fn test_labels_are_kind_specific() {
        let lot = SubBuilding::new(BuildingTier::Small, 0);
        assert_eq!(lot_label(ZoneKind::Residential, lot), "cottage");
        assert_eq!(lot_label(ZoneKind::Industrial, lot), "workshop");
        let lot = SubBuilding::new(BuildingTier::Medium, 5);
        assert_eq!(lot_label(ZoneKind::Commercial, lot), "office suites");
    }
}
