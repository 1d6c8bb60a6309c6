//! Flavor notifications for zone growth.
//!
//! `grow_zones` emits a `ZoneFlavorEvent` for some phase advances; the
//! messages are collected into a bounded `FlavorLog` for display.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::identity::BuildingId;
use crate::structures::ZoneKind;
use crate::zones::{lot_label, BuildingTier, SubBuilding, ZoneInstance, ZonePhase};

/// A zone grew and something new was built on it.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ZoneFlavorEvent {
    pub zone: BuildingId,
    pub kind: ZoneKind,
    pub phase: ZonePhase,
    pub text: String,
}

impl ZoneFlavorEvent {
    /// Describe the zone's newest construction. `None` for an empty zone.
    pub fn for_zone(zone: &ZoneInstance) -> Option<Self> {
        let lot = newest_lot(zone)?;
        let label = lot_label(zone.kind, lot);
        let text = match lot.tier {
            BuildingTier::Small | BuildingTier::Medium => format!(
                "A new {} opened in the {} zone at {}",
                label,
                zone.kind.name().to_lowercase(),
                zone.origin
            ),
            BuildingTier::Facility | BuildingTier::Complex => format!(
                "The {} zone at {} now hosts a {}",
                zone.kind.name().to_lowercase(),
                zone.origin,
                label
            ),
        };
        Some(Self {
            zone: zone.origin,
            kind: zone.kind,
            phase: zone.phase,
            text,
        })
    }
}

fn newest_lot(zone: &ZoneInstance) -> Option<SubBuilding> {
    match zone.phase {
        ZonePhase::Empty => None,
        ZonePhase::Facility | ZonePhase::Complex => zone.composition.get(0),
        _ => zone
            .composition
            .last_built()
            .and_then(|slot| zone.composition.get(slot)),
    }
}

/// Most recent flavor messages, oldest first.
#[derive(Resource, Debug)]
pub struct FlavorLog {
    pub entries: VecDeque<String>,
    pub capacity: usize,
}

impl Default for FlavorLog {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: 32,
        }
    }
}

impl FlavorLog {
    pub fn push(&mut self, text: String) {
        self.entries.push_back(text);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}

fn collect_flavor_events(mut events: EventReader<ZoneFlavorEvent>, mut log: ResMut<FlavorLog>) {
    for event in events.read() {
        info!("{}", event.text);
        log.push(event.text.clone());
    }
}

pub struct NotificationsPlugin;

impl Plugin for NotificationsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlavorLog>()
            .add_event::<ZoneFlavorEvent>()
            .add_systems(
                FixedUpdate,
                collect_flavor_events.in_set(crate::SimulationSet::PostSim),
            );
    }
}
