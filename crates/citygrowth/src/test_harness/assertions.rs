//! Assertion helpers for `TestCity` integration tests.

use crate::zones::ZonePhase;

use super::TestCity;

impl TestCity {
    pub fn assert_zone_phase(&self, x: usize, y: usize, expected: ZonePhase) {
        let phase = self.zone_phase(x, y);
        assert_eq!(
            phase,
            Some(expected),
            "Expected zone at ({x}, {y}) in {expected:?}, found {phase:?}"
        );
    }

    pub fn assert_zone_phase_at_least(&self, x: usize, y: usize, min: ZonePhase) {
        let phase = self.zone_phase(x, y);
        assert!(
            phase.is_some_and(|p| p >= min),
            "Expected zone at ({x}, {y}) at or past {min:?}, found {phase:?}"
        );
    }

    pub fn assert_connected(&self, x: usize, y: usize) {
        assert!(
            self.has_transport(x, y),
            "Expected transport access at ({x}, {y})"
        );
        assert!(
            self.has_energy(x, y),
            "Expected energy access at ({x}, {y})"
        );
    }

    pub fn assert_no_energy(&self, x: usize, y: usize) {
        assert!(
            !self.has_energy(x, y),
            "Expected no energy access at ({x}, {y})"
        );
    }
}
