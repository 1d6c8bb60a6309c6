//! Seeded RNG for growth jitter and flavor rolls.
//!
//! `ChaCha8Rng` gives the same stream on every platform, so a city started
//! from the same seed and fed the same edits grows the same way. Saving the
//! stream position lets a reloaded city draw exactly what it would have.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DEFAULT_SEED: u64 = 42;

/// Where a ChaCha8 stream stands: key, stream number and word offset.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPosition {
    key: [u8; 32],
    stream: u64,
    word: u128,
}

/// The only randomness source used by the growth systems.
#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn position(&self) -> StreamPosition {
        StreamPosition {
            key: self.0.get_seed(),
            stream: self.0.get_stream(),
            word: self.0.get_word_pos(),
        }
    }

    /// Continue a stream from a saved position.
    pub fn resume(position: StreamPosition) -> Self {
        let mut rng = ChaCha8Rng::from_seed(position.key);
        rng.set_stream(position.stream);
        rng.set_word_pos(position.word);
        Self(rng)
    }

    /// True with probability `p`. Draws nothing when `p` is not positive.
    pub fn chance(&mut self, p: f32) -> bool {
        p > 0.0 && self.0.gen::<f32>() < p
    }
}

impl crate::Saveable for SimRng {
    const SAVE_KEY: &'static str = "sim_rng";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(&self.position()))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        bitcode::decode::<StreamPosition>(bytes)
            .map(Self::resume)
            .unwrap_or_else(|e| {
                warn!("SimRng: undecodable save data, reseeding with default: {}", e);
                Self::default()
            })
    }
}

/// Installs a [`SimRng`] seeded with `seed` and registers it for saving.
pub struct SimRngPlugin {
    pub seed: u64,
}

impl Default for SimRngPlugin {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimRng::seeded(self.seed));

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<SimRng>();
    }
}
