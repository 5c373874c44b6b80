//! Core plugin: shared resources and global settings.

use crate::common::tunables::Tunables;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded RNG driving the boss decision draws. Injected as a resource so the
/// single source of randomness is reproducible in tests.
#[derive(Resource)]
pub struct ArenaRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl ArenaRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ArenaRng::new(42));
    app.insert_resource(Time::<Fixed>::from_hz(60.0));
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}
