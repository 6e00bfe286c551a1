use bevy_ecs::resource::Resource;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::model::{BlockPos, PlayerId};

/// Which half of the simulation this app instance is.
///
/// The server is authoritative for ownership, siege state and guards; the
/// client only mirrors the capture ramp and reports discoveries.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Server,
    Client,
}

/// Deterministic RNG for randomized rounding during resource drain.
#[derive(Resource)]
pub struct StrongholdRng {
    pub rng: SmallRng,
    pub seed: u64,
}

impl StrongholdRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Client-side: the local player, for proximity discovery.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LocalPlayer {
    pub uid: PlayerId,
    pub pos: BlockPos,
}
