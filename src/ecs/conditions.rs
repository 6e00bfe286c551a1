use bevy_ecs::system::Res;

use super::clock::WorldClock;
use super::resources::Side;
use super::time::{CREDIT_INTERVAL_TICKS, DRAIN_INTERVAL_TICKS, TERRITORY_INTERVAL_TICKS};

// Internal check functions for testability.

fn credit_check(tick: u64) -> bool {
    tick.is_multiple_of(CREDIT_INTERVAL_TICKS)
}

fn territory_check(tick: u64) -> bool {
    tick.is_multiple_of(TERRITORY_INTERVAL_TICKS)
}

fn drain_check(tick: u64) -> bool {
    tick.is_multiple_of(DRAIN_INTERVAL_TICKS)
}

// Bevy run condition functions (for use with `.run_if()`).

/// Medium cadence: resource credit recompute.
pub fn credit_cadence(clock: Res<WorldClock>) -> bool {
    credit_check(clock.tick_count)
}

/// Territory cadence: siege decay and proximity checks.
pub fn territory_cadence(clock: Res<WorldClock>) -> bool {
    territory_check(clock.tick_count)
}

/// Slow cadence: resource drain.
pub fn drain_cadence(clock: Res<WorldClock>) -> bool {
    drain_check(clock.tick_count)
}

pub fn on_server(side: Res<Side>) -> bool {
    *side == Side::Server
}

pub fn on_client(side: Res<Side>) -> bool {
    *side == Side::Client
}
