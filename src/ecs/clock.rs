use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

use super::time::{DEFAULT_SPEED_OF_TIME, HOURS_PER_DAY, SECONDS_PER_DAY, seconds_for_ticks, tick_seconds};

/// World calendar and tick counter.
///
/// Advances by one fast tick per schedule run. The `advance_clock` system moves
/// the clock forward at the end of each tick (in `StrongholdPhase::Last`), so
/// systems see the current time before it advances.
#[derive(Resource, Debug, Clone)]
pub struct WorldClock {
    /// World days elapsed since the calendar epoch.
    pub total_days: f64,
    pub tick_count: u64,
    /// World seconds elapsing per wall second.
    pub speed_of_time: f64,
}

impl WorldClock {
    pub fn new(start_day: f64) -> Self {
        Self {
            total_days: start_day,
            tick_count: 0,
            speed_of_time: DEFAULT_SPEED_OF_TIME,
        }
    }

    pub fn with_speed(mut self, speed_of_time: f64) -> Self {
        self.speed_of_time = speed_of_time;
        self
    }

    pub fn total_hours(&self) -> f64 {
        self.total_days * HOURS_PER_DAY
    }

    /// World days spanned by `ticks` fast ticks at the current speed.
    pub fn days_for_ticks(&self, ticks: u64) -> f64 {
        seconds_for_ticks(ticks) * self.speed_of_time / SECONDS_PER_DAY
    }

    /// Advance by one fast tick.
    pub fn advance(&mut self) {
        self.total_days += f64::from(tick_seconds()) * self.speed_of_time / SECONDS_PER_DAY;
        self.tick_count += 1;
    }
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Bevy system that advances the world clock by one tick.
pub fn advance_clock(mut clock: ResMut<WorldClock>) {
    clock.advance();
}
