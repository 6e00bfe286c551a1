// Wall-clock cadence of the fast tick and the derived slower cadences.
pub const TICK_MILLIS: u32 = 20;
pub const TICKS_PER_SECOND: u64 = 1000 / TICK_MILLIS as u64; // 50

/// Credit recompute cadence (1 s).
pub const CREDIT_INTERVAL_TICKS: u64 = TICKS_PER_SECOND;
/// Territory update cadence: siege decay and client proximity (2 s).
pub const TERRITORY_INTERVAL_TICKS: u64 = TICKS_PER_SECOND * 2;
/// Resource drain cadence (6 s).
pub const DRAIN_INTERVAL_TICKS: u64 = TICKS_PER_SECOND * 6;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const HOURS_PER_DAY: f64 = 24.0;

/// Default world seconds elapsing per wall second.
pub const DEFAULT_SPEED_OF_TIME: f64 = 60.0;

/// Wall seconds covered by one fast tick.
pub fn tick_seconds() -> f32 {
    TICK_MILLIS as f32 / 1000.0
}

/// Wall seconds covered by `ticks` fast ticks.
pub fn seconds_for_ticks(ticks: u64) -> f64 {
    ticks as f64 * f64::from(TICK_MILLIS) / 1000.0
}
