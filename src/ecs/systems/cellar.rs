//! Resource accounting: food next to a marker or satellite buys claim days.
//!
//! Credit is recomputed from scratch every second; food is consumed every
//! six seconds to pay for the world time that passed. Both only run while the
//! supplied territory is claimed.

use bevy_app::{App, Plugin};
use bevy_ecs::query::Without;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};
use rand::Rng;
use tracing::debug;

use crate::config::StrongholdConfig;
use crate::ecs::clock::WorldClock;
use crate::ecs::components::{Cellar, Marker, Satellite, Territory, round_random};
use crate::ecs::conditions::{credit_cadence, drain_cadence, on_server};
use crate::ecs::resources::StrongholdRng;
use crate::ecs::schedule::{DomainSet, StrongholdTick};
use crate::ecs::time::DRAIN_INTERVAL_TICKS;
use crate::host::{HostWorld, WorldAccess};
use crate::model::BlockPos;

pub struct CellarPlugin;

impl Plugin for CellarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            StrongholdTick,
            (compute_marker_credit, compute_satellite_credit)
                .run_if(credit_cadence)
                .in_set(DomainSet::Cellar),
        );
        app.add_systems(
            StrongholdTick,
            (drain_marker_cellars, drain_satellite_cellars)
                .chain()
                .run_if(drain_cadence)
                .run_if(on_server)
                .in_set(DomainSet::Cellar),
        );
    }
}

// ---------------------------------------------------------------------------
// Container arithmetic
// ---------------------------------------------------------------------------

/// Days bought by all food in the four containers beside `pos`.
pub fn stored_credit(host: &dyn WorldAccess, pos: BlockPos, days_per_satiety: f32) -> f32 {
    pos.horizontal_neighbors()
        .into_iter()
        .filter_map(|side| host.container(side))
        .flat_map(|container| container.slots.iter().flatten())
        .filter_map(|stack| stack.satiety.map(|s| s * stack.quantity as f32))
        .map(|satiety| satiety * days_per_satiety)
        .sum()
}

/// Consume at least `required` satiety from the containers beside `pos`,
/// in neighbour then slot order. Fractional item counts are rounded at random.
/// Returns the satiety actually consumed.
pub fn drain_containers(
    host: &mut dyn WorldAccess,
    pos: BlockPos,
    required: f64,
    rng: &mut impl Rng,
) -> f64 {
    let mut consumed = 0.0;
    for side in pos.horizontal_neighbors() {
        let Some(container) = host.container_mut(side) else {
            continue;
        };
        for slot in 0..container.slots.len() {
            if consumed >= required {
                return consumed;
            }
            let Some(satiety) = container.slots[slot]
                .as_ref()
                .and_then(|stack| stack.satiety)
                .filter(|s| *s > 0.0)
                .map(f64::from)
            else {
                continue;
            };
            let wanted = round_random(rng, (required - consumed) / satiety);
            let taken = container.take_out(slot, wanted);
            consumed += f64::from(taken) * satiety;
        }
    }
    consumed
}

/// Satiety that pays for `elapsed_days` at the given conversion rate.
pub fn required_satiety(elapsed_days: f64, days_per_satiety: f32) -> f64 {
    if days_per_satiety <= 0.0 {
        return 0.0;
    }
    elapsed_days / f64::from(days_per_satiety)
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

fn compute_marker_credit(
    mut markers: Query<(&Marker, &Territory, &mut Cellar), Without<Satellite>>,
    config: Res<StrongholdConfig>,
    host: Res<HostWorld>,
) {
    for (marker, territory, mut cellar) in markers.iter_mut() {
        if !territory.is_claimed() {
            continue;
        }
        let rate = config.duration_per_satiety(marker.properties.expectancy_bonus);
        cellar.expectancy = stored_credit(&**host, marker.pos, rate);
    }
}

fn compute_satellite_credit(
    mut satellites: Query<(&Satellite, &mut Cellar), Without<Marker>>,
    markers: Query<(&Marker, &Territory)>,
    config: Res<StrongholdConfig>,
    host: Res<HostWorld>,
) {
    for (satellite, mut cellar) in satellites.iter_mut() {
        let Some((marker, territory)) = satellite.territory.and_then(|e| markers.get(e).ok())
        else {
            continue;
        };
        if !territory.is_claimed() || !satellite.banner_matches(marker.banner.as_ref()) {
            continue;
        }
        let rate = config.duration_per_satiety(
            satellite.properties.expectancy_bonus + marker.properties.expectancy_bonus,
        );
        cellar.expectancy = stored_credit(&**host, satellite.pos, rate);
    }
}

fn drain_marker_cellars(
    markers: Query<(&Marker, &Territory), Without<Satellite>>,
    config: Res<StrongholdConfig>,
    clock: Res<WorldClock>,
    mut host: ResMut<HostWorld>,
    mut rng: ResMut<StrongholdRng>,
) {
    let elapsed = clock.days_for_ticks(DRAIN_INTERVAL_TICKS);
    for (marker, territory) in markers.iter() {
        if !territory.is_claimed() {
            continue;
        }
        let rate = config.duration_per_satiety(marker.properties.expectancy_bonus);
        let required = required_satiety(elapsed, rate);
        let consumed = drain_containers(&mut **host, marker.pos, required, &mut rng.rng);
        debug!(pos = %marker.pos, required, consumed, "marker cellar drained");
    }
}

fn drain_satellite_cellars(
    satellites: Query<&Satellite, Without<Marker>>,
    markers: Query<(&Marker, &Territory)>,
    config: Res<StrongholdConfig>,
    clock: Res<WorldClock>,
    mut host: ResMut<HostWorld>,
    mut rng: ResMut<StrongholdRng>,
) {
    let elapsed = clock.days_for_ticks(DRAIN_INTERVAL_TICKS);
    for satellite in satellites.iter() {
        let Some((marker, territory)) = satellite.territory.and_then(|e| markers.get(e).ok())
        else {
            continue;
        };
        if !territory.is_claimed() || !satellite.banner_matches(marker.banner.as_ref()) {
            continue;
        }
        let rate = config.duration_per_satiety(
            satellite.properties.expectancy_bonus + marker.properties.expectancy_bonus,
        );
        let required = required_satiety(elapsed, rate);
        drain_containers(&mut **host, satellite.pos, required, &mut rng.rng);
    }
}
