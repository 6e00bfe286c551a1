//! Capture: the contest at each marker and the ramp of its captured percent.
//!
//! Three chained per-tick systems (`DomainSet::Capture`):
//! 1. `handle_marker_interactions`: start/stop contests, hang banners
//! 2. `track_contests`: drop contests whose actor left, died or wandered off,
//!    and sample the holder's direction
//! 3. `advance_capture`: ramp toward the target, then claim at 1 or unclaim at 0

use std::collections::HashSet;

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::message::{MessageReader, MessageWriter};
use bevy_ecs::query::Without;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, info, warn};

use crate::config::StrongholdConfig;
use crate::ecs::clock::WorldClock;
use crate::ecs::components::{
    CaptureDirection, CaptureState, Cellar, Marker, Satellite, Territory, UnclaimCause,
    claim_horizon,
};
use crate::ecs::events::{
    MarkerInteraction, Notification, TerritoryAdded, TerritoryUnclaimed, WorldEvent,
};
use crate::ecs::resources::{Registration, Roster, Side, TerritoryRegistry};
use crate::ecs::schedule::{DomainSet, StrongholdTick};
use crate::ecs::time::tick_seconds;
use crate::error::ClaimRejection;
use crate::host::{FULL_SKY_LIGHT, HostWorld, WorldAccess};
use crate::model::{Actor, BlockPos, ItemStack, PlayerId};

/// Blocks an actor may stray from the marker before the contest drops.
pub const CONTEST_RANGE: f64 = 6.0;
/// Days of credit granted on a fresh claim until the first recompute.
pub const CLAIM_GRACE_DAYS: f32 = 0.2;
/// An idle claim holds only while funded further than this into the future.
pub const HORIZON_MARGIN_DAYS: f64 = 0.1;

pub struct CapturePlugin;

impl Plugin for CapturePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            StrongholdTick,
            (handle_marker_interactions, track_contests, advance_capture)
                .chain()
                .in_set(DomainSet::Capture),
        );
    }
}

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

fn handle_marker_interactions(
    mut interactions: MessageReader<MarkerInteraction>,
    mut markers: Query<(&mut Marker, &mut CaptureState)>,
    roster: Res<Roster>,
    side: Res<Side>,
    mut host: ResMut<HostWorld>,
) {
    for interaction in interactions.read() {
        match interaction {
            MarkerInteraction::Start { marker, actor } => {
                let Ok((mut marker_block, mut capture)) = markers.get_mut(*marker) else {
                    warn!(?marker, "start interaction on unknown marker");
                    continue;
                };
                if roster.get(actor).is_none() {
                    warn!(%actor, "start interaction by unknown actor");
                    continue;
                }
                if !capture.try_start(actor) {
                    debug!(%actor, holder = ?capture.captured_by(), "marker already held");
                    continue;
                }
                if *side == Side::Server && marker_block.banner.is_none() {
                    hang_banner(&mut marker_block, actor, &mut **host);
                }
            }
            MarkerInteraction::Stop { marker, actor } | MarkerInteraction::Cancel { marker, actor } => {
                let Ok((_, mut capture)) = markers.get_mut(*marker) else {
                    continue;
                };
                if capture.captured_by() == Some(actor) {
                    capture.end_contest();
                }
            }
        }
    }
}

fn hang_banner(marker: &mut Marker, actor: &PlayerId, host: &mut dyn WorldAccess) {
    if !host.held_item(actor).is_some_and(ItemStack::is_banner) {
        return;
    }
    if let Some(banner) = host.take_held(actor, 1) {
        debug!(%actor, banner = %banner.code, pos = %marker.pos, "banner hung on marker");
        marker.banner = Some(banner);
    }
}

fn track_contests(
    mut events: MessageReader<WorldEvent>,
    roster: Res<Roster>,
    mut markers: Query<(&Marker, &mut CaptureState)>,
) {
    let departed: HashSet<PlayerId> = events
        .read()
        .filter_map(|event| match event {
            WorldEvent::PlayerLeft { uid } => Some(uid.clone()),
            WorldEvent::PlayerDied { victim, .. } => Some(victim.clone()),
            _ => None,
        })
        .collect();

    for (marker, mut capture) in markers.iter_mut() {
        let Some(actor) = capture.captured_by().cloned() else {
            continue;
        };
        let present = roster
            .get(&actor)
            .filter(|_| !departed.contains(&actor))
            .filter(|p| p.pos.distance_to(marker.pos) <= CONTEST_RANGE);
        match present {
            Some(player) => capture.direction = CaptureDirection::from_input(player.accelerating),
            None => {
                debug!(%actor, pos = %marker.pos, "contest lost actor presence");
                capture.end_contest();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Ramp and transitions
// ---------------------------------------------------------------------------

/// Credit supplied to `territory` by satellites flying the marker's banner.
pub fn satellite_credit<'a>(
    territory: Entity,
    marker_banner: Option<&ItemStack>,
    satellites: impl Iterator<Item = (&'a Satellite, &'a Cellar)>,
) -> f32 {
    satellites
        .filter(|(sat, _)| sat.territory == Some(territory) && sat.banner_matches(marker_banner))
        .map(|(_, cellar)| cellar.expectancy)
        .sum()
}

/// Depth and overlap checks, then registration.
fn try_register(
    entity: Entity,
    territory: &Territory,
    pos: BlockPos,
    registry: &mut TerritoryRegistry,
    host: &dyn WorldAccess,
    config: &StrongholdConfig,
) -> Result<Registration, ClaimRejection> {
    let depth = host.terrain_height_at(pos).saturating_sub(pos.y);
    if depth > config.underground_claim_limit {
        return Err(ClaimRejection::TooDeep {
            depth,
            limit: config.underground_claim_limit,
        });
    }
    registry.register(entity, territory.area())
}

#[allow(clippy::type_complexity, clippy::too_many_arguments)]
fn advance_capture(
    mut markers: Query<
        (Entity, &mut Marker, &mut Territory, &mut CaptureState, &mut Cellar),
        Without<Satellite>,
    >,
    satellites: Query<(&Satellite, &Cellar), Without<Marker>>,
    clock: Res<WorldClock>,
    config: Res<StrongholdConfig>,
    side: Res<Side>,
    roster: Res<Roster>,
    mut registry: ResMut<TerritoryRegistry>,
    mut host: ResMut<HostWorld>,
    mut notifications: MessageWriter<Notification>,
    mut added: MessageWriter<TerritoryAdded>,
    mut unclaimed: MessageWriter<TerritoryUnclaimed>,
) {
    let dt = tick_seconds();
    let now = clock.total_days;
    let mut out = Vec::new();

    for (entity, mut marker, mut territory, mut capture, mut cellar) in markers.iter_mut() {
        let supplied = satellite_credit(entity, marker.banner.as_ref(), satellites.iter());
        let horizon = claim_horizon(now, cellar.expectancy, supplied, territory.siege_intensity);
        let claimed = territory.is_claimed();
        let target = capture.target_percent(|| {
            claimed
                && host.sky_light_at(marker.pos) >= FULL_SKY_LIGHT
                && horizon - now > HORIZON_MARGIN_DAYS
        });
        capture.advance(target, dt, marker.properties.capture_duration);

        if *side != Side::Server {
            continue;
        }

        if capture.captured_percent <= 0.0 && claimed {
            let cause = if cellar.expectancy == 0.0 {
                UnclaimCause::ResourceExhausted
            } else {
                UnclaimCause::LostContest
            };
            territory.unclaim(cause, &mut out);
            info!(pos = %marker.pos, ?cause, "territory unclaimed");
            unclaimed.write(TerritoryUnclaimed {
                territory: entity,
                cause,
            });
            if let Some(banner) = marker.banner.take() {
                host.spawn_item(marker.pos, banner);
            }
            continue;
        }

        if capture.captured_percent < 1.0 || claimed {
            continue;
        }
        let Some(contest) = capture.contest.clone() else {
            continue;
        };
        let Some(actor) = roster.actor(&contest.actor).cloned() else {
            continue;
        };

        match try_register(entity, &territory, marker.pos, &mut registry, &**host, &config) {
            Ok(registration) => {
                claim(&mut territory, &mut cellar, &actor, &roster, &mut out);
                capture.end_contest();
                info!(pos = %marker.pos, owner = %actor.uid, "territory claimed");
                if registration == Registration::Inserted {
                    added.write(TerritoryAdded { territory: entity });
                }
            }
            Err(rejection) => {
                debug!(pos = %marker.pos, actor = %actor.uid, %rejection, "claim rejected");
                if let Some(contest) = capture.contest.as_mut()
                    && !contest.rejection_shown
                {
                    contest.rejection_shown = true;
                    out.push(Notification::error(&actor.uid, rejection.code()));
                }
            }
        }
    }

    notifications.write_batch(out);
}

fn claim(
    territory: &mut Territory,
    cellar: &mut Cellar,
    actor: &Actor,
    roster: &Roster,
    out: &mut Vec<Notification>,
) {
    territory.claim(actor, out);
    cellar.expectancy = cellar.expectancy.max(CLAIM_GRACE_DAYS);
    territory.recount_active_members(roster.iter());
}
