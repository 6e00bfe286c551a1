//! Routing of world happenings into the registry.
//!
//! `track_roster` keeps the online roster and member counts current on both
//! sides. `guard_world_events` runs on the server only: it reverts denied
//! block mutations and turns kills inside a territory into siege pressure.

use bevy_app::{App, Plugin};
use bevy_ecs::message::{MessageReader, MessageWriter};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, warn};

use crate::ecs::clock::WorldClock;
use crate::ecs::components::Territory;
use crate::ecs::conditions::on_server;
use crate::ecs::events::{Killer, Notification, WorldEvent};
use crate::ecs::resources::{BreakWarnings, Roster, TerritoryRegistry};
use crate::ecs::schedule::{DomainSet, StrongholdTick};
use crate::error::MutationDenied;
use crate::host::HostWorld;
use crate::model::{Actor, AttackerId, BlockId, BlockPos, ItemStack, PlayerId};

/// Repeated denied breaks within this many world hours skip the warning.
pub const BREAK_WARNING_WINDOW_HOURS: f64 = 1.0;
/// Siege added by each repeated denied break.
pub const BREAK_SIEGE_INCREMENT: f32 = 0.5;
/// Siege added when a rival kills a member inside the territory.
pub const DEATH_SIEGE_INCREMENT: f32 = 1.0;

pub struct GuardPlugin;

impl Plugin for GuardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            StrongholdTick,
            (track_roster, guard_world_events.run_if(on_server))
                .chain()
                .in_set(DomainSet::WorldEvents),
        );
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

fn track_roster(
    mut events: MessageReader<WorldEvent>,
    mut roster: ResMut<Roster>,
    registry: Res<TerritoryRegistry>,
    mut territories: Query<&mut Territory>,
) {
    for event in events.read() {
        match event {
            WorldEvent::PlayerJoined { player } => {
                if roster.get(&player.actor.uid).is_some() {
                    debug!(uid = %player.actor.uid, "player already online");
                } else {
                    adjust_member_counts(&player.actor, true, &registry, &mut territories);
                }
                roster.insert(player.clone());
            }
            WorldEvent::PlayerLeft { uid } => {
                let Some(player) = roster.remove(uid) else {
                    warn!(%uid, "unknown player left");
                    continue;
                };
                adjust_member_counts(&player.actor, false, &registry, &mut territories);
            }
            _ => {}
        }
    }
}

fn adjust_member_counts(
    actor: &Actor,
    joined: bool,
    registry: &TerritoryRegistry,
    territories: &mut Query<&mut Territory>,
) {
    for (entity, _) in registry.iter() {
        let Ok(mut territory) = territories.get_mut(entity) else {
            continue;
        };
        if territory.is_claimed() && territory.is_member(actor) {
            territory.update_active_members(joined);
        }
    }
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Everything a guard needs to act on one event.
struct GuardCtx<'a, 'w, 's> {
    roster: &'a Roster,
    registry: &'a TerritoryRegistry,
    territories: &'a mut Query<'w, 's, &'static mut Territory>,
    host: &'a mut HostWorld,
    warnings: &'a mut BreakWarnings,
    now_hours: f64,
    out: &'a mut Vec<Notification>,
}

fn guard_world_events(
    mut events: MessageReader<WorldEvent>,
    roster: Res<Roster>,
    registry: Res<TerritoryRegistry>,
    mut territories: Query<&'static mut Territory>,
    mut host: ResMut<HostWorld>,
    mut warnings: ResMut<BreakWarnings>,
    clock: Res<WorldClock>,
    mut notifications: MessageWriter<Notification>,
) {
    let mut out = Vec::new();
    let mut ctx = GuardCtx {
        roster: &*roster,
        registry: &*registry,
        territories: &mut territories,
        host: &mut *host,
        warnings: &mut *warnings,
        now_hours: clock.total_hours(),
        out: &mut out,
    };

    for event in events.read() {
        match event {
            WorldEvent::BlockPlaced {
                actor,
                pos,
                previous,
                item,
            } => guard_place(&mut ctx, actor, *pos, *previous, item.as_ref()),
            WorldEvent::BlockBroken {
                actor,
                pos,
                previous,
            } => guard_break(&mut ctx, actor, *pos, *previous),
            WorldEvent::PlayerDied {
                victim,
                killer: Some(killer),
            } => guard_death(&mut ctx, victim, killer),
            _ => {}
        }
    }

    notifications.write_batch(out);
}

fn guard_place(
    ctx: &mut GuardCtx,
    actor: &PlayerId,
    pos: BlockPos,
    previous: BlockId,
    item: Option<&ItemStack>,
) {
    if item.is_some_and(|i| i.siege_equipment) {
        return;
    }
    let Some(who) = ctx.roster.actor(actor) else {
        warn!(%actor, "placement by unknown actor");
        return;
    };
    let privileges = ctx
        .registry
        .privileges_at(who, pos, |e| ctx.territories.get(e).ok());
    if privileges.can_place() {
        return;
    }
    debug!(%actor, %pos, "placement denied");
    ctx.host.set_block(pos, previous);
    if let Some(item) = item {
        ctx.host.return_to_hand(actor, item.clone());
    }
    ctx.out
        .push(Notification::error(actor, MutationDenied::Place.code()));
}

fn guard_break(ctx: &mut GuardCtx, actor: &PlayerId, pos: BlockPos, previous: BlockId) {
    let Some(who) = ctx.roster.actor(actor) else {
        warn!(%actor, "break by unknown actor");
        return;
    };
    let privileges = ctx
        .registry
        .privileges_at(who, pos, |e| ctx.territories.get(e).ok());
    if privileges.can_break() {
        return;
    }
    ctx.host.set_block(pos, previous);

    if ctx
        .warnings
        .within_window(actor, ctx.now_hours, BREAK_WARNING_WINDOW_HOURS)
    {
        debug!(%actor, %pos, "repeated break denied, siege raised");
        let Some(mut territory) = ctx
            .registry
            .find(pos)
            .and_then(|e| ctx.territories.get_mut(e).ok())
        else {
            return;
        };
        territory.increase_siege_intensity(BREAK_SIEGE_INCREMENT, None, ctx.out);
    } else {
        debug!(%actor, %pos, "break denied, warning sent");
        ctx.warnings
            .record(actor, ctx.now_hours, BREAK_WARNING_WINDOW_HOURS);
        ctx.out
            .push(Notification::error(actor, MutationDenied::Break.code()));
    }
}

fn guard_death(ctx: &mut GuardCtx, victim: &PlayerId, killer: &Killer) {
    let Some(victim_actor) = ctx.roster.actor(victim) else {
        warn!(%victim, "death of unknown player");
        return;
    };
    let Some(entity) = ctx.registry.find(killer.pos()) else {
        return;
    };
    let Ok(mut territory) = ctx.territories.get_mut(entity) else {
        return;
    };
    if !territory.is_member(victim_actor) {
        return;
    }
    let responsible = killer.responsible_player();
    let rival = match ctx.roster.actor(responsible) {
        Some(actor) => !territory.is_member(actor),
        None => territory.owner_uid() != Some(responsible),
    };
    if !rival {
        return;
    }
    let attacker: AttackerId = killer.attacker();
    debug!(%victim, killer = ?attacker, "member killed inside territory");
    territory.increase_siege_intensity(DEATH_SIEGE_INCREMENT, Some(attacker), ctx.out);
}
