//! Owner commands (`/stronghold name|league|stopleague`) and the
//! administrative release of a claim.
//!
//! Owner commands locate the registered territory the caller both owns and
//! stands in, then delegate to the territory's mutators. Parsing and
//! registration of the chat command belong to the host.

use bevy_ecs::entity::Entity;
use bevy_ecs::message::Messages;
use bevy_ecs::world::{Mut, World};
use tracing::info;

use crate::ecs::components::{Territory, UnclaimCause};
use crate::ecs::events::{Notification, TerritoryUnclaimed};
use crate::ecs::resources::{Roster, TerritoryRegistry};
use crate::host::HostWorld;
use crate::model::PlayerId;

/// Outcome reported back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandReply {
    Done,
    NotInOwnStronghold,
    NoSuchGroup,
}

impl CommandReply {
    pub fn message(self) -> &'static str {
        match self {
            CommandReply::Done => "Done",
            CommandReply::NotInOwnStronghold => "You're not in a stronghold you claimed",
            CommandReply::NoSuchGroup => "No such group found",
        }
    }
}

/// The registered territory at the caller's position, if the caller owns it.
pub fn owned_territory_here(world: &World, caller: &PlayerId) -> Option<Entity> {
    let pos = world.get_resource::<Roster>()?.get(caller)?.pos;
    let entity = world.get_resource::<TerritoryRegistry>()?.find(pos)?;
    let territory = world.get::<Territory>(entity)?;
    (territory.owner_uid() == Some(caller)).then_some(entity)
}

pub fn name_territory(world: &mut World, caller: &PlayerId, name: &str) -> CommandReply {
    let Some(entity) = owned_territory_here(world, caller) else {
        return CommandReply::NotInOwnStronghold;
    };
    if let Some(mut territory) = world.get_mut::<Territory>(entity) {
        territory.name = Some(name.to_string());
        info!(%caller, name, "territory named");
    }
    CommandReply::Done
}

pub fn league(world: &mut World, caller: &PlayerId, group_name: &str) -> CommandReply {
    let Some(entity) = owned_territory_here(world, caller) else {
        return CommandReply::NotInOwnStronghold;
    };
    let Some(group) = world
        .get_resource::<HostWorld>()
        .and_then(|host| host.group_by_name(group_name))
    else {
        return CommandReply::NoSuchGroup;
    };

    let mut out = Vec::new();
    if let Some(mut territory) = world.get_mut::<Territory>(entity) {
        info!(%caller, group = %group.name, "territory leagued");
        territory.claim_group(group, &mut out);
    }
    recount_members(world, entity);
    send(world, out);
    CommandReply::Done
}

pub fn stop_league(world: &mut World, caller: &PlayerId) -> CommandReply {
    let Some(entity) = owned_territory_here(world, caller) else {
        return CommandReply::NotInOwnStronghold;
    };
    let mut out = Vec::new();
    if let Some(mut territory) = world.get_mut::<Territory>(entity) {
        territory.unclaim_group(&mut out);
    }
    recount_members(world, entity);
    send(world, out);
    CommandReply::Done
}

/// Clear ownership of `marker` without any broadcast. The territory stays
/// registered and the capture ramp winds down on its own.
pub fn force_unclaim(world: &mut World, marker: Entity) -> bool {
    let Some(mut territory) = world.get_mut::<Territory>(marker) else {
        return false;
    };
    let mut out = Vec::new();
    if !territory.unclaim(UnclaimCause::SystemForced, &mut out) {
        return false;
    }
    info!(?marker, "claim released by force");
    if let Some(mut messages) = world.get_resource_mut::<Messages<TerritoryUnclaimed>>() {
        messages.write(TerritoryUnclaimed {
            territory: marker,
            cause: UnclaimCause::SystemForced,
        });
    }
    true
}

fn recount_members(world: &mut World, entity: Entity) {
    world.try_resource_scope(|world, roster: Mut<Roster>| {
        if let Some(mut territory) = world.get_mut::<Territory>(entity) {
            territory.recount_active_members(roster.iter());
        }
    });
}

fn send(world: &mut World, out: Vec<Notification>) {
    if let Some(mut messages) = world.get_resource_mut::<Messages<Notification>>() {
        for notification in out {
            messages.write(notification);
        }
    }
}
