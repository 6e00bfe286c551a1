//! Messages exchanged between the host and the stronghold systems.
//!
//! Inputs are written by the host between ticks; outputs are drained by the
//! host after each tick.

use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;

use crate::model::{AttackerId, BlockId, BlockPos, GroupId, ItemStack, PlayerId};

use super::components::UnclaimCause;
use super::resources::OnlinePlayer;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Who dealt a killing blow.
#[derive(Clone, Debug, PartialEq)]
pub enum Killer {
    Player { uid: PlayerId, pos: BlockPos },
    /// A creature guarding a player (a tamed wolf, a hired soldier, ...).
    Guardian {
        entity: u64,
        guarded: PlayerId,
        pos: BlockPos,
    },
}

impl Killer {
    pub fn pos(&self) -> BlockPos {
        match self {
            Killer::Player { pos, .. } | Killer::Guardian { pos, .. } => *pos,
        }
    }

    pub fn attacker(&self) -> AttackerId {
        match self {
            Killer::Player { uid, .. } => AttackerId::Player(uid.clone()),
            Killer::Guardian { entity, .. } => AttackerId::Creature(*entity),
        }
    }

    /// The player whose membership decides whether this killer is a rival.
    pub fn responsible_player(&self) -> &PlayerId {
        match self {
            Killer::Player { uid, .. } => uid,
            Killer::Guardian { guarded, .. } => guarded,
        }
    }
}

/// World happenings routed into the registry.
#[derive(Message, Clone, Debug)]
pub enum WorldEvent {
    BlockPlaced {
        actor: PlayerId,
        pos: BlockPos,
        previous: BlockId,
        item: Option<ItemStack>,
    },
    BlockBroken {
        actor: PlayerId,
        pos: BlockPos,
        previous: BlockId,
    },
    PlayerDied {
        victim: PlayerId,
        killer: Option<Killer>,
    },
    PlayerJoined {
        player: OnlinePlayer,
    },
    PlayerLeft {
        uid: PlayerId,
    },
}

/// An actor's use of a marker block.
#[derive(Message, Clone, Debug)]
pub enum MarkerInteraction {
    Start { marker: Entity, actor: PlayerId },
    Stop { marker: Entity, actor: PlayerId },
    Cancel { marker: Entity, actor: PlayerId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalKind {
    /// Destroyed by someone: the claim ends with a broadcast.
    Broken,
    /// Removed without being broken (replaced, worldedit, ...).
    Removed,
    /// Chunk unloaded; the marker persists in storage.
    Unloaded,
}

#[derive(Message, Clone, Debug)]
pub struct MarkerRemoved {
    pub marker: Entity,
    pub kind: RemovalKind,
}

/// An actor's use of a satellite block (attach or take back a banner).
#[derive(Message, Clone, Debug)]
pub struct SatelliteInteraction {
    pub satellite: Entity,
    pub actor: PlayerId,
}

#[derive(Message, Clone, Debug)]
pub struct SatelliteRemoved {
    pub satellite: Entity,
    pub kind: RemovalKind,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recipient {
    Player(PlayerId),
    Group(GroupId),
    Everyone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Informational log line for one player.
    Info,
    /// General chat.
    General,
    /// In-game error toast; `message` is an error code.
    IngameError,
}

/// Text for players, delivered by the host.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct Notification {
    pub recipient: Recipient,
    pub channel: Channel,
    pub message: String,
}

impl Notification {
    pub fn to_player(uid: &PlayerId, channel: Channel, message: impl Into<String>) -> Self {
        Self {
            recipient: Recipient::Player(uid.clone()),
            channel,
            message: message.into(),
        }
    }

    pub fn to_group(group: GroupId, message: impl Into<String>) -> Self {
        Self {
            recipient: Recipient::Group(group),
            channel: Channel::General,
            message: message.into(),
        }
    }

    pub fn to_everyone(message: impl Into<String>) -> Self {
        Self {
            recipient: Recipient::Everyone,
            channel: Channel::General,
            message: message.into(),
        }
    }

    pub fn error(uid: &PlayerId, code: &str) -> Self {
        Self::to_player(uid, Channel::IngameError, code)
    }
}

/// A territory entered the registry this tick.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerritoryAdded {
    pub territory: Entity,
}

/// A claim ended.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct TerritoryUnclaimed {
    pub territory: Entity,
    pub cause: UnclaimCause,
}

/// Client-side: the local player walked into a named territory.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct Discovery {
    pub territory: Entity,
    pub title: String,
}
