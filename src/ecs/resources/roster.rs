use std::collections::BTreeMap;

use bevy_ecs::resource::Resource;

use crate::model::{Actor, BlockPos, PlayerId};

/// A connected player as the core sees them.
#[derive(Clone, Debug, PartialEq)]
pub struct OnlinePlayer {
    pub actor: Actor,
    pub pos: BlockPos,
    /// The "accelerate" modifier (sprint) is held down.
    pub accelerating: bool,
}

impl OnlinePlayer {
    pub fn new(actor: Actor, pos: BlockPos) -> Self {
        Self {
            actor,
            pos,
            accelerating: false,
        }
    }
}

/// Connected players, keyed by uid. Kept current by the host.
#[derive(Resource, Debug, Default)]
pub struct Roster {
    players: BTreeMap<PlayerId, OnlinePlayer>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player: OnlinePlayer) {
        self.players.insert(player.actor.uid.clone(), player);
    }

    pub fn remove(&mut self, uid: &PlayerId) -> Option<OnlinePlayer> {
        self.players.remove(uid)
    }

    pub fn get(&self, uid: &PlayerId) -> Option<&OnlinePlayer> {
        self.players.get(uid)
    }

    pub fn actor(&self, uid: &PlayerId) -> Option<&Actor> {
        self.players.get(uid).map(|p| &p.actor)
    }

    pub fn set_position(&mut self, uid: &PlayerId, pos: BlockPos) {
        if let Some(p) = self.players.get_mut(uid) {
            p.pos = pos;
        }
    }

    pub fn set_accelerating(&mut self, uid: &PlayerId, accelerating: bool) {
        if let Some(p) = self.players.get_mut(uid) {
            p.accelerating = accelerating;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OnlinePlayer> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
