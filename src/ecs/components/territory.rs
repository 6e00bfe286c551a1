use std::collections::BTreeSet;

use bevy_ecs::component::Component;

use crate::ecs::events::{Channel, Notification, Recipient};
use crate::ecs::resources::OnlinePlayer;
use crate::model::{
    Actor, AttackerId, BlockPos, Cuboid, GroupAffiliation, Owner, PlayerId, Privileges,
};

/// Siege intensity lost per territory update.
pub const SIEGE_DECAY_PER_UPDATE: f32 = 0.01;
/// Intensity at which a territory counts as under attack.
pub const UNDER_ATTACK_INTENSITY: f32 = 1.0;
/// Intensity above which besieging-band broadcasts may fire.
pub const BESIEGED_INTENSITY: f32 = 2.0;
pub const SMALL_BAND_ATTACKERS: usize = 2;
pub const MEDIUM_ARMY_ATTACKERS: usize = 4;

/// Why a claim ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnclaimCause {
    /// The stored food ran out.
    ResourceExhausted,
    /// Someone pulled the banner down.
    LostContest,
    MarkerDestroyed,
    /// Administrative reset; no broadcast.
    SystemForced,
}

impl UnclaimCause {
    fn suffix(self) -> Option<&'static str> {
        match self {
            UnclaimCause::ResourceExhausted => Some(" has run out of food!"),
            UnclaimCause::LostContest => Some(" has been captured!"),
            UnclaimCause::MarkerDestroyed => Some(" has been destroyed!"),
            UnclaimCause::SystemForced => None,
        }
    }
}

/// A claimable volume centred on its marker.
///
/// Lives on the marker entity. Ownership comes and goes over the marker's
/// life; the area never changes.
#[derive(Component, Debug, Clone)]
pub struct Territory {
    area: Cuboid,
    center: BlockPos,
    pub name: Option<String>,
    pub owner: Option<Owner>,
    pub group: Option<GroupAffiliation>,
    pub siege_intensity: f32,
    pub besieging: BTreeSet<AttackerId>,
    pub active_member_count: i32,
    /// Client-side: the local player was inside at the last proximity check.
    pub(crate) client_inside: bool,
}

impl Territory {
    pub fn new(center: BlockPos, radius: i32) -> Self {
        Self {
            area: Cuboid::around(center, radius),
            center,
            name: None,
            owner: None,
            group: None,
            siege_intensity: 0.0,
            besieging: BTreeSet::new(),
            active_member_count: 0,
            client_inside: false,
        }
    }

    pub fn area(&self) -> Cuboid {
        self.area
    }

    pub fn center(&self) -> BlockPos {
        self.center
    }

    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }

    pub fn owner_uid(&self) -> Option<&PlayerId> {
        self.owner.as_ref().map(|o| &o.uid)
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("One of your claims")
    }

    /// Where owner-facing news goes: the league group if any, else the owner.
    fn owner_recipient(&self) -> Option<Recipient> {
        if let Some(group) = &self.group {
            return Some(Recipient::Group(group.uid));
        }
        self.owner
            .as_ref()
            .map(|o| Recipient::Player(o.uid.clone()))
    }

    fn notify_owner(&self, message: String, out: &mut Vec<Notification>) {
        if let Some(recipient) = self.owner_recipient() {
            out.push(Notification {
                recipient,
                channel: Channel::General,
                message,
            });
        }
    }

    /// Take ownership. A no-op if `by` already owns it.
    pub fn claim(&mut self, by: &Actor, out: &mut Vec<Notification>) -> bool {
        if self.owner_uid() == Some(&by.uid) {
            return false;
        }
        self.owner = Some(by.as_owner());

        out.push(Notification::to_player(
            &by.uid,
            Channel::Info,
            "You can use /stronghold name to name your claim",
        ));
        if let Some(name) = &self.name {
            out.push(Notification::to_everyone(format!(
                "{} captured {}",
                by.name, name
            )));
        }
        true
    }

    /// Drop owner and group. Returns false if nothing was claimed.
    pub fn unclaim(&mut self, cause: UnclaimCause, out: &mut Vec<Notification>) -> bool {
        if !self.is_claimed() {
            return false;
        }
        if let Some(suffix) = cause.suffix() {
            self.notify_owner(format!("{}{}", self.label(), suffix), out);
        }
        self.owner = None;
        self.group = None;
        true
    }

    pub fn claim_group(&mut self, group: GroupAffiliation, out: &mut Vec<Notification>) {
        if let Some(name) = &self.name {
            out.push(Notification::to_group(
                group.uid,
                format!("{} now leagues with {}", name, group.name),
            ));
        }
        self.group = Some(group);
    }

    pub fn unclaim_group(&mut self, out: &mut Vec<Notification>) {
        if let (Some(group), Some(name)) = (&self.group, &self.name) {
            out.push(Notification::to_group(
                group.uid,
                format!("{} no longer leagues with {}", name, group.name),
            ));
        }
        self.group = None;
    }

    /// Add siege pressure, optionally attributed to an attacker.
    ///
    /// "Under attack" fires on the update that lifts intensity to 1. Past
    /// intensity 2, a named territory announces a small band when the second
    /// distinct attacker joins and a medium army at the fourth.
    pub fn increase_siege_intensity(
        &mut self,
        amount: f32,
        attacker: Option<AttackerId>,
        out: &mut Vec<Notification>,
    ) {
        let old_count = self.besieging.len();
        let new_count = old_count
            + usize::from(attacker.as_ref().is_some_and(|a| !self.besieging.contains(a)));
        let old_intensity = self.siege_intensity;
        let new_intensity = (old_intensity + amount).max(0.0);

        if new_intensity >= UNDER_ATTACK_INTENSITY && old_intensity < UNDER_ATTACK_INTENSITY {
            self.notify_owner(format!("{} is under attack!", self.label()), out);
        } else if new_intensity >= BESIEGED_INTENSITY {
            if let Some(name) = &self.name {
                if new_count >= SMALL_BAND_ATTACKERS && old_count < SMALL_BAND_ATTACKERS {
                    out.push(Notification::to_everyone(format!(
                        "{name} is currently being besieged by a small band"
                    )));
                } else if new_count >= MEDIUM_ARMY_ATTACKERS && old_count < MEDIUM_ARMY_ATTACKERS {
                    out.push(Notification::to_everyone(format!(
                        "{name} is currently being besieged by a medium sized army"
                    )));
                }
            }
        }

        if let Some(attacker) = attacker {
            self.besieging.insert(attacker);
        }
        self.siege_intensity = new_intensity;
    }

    /// One territory update of siege decay. Returns true if the attacker set
    /// was cleared by this call.
    pub fn decay(&mut self) -> bool {
        self.siege_intensity = (self.siege_intensity - SIEGE_DECAY_PER_UPDATE).max(0.0);
        if self.siege_intensity < UNDER_ATTACK_INTENSITY && !self.besieging.is_empty() {
            self.besieging.clear();
            return true;
        }
        false
    }

    pub fn is_member(&self, actor: &Actor) -> bool {
        self.owner_uid() == Some(&actor.uid)
            || self.group.as_ref().is_some_and(|g| actor.in_group(g.uid))
    }

    /// Full rights on unclaimed ground, for members, and while no member is
    /// online; nothing otherwise.
    pub fn resolve_privileges(&self, actor: &Actor) -> Privileges {
        if !self.is_claimed() || self.is_member(actor) || self.active_member_count <= 0 {
            Privileges::MEMBER
        } else {
            Privileges::OUTSIDER
        }
    }

    /// A member connected (`true`) or disconnected (`false`).
    pub fn update_active_members(&mut self, joined: bool) {
        self.active_member_count += if joined { 1 } else { -1 };
    }

    /// Reset the active member count from the connected players.
    pub fn recount_active_members<'a>(&mut self, online: impl Iterator<Item = &'a OnlinePlayer>) {
        let count = online.filter(|p| self.is_member(&p.actor)).count();
        self.active_member_count = i32::try_from(count).unwrap_or(i32::MAX);
    }
}
