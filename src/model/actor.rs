use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable player identifier as issued by the host.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host player-group identifier. Zero is never a valid group.
pub type GroupId = i32;

/// Primary owner of a claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub uid: PlayerId,
    pub name: String,
}

/// Group a claim is leagued with, independent of the owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAffiliation {
    pub uid: GroupId,
    pub name: String,
}

/// A player as seen by privilege and membership checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub uid: PlayerId,
    pub name: String,
    pub groups: Vec<GroupId>,
}

impl Actor {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: PlayerId::new(uid),
            name: name.into(),
            groups: Vec::new(),
        }
    }

    pub fn with_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }

    pub fn in_group(&self, group: GroupId) -> bool {
        self.groups.contains(&group)
    }

    pub fn as_owner(&self) -> Owner {
        Owner {
            uid: self.uid.clone(),
            name: self.name.clone(),
        }
    }
}

/// Identity of something contributing to a siege.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttackerId {
    Player(PlayerId),
    /// A non-player creature, keyed by the host's entity id.
    Creature(u64),
}
