//! Persisted per-marker and per-satellite state.
//!
//! Keys match the host's attribute tree. Absent optional values are omitted
//! from the serialized form rather than written as `null`.

use serde::{Deserialize, Serialize};

use super::actor::{GroupAffiliation, Owner, PlayerId};
use super::item::ItemStack;
use crate::error::AttributeError;

/// Stored value of `captureDirection` when no contest direction is set.
pub const DIRECTION_STILL: i32 = 0;

fn direction_still() -> i32 {
    DIRECTION_STILL
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_name: Option<String>,
    #[serde(
        rename = "claimedPlayerUID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub claimed_player_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_player_name: Option<String>,
    #[serde(
        rename = "claimedGroupUID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub claimed_group_uid: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_group_name: Option<String>,
    #[serde(default)]
    pub siege_intensity: f32,
    #[serde(default)]
    pub cellar_expectancy: f32,
    #[serde(default)]
    pub captured_percent: f32,
    #[serde(default = "direction_still")]
    pub capture_direction: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<ItemStack>,
}

impl Default for MarkerAttributes {
    fn default() -> Self {
        Self {
            area_name: None,
            claimed_player_uid: None,
            claimed_player_name: None,
            claimed_group_uid: None,
            claimed_group_name: None,
            siege_intensity: 0.0,
            cellar_expectancy: 0.0,
            captured_percent: 0.0,
            capture_direction: DIRECTION_STILL,
            banner: None,
        }
    }
}

impl MarkerAttributes {
    /// The stored owner, present only when both uid and name were stored.
    pub fn owner(&self) -> Option<Owner> {
        match (&self.claimed_player_uid, &self.claimed_player_name) {
            (Some(uid), Some(name)) => Some(Owner {
                uid: PlayerId::new(uid.clone()),
                name: name.clone(),
            }),
            _ => None,
        }
    }

    /// The stored group; uid 0 means no group.
    pub fn group(&self) -> Option<GroupAffiliation> {
        match (self.claimed_group_uid, &self.claimed_group_name) {
            (Some(uid), Some(name)) if uid != 0 => Some(GroupAffiliation {
                uid,
                name: name.clone(),
            }),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String, AttributeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, AttributeError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Satellites only persist their banked credit and banner.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteAttributes {
    #[serde(default)]
    pub cellar_expectancy: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<ItemStack>,
}

impl SatelliteAttributes {
    pub fn to_json(&self) -> Result<String, AttributeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, AttributeError> {
        Ok(serde_json::from_str(json)?)
    }
}
