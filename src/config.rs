use std::fs;
use std::path::Path;

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Server-wide tunables. Every key is optional in the JSON file.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrongholdConfig {
    /// Claim days bought by one point of satiety.
    pub claim_duration_per_satiety: f32,
    /// Deepest a marker may sit below the terrain surface and still claim.
    pub underground_claim_limit: i32,
    /// Mining-tier tweak applied by the host at startup; not read by the core.
    pub all_stone_block_require_pickaxe: bool,
}

impl Default for StrongholdConfig {
    fn default() -> Self {
        Self {
            claim_duration_per_satiety: 0.0025,
            underground_claim_limit: 8,
            all_stone_block_require_pickaxe: true,
        }
    }
}

impl StrongholdConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Claim days per satiety for a resource point with the given total bonus.
    pub fn duration_per_satiety(&self, bonus: f32) -> f32 {
        self.claim_duration_per_satiety * (1.0 + bonus)
    }
}

/// Per-kind properties of a marker block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerProperties {
    /// Half-extent of the claimed cube.
    pub protection_radius: i32,
    /// Seconds a full capture takes.
    pub capture_duration: f32,
    /// Extra conversion rate granted by this marker kind.
    pub expectancy_bonus: f32,
}

impl Default for MarkerProperties {
    fn default() -> Self {
        Self {
            protection_radius: 16,
            capture_duration: 4.0,
            expectancy_bonus: 0.0,
        }
    }
}

/// Per-kind properties of a satellite resource point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SatelliteProperties {
    pub expectancy_bonus: f32,
}
