use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use crate::config::SatelliteProperties;
use crate::model::{BlockPos, ItemStack};

/// A logistics point feeding extra credit into a territory's horizon.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Satellite {
    pub pos: BlockPos,
    pub properties: SatelliteProperties,
    pub banner: Option<ItemStack>,
    /// Marker entity of the territory this point supplies.
    pub territory: Option<Entity>,
}

impl Satellite {
    pub fn new(pos: BlockPos, properties: SatelliteProperties) -> Self {
        Self {
            pos,
            properties,
            banner: None,
            territory: None,
        }
    }

    /// Contributes only under the same banner as the marker it supplies.
    pub fn banner_matches(&self, marker_banner: Option<&ItemStack>) -> bool {
        match (&self.banner, marker_banner) {
            (Some(own), Some(theirs)) => own.same_kind(theirs),
            _ => false,
        }
    }
}
