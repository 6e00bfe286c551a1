use bevy_ecs::component::Component;

use crate::config::MarkerProperties;
use crate::model::{BlockPos, ItemStack};

/// The block whose contest decides a territory's owner.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Marker {
    pub pos: BlockPos,
    pub properties: MarkerProperties,
    /// Decorative banner placed by the first contester.
    pub banner: Option<ItemStack>,
}

impl Marker {
    pub fn new(pos: BlockPos, properties: MarkerProperties) -> Self {
        Self {
            pos,
            properties,
            banner: None,
        }
    }
}
