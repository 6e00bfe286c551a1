//! The narrow surface through which the core touches the host world.

use std::any::Any;
use std::collections::HashMap;

use bevy_ecs::resource::Resource;

use crate::model::{BlockId, BlockPos, Container, GroupAffiliation, ItemStack, PlayerId};

/// Sky light at which a marker counts as standing under open sky.
pub const FULL_SKY_LIGHT: u8 = 16;

/// World operations the core needs from its host.
pub trait WorldAccess: Send + Sync + 'static {
    fn container(&self, pos: BlockPos) -> Option<&Container>;
    fn container_mut(&mut self, pos: BlockPos) -> Option<&mut Container>;

    /// Y of the terrain surface in the column containing `pos`.
    fn terrain_height_at(&self, pos: BlockPos) -> i32;

    /// Sunlight-only light level at `pos`.
    fn sky_light_at(&self, pos: BlockPos) -> u8;

    fn set_block(&mut self, pos: BlockPos, block: BlockId);

    /// Put an item back into the actor's active hand slot.
    fn return_to_hand(&mut self, actor: &PlayerId, item: ItemStack);

    fn held_item(&self, actor: &PlayerId) -> Option<&ItemStack>;

    /// Remove up to `amount` items from the actor's active hand slot.
    fn take_held(&mut self, actor: &PlayerId, amount: u32) -> Option<ItemStack>;

    /// Drop an item entity into the world.
    fn spawn_item(&mut self, pos: BlockPos, item: ItemStack);

    fn group_by_name(&self, name: &str) -> Option<GroupAffiliation>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Resource wrapping the host's world implementation.
#[derive(Resource)]
pub struct HostWorld(pub Box<dyn WorldAccess>);

impl HostWorld {
    pub fn new(world: impl WorldAccess) -> Self {
        Self(Box::new(world))
    }

    pub fn downcast_ref<T: WorldAccess>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: WorldAccess>(&mut self) -> Option<&mut T> {
        self.0.as_any_mut().downcast_mut::<T>()
    }
}

impl std::ops::Deref for HostWorld {
    type Target = dyn WorldAccess;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::ops::DerefMut for HostWorld {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

/// In-memory world used by tests and offline tools.
///
/// Columns default to a surface at `default_surface` and full sky light.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    pub containers: HashMap<BlockPos, Container>,
    pub blocks: HashMap<BlockPos, BlockId>,
    pub surface: HashMap<(i32, i32), i32>,
    pub default_surface: i32,
    pub sky_light: HashMap<BlockPos, u8>,
    pub hands: HashMap<PlayerId, ItemStack>,
    pub dropped: Vec<(BlockPos, ItemStack)>,
    pub groups: Vec<GroupAffiliation>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, pos: BlockPos, container: Container) -> Self {
        self.containers.insert(pos, container);
        self
    }

    pub fn with_surface(mut self, x: i32, z: i32, height: i32) -> Self {
        self.surface.insert((x, z), height);
        self
    }

    pub fn with_group(mut self, group: GroupAffiliation) -> Self {
        self.groups.push(group);
        self
    }

    pub fn hold(&mut self, actor: &PlayerId, item: ItemStack) {
        self.hands.insert(actor.clone(), item);
    }
}

impl WorldAccess for MemoryWorld {
    fn container(&self, pos: BlockPos) -> Option<&Container> {
        self.containers.get(&pos)
    }

    fn container_mut(&mut self, pos: BlockPos) -> Option<&mut Container> {
        self.containers.get_mut(&pos)
    }

    fn terrain_height_at(&self, pos: BlockPos) -> i32 {
        self.surface
            .get(&(pos.x, pos.z))
            .copied()
            .unwrap_or(self.default_surface)
    }

    fn sky_light_at(&self, pos: BlockPos) -> u8 {
        self.sky_light.get(&pos).copied().unwrap_or(FULL_SKY_LIGHT * 2)
    }

    fn set_block(&mut self, pos: BlockPos, block: BlockId) {
        self.blocks.insert(pos, block);
    }

    fn return_to_hand(&mut self, actor: &PlayerId, item: ItemStack) {
        match self.hands.get_mut(actor) {
            Some(held) if held.same_kind(&item) => held.quantity += item.quantity,
            _ => {
                self.hands.insert(actor.clone(), item);
            }
        }
    }

    fn held_item(&self, actor: &PlayerId) -> Option<&ItemStack> {
        self.hands.get(actor)
    }

    fn take_held(&mut self, actor: &PlayerId, amount: u32) -> Option<ItemStack> {
        let held = self.hands.get_mut(actor)?;
        let taken = amount.min(held.quantity);
        if taken == 0 {
            return None;
        }
        let mut out = held.clone();
        out.quantity = taken;
        held.quantity -= taken;
        if held.quantity == 0 {
            self.hands.remove(actor);
        }
        Some(out)
    }

    fn spawn_item(&mut self, pos: BlockPos, item: ItemStack) {
        self.dropped.push((pos, item));
    }

    fn group_by_name(&self, name: &str) -> Option<GroupAffiliation> {
        self.groups.iter().find(|g| g.name == name).cloned()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
