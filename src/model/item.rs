use serde::{Deserialize, Serialize};

/// Code fragment identifying banner (cloth) items.
pub const BANNER_CODE_FRAGMENT: &str = "cloth-";

/// Opaque host block id, used only to restore a reverted block.
pub type BlockId = u32;

/// A stack of items, carrying just what the core needs to know about it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub code: String,
    pub quantity: u32,
    /// Satiety per item, if the item is food.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satiety: Option<f32>,
    /// Placing this item is never reverted by the privilege guard.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub siege_equipment: bool,
}

impl ItemStack {
    pub fn new(code: impl Into<String>, quantity: u32) -> Self {
        Self {
            code: code.into(),
            quantity,
            satiety: None,
            siege_equipment: false,
        }
    }

    pub fn food(code: impl Into<String>, quantity: u32, satiety: f32) -> Self {
        Self {
            satiety: Some(satiety),
            ..Self::new(code, quantity)
        }
    }

    pub fn banner(code: impl Into<String>) -> Self {
        Self::new(code, 1)
    }

    pub fn is_banner(&self) -> bool {
        self.code.contains(BANNER_CODE_FRAGMENT)
    }

    /// Same collectible, regardless of quantity.
    pub fn same_kind(&self, other: &ItemStack) -> bool {
        self.code == other.code
    }
}

/// A block container (chest, cellar shelf, ...) adjacent to a marker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub slots: Vec<Option<ItemStack>>,
}

impl Container {
    pub fn new(slots: impl IntoIterator<Item = Option<ItemStack>>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    pub fn with_stacks(stacks: impl IntoIterator<Item = ItemStack>) -> Self {
        Self::new(stacks.into_iter().map(Some))
    }

    /// Remove up to `amount` items from a slot, emptying it when exhausted.
    /// Returns the number actually removed.
    pub fn take_out(&mut self, slot: usize, amount: u32) -> u32 {
        let Some(entry) = self.slots.get_mut(slot) else {
            return 0;
        };
        let Some(stack) = entry.as_mut() else {
            return 0;
        };
        let taken = amount.min(stack.quantity);
        stack.quantity -= taken;
        if stack.quantity == 0 {
            *entry = None;
        }
        taken
    }

    /// Total quantity of items with the given code.
    pub fn count_of(&self, code: &str) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.code == code)
            .map(|s| s.quantity)
            .sum()
    }
}
