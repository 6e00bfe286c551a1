pub mod actor;
pub mod attributes;
pub mod geometry;
pub mod item;
pub mod privilege;

pub use actor::{Actor, AttackerId, GroupAffiliation, GroupId, Owner, PlayerId};
pub use attributes::{MarkerAttributes, SatelliteAttributes};
pub use geometry::{BlockPos, Cuboid};
pub use item::{BANNER_CODE_FRAGMENT, BlockId, Container, ItemStack};
pub use privilege::Privileges;
