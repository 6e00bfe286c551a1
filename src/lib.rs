pub mod config;
pub mod ecs;
pub mod error;
pub mod host;
pub mod model;

pub use config::{MarkerProperties, SatelliteProperties, StrongholdConfig};
pub use error::{AttributeError, ClaimRejection, ConfigError, MutationDenied};
pub use host::{HostWorld, MemoryWorld, WorldAccess};
pub use model::{
    Actor, AttackerId, BlockPos, Container, Cuboid, GroupAffiliation, GroupId, ItemStack,
    MarkerAttributes, Owner, PlayerId, Privileges, SatelliteAttributes,
};
