pub mod registry;
pub mod roster;
pub mod runtime;

pub use registry::{BreakWarnings, Registration, TerritoryRegistry};
pub use roster::{OnlinePlayer, Roster};
pub use runtime::{LocalPlayer, Side, StrongholdRng};
