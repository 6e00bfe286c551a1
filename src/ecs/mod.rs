pub mod app;
pub mod clock;
pub mod commands;
pub mod components;
pub mod conditions;
pub mod events;
pub mod plugin;
pub mod queries;
pub mod resources;
pub mod schedule;
pub mod spawn;
pub mod systems;
pub mod test_helpers;
pub mod time;

pub use app::{
    build_client_app, build_stronghold_app, build_stronghold_app_seeded,
    build_stronghold_app_with_executor,
};
pub use clock::WorldClock;
pub use commands::CommandReply;
pub use components::{
    CaptureDirection, CaptureState, Cellar, Contest, Marker, Satellite, Territory, UnclaimCause,
};
pub use conditions::{credit_cadence, drain_cadence, on_client, on_server, territory_cadence};
pub use events::{
    Channel, Discovery, Killer, MarkerInteraction, MarkerRemoved, Notification, Recipient,
    RemovalKind, SatelliteInteraction, SatelliteRemoved, TerritoryAdded, TerritoryUnclaimed,
    WorldEvent,
};
pub use plugin::StrongholdPlugin;
pub use resources::{
    BreakWarnings, LocalPlayer, OnlinePlayer, Registration, Roster, Side, StrongholdRng,
    TerritoryRegistry,
};
pub use schedule::{DomainSet, StrongholdPhase, StrongholdTick, configure_stronghold_schedule};
