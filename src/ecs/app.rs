use bevy_app::App;
use bevy_ecs::message::MessageRegistry;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};

use super::clock::WorldClock;
use super::events::{
    Discovery, MarkerInteraction, MarkerRemoved, Notification, SatelliteInteraction,
    SatelliteRemoved, TerritoryAdded, TerritoryUnclaimed, WorldEvent,
};
use super::resources::{
    BreakWarnings, LocalPlayer, Roster, Side, StrongholdRng, TerritoryRegistry,
};
use super::schedule::{StrongholdPhase, configure_stronghold_schedule};
use crate::config::StrongholdConfig;
use crate::host::{HostWorld, WorldAccess};

/// Build a headless server app over `host` with default config.
///
/// Manual tick control (one run = one 20 ms tick):
/// ```no_run
/// # use stronghold::ecs::{build_stronghold_app, StrongholdPlugin, StrongholdTick};
/// # use stronghold::host::MemoryWorld;
/// let mut app = build_stronghold_app(MemoryWorld::new());
/// app.add_plugins(StrongholdPlugin);
/// for _ in 0..50 {  // one second
///     app.world_mut().run_schedule(StrongholdTick);
/// }
/// ```
pub fn build_stronghold_app(host: impl WorldAccess) -> App {
    build_stronghold_app_seeded(host, StrongholdConfig::default(), 42)
}

/// Build a headless server app with a specific config and RNG seed.
///
/// Single-threaded, so RNG consumption order is identical across runs.
pub fn build_stronghold_app_seeded(
    host: impl WorldAccess,
    config: StrongholdConfig,
    seed: u64,
) -> App {
    build_stronghold_app_with_executor(
        host,
        config,
        seed,
        Side::Server,
        ExecutorKind::SingleThreaded,
    )
}

/// Build a client-side app that mirrors capture progress and reports
/// discoveries for `local`.
pub fn build_client_app(
    host: impl WorldAccess,
    config: StrongholdConfig,
    local: LocalPlayer,
) -> App {
    let mut app = build_stronghold_app_with_executor(
        host,
        config,
        42,
        Side::Client,
        ExecutorKind::SingleThreaded,
    );
    app.insert_resource(local);
    app
}

/// Build a headless app with an explicit side and executor kind.
pub fn build_stronghold_app_with_executor(
    host: impl WorldAccess,
    config: StrongholdConfig,
    seed: u64,
    side: Side,
    executor: ExecutorKind,
) -> App {
    let mut app = App::empty();

    // Core resources
    app.insert_resource(WorldClock::default());
    app.insert_resource(config);
    app.insert_resource(side);
    app.insert_resource(StrongholdRng::seeded(seed));
    app.insert_resource(HostWorld::new(host));
    app.init_resource::<TerritoryRegistry>();
    app.init_resource::<Roster>();
    app.init_resource::<BreakWarnings>();

    // Host inputs
    MessageRegistry::register_message::<WorldEvent>(app.world_mut());
    MessageRegistry::register_message::<MarkerInteraction>(app.world_mut());
    MessageRegistry::register_message::<MarkerRemoved>(app.world_mut());
    MessageRegistry::register_message::<SatelliteInteraction>(app.world_mut());
    MessageRegistry::register_message::<SatelliteRemoved>(app.world_mut());
    // Outputs and in-tick fan-out
    MessageRegistry::register_message::<Notification>(app.world_mut());
    MessageRegistry::register_message::<TerritoryAdded>(app.world_mut());
    MessageRegistry::register_message::<TerritoryUnclaimed>(app.world_mut());
    MessageRegistry::register_message::<Discovery>(app.world_mut());

    let mut schedule = configure_stronghold_schedule(executor);
    schedule.add_systems(
        bevy_ecs::message::message_update_system.in_set(StrongholdPhase::PreUpdate),
    );
    app.add_schedule(schedule);
    app
}
