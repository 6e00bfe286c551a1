use bevy_app::App;
use bevy_ecs::message::{Message, Messages};

use crate::ecs::clock::WorldClock;
use crate::ecs::events::Notification;
use crate::ecs::resources::{OnlinePlayer, Roster};
use crate::ecs::schedule::StrongholdTick;
use crate::ecs::time::TICKS_PER_SECOND;
use crate::host::{HostWorld, MemoryWorld};

/// Run one fast tick.
pub fn tick(app: &mut App) {
    app.world_mut().run_schedule(StrongholdTick);
}

/// Run `n` fast ticks.
pub fn tick_n(app: &mut App, n: u64) {
    for _ in 0..n {
        tick(app);
    }
}

/// Run `secs` wall seconds of ticks, collecting every notification written
/// along the way. Notifications are drained each tick so none age out of
/// the double buffer.
pub fn tick_seconds(app: &mut App, secs: f64) -> Vec<Notification> {
    let ticks = (secs * TICKS_PER_SECOND as f64).round() as u64;
    let mut collected = Vec::new();
    for _ in 0..ticks {
        tick(app);
        collected.extend(drain::<Notification>(app));
    }
    collected
}

/// Take every pending message of type `M` out of the app.
pub fn drain<M: Message>(app: &mut App) -> Vec<M> {
    app.world_mut()
        .get_resource_mut::<Messages<M>>()
        .map(|mut messages| messages.drain().collect())
        .unwrap_or_default()
}

pub fn drain_notifications(app: &mut App) -> Vec<Notification> {
    drain::<Notification>(app)
}

/// Queue a host input for the next tick.
pub fn send<M: Message>(app: &mut App, message: M) {
    app.world_mut().resource_mut::<Messages<M>>().write(message);
}

/// Put a player online without going through a join event.
pub fn join(app: &mut App, player: OnlinePlayer) {
    app.world_mut().resource_mut::<Roster>().insert(player);
}

pub fn now(app: &App) -> f64 {
    app.world().resource::<WorldClock>().total_days
}

/// The in-memory host behind an app built over a `MemoryWorld`.
pub fn memory_world(app: &App) -> &MemoryWorld {
    app.world()
        .resource::<HostWorld>()
        .downcast_ref::<MemoryWorld>()
        .expect("app host is not a MemoryWorld")
}

pub fn memory_world_mut(app: &mut App) -> &mut MemoryWorld {
    app.world_mut()
        .resource_mut::<HostWorld>()
        .into_inner()
        .downcast_mut::<MemoryWorld>()
        .expect("app host is not a MemoryWorld")
}
