#![allow(dead_code)]

use bevy_app::App;
use bevy_ecs::entity::Entity;

use stronghold::ecs::components::{CaptureState, Cellar, Territory};
use stronghold::ecs::test_helpers::{self, drain, join, send, tick_seconds};
use stronghold::ecs::time::TICKS_PER_SECOND;
use stronghold::ecs::{
    MarkerInteraction, Notification, OnlinePlayer, StrongholdPlugin, TerritoryAdded,
    TerritoryUnclaimed, build_stronghold_app_seeded, spawn,
};
use stronghold::{
    Actor, BlockPos, Container, ItemStack, MarkerProperties, MemoryWorld, StrongholdConfig,
};

pub const MARKER_POS: BlockPos = BlockPos::new(0, 64, 0);
/// A full capture at the default duration, with a little slack.
pub const CAPTURE_SECS: f64 = 4.5;

pub fn alice() -> Actor {
    Actor::new("alice", "Alice")
}

pub fn bob() -> Actor {
    Actor::new("bob", "Bob")
}

/// Ten loaves in the chest east of the marker: 2.5 days of credit.
pub fn stocked_world() -> MemoryWorld {
    MemoryWorld::new().with_container(
        BlockPos::new(1, 64, 0),
        Container::with_stacks([ItemStack::food("bread", 10, 100.0)]),
    )
}

pub fn server_app(world: MemoryWorld) -> App {
    let mut app = build_stronghold_app_seeded(world, StrongholdConfig::default(), 42);
    app.add_plugins(StrongholdPlugin);
    app
}

pub fn online(app: &mut App, actor: Actor, pos: BlockPos) {
    join(app, OnlinePlayer::new(actor, pos));
}

pub fn marker_at(app: &mut App, pos: BlockPos) -> Entity {
    spawn::spawn_marker(app.world_mut(), pos, MarkerProperties::default())
}

/// Hold the marker as `actor` for a full capture.
pub fn capture(app: &mut App, marker: Entity, actor: &Actor) -> Vec<Notification> {
    send(
        app,
        MarkerInteraction::Start {
            marker,
            actor: actor.uid.clone(),
        },
    );
    tick_seconds(app, CAPTURE_SECS)
}

/// Alice online beside a stocked marker, which she has claimed.
pub fn claimed_fixture() -> (App, Entity) {
    let mut app = server_app(stocked_world());
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);
    capture(&mut app, marker, &alice());
    send(
        &mut app,
        MarkerInteraction::Stop {
            marker,
            actor: alice().uid,
        },
    );
    test_helpers::tick(&mut app);
    test_helpers::drain_notifications(&mut app);
    (app, marker)
}

pub fn territory(app: &App, marker: Entity) -> &Territory {
    app.world().get::<Territory>(marker).expect("marker has a territory")
}

pub fn capture_state(app: &App, marker: Entity) -> &CaptureState {
    app.world().get::<CaptureState>(marker).expect("marker has capture state")
}

pub fn cellar(app: &App, marker: Entity) -> &Cellar {
    app.world().get::<Cellar>(marker).expect("marker has a cellar")
}

pub fn messages_for<'a>(out: &'a [Notification], needle: &str) -> Vec<&'a Notification> {
    out.iter().filter(|n| n.message.contains(needle)).collect()
}

/// Everything the systems wrote while running.
#[derive(Debug, Default)]
pub struct Outputs {
    pub notifications: Vec<Notification>,
    pub added: Vec<TerritoryAdded>,
    pub unclaimed: Vec<TerritoryUnclaimed>,
}

/// Run `secs` of ticks, draining every output each tick so nothing ages out.
pub fn run(app: &mut App, secs: f64) -> Outputs {
    let mut outputs = Outputs::default();
    let ticks = (secs * TICKS_PER_SECOND as f64).round() as u64;
    for _ in 0..ticks {
        test_helpers::tick(app);
        outputs.notifications.extend(drain::<Notification>(app));
        outputs.added.extend(drain::<TerritoryAdded>(app));
        outputs.unclaimed.extend(drain::<TerritoryUnclaimed>(app));
    }
    outputs
}
