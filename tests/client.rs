mod common;

use common::*;
use stronghold::ecs::test_helpers::{drain, send, tick_seconds};
use stronghold::ecs::{
    Discovery, LocalPlayer, MarkerInteraction, StrongholdPlugin, TerritoryRegistry,
    build_client_app, spawn,
};
use stronghold::{BlockPos, MarkerAttributes, MarkerProperties, StrongholdConfig};

fn client_app(local_pos: BlockPos) -> bevy_app::App {
    let mut app = build_client_app(
        stocked_world(),
        StrongholdConfig::default(),
        LocalPlayer {
            uid: alice().uid,
            pos: local_pos,
        },
    );
    app.add_plugins(StrongholdPlugin);
    app
}

fn collect_discoveries(app: &mut bevy_app::App, secs: f64) -> Vec<Discovery> {
    let mut found = Vec::new();
    for _ in 0..(secs * 50.0) as u32 {
        tick_seconds(app, 0.02);
        found.extend(drain::<Discovery>(app));
    }
    found
}

#[test]
fn entering_a_named_claim_is_discovered_once() {
    let mut app = client_app(BlockPos::new(100, 64, 0));
    let marker = spawn::spawn_marker_from_attributes(
        app.world_mut(),
        MARKER_POS,
        MarkerProperties::default(),
        &MarkerAttributes {
            area_name: Some("Highkeep".to_string()),
            claimed_player_uid: Some("bob".to_string()),
            claimed_player_name: Some("Bob".to_string()),
            cellar_expectancy: 2.0,
            captured_percent: 1.0,
            ..MarkerAttributes::default()
        },
    );
    assert!(app.world().resource::<TerritoryRegistry>().contains(marker));
    assert!(collect_discoveries(&mut app, 2.0).is_empty());

    app.world_mut().resource_mut::<LocalPlayer>().pos = BlockPos::new(4, 64, 4);
    let found = collect_discoveries(&mut app, 6.0);
    assert_eq!(
        found,
        vec![Discovery {
            territory: marker,
            title: "Highkeep".to_string(),
        }]
    );

    // Leaving and coming back rediscovers it.
    app.world_mut().resource_mut::<LocalPlayer>().pos = BlockPos::new(100, 64, 0);
    collect_discoveries(&mut app, 2.0);
    app.world_mut().resource_mut::<LocalPlayer>().pos = BlockPos::new(4, 64, 4);
    assert_eq!(collect_discoveries(&mut app, 2.0).len(), 1);
}

#[test]
fn client_mirrors_the_ramp_without_claiming() {
    let mut app = client_app(BlockPos::new(0, 64, 2));
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);
    send(
        &mut app,
        MarkerInteraction::Start {
            marker,
            actor: alice().uid,
        },
    );
    tick_seconds(&mut app, CAPTURE_SECS);

    assert_eq!(capture_state(&app, marker).captured_percent, 1.0);
    assert!(!territory(&app, marker).is_claimed());
    assert!(app.world().resource::<TerritoryRegistry>().is_empty());
}
