mod common;

use common::*;
use stronghold::ecs::components::UnclaimCause;
use stronghold::ecs::test_helpers::{memory_world, memory_world_mut, send, tick_seconds};
use stronghold::ecs::{
    Channel, MarkerInteraction, Recipient, Roster, TerritoryAdded, TerritoryRegistry,
    TerritoryUnclaimed, WorldEvent,
};
use stronghold::{BlockPos, ItemStack, MemoryWorld, WorldAccess};

#[test]
fn full_capture_claims_and_registers() {
    let mut app = server_app(stocked_world());
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);

    send(
        &mut app,
        MarkerInteraction::Start {
            marker,
            actor: alice().uid,
        },
    );
    let outputs = run(&mut app, CAPTURE_SECS);
    let out = outputs.notifications;

    let t = territory(&app, marker);
    assert_eq!(t.owner_uid(), Some(&alice().uid));
    assert_eq!(t.active_member_count, 1);
    assert!(app.world().resource::<TerritoryRegistry>().contains(marker));
    assert!(!capture_state(&app, marker).is_contested());
    assert_eq!(capture_state(&app, marker).captured_percent, 1.0);

    let hints = messages_for(&out, "/stronghold name");
    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].channel, Channel::Info);
    assert_eq!(hints[0].recipient, Recipient::Player(alice().uid));

    assert_eq!(outputs.added, vec![TerritoryAdded { territory: marker }]);
}

#[test]
fn half_capture_is_not_a_claim() {
    let mut app = server_app(stocked_world());
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);

    send(
        &mut app,
        MarkerInteraction::Start {
            marker,
            actor: alice().uid,
        },
    );
    tick_seconds(&mut app, 2.0);

    let percent = capture_state(&app, marker).captured_percent;
    assert!((0.45..0.55).contains(&percent), "percent {percent}");
    assert!(!territory(&app, marker).is_claimed());
    assert!(app.world().resource::<TerritoryRegistry>().is_empty());
}

#[test]
fn fresh_claim_gets_grace_credit_then_real_credit() {
    let mut app = server_app(stocked_world());
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);
    capture(&mut app, marker, &alice());
    tick_seconds(&mut app, 1.0);

    // 10 loaves * 100 satiety * 0.0025 days
    let expectancy = cellar(&app, marker).expectancy;
    assert!((expectancy - 2.5).abs() < 0.3, "expectancy {expectancy}");
}

#[test]
fn claim_lapses_when_no_food_is_stored() {
    let mut app = server_app(MemoryWorld::new());
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);
    capture(&mut app, marker, &alice());
    assert!(territory(&app, marker).is_claimed());

    let outputs = run(&mut app, 6.0);

    assert!(!territory(&app, marker).is_claimed());
    let lapsed = messages_for(&outputs.notifications, "has run out of food!");
    assert_eq!(lapsed.len(), 1);
    assert_eq!(lapsed[0].message, "One of your claims has run out of food!");
    assert_eq!(lapsed[0].recipient, Recipient::Player(alice().uid));
    assert_eq!(
        outputs.unclaimed,
        vec![TerritoryUnclaimed {
            territory: marker,
            cause: UnclaimCause::ResourceExhausted,
        }]
    );
    // The area stays registered while the marker stands.
    assert!(app.world().resource::<TerritoryRegistry>().contains(marker));
}

#[test]
fn rival_pulling_down_the_banner_wins_the_contest() {
    let (mut app, marker) = claimed_fixture();
    online(&mut app, bob(), BlockPos::new(0, 64, -2));
    app.world_mut()
        .resource_mut::<Roster>()
        .set_accelerating(&bob().uid, true);

    let out = capture(&mut app, marker, &bob());

    assert!(!territory(&app, marker).is_claimed());
    assert_eq!(capture_state(&app, marker).captured_percent, 0.0);
    assert_eq!(
        messages_for(&out, "has been captured!").len(),
        1,
        "notifications: {out:?}"
    );
    // Stored food outlives the lost contest.
    assert!(cellar(&app, marker).expectancy > 0.0);

    // Letting go of the modifier raises Bob's own banner.
    app.world_mut()
        .resource_mut::<Roster>()
        .set_accelerating(&bob().uid, false);
    let outputs = run(&mut app, CAPTURE_SECS);
    assert_eq!(territory(&app, marker).owner_uid(), Some(&bob().uid));
    // Same entity, already registered: no second fan-out.
    assert!(outputs.added.is_empty());
}

#[test]
fn marker_too_deep_underground_rejects_once() {
    let world = MemoryWorld::new().with_surface(0, 0, 80);
    let mut app = server_app(world);
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);

    let mut out = capture(&mut app, marker, &alice());
    out.extend(tick_seconds(&mut app, 3.0));

    assert!(!territory(&app, marker).is_claimed());
    assert_eq!(capture_state(&app, marker).captured_percent, 1.0);
    let rejections = messages_for(&out, "stronghold-undergroundflag");
    assert_eq!(rejections.len(), 1);
    assert_eq!(rejections[0].channel, Channel::IngameError);
}

#[test]
fn overlapping_claim_is_rejected() {
    let (mut app, _) = claimed_fixture();
    online(&mut app, bob(), BlockPos::new(20, 64, 2));
    let second = marker_at(&mut app, BlockPos::new(20, 64, 0));

    let out = capture(&mut app, second, &bob());

    assert!(!territory(&app, second).is_claimed());
    assert_eq!(messages_for(&out, "stronghold-alreadyclaimed").len(), 1);
    assert_eq!(app.world().resource::<TerritoryRegistry>().len(), 1);
}

#[test]
fn contest_ends_when_the_actor_walks_away() {
    let mut app = server_app(stocked_world());
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);
    send(
        &mut app,
        MarkerInteraction::Start {
            marker,
            actor: alice().uid,
        },
    );
    tick_seconds(&mut app, 1.0);
    let reached = capture_state(&app, marker).captured_percent;
    assert!(reached > 0.0);

    app.world_mut()
        .resource_mut::<Roster>()
        .set_position(&alice().uid, BlockPos::new(0, 64, 10));
    tick_seconds(&mut app, 0.1);

    assert!(!capture_state(&app, marker).is_contested());
    assert!(capture_state(&app, marker).captured_percent < reached);
    tick_seconds(&mut app, 2.0);
    assert_eq!(capture_state(&app, marker).captured_percent, 0.0);
}

#[test]
fn contest_ends_when_the_actor_leaves() {
    let mut app = server_app(stocked_world());
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);
    send(
        &mut app,
        MarkerInteraction::Start {
            marker,
            actor: alice().uid,
        },
    );
    tick_seconds(&mut app, 0.5);
    send(&mut app, WorldEvent::PlayerLeft { uid: alice().uid });
    tick_seconds(&mut app, 0.1);

    assert!(!capture_state(&app, marker).is_contested());
    assert!(app.world().resource::<Roster>().get(&alice().uid).is_none());
}

#[test]
fn held_marker_refuses_a_second_actor() {
    let mut app = server_app(stocked_world());
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    online(&mut app, bob(), BlockPos::new(2, 64, 0));
    let marker = marker_at(&mut app, MARKER_POS);
    send(
        &mut app,
        MarkerInteraction::Start {
            marker,
            actor: alice().uid,
        },
    );
    tick_seconds(&mut app, 0.5);
    send(
        &mut app,
        MarkerInteraction::Start {
            marker,
            actor: bob().uid,
        },
    );
    // Only the holder may stop the contest.
    send(
        &mut app,
        MarkerInteraction::Stop {
            marker,
            actor: bob().uid,
        },
    );
    tick_seconds(&mut app, 0.1);

    assert_eq!(
        capture_state(&app, marker).captured_by(),
        Some(&alice().uid)
    );
}

#[test]
fn banner_is_hung_on_start_and_dropped_when_the_claim_lapses() {
    let mut world = MemoryWorld::new();
    world.hold(&alice().uid, ItemStack::banner("cloth-red"));
    let mut app = server_app(world);
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);

    capture(&mut app, marker, &alice());
    let block = app
        .world()
        .get::<stronghold::ecs::Marker>(marker)
        .expect("marker");
    assert_eq!(block.banner.as_ref().map(|b| b.code.as_str()), Some("cloth-red"));
    assert!(memory_world(&app).held_item(&alice().uid).is_none());

    tick_seconds(&mut app, 6.0);
    assert!(!territory(&app, marker).is_claimed());
    let dropped = &memory_world_mut(&mut app).dropped;
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].0, MARKER_POS);
    assert_eq!(dropped[0].1.code, "cloth-red");
}

#[test]
fn dark_marker_cannot_hold_an_idle_claim() {
    let mut world = stocked_world();
    world.sky_light.insert(MARKER_POS, 4);
    let mut app = server_app(world);
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);
    capture(&mut app, marker, &alice());
    assert!(territory(&app, marker).is_claimed());

    let out = tick_seconds(&mut app, 5.0);
    assert!(!territory(&app, marker).is_claimed());
    // Food remained, so the claim counts as captured rather than starved.
    assert_eq!(messages_for(&out, "has been captured!").len(), 1);
}
