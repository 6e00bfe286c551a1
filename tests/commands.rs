mod common;

use common::*;
use stronghold::ecs::commands::{
    CommandReply, force_unclaim, league, name_territory, stop_league,
};
use stronghold::ecs::queries;
use stronghold::ecs::test_helpers::{drain, drain_notifications, send};
use stronghold::ecs::{
    MarkerInteraction, Recipient, Roster, TerritoryRegistry, TerritoryUnclaimed, UnclaimCause,
};
use stronghold::{Actor, BlockPos, GroupAffiliation, MemoryWorld, Privileges};

fn wardens() -> GroupAffiliation {
    GroupAffiliation {
        uid: 3,
        name: "Wardens".to_string(),
    }
}

fn carol() -> Actor {
    Actor::new("carol", "Carol").with_groups([3])
}

/// Alice's claim in a world that knows the Wardens group.
fn leaguable_claim() -> (bevy_app::App, bevy_ecs::entity::Entity) {
    let world: MemoryWorld = stocked_world().with_group(wardens());
    let mut app = server_app(world);
    online(&mut app, alice(), BlockPos::new(0, 64, 2));
    let marker = marker_at(&mut app, MARKER_POS);
    capture(&mut app, marker, &alice());
    drain_notifications(&mut app);
    (app, marker)
}

#[test]
fn only_the_owner_standing_inside_may_name() {
    let (mut app, marker) = claimed_fixture();
    online(&mut app, bob(), BlockPos::new(0, 64, -2));

    assert_eq!(
        name_territory(app.world_mut(), &bob().uid, "Bobton"),
        CommandReply::NotInOwnStronghold
    );
    assert_eq!(
        name_territory(app.world_mut(), &alice().uid, "Highkeep"),
        CommandReply::Done
    );
    assert_eq!(territory(&app, marker).name.as_deref(), Some("Highkeep"));

    let lines = queries::marker_info(app.world(), marker);
    assert_eq!(lines[0], "Banner of Highkeep");
    assert!(
        lines[1].starts_with("Under Alice's command for "),
        "info: {lines:?}"
    );
}

#[test]
fn owner_outside_the_claim_is_refused() {
    let (mut app, _) = claimed_fixture();
    app.world_mut()
        .resource_mut::<Roster>()
        .set_position(&alice().uid, BlockPos::new(100, 64, 0));

    assert_eq!(
        name_territory(app.world_mut(), &alice().uid, "Highkeep"),
        CommandReply::NotInOwnStronghold
    );
    assert_eq!(
        CommandReply::NotInOwnStronghold.message(),
        "You're not in a stronghold you claimed"
    );
}

#[test]
fn league_admits_group_members() {
    let (mut app, marker) = leaguable_claim();
    name_territory(app.world_mut(), &alice().uid, "Highkeep");
    online(&mut app, carol(), BlockPos::new(40, 64, 0));
    assert_eq!(
        queries::privileges_at(app.world(), &carol(), BlockPos::new(3, 64, 3)),
        Privileges::OUTSIDER
    );

    assert_eq!(
        league(app.world_mut(), &alice().uid, "Wardens"),
        CommandReply::Done
    );

    let t = territory(&app, marker);
    assert_eq!(t.group.as_ref().map(|g| g.uid), Some(3));
    // Alice and Carol are both online members now.
    assert_eq!(t.active_member_count, 2);
    assert_eq!(
        queries::privileges_at(app.world(), &carol(), BlockPos::new(3, 64, 3)),
        Privileges::MEMBER
    );
    let out = drain_notifications(&mut app);
    let announced = messages_for(&out, "Highkeep now leagues with Wardens");
    assert_eq!(announced.len(), 1);
    assert_eq!(announced[0].recipient, Recipient::Group(3));

    let lines = queries::marker_info(app.world(), marker);
    assert!(lines[1].contains("in the name of Wardens"), "info: {lines:?}");
}

#[test]
fn unknown_group_is_reported() {
    let (mut app, marker) = leaguable_claim();
    assert_eq!(
        league(app.world_mut(), &alice().uid, "Nobody"),
        CommandReply::NoSuchGroup
    );
    assert!(territory(&app, marker).group.is_none());
}

#[test]
fn stop_league_releases_the_group() {
    let (mut app, marker) = leaguable_claim();
    name_territory(app.world_mut(), &alice().uid, "Highkeep");
    online(&mut app, carol(), BlockPos::new(40, 64, 0));
    league(app.world_mut(), &alice().uid, "Wardens");
    drain_notifications(&mut app);

    assert_eq!(stop_league(app.world_mut(), &alice().uid), CommandReply::Done);

    let t = territory(&app, marker);
    assert!(t.group.is_none());
    assert_eq!(t.active_member_count, 1);
    let out = drain_notifications(&mut app);
    assert_eq!(
        messages_for(&out, "Highkeep no longer leagues with Wardens").len(),
        1
    );
}

#[test]
fn group_member_cannot_command_the_claim() {
    let (mut app, _) = leaguable_claim();
    league(app.world_mut(), &alice().uid, "Wardens");
    online(&mut app, carol(), BlockPos::new(0, 64, 3));

    assert_eq!(
        stop_league(app.world_mut(), &carol().uid),
        CommandReply::NotInOwnStronghold
    );
}

#[test]
fn named_claim_is_announced_to_everyone() {
    let (mut app, marker) = claimed_fixture();
    name_territory(app.world_mut(), &alice().uid, "Highkeep");
    online(&mut app, bob(), BlockPos::new(0, 64, -2));
    app.world_mut()
        .resource_mut::<Roster>()
        .set_accelerating(&bob().uid, true);
    capture(&mut app, marker, &bob());
    app.world_mut()
        .resource_mut::<Roster>()
        .set_accelerating(&bob().uid, false);
    send(
        &mut app,
        MarkerInteraction::Start {
            marker,
            actor: bob().uid,
        },
    );
    let out = run(&mut app, CAPTURE_SECS).notifications;

    let announced = messages_for(&out, "Bob captured Highkeep");
    assert_eq!(announced.len(), 1);
    assert_eq!(announced[0].recipient, Recipient::Everyone);
    assert_eq!(app.world().resource::<TerritoryRegistry>().len(), 1);
}

#[test]
fn forced_release_is_silent() {
    let (mut app, marker) = claimed_fixture();
    assert!(force_unclaim(app.world_mut(), marker));
    assert!(!force_unclaim(app.world_mut(), marker));

    assert!(!territory(&app, marker).is_claimed());
    assert!(drain_notifications(&mut app).is_empty());
    let unclaimed = drain::<TerritoryUnclaimed>(&mut app);
    assert_eq!(unclaimed.len(), 1);
    assert_eq!(unclaimed[0].cause, UnclaimCause::SystemForced);
    assert!(app.world().resource::<TerritoryRegistry>().contains(marker));
}
