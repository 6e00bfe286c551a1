//! Read-only lookups for the host. Every lookup may come back empty; an
//! empty answer is never an error.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::clock::WorldClock;
use crate::ecs::components::{Cellar, Marker, Satellite, Territory, claim_horizon};
use crate::ecs::resources::TerritoryRegistry;
use crate::model::{Actor, BlockPos, Privileges};

/// The registered territory containing `pos`.
pub fn territory_at(world: &World, pos: BlockPos) -> Option<Entity> {
    world.get_resource::<TerritoryRegistry>()?.find(pos)
}

/// What `actor` may do at `pos`.
pub fn privileges_at(world: &World, actor: &Actor, pos: BlockPos) -> Privileges {
    let Some(registry) = world.get_resource::<TerritoryRegistry>() else {
        return Privileges::MEMBER;
    };
    registry.privileges_at(actor, pos, |e| world.get::<Territory>(e))
}

/// Credit flowing into `marker` from satellites under its banner.
fn supplied_credit(world: &World, marker: Entity, block: &Marker) -> f32 {
    let Some(mut satellites) = world.try_query::<(&Satellite, &Cellar)>() else {
        return 0.0;
    };
    satellites
        .iter(world)
        .filter(|(sat, _)| {
            sat.territory == Some(marker) && sat.banner_matches(block.banner.as_ref())
        })
        .map(|(_, cellar)| cellar.expectancy)
        .sum()
}

/// World day until which the marker's claim is funded.
pub fn horizon_of(world: &World, marker: Entity) -> Option<f64> {
    let entity = world.get_entity(marker).ok()?;
    let block = entity.get::<Marker>()?;
    let territory = entity.get::<Territory>()?;
    let cellar = entity.get::<Cellar>()?;
    let now = world.get_resource::<WorldClock>()?.total_days;
    Some(claim_horizon(
        now,
        cellar.expectancy,
        supplied_credit(world, marker, block),
        territory.siege_intensity,
    ))
}

/// Days rendered with at most one decimal, dropping a trailing `.0`.
fn format_days(days: f64) -> String {
    let rounded = (days * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Description lines shown when looking at a marker.
pub fn marker_info(world: &World, marker: Entity) -> Vec<String> {
    let mut lines = Vec::new();
    let Some(territory) = world.get::<Territory>(marker) else {
        return lines;
    };
    if let Some(name) = &territory.name {
        lines.push(format!("Banner of {name}"));
    }
    let (Some(horizon), Some(clock)) =
        (horizon_of(world, marker), world.get_resource::<WorldClock>())
    else {
        return lines;
    };
    let remaining = horizon - clock.total_days;
    if remaining <= 0.0 {
        return lines;
    }
    if let Some(owner) = &territory.owner {
        let days = format_days(remaining);
        lines.push(match &territory.group {
            Some(group) => format!(
                "Under {}'s command in the name of {} for {days} days",
                owner.name, group.name
            ),
            None => format!("Under {}'s command for {days} days", owner.name),
        });
    }
    lines
}

/// Description shown when looking at a satellite that is supplying a claim.
pub fn satellite_info(world: &World, satellite: Entity) -> Option<String> {
    let entity = world.get_entity(satellite).ok()?;
    let sat = entity.get::<Satellite>()?;
    let cellar = entity.get::<Cellar>()?;
    let marker = sat.territory?;
    let territory = world.get::<Territory>(marker)?;
    let block = world.get::<Marker>(marker)?;
    if !territory.is_claimed() || !sat.banner_matches(block.banner.as_ref()) {
        return None;
    }
    Some(format!("+{} stronghold expectancy", cellar.expectancy))
}
