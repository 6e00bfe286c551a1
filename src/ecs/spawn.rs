use bevy_ecs::entity::Entity;
use bevy_ecs::message::Messages;
use bevy_ecs::world::{Mut, World};
use tracing::{info, warn};

use crate::config::{MarkerProperties, SatelliteProperties};
use crate::ecs::components::{
    CaptureDirection, CaptureState, Cellar, Marker, Satellite, Territory, UnclaimCause,
};
use crate::ecs::events::{TerritoryAdded, TerritoryUnclaimed};
use crate::ecs::resources::{Registration, Roster, TerritoryRegistry};
use crate::model::{BlockPos, Cuboid, MarkerAttributes, SatelliteAttributes};

/// Spawn a freshly placed, unclaimed marker.
pub fn spawn_marker(world: &mut World, pos: BlockPos, properties: MarkerProperties) -> Entity {
    world
        .spawn((
            Marker::new(pos, properties),
            Territory::new(pos, properties.protection_radius),
            CaptureState::default(),
            Cellar::default(),
        ))
        .id()
}

/// Spawn a marker from stored attributes. A marker stored as claimed
/// registers its territory straight away.
pub fn spawn_marker_from_attributes(
    world: &mut World,
    pos: BlockPos,
    properties: MarkerProperties,
    attributes: &MarkerAttributes,
) -> Entity {
    let mut territory = Territory::new(pos, properties.protection_radius);
    territory.name = attributes.area_name.clone();
    territory.owner = attributes.owner();
    territory.group = attributes.group();
    territory.siege_intensity = attributes.siege_intensity.max(0.0);

    let marker = Marker {
        banner: attributes.banner.clone(),
        ..Marker::new(pos, properties)
    };
    let capture = CaptureState {
        captured_percent: attributes.captured_percent.clamp(0.0, 1.0),
        direction: CaptureDirection::from_stored(attributes.capture_direction),
        contest: None,
    };
    let cellar = Cellar {
        expectancy: attributes.cellar_expectancy,
    };
    let claimed = territory.is_claimed();
    let area = territory.area();
    let entity = world.spawn((marker, territory, capture, cellar)).id();

    if claimed {
        register_loaded(world, entity, pos, area);
    }
    entity
}

fn register_loaded(world: &mut World, entity: Entity, pos: BlockPos, area: Cuboid) {
    let registered = world
        .resource_mut::<TerritoryRegistry>()
        .register(entity, area);
    match registered {
        Ok(Registration::Inserted) => {
            info!(%pos, "stored claim registered");
            world
                .resource_mut::<Messages<TerritoryAdded>>()
                .write(TerritoryAdded { territory: entity });
        }
        Ok(Registration::AlreadyRegistered) => {}
        Err(rejection) => {
            // An unregistered claim has no guard and no decay, so it is released.
            warn!(%pos, %rejection, "stored claim could not register, releasing it");
            let released = world
                .get_mut::<Territory>(entity)
                .is_some_and(|mut territory| {
                    territory.unclaim(UnclaimCause::SystemForced, &mut Vec::new())
                });
            if released {
                world
                    .resource_mut::<Messages<TerritoryUnclaimed>>()
                    .write(TerritoryUnclaimed {
                        territory: entity,
                        cause: UnclaimCause::SystemForced,
                    });
            }
            return;
        }
    }
    world.try_resource_scope(|world, roster: Mut<Roster>| {
        if let Some(mut territory) = world.get_mut::<Territory>(entity) {
            territory.recount_active_members(roster.iter());
        }
    });
}

/// Snapshot of a marker's persisted state.
pub fn marker_attributes(world: &World, marker: Entity) -> Option<MarkerAttributes> {
    let entity = world.get_entity(marker).ok()?;
    let block = entity.get::<Marker>()?;
    let territory = entity.get::<Territory>()?;
    let capture = entity.get::<CaptureState>()?;
    let cellar = entity.get::<Cellar>()?;
    Some(MarkerAttributes {
        area_name: territory.name.clone(),
        claimed_player_uid: territory.owner.as_ref().map(|o| o.uid.0.clone()),
        claimed_player_name: territory.owner.as_ref().map(|o| o.name.clone()),
        claimed_group_uid: territory.group.as_ref().map(|g| g.uid),
        claimed_group_name: territory.group.as_ref().map(|g| g.name.clone()),
        siege_intensity: territory.siege_intensity,
        cellar_expectancy: cellar.expectancy,
        captured_percent: capture.captured_percent,
        capture_direction: capture.direction.to_stored(),
        banner: block.banner.clone(),
    })
}

pub fn spawn_satellite(world: &mut World, pos: BlockPos, properties: SatelliteProperties) -> Entity {
    world
        .spawn((Satellite::new(pos, properties), Cellar::default()))
        .id()
}

pub fn spawn_satellite_from_attributes(
    world: &mut World,
    pos: BlockPos,
    properties: SatelliteProperties,
    attributes: &SatelliteAttributes,
) -> Entity {
    let satellite = Satellite {
        banner: attributes.banner.clone(),
        ..Satellite::new(pos, properties)
    };
    let cellar = Cellar {
        expectancy: attributes.cellar_expectancy,
    };
    world.spawn((satellite, cellar)).id()
}

pub fn satellite_attributes(world: &World, satellite: Entity) -> Option<SatelliteAttributes> {
    let entity = world.get_entity(satellite).ok()?;
    Some(SatelliteAttributes {
        cellar_expectancy: entity.get::<Cellar>()?.expectancy,
        banner: entity.get::<Satellite>()?.banner.clone(),
    })
}
