//! Satellites: linking logistics points to the territory around them, banner
//! handling, and removal.

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::message::{MessageReader, MessageWriter};
use bevy_ecs::query::{Added, Without};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Commands, Query, Res, ResMut};
use tracing::{debug, warn};

use crate::ecs::components::{Marker, Satellite};
use crate::ecs::conditions::on_server;
use crate::ecs::events::{
    Notification, RemovalKind, SatelliteInteraction, SatelliteRemoved, TerritoryAdded,
};
use crate::ecs::resources::TerritoryRegistry;
use crate::ecs::schedule::{DomainSet, StrongholdPhase, StrongholdTick};
use crate::host::HostWorld;
use crate::model::ItemStack;

pub const WRONG_BANNER: &str = "logisticpoint-wrongbanner";

pub struct SatellitesPlugin;

impl Plugin for SatellitesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            StrongholdTick,
            (
                link_new_satellites,
                handle_satellite_interactions.run_if(on_server),
                handle_satellite_removals,
            )
                .chain()
                .in_set(DomainSet::WorldEvents),
        );
        app.add_systems(
            StrongholdTick,
            link_on_territory_added.in_set(StrongholdPhase::Reactions),
        );
    }
}

/// A satellite spawned after its territory registered finds it by lookup.
fn link_new_satellites(
    mut satellites: Query<&mut Satellite, Added<Satellite>>,
    registry: Res<TerritoryRegistry>,
) {
    for mut satellite in satellites.iter_mut() {
        if satellite.territory.is_none() {
            satellite.territory = registry.find(satellite.pos);
        }
    }
}

/// A satellite that predates its territory hears about it here, in the same
/// tick the territory registered.
fn link_on_territory_added(
    mut added: MessageReader<TerritoryAdded>,
    mut satellites: Query<&mut Satellite>,
    registry: Res<TerritoryRegistry>,
) {
    for TerritoryAdded { territory } in added.read() {
        let Some(area) = registry.area_of(*territory) else {
            continue;
        };
        for mut satellite in satellites.iter_mut() {
            if satellite.territory.is_none() && area.contains(satellite.pos) {
                debug!(pos = %satellite.pos, "satellite linked to new territory");
                satellite.territory = Some(*territory);
            }
        }
    }
}

fn handle_satellite_interactions(
    mut interactions: MessageReader<SatelliteInteraction>,
    mut satellites: Query<&mut Satellite, Without<Marker>>,
    markers: Query<&Marker>,
    registry: Res<TerritoryRegistry>,
    mut host: ResMut<HostWorld>,
    mut notifications: MessageWriter<Notification>,
) {
    for SatelliteInteraction { satellite, actor } in interactions.read() {
        let Ok(mut sat) = satellites.get_mut(*satellite) else {
            warn!(?satellite, "interaction with unknown satellite");
            continue;
        };
        let holds_banner = host.held_item(actor).is_some_and(ItemStack::is_banner);

        if sat.banner.is_none() && holds_banner {
            sat.banner = host.take_held(actor, 1);
            if sat.territory.is_none() {
                sat.territory = registry.find(sat.pos);
            }
            let marker_banner = sat
                .territory
                .and_then(|e| markers.get(e).ok())
                .map(|m| m.banner.as_ref());
            if let Some(marker_banner) = marker_banner
                && !sat.banner_matches(marker_banner)
            {
                notifications.write(Notification::error(actor, WRONG_BANNER));
            }
            debug!(%actor, pos = %sat.pos, "banner attached to satellite");
        } else if let Some(banner) = sat.banner.take() {
            debug!(%actor, pos = %sat.pos, "banner taken down from satellite");
            host.spawn_item(sat.pos, banner);
            sat.territory = None;
        }
    }
}

fn handle_satellite_removals(
    mut removals: MessageReader<SatelliteRemoved>,
    mut satellites: Query<(Entity, &mut Satellite)>,
    mut host: ResMut<HostWorld>,
    mut commands: Commands,
) {
    for SatelliteRemoved { satellite, kind } in removals.read() {
        let Ok((entity, mut sat)) = satellites.get_mut(*satellite) else {
            warn!(?satellite, "removal of unknown satellite");
            continue;
        };
        if *kind == RemovalKind::Broken
            && let Some(banner) = sat.banner.take()
        {
            host.spawn_item(sat.pos, banner);
        }
        commands.entity(entity).despawn();
    }
}
