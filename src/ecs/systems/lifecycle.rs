//! Marker removal: ends the claim when broken, deregisters, and releases the
//! satellites that supplied it.

use bevy_app::{App, Plugin};
use bevy_ecs::message::{MessageReader, MessageWriter};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Commands, Query, Res, ResMut};
use tracing::{info, warn};

use crate::ecs::components::{Marker, Satellite, Territory, UnclaimCause};
use crate::ecs::events::{MarkerRemoved, Notification, RemovalKind, TerritoryUnclaimed};
use crate::ecs::resources::{Side, TerritoryRegistry};
use crate::ecs::schedule::{DomainSet, StrongholdTick};
use crate::host::HostWorld;

pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            StrongholdTick,
            handle_marker_removals.in_set(DomainSet::WorldEvents),
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_marker_removals(
    mut removals: MessageReader<MarkerRemoved>,
    mut markers: Query<(&mut Marker, &mut Territory)>,
    mut satellites: Query<&mut Satellite>,
    mut registry: ResMut<TerritoryRegistry>,
    mut host: ResMut<HostWorld>,
    side: Res<Side>,
    mut commands: Commands,
    mut notifications: MessageWriter<Notification>,
    mut unclaimed: MessageWriter<TerritoryUnclaimed>,
) {
    let mut out = Vec::new();
    for MarkerRemoved { marker, kind } in removals.read() {
        let Ok((mut marker_block, mut territory)) = markers.get_mut(*marker) else {
            warn!(?marker, "removal of unknown marker");
            continue;
        };

        if *kind == RemovalKind::Broken && *side == Side::Server {
            if territory.unclaim(UnclaimCause::MarkerDestroyed, &mut out) {
                unclaimed.write(TerritoryUnclaimed {
                    territory: *marker,
                    cause: UnclaimCause::MarkerDestroyed,
                });
            }
            if let Some(banner) = marker_block.banner.take() {
                host.spawn_item(marker_block.pos, banner);
            }
        }

        if registry.remove(*marker) {
            info!(pos = %marker_block.pos, ?kind, "territory deregistered");
        }
        for mut satellite in satellites.iter_mut() {
            if satellite.territory == Some(*marker) {
                satellite.territory = None;
            }
        }
        commands.entity(*marker).despawn();
    }
    notifications.write_batch(out);
}
