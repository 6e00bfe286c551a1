//! Territory cadence (every 2 s): siege decay on the server, proximity
//! discovery on the client. Only registered territories take part.

use bevy_app::{App, Plugin};
use bevy_ecs::message::MessageWriter;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res};
use tracing::debug;

use crate::ecs::components::Territory;
use crate::ecs::conditions::{on_client, on_server, territory_cadence};
use crate::ecs::events::Discovery;
use crate::ecs::resources::{LocalPlayer, TerritoryRegistry};
use crate::ecs::schedule::{DomainSet, StrongholdTick};

pub struct SiegePlugin;

impl Plugin for SiegePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            StrongholdTick,
            (
                decay_siege.run_if(on_server),
                discover_territories.run_if(on_client),
            )
                .run_if(territory_cadence)
                .in_set(DomainSet::Siege),
        );
    }
}

fn decay_siege(registry: Res<TerritoryRegistry>, mut territories: Query<&mut Territory>) {
    for (entity, _) in registry.iter() {
        let Ok(mut territory) = territories.get_mut(entity) else {
            continue;
        };
        if territory.siege_intensity <= 0.0 && territory.besieging.is_empty() {
            continue;
        }
        if territory.decay() {
            debug!(center = %territory.center(), "siege lifted");
        }
    }
}

/// Title shown when entering a named territory.
pub fn discovery_title(territory: &Territory) -> Option<String> {
    let name = territory.name.as_deref()?;
    Some(if territory.is_claimed() {
        name.to_string()
    } else {
        format!("Ruins of {name}")
    })
}

fn discover_territories(
    registry: Res<TerritoryRegistry>,
    local: Option<Res<LocalPlayer>>,
    mut territories: Query<&mut Territory>,
    mut discoveries: MessageWriter<Discovery>,
) {
    let Some(local) = local else {
        return;
    };
    for (entity, area) in registry.iter() {
        let Ok(mut territory) = territories.get_mut(entity) else {
            continue;
        };
        let inside = area.contains(local.pos);
        if inside
            && !territory.client_inside
            && let Some(title) = discovery_title(&territory)
        {
            discoveries.write(Discovery {
                territory: entity,
                title,
            });
        }
        if territory.client_inside != inside {
            territory.client_inside = inside;
        }
    }
}
