use bevy_app::{App, Plugin};

use super::systems::capture::CapturePlugin;
use super::systems::cellar::CellarPlugin;
use super::systems::guard::GuardPlugin;
use super::systems::lifecycle::LifecyclePlugin;
use super::systems::satellites::SatellitesPlugin;
use super::systems::siege::SiegePlugin;

/// Aggregate plugin that installs every stronghold domain plugin.
pub struct StrongholdPlugin;

impl Plugin for StrongholdPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            GuardPlugin,
            LifecyclePlugin,
            SatellitesPlugin,
            CapturePlugin,
            CellarPlugin,
            SiegePlugin,
        ));
    }
}
