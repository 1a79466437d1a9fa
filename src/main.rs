use avian2d::prelude::*;
use bevy::prelude::*;

use platformer_motion::content::ContentPlugin;
use platformer_motion::movement::{MovementPlugin, SandboxPlugin};
use platformer_motion::surfaces::SurfacesPlugin;

/// Motion runs at a fixed step so probes and timers are frame-rate independent.
const FIXED_HZ: f64 = 60.0;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Motion Sandbox".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
    .add_plugins((
        SurfacesPlugin,
        ContentPlugin::default(),
        MovementPlugin,
        SandboxPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(platformer_motion::debug::DebugPlugin);

    app.run();
}
