mod animation;
mod content;
#[cfg(feature = "dev-tools")]
mod debug;
mod level;
mod movement;
mod trail;

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics and locomotion sensing tick rate.
const FIXED_HZ: f64 = 50.0;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Ledge Runner".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((
        content::ContentPlugin,
        movement::MovementPlugin,
        animation::AnimationBridgePlugin,
        trail::TrailPlugin,
        level::LevelPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
