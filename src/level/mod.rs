//! Level domain: camera, practice room and player spawn.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::{AnimatorParams, LedgeClimbClip};
use crate::movement::{
    GameLayer, Ground, Hazard, LocomotionController, LocomotionTuning, Player, Wall,
};

/// Screen pixels per world unit (one tile).
pub const PIXELS_PER_UNIT: f32 = 32.0;

const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.6);

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_camera, spawn_test_room, spawn_player));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<LocomotionTuning>) {
    info!(
        "Spawning player: max_jumps={}, speed={}",
        tuning.max_jumps, tuning.movement_speed
    );

    commands.spawn((
        // Identity & Locomotion
        (
            Name::new("Player"),
            Player,
            LocomotionController::new(tuning.clone()),
            AnimatorParams::default(),
            LedgeClimbClip::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            Mass(tuning.mass),
            Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
            Restitution::ZERO.with_combine_rule(CoefficientCombine::Min),
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Hazard]),
        ),
    ));
}

fn spawn_block(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) -> Entity {
    commands
        .spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        ))
        .id()
}

/// Practice room. Block edges sit on whole units so ledge anchors snap cleanly.
pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let hazard_color = Color::srgb(0.8, 0.2, 0.2);

    let solid_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let hazard_layers = CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player]);

    // Floor
    let floor = spawn_block(
        &mut commands,
        Vec2::new(0.0, -9.5),
        Vec2::new(36.0, 1.0),
        ground_color,
    );
    commands.entity(floor).insert((Ground, solid_layers));

    // Side walls, tall enough to wall-slide and wall-jump between
    for x in [-18.5, 18.5] {
        let wall = spawn_block(
            &mut commands,
            Vec2::new(x, 0.0),
            Vec2::new(1.0, 20.0),
            wall_color,
        );
        commands.entity(wall).insert((Wall, solid_layers));
    }

    // Low block with a climbable ledge on top
    let ledge_block = spawn_block(
        &mut commands,
        Vec2::new(8.0, -7.0),
        Vec2::new(4.0, 4.0),
        wall_color,
    );
    commands.entity(ledge_block).insert((Wall, solid_layers));

    // Floating platforms
    for (center, width) in [(Vec2::new(-8.0, -4.5), 5.0), (Vec2::new(0.0, -1.5), 4.0)] {
        let platform = spawn_block(
            &mut commands,
            center,
            Vec2::new(width, 1.0),
            platform_color,
        );
        commands.entity(platform).insert((Ground, solid_layers));
    }

    // Pillar for wall-jump practice
    let pillar = spawn_block(
        &mut commands,
        Vec2::new(-13.0, -4.0),
        Vec2::new(1.0, 10.0),
        wall_color,
    );
    commands.entity(pillar).insert((Wall, solid_layers));

    // Spikes
    let hazard = spawn_block(
        &mut commands,
        Vec2::new(14.0, -8.75),
        Vec2::new(2.0, 0.5),
        hazard_color,
    );
    commands.entity(hazard).insert((Hazard, hazard_layers));
}
