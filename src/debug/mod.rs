//! Developer overlay for tuning locomotion by feel.
//!
//! Features:
//! - F1 toggles a readout of mode, facing, jumps and armed timers
//! - F2 puts the player back at the spawn point
//! - F3 knocks the player back toward where it is facing

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{KnockbackCommand, LocomotionController, Player};

// ============================================================================
// Debug State Resource
// ============================================================================

#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub show_info: bool,
}

/// Marker for the locomotion readout
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

// ============================================================================
// Plugin
// ============================================================================

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                handle_debug_hotkeys,
                update_debug_info_overlay,
            )
                .chain(),
        );
    }
}

/// Multi-line readout of the controller state.
pub fn describe_locomotion(controller: &LocomotionController, velocity: Vec2) -> String {
    let timers = controller.timers();
    let armed: Vec<String> = [
        ("jump_buffer", timers.jump_buffer),
        ("turn_lock", timers.turn_lock),
        ("wall_jump_lock", timers.wall_jump_lock),
        ("dash", timers.dash),
        ("dash_cooldown", timers.dash_cooldown),
        ("knockback", timers.knockback),
    ]
    .into_iter()
    .filter(|(_, countdown)| countdown.is_armed())
    .map(|(name, countdown)| format!("{}={:.2}", name, countdown.remaining()))
    .collect();

    let probe = controller.surroundings();
    format!(
        "Mode: {}\nFacing: {:?}\nJumps: {}/{}\nVel: ({:.1}, {:.1})\nGround: {} Wall: {} Ledge: {}\nTimers: {}",
        controller.mode().name(),
        controller.facing(),
        controller.jumps_remaining(),
        controller.tuning().max_jumps,
        velocity.x,
        velocity.y,
        probe.grounded,
        probe.touching_wall,
        probe.touching_ledge,
        if armed.is_empty() {
            "-".to_string()
        } else {
            armed.join(" ")
        }
    )
}

// ============================================================================
// Systems
// ============================================================================

fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut knockbacks: MessageWriter<KnockbackCommand>,
    mut player_query: Query<
        (
            Entity,
            &LocomotionController,
            &mut Transform,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_info = !debug_state.show_info;
    }

    for (entity, controller, mut transform, mut velocity) in &mut player_query {
        if keyboard.just_pressed(KeyCode::F2) {
            transform.translation.x = 0.0;
            transform.translation.y = 0.0;
            velocity.0 = Vec2::ZERO;
            info!("Debug: player reset to spawn");
        }

        if keyboard.just_pressed(KeyCode::F3) {
            knockbacks.write(KnockbackCommand {
                target: entity,
                direction: controller.facing().sign(),
            });
        }
    }
}

fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    player_query: Query<(&LocomotionController, &LinearVelocity), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some((controller, velocity)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        **text = describe_locomotion(controller, velocity.0);
    }
}

fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}
