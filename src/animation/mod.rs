//! Animation bridge: projects locomotion flags into animator parameters.
//!
//! The bridge never feeds back into locomotion except through the
//! [`LedgeClimbFinished`] message written when the climb clip completes.


use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{LedgeClimbFinished, LocomotionController, LocomotionSet, Player};

/// Parameter sink read by presentation. Rewritten every frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimatorParams {
    pub is_walking: bool,
    pub is_grounded: bool,
    pub y_velocity: f32,
    pub is_wall_sliding: bool,
    pub can_climb_ledge: bool,
    pub is_dashing: bool,
    pub is_knocked_back: bool,
}

impl AnimatorParams {
    pub fn from_controller(controller: &LocomotionController, velocity: Vec2) -> Self {
        Self {
            is_walking: controller.is_walking(),
            is_grounded: controller.is_grounded(),
            y_velocity: velocity.y,
            is_wall_sliding: controller.is_wall_sliding(),
            can_climb_ledge: controller.is_climbing(),
            is_dashing: controller.is_dashing(),
            is_knocked_back: controller.is_knocked_back(),
        }
    }

    /// Clip the animator would be playing for these parameters.
    pub fn clip(&self) -> ClipKind {
        if self.can_climb_ledge {
            ClipKind::LedgeClimb
        } else if self.is_dashing {
            ClipKind::Dash
        } else if self.is_knocked_back {
            ClipKind::Hurt
        } else if self.is_wall_sliding {
            ClipKind::WallSlide
        } else if !self.is_grounded {
            if self.y_velocity > 0.0 {
                ClipKind::Jump
            } else {
                ClipKind::Fall
            }
        } else if self.is_walking {
            ClipKind::Walk
        } else {
            ClipKind::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipKind {
    Idle,
    Walk,
    Jump,
    Fall,
    WallSlide,
    LedgeClimb,
    Dash,
    Hurt,
}

impl ClipKind {
    /// Stand-in tint until real sprite sheets exist.
    pub fn tint(self) -> Color {
        match self {
            ClipKind::Idle => Color::srgb(0.9, 0.9, 0.9),
            ClipKind::Walk => Color::srgb(0.85, 0.95, 0.85),
            ClipKind::Jump => Color::srgb(0.85, 0.85, 0.95),
            ClipKind::Fall => Color::srgb(0.7, 0.7, 0.9),
            ClipKind::WallSlide => Color::srgb(0.95, 0.85, 0.6),
            ClipKind::LedgeClimb => Color::srgb(0.6, 0.95, 0.6),
            ClipKind::Dash => Color::srgb(0.6, 0.9, 1.0),
            ClipKind::Hurt => Color::srgb(1.0, 0.45, 0.45),
        }
    }
}

/// Playback of the one-shot ledge-climb clip.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgeClimbClip {
    pub playing: bool,
    pub elapsed: f32,
}

impl LedgeClimbClip {
    /// Advance the clip. Returns true on the frame it finishes.
    pub fn tick(&mut self, climbing: bool, dt: f32, duration: f32) -> bool {
        if !climbing {
            *self = Self::default();
            return false;
        }

        if !self.playing {
            self.playing = true;
            self.elapsed = 0.0;
            return false;
        }

        self.elapsed += dt;
        if self.elapsed >= duration {
            self.playing = false;
            self.elapsed = 0.0;
            return true;
        }
        false
    }
}

pub struct AnimationBridgePlugin;

impl Plugin for AnimationBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (push_animator_params, play_ledge_climb_clip, present_player)
                .chain()
                .after(LocomotionSet),
        );
    }
}

fn push_animator_params(
    mut query: Query<(&LocomotionController, &LinearVelocity, &mut AnimatorParams), With<Player>>,
) {
    for (controller, velocity, mut params) in &mut query {
        let next = AnimatorParams::from_controller(controller, velocity.0);
        if *params != next {
            *params = next;
        }
    }
}

fn play_ledge_climb_clip(
    time: Res<Time>,
    mut finished: MessageWriter<LedgeClimbFinished>,
    mut query: Query<(Entity, &LocomotionController, &AnimatorParams, &mut LedgeClimbClip)>,
) {
    let dt = time.delta_secs();

    for (entity, controller, params, mut clip) in &mut query {
        let duration = controller.tuning().ledge_climb_duration;
        if clip.tick(params.can_climb_ledge, dt, duration) {
            finished.write(LedgeClimbFinished { entity });
        }
    }
}

fn present_player(
    mut query: Query<(&LocomotionController, &AnimatorParams, &mut Sprite), With<Player>>,
) {
    for (controller, params, mut sprite) in &mut query {
        sprite.flip_x = controller.facing().sign() < 0.0;
        sprite.color = params.clip().tint();
    }
}
