//! Movement domain: fixed-step velocity application.

use bevy::prelude::*;

use crate::movement::controller::{CharacterBody, LocomotionController, LocomotionMode};

/// Turn the controller's current mode into body velocity for one fixed step.
///
/// Vertical velocity is only touched by wall-slide clamping, dashing and
/// ledge climbing; jumps set it directly in the controller.
pub fn apply_motion(controller: &LocomotionController, body: &mut CharacterBody, dt: f32) {
    let tuning = controller.tuning();
    let input = controller.movement_input();
    let can_move = controller.can_move();

    match controller.mode() {
        LocomotionMode::Dashing(_) => {
            body.velocity = Vec2::new(tuning.dash_speed * controller.facing().sign(), 0.0);
        }
        LocomotionMode::LedgeClimbing(_) => {
            body.velocity = Vec2::ZERO;
        }
        LocomotionMode::KnockedBack => {}
        LocomotionMode::Grounded => {
            if can_move {
                body.velocity.x = tuning.movement_speed * input;
            }
        }
        LocomotionMode::WallSliding => {
            if can_move {
                body.velocity.x = tuning.movement_speed * input;
            }
            body.velocity.y = body.velocity.y.max(-tuning.wall_slide_speed);
        }
        LocomotionMode::Airborne | LocomotionMode::WallJumpLocked => {
            if input == 0.0 {
                body.velocity.x *= tuning.air_drag_multiplier;
            } else if can_move {
                body.velocity.x += tuning.movement_force_in_air * input * dt / tuning.mass;
                if body.velocity.x.abs() > tuning.movement_speed {
                    body.velocity.x = tuning.movement_speed * input;
                }
            }
        }
    }
}
