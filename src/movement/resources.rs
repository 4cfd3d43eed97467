//! Movement domain: tuning and input resources.

use bevy::prelude::*;

/// Horizontal speed below which the character counts as standing still.
pub const WALKING_THRESHOLD: f32 = 0.01;

/// Upward speed at or below which a grounded character refills its jumps.
pub const LANDING_VELOCITY_THRESHOLD: f32 = 0.01;

/// Every tunable of the locomotion controller, in world units (one tile = 1.0).
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LocomotionTuning {
    pub movement_speed: f32,
    /// Force added per second while steering in the air.
    pub movement_force_in_air: f32,
    /// Horizontal velocity multiplier applied each fixed tick when airborne with no input.
    pub air_drag_multiplier: f32,
    pub variable_jump_height_multiplier: f32,
    pub jump_force: f32,
    /// Total jumps available before landing, ground jump included.
    pub max_jumps: u8,
    pub jump_buffer_time: f32,
    pub turn_lock_time: f32,
    pub wall_slide_speed: f32,
    pub wall_jump_force: f32,
    /// Normalized on load, see [`LocomotionTuning::normalized`].
    pub wall_jump_direction: Vec2,
    pub wall_jump_lock_time: f32,

    // Probe geometry, relative to the body centre for a right-facing character
    pub ground_check_offset: Vec2,
    pub ground_check_radius: f32,
    pub wall_check_offset: Vec2,
    pub ledge_check_offset: Vec2,
    pub wall_check_distance: f32,

    pub ledge_climb_offset_entry: Vec2,
    pub ledge_climb_offset_exit: Vec2,
    /// Grid the ledge anchor is snapped to when computing climb positions.
    pub ledge_grid: f32,
    pub ledge_climb_duration: f32,

    pub dash_time: f32,
    pub dash_speed: f32,
    pub dash_cooldown: f32,
    pub distance_between_images: f32,

    pub after_image_active_time: f32,
    pub after_image_alpha: f32,
    pub after_image_alpha_decay: f32,
    pub after_image_pool_growth: usize,

    pub knockback_duration: f32,
    pub knockback_speed: Vec2,

    pub mass: f32,
    pub gravity: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            movement_speed: 10.0,
            movement_force_in_air: 50.0,
            air_drag_multiplier: 0.95,
            variable_jump_height_multiplier: 0.5,
            jump_force: 16.0,
            max_jumps: 1,
            jump_buffer_time: 0.15,
            turn_lock_time: 0.1,
            wall_slide_speed: 2.0,
            wall_jump_force: 20.0,
            wall_jump_direction: Vec2::new(1.0, 2.0).normalize(),
            wall_jump_lock_time: 0.5,
            ground_check_offset: Vec2::new(0.0, -0.8),
            ground_check_radius: 0.3,
            wall_check_offset: Vec2::new(0.3, 0.1),
            ledge_check_offset: Vec2::new(0.3, 0.7),
            wall_check_distance: 0.4,
            ledge_climb_offset_entry: Vec2::new(0.3, 0.0),
            ledge_climb_offset_exit: Vec2::new(0.5, 2.0),
            ledge_grid: 1.0,
            ledge_climb_duration: 0.4,
            dash_time: 0.2,
            dash_speed: 50.0,
            dash_cooldown: 2.5,
            distance_between_images: 0.1,
            after_image_active_time: 0.1,
            after_image_alpha: 0.8,
            after_image_alpha_decay: 0.95,
            after_image_pool_growth: 10,
            knockback_duration: 0.2,
            knockback_speed: Vec2::new(10.0, 10.0),
            mass: 1.0,
            gravity: 39.24,
        }
    }
}

impl LocomotionTuning {
    /// Normalize direction vectors once so per-tick code can trust them.
    pub fn normalized(mut self) -> Self {
        self.wall_jump_direction = self.wall_jump_direction.normalize_or_zero();
        self
    }

    /// Apex height of a single ground jump under the configured gravity.
    pub fn single_jump_height(&self) -> f32 {
        self.jump_force * self.jump_force / (2.0 * self.gravity)
    }

    /// Horizontal distance covered by one uninterrupted dash.
    pub fn dash_distance(&self) -> f32 {
        self.dash_speed * self.dash_time
    }
}

/// One tick's worth of sampled input.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    /// Raw horizontal axis, -1, 0 or 1.
    pub axis: f32,
    /// A horizontal key went down this frame.
    pub horizontal_just_pressed: bool,
    pub jump_just_pressed: bool,
    pub jump_held: bool,
    pub jump_just_released: bool,
    pub dash_just_pressed: bool,
}
