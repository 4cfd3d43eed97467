//! Data definitions for the locomotion RON file.
//!
//! `LocomotionDef` mirrors assets/data/locomotion.ron. Every field is
//! optional in the file; missing ones fall back to [`LocomotionTuning`]'s
//! defaults. Vectors are written as `(x, y)` tuples.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::LocomotionTuning;

pub const LOCOMOTION_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocomotionDef {
    pub schema_version: u32,
    pub movement: GroundMovementDef,
    pub jump: JumpDef,
    pub wall: WallDef,
    pub probes: ProbeDef,
    pub ledge: LedgeDef,
    pub dash: DashDef,
    pub after_image: AfterImageDef,
    pub knockback: KnockbackDef,
    pub body: BodyDef,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GroundMovementDef {
    pub speed: f32,
    pub force_in_air: f32,
    pub air_drag_multiplier: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JumpDef {
    pub force: f32,
    pub max_jumps: u8,
    pub buffer_time: f32,
    pub variable_height_multiplier: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WallDef {
    pub slide_speed: f32,
    pub turn_lock_time: f32,
    pub jump_force: f32,
    pub jump_direction: (f32, f32),
    pub jump_lock_time: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeDef {
    pub ground_check_offset: (f32, f32),
    pub ground_check_radius: f32,
    pub wall_check_offset: (f32, f32),
    pub ledge_check_offset: (f32, f32),
    pub wall_check_distance: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgeDef {
    pub climb_offset_entry: (f32, f32),
    pub climb_offset_exit: (f32, f32),
    pub grid: f32,
    pub climb_duration: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashDef {
    pub time: f32,
    pub speed: f32,
    pub cooldown: f32,
    pub distance_between_images: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AfterImageDef {
    pub active_time: f32,
    pub alpha: f32,
    pub alpha_decay: f32,
    pub pool_growth: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KnockbackDef {
    pub duration: f32,
    pub speed: (f32, f32),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BodyDef {
    pub mass: f32,
    pub gravity: f32,
}

fn pair(v: Vec2) -> (f32, f32) {
    (v.x, v.y)
}

fn vec((x, y): (f32, f32)) -> Vec2 {
    Vec2::new(x, y)
}

impl From<&LocomotionTuning> for LocomotionDef {
    fn from(t: &LocomotionTuning) -> Self {
        Self {
            schema_version: LOCOMOTION_SCHEMA_VERSION,
            movement: GroundMovementDef {
                speed: t.movement_speed,
                force_in_air: t.movement_force_in_air,
                air_drag_multiplier: t.air_drag_multiplier,
            },
            jump: JumpDef {
                force: t.jump_force,
                max_jumps: t.max_jumps,
                buffer_time: t.jump_buffer_time,
                variable_height_multiplier: t.variable_jump_height_multiplier,
            },
            wall: WallDef {
                slide_speed: t.wall_slide_speed,
                turn_lock_time: t.turn_lock_time,
                jump_force: t.wall_jump_force,
                jump_direction: pair(t.wall_jump_direction),
                jump_lock_time: t.wall_jump_lock_time,
            },
            probes: ProbeDef {
                ground_check_offset: pair(t.ground_check_offset),
                ground_check_radius: t.ground_check_radius,
                wall_check_offset: pair(t.wall_check_offset),
                ledge_check_offset: pair(t.ledge_check_offset),
                wall_check_distance: t.wall_check_distance,
            },
            ledge: LedgeDef {
                climb_offset_entry: pair(t.ledge_climb_offset_entry),
                climb_offset_exit: pair(t.ledge_climb_offset_exit),
                grid: t.ledge_grid,
                climb_duration: t.ledge_climb_duration,
            },
            dash: DashDef {
                time: t.dash_time,
                speed: t.dash_speed,
                cooldown: t.dash_cooldown,
                distance_between_images: t.distance_between_images,
            },
            after_image: AfterImageDef {
                active_time: t.after_image_active_time,
                alpha: t.after_image_alpha,
                alpha_decay: t.after_image_alpha_decay,
                pool_growth: t.after_image_pool_growth,
            },
            knockback: KnockbackDef {
                duration: t.knockback_duration,
                speed: pair(t.knockback_speed),
            },
            body: BodyDef {
                mass: t.mass,
                gravity: t.gravity,
            },
        }
    }
}

impl From<LocomotionDef> for LocomotionTuning {
    fn from(d: LocomotionDef) -> Self {
        Self {
            movement_speed: d.movement.speed,
            movement_force_in_air: d.movement.force_in_air,
            air_drag_multiplier: d.movement.air_drag_multiplier,
            variable_jump_height_multiplier: d.jump.variable_height_multiplier,
            jump_force: d.jump.force,
            max_jumps: d.jump.max_jumps,
            jump_buffer_time: d.jump.buffer_time,
            turn_lock_time: d.wall.turn_lock_time,
            wall_slide_speed: d.wall.slide_speed,
            wall_jump_force: d.wall.jump_force,
            wall_jump_direction: vec(d.wall.jump_direction),
            wall_jump_lock_time: d.wall.jump_lock_time,
            ground_check_offset: vec(d.probes.ground_check_offset),
            ground_check_radius: d.probes.ground_check_radius,
            wall_check_offset: vec(d.probes.wall_check_offset),
            ledge_check_offset: vec(d.probes.ledge_check_offset),
            wall_check_distance: d.probes.wall_check_distance,
            ledge_climb_offset_entry: vec(d.ledge.climb_offset_entry),
            ledge_climb_offset_exit: vec(d.ledge.climb_offset_exit),
            ledge_grid: d.ledge.grid,
            ledge_climb_duration: d.ledge.climb_duration,
            dash_time: d.dash.time,
            dash_speed: d.dash.speed,
            dash_cooldown: d.dash.cooldown,
            distance_between_images: d.dash.distance_between_images,
            after_image_active_time: d.after_image.active_time,
            after_image_alpha: d.after_image.alpha,
            after_image_alpha_decay: d.after_image.alpha_decay,
            after_image_pool_growth: d.after_image.pool_growth,
            knockback_duration: d.knockback.duration,
            knockback_speed: vec(d.knockback.speed),
            mass: d.body.mass,
            gravity: d.body.gravity,
        }
        .normalized()
    }
}

impl Default for LocomotionDef {
    fn default() -> Self {
        Self::from(&LocomotionTuning::default())
    }
}

macro_rules! section_default {
    ($($section:ident => $field:ident),* $(,)?) => {
        $(
            impl Default for $section {
                fn default() -> Self {
                    LocomotionDef::default().$field
                }
            }
        )*
    };
}

section_default!(
    GroundMovementDef => movement,
    JumpDef => jump,
    WallDef => wall,
    ProbeDef => probes,
    LedgeDef => ledge,
    DashDef => dash,
    AfterImageDef => after_image,
    KnockbackDef => knockback,
    BodyDef => body,
);
