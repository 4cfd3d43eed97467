//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Everything the probes treat as solid: floors, platforms and walls
    Ground,
    /// Player character
    Player,
    /// Blocks that knock the player back on contact
    Hazard,
    /// Dash after-images, never collide
    Effect,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Direction a probe cast "forward" travels in.
    pub fn dir(self) -> Dir2 {
        match self {
            Facing::Right => Dir2::X,
            Facing::Left => Dir2::NEG_X,
        }
    }
}

/// Result of the environment probes for one fixed tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurroundingsProbe {
    pub grounded: bool,
    pub touching_wall: bool,
    pub touching_ledge: bool,
    /// World position the wall probe was cast from.
    pub wall_check_position: Vec2,
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for colliders that knock the player away on contact
#[derive(Component, Debug)]
pub struct Hazard;
