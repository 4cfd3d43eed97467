//! Movement domain: typed messages crossing into and out of locomotion.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Written by the animation layer when a ledge-climb clip has played out
#[derive(Debug)]
pub struct LedgeClimbFinished {
    pub entity: Entity,
}

impl Message for LedgeClimbFinished {}

/// Written by combat or hazards to push a character away
#[derive(Debug)]
pub struct KnockbackCommand {
    pub target: Entity,
    /// Sign of the horizontal push, -1 or +1
    pub direction: f32,
}

impl Message for KnockbackCommand {}

/// A dash asked for an after-image at this position
#[derive(Debug)]
pub struct AfterImageRequest {
    pub source: Entity,
    pub position: Vec2,
}

impl Message for AfterImageRequest {}
