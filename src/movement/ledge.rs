//! Movement domain: ledge detection latch and climb placement.

use bevy::prelude::*;

use crate::movement::{Facing, LocomotionTuning};

/// Ledge-top signal latched by the sensor until a climb consumes it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgeLatch {
    pub detected: bool,
    pub anchor_bottom: Vec2,
}

impl LedgeLatch {
    /// Latch a ledge when the chest probe hits a wall the head probe misses.
    /// The anchor is not updated again until [`LedgeLatch::clear`].
    pub fn observe(&mut self, touching_wall: bool, touching_ledge: bool, wall_check: Vec2) {
        if touching_wall && !touching_ledge && !self.detected {
            self.detected = true;
            self.anchor_bottom = wall_check;
        }
    }

    pub fn clear(&mut self) {
        self.detected = false;
    }
}

/// An in-progress ledge climb: hold at `entry` until the clip finishes, then
/// move to `exit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgeClimb {
    pub anchor_bottom: Vec2,
    pub entry: Vec2,
    pub exit: Vec2,
}

impl LedgeClimb {
    pub fn from_anchor(anchor_bottom: Vec2, facing: Facing, tuning: &LocomotionTuning) -> Self {
        let grid = tuning.ledge_grid;
        let y = (anchor_bottom.y / grid).floor() * grid;

        let (entry_x, exit_x) = match facing {
            Facing::Right => {
                let x = ((anchor_bottom.x + tuning.wall_check_distance) / grid).floor() * grid;
                (
                    x - tuning.ledge_climb_offset_entry.x,
                    x + tuning.ledge_climb_offset_exit.x,
                )
            }
            Facing::Left => {
                let x = ((anchor_bottom.x - tuning.wall_check_distance) / grid).ceil() * grid;
                (
                    x + tuning.ledge_climb_offset_entry.x,
                    x - tuning.ledge_climb_offset_exit.x,
                )
            }
        };

        Self {
            anchor_bottom,
            entry: Vec2::new(entry_x, y + tuning.ledge_climb_offset_entry.y),
            exit: Vec2::new(exit_x, y + tuning.ledge_climb_offset_exit.y),
        }
    }
}
