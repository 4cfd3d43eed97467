//! Movement domain: the player locomotion controller and its engine bridge.

mod components;
pub mod controller;
mod events;
pub mod ledge;
pub mod motion;
mod resources;
pub(crate) mod systems;
#[cfg(test)]
mod tests;
pub mod timers;

pub use components::*;
pub use controller::{CharacterBody, DashState, LocomotionController, LocomotionMode, TrailMarkers};
pub use events::{AfterImageRequest, KnockbackCommand, LedgeClimbFinished};
pub use resources::*;

use bevy::prelude::*;

use crate::movement::systems::{
    apply_knockback_commands, apply_locomotion_motion, check_surroundings,
    detect_hazard_contacts, finish_ledge_climbs, read_input, update_locomotion,
};

/// Variable-rate locomotion decisions. Observers such as the animation bridge
/// run after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocomotionSet;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocomotionTuning>()
            .init_resource::<MovementInput>()
            .add_message::<LedgeClimbFinished>()
            .add_message::<KnockbackCommand>()
            .add_message::<AfterImageRequest>()
            .add_systems(
                Update,
                (
                    read_input,
                    detect_hazard_contacts,
                    apply_knockback_commands,
                    update_locomotion,
                    finish_ledge_climbs,
                )
                    .chain()
                    .in_set(LocomotionSet),
            )
            .add_systems(
                FixedUpdate,
                (apply_locomotion_motion, check_surroundings).chain(),
            );
    }
}
