//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::check_surroundings;
pub(crate) use input::read_input;
pub(crate) use movement::{
    apply_knockback_commands, apply_locomotion_motion, detect_hazard_contacts,
    finish_ledge_climbs, update_locomotion,
};
