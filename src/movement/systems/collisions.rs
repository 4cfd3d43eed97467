//! Movement domain: ground, wall and ledge probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Facing, GameLayer, LocomotionController, Player, SurroundingsProbe};

/// Mirror a right-facing probe offset for the current facing.
pub(crate) fn mirrored(offset: Vec2, facing: Facing) -> Vec2 {
    Vec2::new(offset.x * facing.sign(), offset.y)
}

pub(crate) fn check_surroundings(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &mut LocomotionController), With<Player>>,
) {
    // Walls are ground too: every probe uses the same classification
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, mut controller) in &mut query {
        let tuning = controller.tuning();
        let facing = controller.facing();
        let center = transform.translation.truncate();

        let ground_check = center + mirrored(tuning.ground_check_offset, facing);
        let wall_check = center + mirrored(tuning.wall_check_offset, facing);
        let ledge_check = center + mirrored(tuning.ledge_check_offset, facing);

        let grounded = !spatial_query
            .shape_intersections(
                &Collider::circle(tuning.ground_check_radius),
                ground_check,
                0.0,
                &ground_filter,
            )
            .is_empty();

        let touching_wall = spatial_query
            .cast_ray(
                wall_check,
                facing.dir(),
                tuning.wall_check_distance,
                true,
                &ground_filter,
            )
            .is_some();

        let touching_ledge = spatial_query
            .cast_ray(
                ledge_check,
                facing.dir(),
                tuning.wall_check_distance,
                true,
                &ground_filter,
            )
            .is_some();

        controller.observe_surroundings(SurroundingsProbe {
            grounded,
            touching_wall,
            touching_ledge,
            wall_check_position: wall_check,
        });
    }
}
