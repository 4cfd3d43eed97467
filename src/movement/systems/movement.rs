//! Movement domain: locomotion systems bridging the controller and the physics body.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::movement::motion::apply_motion;
use crate::movement::{
    AfterImageRequest, CharacterBody, Hazard, KnockbackCommand, LedgeClimbFinished,
    LocomotionController, MovementInput, Player,
};

fn read_body(transform: &Transform, velocity: &LinearVelocity) -> CharacterBody {
    CharacterBody::new(transform.translation.truncate(), velocity.0)
}

fn write_body(body: CharacterBody, transform: &mut Transform, velocity: &mut LinearVelocity) {
    if transform.translation.truncate() != body.position {
        transform.translation.x = body.position.x;
        transform.translation.y = body.position.y;
    }
    velocity.0 = body.velocity;
}

pub(crate) fn update_locomotion(
    time: Res<Time>,
    input: Res<MovementInput>,
    mut after_images: MessageWriter<AfterImageRequest>,
    mut query: Query<
        (
            Entity,
            &mut LocomotionController,
            &mut Transform,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut controller, mut transform, mut velocity) in &mut query {
        let mut body = read_body(&transform, &velocity);
        let mut markers: Vec<Vec2> = Vec::new();

        controller.update(&input, &mut body, dt, &mut markers);
        write_body(body, &mut transform, &mut velocity);

        for position in markers {
            after_images.write(AfterImageRequest {
                source: entity,
                position,
            });
        }
    }
}

pub(crate) fn apply_locomotion_motion(
    time: Res<Time>,
    mut query: Query<(&LocomotionController, &Transform, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (controller, transform, mut velocity) in &mut query {
        let mut body = read_body(transform, &velocity);
        apply_motion(controller, &mut body, dt);
        velocity.0 = body.velocity;
    }
}

pub(crate) fn finish_ledge_climbs(
    mut finished: MessageReader<LedgeClimbFinished>,
    mut query: Query<(&mut LocomotionController, &mut Transform, &mut LinearVelocity)>,
) {
    for event in finished.read() {
        let Ok((mut controller, mut transform, mut velocity)) = query.get_mut(event.entity) else {
            continue;
        };

        let mut body = read_body(&transform, &velocity);
        if controller.finish_ledge_climb(&mut body) {
            write_body(body, &mut transform, &mut velocity);
        }
    }
}

pub(crate) fn apply_knockback_commands(
    mut commands_in: MessageReader<KnockbackCommand>,
    mut query: Query<(&mut LocomotionController, &Transform, &mut LinearVelocity)>,
) {
    for command in commands_in.read() {
        let Ok((mut controller, transform, mut velocity)) = query.get_mut(command.target) else {
            continue;
        };

        let mut body = read_body(transform, &velocity);
        if controller.knockback(command.direction, &mut body) {
            velocity.0 = body.velocity;
        } else {
            debug!(
                "Knockback ignored while {}",
                controller.mode().name()
            );
        }
    }
}

pub(crate) fn detect_hazard_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut knockbacks: MessageWriter<KnockbackCommand>,
    hazards: Query<&Transform, With<Hazard>>,
    players: Query<&Transform, With<Player>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (hazard_entity, player_entity) in pairs {
            let (Ok(hazard_transform), Ok(player_transform)) =
                (hazards.get(hazard_entity), players.get(player_entity))
            else {
                continue;
            };

            // Push away from the hazard, right when exactly above it
            let dx = player_transform.translation.x - hazard_transform.translation.x;
            let direction = if dx < 0.0 { -1.0 } else { 1.0 };

            knockbacks.write(KnockbackCommand {
                target: player_entity,
                direction,
            });
        }
    }
}
