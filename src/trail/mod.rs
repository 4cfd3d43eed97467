//! Trail domain: pooled dash after-images.
//!
//! The dash logic only asks for markers (see [`AfterImageRequest`]); this
//! module owns the pool, places each marker at the requested position with a
//! copy of the player's sprite, fades it and hands it back after its lifetime.

pub mod pool;

pub use pool::MarkerPool;

use bevy::color::Alpha;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{AfterImageRequest, LocomotionSet, LocomotionTuning, Player};

/// Pool of after-image entities, injected into the systems that use it.
#[derive(Resource, Debug)]
pub struct AfterImagePool(pub MarkerPool<Entity>);

impl Default for AfterImagePool {
    fn default() -> Self {
        Self(MarkerPool::new(LocomotionTuning::default().after_image_pool_growth))
    }
}

/// A pooled after-image. Inactive ones are hidden and sitting in the pool.
#[derive(Component, Debug, Clone, Default)]
pub struct AfterImage {
    pub active: bool,
    pub age: f32,
    pub alpha: f32,
    pub tint: Color,
}

impl AfterImage {
    pub fn activated(tint: Color, alpha: f32) -> Self {
        Self {
            active: true,
            age: 0.0,
            alpha,
            tint,
        }
    }

    /// Advance one frame. Returns true once the lifetime has run out.
    pub fn fade(&mut self, dt: f32, decay: f32, active_time: f32) -> bool {
        self.alpha *= decay;
        self.age += dt;
        self.age >= active_time
    }
}

pub struct TrailPlugin;

impl Plugin for TrailPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AfterImagePool>()
            .add_systems(PostStartup, prime_after_image_pool)
            .add_systems(
                Update,
                (spawn_after_images, fade_after_images)
                    .chain()
                    .after(LocomotionSet),
            );
    }
}

fn spawn_inactive(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            Name::new("AfterImage"),
            AfterImage::default(),
            Sprite::default(),
            Transform::default(),
            Visibility::Hidden,
        ))
        .id()
}

fn prime_after_image_pool(
    mut commands: Commands,
    tuning: Res<LocomotionTuning>,
    mut pool: ResMut<AfterImagePool>,
) {
    pool.0 = MarkerPool::new(tuning.after_image_pool_growth);
    pool.0.grow(|| spawn_inactive(&mut commands));
    debug!("After-image pool primed with {} instances", pool.0.available());
}

fn spawn_after_images(
    mut commands: Commands,
    mut requests: MessageReader<AfterImageRequest>,
    mut pool: ResMut<AfterImagePool>,
    tuning: Res<LocomotionTuning>,
    players: Query<(&Sprite, &Transform), With<Player>>,
) {
    for request in requests.read() {
        let Ok((player_sprite, player_transform)) = players.get(request.source) else {
            continue;
        };

        let entity = pool.0.acquire(|| spawn_inactive(&mut commands));
        let mut sprite = player_sprite.clone();
        sprite.color = player_sprite.color.with_alpha(tuning.after_image_alpha);

        commands.entity(entity).insert((
            AfterImage::activated(player_sprite.color, tuning.after_image_alpha),
            sprite,
            Transform::from_translation(request.position.extend(player_transform.translation.z - 0.1)),
            Visibility::Visible,
        ));
    }
}

fn fade_after_images(
    time: Res<Time>,
    tuning: Res<LocomotionTuning>,
    mut pool: ResMut<AfterImagePool>,
    mut query: Query<(Entity, &mut AfterImage, &mut Sprite, &mut Visibility)>,
) {
    let dt = time.delta_secs();

    for (entity, mut image, mut sprite, mut visibility) in &mut query {
        if !image.active {
            continue;
        }

        let expired = image.fade(
            dt,
            tuning.after_image_alpha_decay,
            tuning.after_image_active_time,
        );
        sprite.color = image.tint.with_alpha(image.alpha);

        if expired {
            image.active = false;
            *visibility = Visibility::Hidden;
            pool.0.release(entity);
        }
    }
}
