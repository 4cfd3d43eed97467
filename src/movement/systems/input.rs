//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MovementInput;

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];
const DASH_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::KeyJ];

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    // Raw axis: opposite keys cancel out
    let mut x = 0.0;
    if keyboard.any_pressed(LEFT_KEYS) {
        x -= 1.0;
    }
    if keyboard.any_pressed(RIGHT_KEYS) {
        x += 1.0;
    }

    *input = MovementInput {
        axis: x,
        horizontal_just_pressed: keyboard.any_just_pressed(LEFT_KEYS)
            || keyboard.any_just_pressed(RIGHT_KEYS),
        jump_just_pressed: keyboard.any_just_pressed(JUMP_KEYS),
        jump_held: keyboard.any_pressed(JUMP_KEYS),
        jump_just_released: keyboard.any_just_released(JUMP_KEYS),
        dash_just_pressed: keyboard.any_just_pressed(DASH_KEYS),
    };
}
