//! Movement domain: keyboard sampling into the motion input snapshot.

use bevy::prelude::*;

use crate::movement::MotionInput;

/// Held state is refreshed every frame. Presses accumulate until a fixed
/// step consumes them, so a press between two fixed steps is not lost.
pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MotionInput>) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Climb direction
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.move_axis = Vec2::new(x, y);
    input.run_held = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    input.crawl_held = keyboard.pressed(KeyCode::KeyC);
    input.crouch_held = keyboard.pressed(KeyCode::KeyX);

    input.jump_pressed |=
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.interact_pressed |= keyboard.just_pressed(KeyCode::KeyE);
    input.roll_pressed |= keyboard.just_pressed(KeyCode::KeyL);
}
