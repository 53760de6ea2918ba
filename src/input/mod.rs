//! Input module - PlayerInput resource and capture_input system

use bevy::prelude::*;

use crate::ai::{Intent, MoveIntent};

/// Latest input for both players plus a pending restart click
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub player1: Intent,
    /// Only read when player 2 is human-controlled
    pub player2: Intent,
    /// Latched until the restart handler consumes it
    pub restart_requested: bool,
}

fn read_intent(keyboard: &ButtonInput<KeyCode>, left: KeyCode, right: KeyCode, jump: KeyCode) -> Intent {
    // Left wins when both are held
    let movement = if keyboard.pressed(left) {
        MoveIntent::Left
    } else if keyboard.pressed(right) {
        MoveIntent::Right
    } else {
        MoveIntent::Stop
    };
    Intent {
        movement,
        jump: keyboard.pressed(jump),
    }
}

/// Runs in Update to capture input state before it's cleared.
/// Arrow keys drive player 1, WASD drives player 2.
pub fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<PlayerInput>,
) {
    input.player1 = read_intent(&keyboard, KeyCode::ArrowLeft, KeyCode::ArrowRight, KeyCode::ArrowUp);
    input.player2 = read_intent(&keyboard, KeyCode::KeyA, KeyCode::KeyD, KeyCode::KeyW);

    if keyboard.just_pressed(KeyCode::Enter) || mouse.just_pressed(MouseButton::Left) {
        input.restart_requested = true;
    }
}
