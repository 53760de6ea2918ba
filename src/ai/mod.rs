//! AI module - intents and the decision policy for an unmanned player

mod decision;

pub use decision::*;

use serde::{Deserialize, Serialize};

/// Horizontal movement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveIntent {
    Left,
    Right,
    #[default]
    Stop,
}

impl MoveIntent {
    /// Movement that closes the gap from `from` to `to` (Stop when equal)
    pub fn toward(from: f32, to: f32) -> Self {
        if to > from {
            MoveIntent::Right
        } else if to < from {
            MoveIntent::Left
        } else {
            MoveIntent::Stop
        }
    }
}

/// Per-tick movement and jump request for one player.
/// Human input and the AI both produce this; the tick applies it the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default, rename = "move")]
    pub movement: MoveIntent,
    #[serde(default)]
    pub jump: bool,
}

impl Intent {
    pub const STOP: Intent = Intent {
        movement: MoveIntent::Stop,
        jump: false,
    };

    pub fn moving(movement: MoveIntent) -> Self {
        Self {
            movement,
            jump: false,
        }
    }
}
