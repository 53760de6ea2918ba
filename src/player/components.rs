//! Player-related components and identifiers

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which of the two players
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(&self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "p1" | "player1" | "1" => Some(PlayerSlot::One),
            "p2" | "player2" | "2" => Some(PlayerSlot::Two),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerSlot::One => write!(f, "P1"),
            PlayerSlot::Two => write!(f, "P2"),
        }
    }
}

/// Animation requested from the host for a player
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationKey {
    Left,
    Right,
    #[default]
    Turn,
}

impl AnimationKey {
    pub fn name(&self) -> &'static str {
        match self {
            AnimationKey::Left => "left",
            AnimationKey::Right => "right",
            AnimationKey::Turn => "turn",
        }
    }
}

/// Who drives a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    Human,
    #[default]
    Ai,
}

/// Control assignment. Player 1 is always human; player 2 is AI unless manned.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Controls {
    pub player2: ControlMode,
}

impl Controls {
    pub fn two_player() -> Self {
        Self {
            player2: ControlMode::Human,
        }
    }
}
