//! Scoring module - score tracking, goal zones and match results

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::player::PlayerSlot;

/// Goals scored by each player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    pub fn get(&self, slot: PlayerSlot) -> u32 {
        match slot {
            PlayerSlot::One => self.player1,
            PlayerSlot::Two => self.player2,
        }
    }

    pub fn award(&mut self, slot: PlayerSlot) {
        match slot {
            PlayerSlot::One => self.player1 += 1,
            PlayerSlot::Two => self.player2 += 1,
        }
    }

    pub fn winner(&self) -> Winner {
        if self.player1 > self.player2 {
            Winner::Player(PlayerSlot::One)
        } else if self.player2 > self.player1 {
            Winner::Player(PlayerSlot::Two)
        } else {
            Winner::Draw
        }
    }

    pub fn text(&self) -> String {
        format!("Player 1: {} - Player 2: {}", self.player1, self.player2)
    }
}

/// Outcome of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player(PlayerSlot),
    Draw,
}

impl Winner {
    pub fn text(&self) -> String {
        match self {
            Winner::Player(PlayerSlot::One) => "Player 1 wins!".to_string(),
            Winner::Player(PlayerSlot::Two) => "Player 2 wins!".to_string(),
            Winner::Draw => "Draw!".to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Winner::Player(PlayerSlot::One) => "P1",
            Winner::Player(PlayerSlot::Two) => "P2",
            Winner::Draw => "D",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "D" => Some(Winner::Draw),
            other => PlayerSlot::from_code(other).map(Winner::Player),
        }
    }
}

/// Trigger region behind each goal line
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalZone {
    /// Player 1's goal (left); the ball here scores for player 2
    Player1,
    /// Player 2's goal (right); the ball here scores for player 1
    Player2,
}

impl GoalZone {
    pub const ALL: [GoalZone; 2] = [GoalZone::Player1, GoalZone::Player2];

    pub fn center(&self) -> Vec2 {
        match self {
            GoalZone::Player1 => GOAL_P1_CENTER,
            GoalZone::Player2 => GOAL_P2_CENTER,
        }
    }

    pub fn size(&self) -> Vec2 {
        GOAL_SIZE
    }

    /// The player credited when the ball enters this zone
    pub fn scorer(&self) -> PlayerSlot {
        match self {
            GoalZone::Player1 => PlayerSlot::Two,
            GoalZone::Player2 => PlayerSlot::One,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size() / 2.0;
        let diff = (point - self.center()).abs();
        diff.x < half.x && diff.y < half.y
    }
}
