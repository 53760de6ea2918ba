//! Kinematic bodies for the ball and both players

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::player::PlayerSlot;

/// Which body an entity or event refers to
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyId {
    Ball,
    Player1,
    Player2,
}

impl BodyId {
    pub const ALL: [BodyId; 3] = [BodyId::Ball, BodyId::Player1, BodyId::Player2];

    pub fn name(&self) -> &'static str {
        match self {
            BodyId::Ball => "ball",
            BodyId::Player1 => "p1",
            BodyId::Player2 => "p2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ball" => Some(BodyId::Ball),
            "p1" | "player1" => Some(BodyId::Player1),
            "p2" | "player2" => Some(BodyId::Player2),
            _ => None,
        }
    }
}

impl From<PlayerSlot> for BodyId {
    fn from(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => BodyId::Player1,
            PlayerSlot::Two => BodyId::Player2,
        }
    }
}

/// Position, velocity and material coefficients of one body.
///
/// Velocity is only writable through the setters, which clamp each axis to
/// `max_velocity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    velocity: Vec2,
    angular_velocity: f32,
    /// Rotation in radians, integrated from angular velocity by the host
    pub angle: f32,
    pub size: Vec2,
    pub mass: f32,
    pub bounce: f32,
    pub friction: f32,
    pub drag: Vec2,
    pub angular_drag: f32,
    max_velocity: f32,
    /// Resting on the ground this step (reported by the host engine)
    pub grounded: bool,
}

impl Body {
    pub fn ball(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            angle: 0.0,
            size: BALL_SIZE,
            mass: BALL_MASS,
            bounce: BALL_BOUNCE,
            friction: BALL_FRICTION,
            drag: BALL_DRAG,
            angular_drag: BALL_ANGULAR_DRAG,
            max_velocity: MAX_VELOCITY,
            grounded: false,
        }
    }

    pub fn player(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            angle: 0.0,
            size: PLAYER_SIZE,
            mass: PLAYER_MASS,
            bounce: PLAYER_BOUNCE,
            friction: 0.0,
            drag: PLAYER_DRAG,
            angular_drag: 0.0,
            max_velocity: MAX_VELOCITY,
            grounded: false,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity.clamp(Vec2::splat(-self.max_velocity), Vec2::splat(self.max_velocity));
    }

    pub fn set_velocity_x(&mut self, vx: f32) {
        self.set_velocity(Vec2::new(vx, self.velocity.y));
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.set_velocity(Vec2::new(self.velocity.x, vy));
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
    }

    pub fn max_velocity(&self) -> f32 {
        self.max_velocity
    }

    /// Change the velocity cap and re-clamp the current velocity
    pub fn set_max_velocity(&mut self, max_velocity: f32) {
        self.max_velocity = max_velocity.abs();
        self.set_velocity(self.velocity);
    }

    /// Place the body at `position` at rest
    pub fn reset_to(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
        self.angle = 0.0;
        self.grounded = false;
    }

    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y / 2.0
    }

    /// Penetration depth per axis if the two boxes overlap
    pub fn overlap(&self, other: &Body) -> Option<Vec2> {
        let diff = (self.position - other.position).abs();
        let reach = self.half_size() + other.half_size();
        let overlap = reach - diff;
        (overlap.x > 0.0 && overlap.y > 0.0).then_some(overlap)
    }
}

/// The three bodies of a match
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    pub ball: Body,
    pub player1: Body,
    pub player2: Body,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            ball: Body::ball(BALL_START),
            player1: Body::player(PLAYER1_START),
            player2: Body::player(PLAYER2_START),
        }
    }
}

impl Arena {
    pub fn get(&self, id: BodyId) -> &Body {
        match id {
            BodyId::Ball => &self.ball,
            BodyId::Player1 => &self.player1,
            BodyId::Player2 => &self.player2,
        }
    }

    pub fn get_mut(&mut self, id: BodyId) -> &mut Body {
        match id {
            BodyId::Ball => &mut self.ball,
            BodyId::Player1 => &mut self.player1,
            BodyId::Player2 => &mut self.player2,
        }
    }

    pub fn player(&self, slot: PlayerSlot) -> &Body {
        self.get(slot.into())
    }

    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut Body {
        self.get_mut(slot.into())
    }

    /// Put the ball at `ball_position` and both players at their start spots, all at rest
    pub fn reset_positions(&mut self, ball_position: Vec2) {
        self.ball.reset_to(ball_position);
        self.player1.reset_to(PLAYER1_START);
        self.player2.reset_to(PLAYER2_START);
    }
}
