//! Fixed constants for ballduel
//!
//! Field geometry, body parameters and match rules. Coordinates are
//! screen-style: x grows right, y grows down, origin at the top-left corner.

use bevy::prelude::*;
use std::time::Duration;

// =============================================================================
// COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.53, 0.75, 0.92);
pub const GROUND_COLOR: Color = Color::srgb(0.25, 0.45, 0.2);
pub const PLAYER1_COLOR: Color = Color::srgb(0.85, 0.3, 0.25);
pub const PLAYER2_COLOR: Color = Color::srgb(0.25, 0.4, 0.85);
pub const BALL_COLOR: Color = Color::srgb(0.95, 0.95, 0.9);
pub const GOAL_P1_COLOR: Color = Color::srgba(0.85, 0.3, 0.25, 0.4);
pub const GOAL_P2_COLOR: Color = Color::srgba(0.25, 0.4, 0.85, 0.4);

pub const TEXT_PRIMARY: Color = Color::srgb(0.05, 0.05, 0.05);
pub const TEXT_ACCENT: Color = Color::srgb(0.7, 0.1, 0.1);

// =============================================================================
// FIELD GEOMETRY
// =============================================================================

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;
pub const FIELD_MIDPOINT_X: f32 = 400.0;

/// Platform centered at (400, 568), 800x64 after scaling
pub const GROUND_CENTER: Vec2 = Vec2::new(400.0, 568.0);
pub const GROUND_SIZE: Vec2 = Vec2::new(800.0, 64.0);
pub const GROUND_TOP: f32 = GROUND_CENTER.y - GROUND_SIZE.y / 2.0;
pub const GROUND_FRICTION: f32 = 0.3;

/// Player 1 defends the left goal, player 2 the right one
pub const GOAL_P1_CENTER: Vec2 = Vec2::new(30.0, 491.0);
pub const GOAL_P2_CENTER: Vec2 = Vec2::new(770.0, 491.0);
pub const GOAL_SIZE: Vec2 = Vec2::new(60.0, 90.0);

// =============================================================================
// INITIAL POSITIONS
// =============================================================================

pub const BALL_START: Vec2 = Vec2::new(380.0, 200.0); // Match start / restart
pub const BALL_KICKOFF: Vec2 = Vec2::new(400.0, 200.0); // After a goal
pub const PLAYER1_START: Vec2 = Vec2::new(100.0, 450.0);
pub const PLAYER2_START: Vec2 = Vec2::new(700.0, 450.0);

// =============================================================================
// BODY PHYSICS
// =============================================================================

pub const GRAVITY: f32 = 300.0;
pub const MAX_VELOCITY: f32 = 500.0;
pub const FRAME_DT: f32 = 1.0 / 60.0;
pub const FRAME_DURATION: Duration = Duration::from_nanos(16_666_667); // Never short of 1/60 s

pub const BALL_SIZE: Vec2 = Vec2::new(24.0, 24.0);
pub const BALL_MASS: f32 = 0.3;
pub const BALL_BOUNCE: f32 = 0.6;
pub const BALL_FRICTION: f32 = 0.2;
pub const BALL_DRAG: Vec2 = Vec2::new(20.0, 20.0); // Linear deceleration (units/s²)
pub const BALL_ANGULAR_DRAG: f32 = 10.0;

pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 48.0);
pub const PLAYER_MASS: f32 = 1.0;
pub const PLAYER_BOUNCE: f32 = 0.2;
pub const PLAYER_DRAG: Vec2 = Vec2::new(1000.0, 0.0);

/// Vertical speed below which a ground bounce settles to rest
pub const BOUNCE_SETTLE_SPEED: f32 = 10.0;

// =============================================================================
// MOVEMENT
// =============================================================================

pub const MOVE_SPEED: f32 = 160.0; // Shared by human and AI
pub const JUMP_VELOCITY: f32 = 330.0; // Applied upward (negative y)

// =============================================================================
// COLLISION RESPONSE
// =============================================================================

pub const DEFAULT_SURFACE_FRICTION: f32 = 0.3;
pub const GROUND_FRICTION_SCALE: f32 = 0.5; // vx *= 1 - friction * scale
pub const GROUND_BOUNCE_DAMPING_MIN: f32 = 0.98;
pub const GROUND_BOUNCE_DAMPING_SPREAD: f32 = 0.04;

pub const KICK_MIN: f32 = 150.0;
pub const KICK_MAX: f32 = 400.0;
pub const KICK_LIFT: f32 = 100.0; // Upward speed always applied on a kick
pub const KICK_LIFT_SPREAD: f32 = 50.0; // Random extra upward speed
pub const KICK_SPIN_FACTOR: f32 = 0.5;

// =============================================================================
// ROLLING
// =============================================================================

pub const BALL_ROLL_FRICTION: f32 = 0.99; // vx retained per tick while grounded
pub const BALL_REST_SPEED: f32 = 5.0; // Below this the ball stops rolling

// =============================================================================
// AI
// =============================================================================

pub const AI_APPROACH_DISTANCE: f32 = 50.0;
pub const AI_DEFENSIVE_X: f32 = 600.0;
pub const AI_DEFENSIVE_TOLERANCE: f32 = 50.0;
pub const AI_JUMP_HEIGHT: f32 = 50.0; // Ball must be this far above the AI
pub const AI_JUMP_RANGE: f32 = 100.0; // ...and within this horizontal distance

// =============================================================================
// MATCH RULES
// =============================================================================

pub const MATCH_DURATION_SECS: u32 = 30;
pub const CLOCK_PERIOD_SECS: u64 = 1;
