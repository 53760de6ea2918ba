//! Host physics step: integrate bodies, resolve the ground and walls, report contacts
//!
//! Runs after the match tick each frame. It moves bodies but never touches
//! score or phase; contacts are handed back to `MatchState` through
//! `dispatch_contacts`.

use bevy::prelude::*;
use rand::Rng;

use crate::ball::Surface;
use crate::body::{Arena, Body, BodyId};
use crate::constants::*;
use crate::events::EventBus;
use crate::helpers::move_toward;
use crate::match_state::MatchState;
use crate::player::PlayerSlot;
use crate::scoring::GoalZone;
use crate::tuning::MatchTuning;

/// Something the ball touched during a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldContact {
    Ground,
    Player(PlayerSlot),
    /// Reported once when the ball enters a zone, not every frame it stays
    Goal(GoalZone),
}

/// Contact bookkeeping that survives between steps
#[derive(Resource, Debug, Clone, Default)]
pub struct PhysicsHost {
    ball_in_goal: Option<GoalZone>,
}

impl PhysicsHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every body by `dt` and return the ball's contacts in resolution
    /// order: ground, player 1, player 2, goal.
    pub fn step(&mut self, arena: &mut Arena, tuning: &MatchTuning, dt: f32) -> Vec<WorldContact> {
        let mut contacts = Vec::new();

        for id in BodyId::ALL {
            let body = arena.get_mut(id);
            if body.max_velocity() != tuning.max_velocity {
                body.set_max_velocity(tuning.max_velocity);
            }
            integrate(body, tuning.gravity, dt);
            keep_in_bounds(body);
        }

        for slot in PlayerSlot::ALL {
            land(arena.player_mut(slot));
        }
        if land(&mut arena.ball) {
            contacts.push(WorldContact::Ground);
        }

        let Arena {
            ball,
            player1,
            player2,
        } = arena;
        for (slot, player) in [(PlayerSlot::One, &*player1), (PlayerSlot::Two, &*player2)] {
            if push_out(ball, player) {
                contacts.push(WorldContact::Player(slot));
            }
        }

        let zone = GoalZone::ALL
            .into_iter()
            .find(|zone| zone.contains(ball.position));
        if let Some(zone) = zone
            && self.ball_in_goal != Some(zone)
        {
            contacts.push(WorldContact::Goal(zone));
        }
        self.ball_in_goal = zone;

        contacts
    }
}

/// Route contacts to the match handlers in the order they were found
pub fn dispatch_contacts(
    state: &mut MatchState,
    contacts: &[WorldContact],
    tuning: &MatchTuning,
    rng: &mut impl Rng,
    bus: &mut EventBus,
) {
    for contact in contacts {
        match *contact {
            WorldContact::Ground => {
                state.on_ground_contact(Surface::GROUND, tuning.default_surface_friction, rng)
            }
            WorldContact::Player(slot) => state.on_player_contact(slot, rng, bus),
            WorldContact::Goal(zone) => {
                state.on_goal_overlap(zone, bus);
            }
        }
    }
}

fn integrate(body: &mut Body, gravity: f32, dt: f32) {
    let velocity = body.velocity();
    let vx = move_toward(velocity.x, 0.0, body.drag.x * dt);
    let vy = move_toward(velocity.y + gravity * dt, 0.0, body.drag.y * dt);
    body.set_velocity(Vec2::new(vx, vy));

    let spin = move_toward(body.angular_velocity(), 0.0, body.angular_drag * dt);
    body.set_angular_velocity(spin);

    body.position += body.velocity() * dt;
    // Angular velocity is in degrees per second
    body.angle += body.angular_velocity().to_radians() * dt;
    body.grounded = false;
}

/// Side walls and ceiling
fn keep_in_bounds(body: &mut Body) {
    let half = body.half_size();
    let velocity = body.velocity();

    if body.position.x < half.x {
        body.position.x = half.x;
        if velocity.x < 0.0 {
            body.set_velocity_x(-velocity.x * body.bounce);
        }
    } else if body.position.x > FIELD_WIDTH - half.x {
        body.position.x = FIELD_WIDTH - half.x;
        if velocity.x > 0.0 {
            body.set_velocity_x(-velocity.x * body.bounce);
        }
    }

    if body.position.y < half.y {
        body.position.y = half.y;
        if velocity.y < 0.0 {
            body.set_velocity_y(-velocity.y * body.bounce);
        }
    }
}

/// Rest the body on the ground if it sank into it. Returns true on contact.
fn land(body: &mut Body) -> bool {
    if body.bottom() < GROUND_TOP {
        return false;
    }

    body.position.y = GROUND_TOP - body.half_size().y;
    let vy = body.velocity().y;
    if vy > 0.0 {
        let bounced = -vy * body.bounce;
        body.set_velocity_y(if bounced.abs() < BOUNCE_SETTLE_SPEED {
            0.0
        } else {
            bounced
        });
    }
    body.grounded = true;
    true
}

/// Separate the ball from a player along the shallowest axis. Returns true on contact.
fn push_out(ball: &mut Body, player: &Body) -> bool {
    let Some(depth) = ball.overlap(player) else {
        return false;
    };

    let offset = ball.position - player.position;
    let side = |d: f32| if d < 0.0 { -1.0 } else { 1.0 };
    if depth.x < depth.y {
        ball.position.x += side(offset.x) * depth.x;
    } else {
        ball.position.y += side(offset.y) * depth.y;
    }
    true
}
