//! Ball contact response: how the ball's velocity changes on contact

use rand::Rng;
use std::str::FromStr;

use crate::body::Body;
use crate::constants::*;

/// A surface the ball can land on
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    /// Friction coefficient; `None` uses the default surface friction.
    /// `Some(0.0)` is a frictionless surface, not a request for the default.
    pub friction: Option<f32>,
}

impl Surface {
    pub const GROUND: Surface = Surface {
        friction: Some(GROUND_FRICTION),
    };
}

/// What the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Ground,
    Player,
}

impl FromStr for ContactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ground" => Ok(ContactKind::Ground),
            "player" => Ok(ContactKind::Player),
            other => Err(format!("Unknown contact kind '{}'", other)),
        }
    }
}

/// Ball landed on (or is sliding along) a surface.
///
/// Horizontal speed loses half the surface friction; vertical speed gets a
/// small random damping in [0.98, 1.02) so bounces never become periodic.
/// Only an unset friction falls back to `default_friction`; an explicit zero
/// leaves horizontal speed untouched.
pub fn ground_contact(ball: &mut Body, surface: Surface, default_friction: f32, rng: &mut impl Rng) {
    let friction = surface.friction.unwrap_or(default_friction);
    let velocity = ball.velocity();
    let damping = GROUND_BOUNCE_DAMPING_MIN + rng.gen_range(0.0..GROUND_BOUNCE_DAMPING_SPREAD);

    ball.set_velocity_x(velocity.x * (1.0 - friction * GROUND_FRICTION_SCALE));
    ball.set_velocity_y(velocity.y * damping);
}

/// Kick magnitude from the players' relative horizontal speed, in [KICK_MIN, KICK_MAX]
pub fn kick_strength(player_vx: f32, ball_vx: f32) -> f32 {
    ((player_vx - ball_vx).abs() + KICK_MIN).min(KICK_MAX)
}

/// Player touched the ball: kick it away from the player, up, with spin.
/// Returns the signed horizontal kick.
pub fn player_contact(ball: &mut Body, player: &Body, rng: &mut impl Rng) -> f32 {
    let strength = kick_strength(player.velocity().x, ball.velocity().x);
    let direction = if player.position.x < ball.position.x {
        1.0
    } else {
        -1.0
    };
    let kick = strength * direction;

    ball.set_velocity_x(kick);
    ball.set_velocity_y(-KICK_LIFT - rng.gen_range(0.0..KICK_LIFT_SPREAD));
    ball.set_angular_velocity(kick * KICK_SPIN_FACTOR);

    kick
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ground_contact_friction() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ball = Body::ball(Vec2::new(300.0, 520.0));
        ball.set_velocity(Vec2::new(200.0, 100.0));

        ground_contact(&mut ball, Surface::GROUND, DEFAULT_SURFACE_FRICTION, &mut rng);

        // 200 * (1 - 0.3 * 0.5)
        assert!((ball.velocity().x - 170.0).abs() < 1e-3);
        assert!(ball.velocity().y >= 98.0 && ball.velocity().y < 102.0);
    }

    #[test]
    fn test_unset_friction_uses_default() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut ball = Body::ball(Vec2::new(300.0, 520.0));
        ball.set_velocity(Vec2::new(-100.0, 0.0));

        ground_contact(&mut ball, Surface::default(), 0.3, &mut rng);
        assert!((ball.velocity().x + 85.0).abs() < 1e-3);
        assert_eq!(ball.velocity().y, 0.0);

        // Explicit zero friction is honored
        ball.set_velocity(Vec2::new(-100.0, 0.0));
        ground_contact(&mut ball, Surface { friction: Some(0.0) }, 0.3, &mut rng);
        assert_eq!(ball.velocity().x, -100.0);
    }

    #[test]
    fn test_same_seed_same_bounce() {
        let mut a = Body::ball(Vec2::ZERO);
        let mut b = Body::ball(Vec2::ZERO);
        a.set_velocity(Vec2::new(0.0, 200.0));
        b.set_velocity(Vec2::new(0.0, 200.0));

        ground_contact(&mut a, Surface::GROUND, 0.3, &mut StdRng::seed_from_u64(9));
        ground_contact(&mut b, Surface::GROUND, 0.3, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.velocity(), b.velocity());
    }

    #[test]
    fn test_kick_strength_bounds() {
        assert_eq!(kick_strength(0.0, 0.0), KICK_MIN);
        assert_eq!(kick_strength(160.0, 0.0), 310.0);
        assert_eq!(kick_strength(160.0, -400.0), KICK_MAX);
    }

    #[test]
    fn test_player_contact_direction_and_spin() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut player = Body::player(Vec2::new(100.0, 500.0));
        player.set_velocity(Vec2::new(160.0, 0.0));
        let mut ball = Body::ball(Vec2::new(120.0, 480.0));

        let kick = player_contact(&mut ball, &player, &mut rng);
        assert_eq!(kick, 310.0);
        assert_eq!(ball.velocity().x, 310.0);
        assert!(ball.velocity().y <= -100.0 && ball.velocity().y > -150.0);
        assert_eq!(ball.angular_velocity(), 155.0);

        // Player to the right kicks the ball left
        let player = Body::player(Vec2::new(140.0, 500.0));
        let kick = player_contact(&mut ball, &player, &mut rng);
        assert!(kick < 0.0);
        assert!(ball.angular_velocity() < 0.0);
    }

    #[test]
    fn test_contact_kind_parse() {
        assert_eq!("ground".parse::<ContactKind>(), Ok(ContactKind::Ground));
        assert_eq!("Player".parse::<ContactKind>(), Ok(ContactKind::Player));
        assert!("wall".parse::<ContactKind>().is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn kick_magnitude_stays_in_bounds(
                seed in 0u64..1000,
                player_x in 0.0f32..800.0,
                ball_x in 0.0f32..800.0,
                player_vx in -500.0f32..=500.0,
                ball_vx in -500.0f32..=500.0,
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut player = Body::player(Vec2::new(player_x, 500.0));
                player.set_velocity(Vec2::new(player_vx, 0.0));
                let mut ball = Body::ball(Vec2::new(ball_x, 480.0));
                ball.set_velocity(Vec2::new(ball_vx, 0.0));

                let kick = player_contact(&mut ball, &player, &mut rng);

                prop_assert!((KICK_MIN..=KICK_MAX).contains(&kick.abs()));
                prop_assert_eq!(ball.velocity().x, kick);
                prop_assert_eq!(kick > 0.0, player_x < ball_x);
                prop_assert!(ball.velocity().y <= -KICK_LIFT);
            }

            #[test]
            fn ground_contact_never_exceeds_cap(
                seed in 0u64..1000,
                vx in -500.0f32..=500.0,
                vy in -500.0f32..=500.0,
                friction in proptest::option::of(0.0f32..=1.0),
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut ball = Body::ball(Vec2::new(300.0, 524.0));
                ball.set_velocity(Vec2::new(vx, vy));

                ground_contact(&mut ball, Surface { friction }, DEFAULT_SURFACE_FRICTION, &mut rng);

                prop_assert!(ball.velocity().x.abs() <= MAX_VELOCITY);
                prop_assert!(ball.velocity().y.abs() <= MAX_VELOCITY);
                prop_assert!(ball.velocity().x.abs() <= vx.abs());
            }
        }
    }
}
