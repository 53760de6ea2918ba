//! Resting-roll damping for a grounded ball

use crate::body::Body;
use crate::tuning::MatchTuning;

/// Damp a grounded ball's roll each tick and stop it outright when slow.
/// Returns true if the ball was brought to rest this tick.
pub fn apply_rolling_friction(ball: &mut Body, tuning: &MatchTuning) -> bool {
    if !ball.grounded {
        return false;
    }

    let vx = ball.velocity().x * tuning.ball_roll_friction;
    ball.set_velocity_x(vx);

    if vx.abs() < tuning.ball_rest_speed {
        let was_moving = vx != 0.0 || ball.angular_velocity() != 0.0;
        ball.set_velocity_x(0.0);
        ball.set_angular_velocity(0.0);
        return was_moving;
    }
    false
}
