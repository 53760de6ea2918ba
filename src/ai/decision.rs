//! AI decision policy for player 2

use crate::ai::{Intent, MoveIntent};
use crate::body::Body;
use crate::constants::*;
use crate::match_state::MatchPhase;

/// Decide what the AI player does this tick. Pure: the tick applies the result.
///
/// The AI chases the ball while it is on its half (x > midpoint), otherwise it
/// drifts back to a defensive spot. There is no separate kick action; running
/// into the ball goes through the same contact response as a human kick.
pub fn decide(ai: &Body, ball: &Body, phase: MatchPhase) -> Intent {
    if phase != MatchPhase::Running {
        return Intent::STOP;
    }

    let distance_to_ball = (ai.position.x - ball.position.x).abs();
    let ball_on_ai_side = ball.position.x > FIELD_MIDPOINT_X;

    let movement = if ball_on_ai_side {
        // Far or close, keep walking into the ball; contact does the kicking
        MoveIntent::toward(ai.position.x, ball.position.x)
    } else if (AI_DEFENSIVE_X - ai.position.x).abs() > AI_DEFENSIVE_TOLERANCE {
        MoveIntent::toward(ai.position.x, AI_DEFENSIVE_X)
    } else {
        MoveIntent::Stop
    };

    // Ball above and near: try to head it
    let jump = ai.grounded
        && ball.position.y < ai.position.y - AI_JUMP_HEIGHT
        && distance_to_ball < AI_JUMP_RANGE;

    Intent { movement, jump }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    fn bodies(ai_pos: Vec2, ball_pos: Vec2) -> (Body, Body) {
        let mut ai = Body::player(ai_pos);
        ai.grounded = true;
        (ai, Body::ball(ball_pos))
    }

    #[test]
    fn test_disengages_when_not_running() {
        let (ai, ball) = bodies(Vec2::new(700.0, 500.0), Vec2::new(690.0, 400.0));
        assert_eq!(decide(&ai, &ball, MatchPhase::Ended), Intent::STOP);
        assert_eq!(decide(&ai, &ball, MatchPhase::Idle), Intent::STOP);
    }

    #[test]
    fn test_chases_ball_on_own_half() {
        let (ai, ball) = bodies(Vec2::new(700.0, 500.0), Vec2::new(450.0, 500.0));
        let intent = decide(&ai, &ball, MatchPhase::Running);
        assert_eq!(intent.movement, MoveIntent::Left);
        assert!(!intent.jump);

        // Close range still walks into the ball
        let (ai, ball) = bodies(Vec2::new(500.0, 500.0), Vec2::new(520.0, 500.0));
        assert_eq!(decide(&ai, &ball, MatchPhase::Running).movement, MoveIntent::Right);
    }

    #[test]
    fn test_returns_to_defense() {
        let (ai, ball) = bodies(Vec2::new(450.0, 500.0), Vec2::new(200.0, 500.0));
        assert_eq!(decide(&ai, &ball, MatchPhase::Running).movement, MoveIntent::Right);

        let (ai, ball) = bodies(Vec2::new(750.0, 500.0), Vec2::new(200.0, 500.0));
        assert_eq!(decide(&ai, &ball, MatchPhase::Running).movement, MoveIntent::Left);

        let (ai, ball) = bodies(Vec2::new(620.0, 500.0), Vec2::new(200.0, 500.0));
        assert_eq!(decide(&ai, &ball, MatchPhase::Running).movement, MoveIntent::Stop);
    }

    #[test]
    fn test_jumps_for_ball_overhead() {
        let (ai, ball) = bodies(Vec2::new(600.0, 500.0), Vec2::new(640.0, 400.0));
        assert!(decide(&ai, &ball, MatchPhase::Running).jump);

        // Too far sideways
        let (ai, ball) = bodies(Vec2::new(600.0, 500.0), Vec2::new(720.0, 400.0));
        assert!(!decide(&ai, &ball, MatchPhase::Running).jump);

        // Airborne AI cannot jump
        let (mut ai, ball) = bodies(Vec2::new(600.0, 500.0), Vec2::new(640.0, 400.0));
        ai.grounded = false;
        assert!(!decide(&ai, &ball, MatchPhase::Running).jump);
    }
}
