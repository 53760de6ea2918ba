//! Turning a movement intent into player velocity

use crate::ai::{Intent, MoveIntent};
use crate::body::Body;
use crate::player::AnimationKey;
use crate::tuning::MatchTuning;

/// Apply an intent to a player body and return the animation to show.
///
/// Horizontal velocity is overwritten every call; a jump only fires while the
/// player is on the ground.
pub fn apply_intent(body: &mut Body, intent: Intent, tuning: &MatchTuning) -> AnimationKey {
    let animation = match intent.movement {
        MoveIntent::Left => {
            body.set_velocity_x(-tuning.move_speed);
            AnimationKey::Left
        }
        MoveIntent::Right => {
            body.set_velocity_x(tuning.move_speed);
            AnimationKey::Right
        }
        MoveIntent::Stop => {
            body.set_velocity_x(0.0);
            AnimationKey::Turn
        }
    };

    if intent.jump && body.grounded {
        body.set_velocity_y(-tuning.jump_velocity);
    }

    animation
}
