//! Utility functions for ballduel

use bevy::prelude::*;

use crate::constants::*;

/// Move a value toward a target by a maximum delta
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Field coordinates (origin top-left, y down) to world translation (origin center, y up)
pub fn field_to_world(position: Vec2) -> Vec2 {
    Vec2::new(position.x - FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0 - position.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_toward() {
        assert_eq!(move_toward(10.0, 0.0, 3.0), 7.0);
        assert_eq!(move_toward(-2.0, 0.0, 3.0), 0.0);
        assert_eq!(move_toward(0.0, 0.0, 3.0), 0.0);
    }

    #[test]
    fn test_field_to_world() {
        assert_eq!(field_to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(field_to_world(Vec2::new(0.0, 0.0)), Vec2::new(-400.0, 300.0));
        assert_eq!(field_to_world(GROUND_CENTER), Vec2::new(0.0, -268.0));
    }
}
