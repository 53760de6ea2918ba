//! Physics-feel tuning (match rules stay fixed in constants)

use bevy::log::{info, warn};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;

fn default_rest_speed() -> f32 {
    BALL_REST_SPEED
}
fn default_surface_friction() -> f32 {
    DEFAULT_SURFACE_FRICTION
}

/// Tunable physics values, logged as the session's `Config` event
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTuning {
    pub gravity: f32,
    pub max_velocity: f32,
    /// Horizontal speed for both the human and the AI player
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub ball_roll_friction: f32,
    #[serde(default = "default_rest_speed")]
    pub ball_rest_speed: f32,
    #[serde(default = "default_surface_friction")]
    pub default_surface_friction: f32,
}

impl Default for MatchTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_velocity: MAX_VELOCITY,
            move_speed: MOVE_SPEED,
            jump_velocity: JUMP_VELOCITY,
            ball_roll_friction: BALL_ROLL_FRICTION,
            ball_rest_speed: default_rest_speed(),
            default_surface_friction: default_surface_friction(),
        }
    }
}

impl MatchTuning {
    /// Parse tuning from JSON text
    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("Invalid tuning JSON: {}", e))
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}, using default tuning", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&content) {
            Ok(tuning) => {
                info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                warn!("{} ({}), using default tuning", e, path.display());
                Self::default()
            }
        }
    }
}
