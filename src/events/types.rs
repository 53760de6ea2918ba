//! Event and command type definitions

use serde::{Deserialize, Serialize};

use crate::player::{AnimationKey, PlayerSlot};
use crate::scoring::Winner;
use crate::tuning::MatchTuning;

/// Audit record of something that happened in a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (once per log file)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,
        seed: u64,
    },
    /// Tuning snapshot (logged after session start)
    Config(MatchTuning),

    // === Match Events ===
    /// Match started or restarted
    MatchStart { duration: u32 },
    /// Countdown fired
    ClockTick { remaining: u32 },
    /// Match ended
    MatchEnd {
        score_p1: u32,
        score_p2: u32,
        winner: Winner,
    },

    // === Play Events ===
    Goal {
        player: PlayerSlot,
        score_p1: u32,
        score_p2: u32,
    },
    /// Ball kicked by a player (signed horizontal kick)
    Kick { player: PlayerSlot, strength: f32 },
    /// Rolling ball slowed below rest speed and stopped
    BallRest { x: f32 },

    /// Inbound event dropped because the match phase does not allow it
    Ignored { event: String },

    // === Debug/Tick Events ===
    /// Sampled positions and ball velocity
    Tick {
        frame: u64,
        p1_pos: (f32, f32),
        p2_pos: (f32, f32),
        ball_pos: (f32, f32),
        ball_vel: (f32, f32),
    },
}

impl GameEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::Config(_) => "CF",
            GameEvent::MatchStart { .. } => "MS",
            GameEvent::ClockTick { .. } => "CT",
            GameEvent::MatchEnd { .. } => "ME",
            GameEvent::Goal { .. } => "G",
            GameEvent::Kick { .. } => "K",
            GameEvent::BallRest { .. } => "BR",
            GameEvent::Ignored { .. } => "IG",
            GameEvent::Tick { .. } => "T",
        }
    }

    /// Human-readable name (used by scenario expectations)
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SessionStart",
            GameEvent::Config(_) => "Config",
            GameEvent::MatchStart { .. } => "MatchStart",
            GameEvent::ClockTick { .. } => "ClockTick",
            GameEvent::MatchEnd { .. } => "MatchEnd",
            GameEvent::Goal { .. } => "Goal",
            GameEvent::Kick { .. } => "Kick",
            GameEvent::BallRest { .. } => "BallRest",
            GameEvent::Ignored { .. } => "Ignored",
            GameEvent::Tick { .. } => "Tick",
        }
    }

    /// Player the event is about, if any
    pub fn player(&self) -> Option<PlayerSlot> {
        match self {
            GameEvent::Goal { player, .. } | GameEvent::Kick { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// Outbound command for the host's engine/UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    PlayAnimation {
        player: PlayerSlot,
        key: AnimationKey,
    },
    SetScoreText(String),
    SetTimerText(String),
    ShowRestartAffordance(bool),
    ShowResultText(String),
}
