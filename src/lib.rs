//! Ballduel - a two-player ball mini-game built with Bevy
//!
//! The match rules live in plain structs (`MatchState` and friends) that the
//! Bevy systems and the headless `Simulation` both drive.

// Core modules
pub mod body;
pub mod constants;
pub mod countdown;
pub mod events;
pub mod helpers;
pub mod match_state;
pub mod simulation;
pub mod testing;
pub mod tick;
pub mod tuning;

// Game logic modules
pub mod ai;
pub mod ball;
pub mod input;
pub mod player;
pub mod scoring;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use ai::{Intent, MoveIntent, decide};
pub use ball::{ContactKind, Surface, apply_rolling_friction, ground_contact, kick_strength, player_contact};
pub use body::{Arena, Body, BodyId};
pub use constants::*;
pub use countdown::{MatchClock, RepeatingTimers, TimerHandle, TimerService};
pub use events::{
    BusEvent, EventBuffer, EventBus, EventLogConfig, EventLogger, GameEvent, HostCommand,
    close_event_log, update_event_bus_time, write_event_log,
};
pub use input::{PlayerInput, capture_input};
pub use match_state::{MatchPhase, MatchState, handle_restart_request, start_match, tick_match_clock};
pub use player::{AnimationKey, ControlMode, Controls, PlayerSlot, apply_intent};
pub use scoring::{GoalZone, Score, Winner};
pub use simulation::{InboundEvent, Simulation};
pub use tick::{FixedFrame, run_tick, run_tick_system};
pub use tuning::MatchTuning;
pub use ui::{HudText, apply_host_commands, spawn_hud};
pub use world::{MatchRng, PhysicsHost, WorldContact, dispatch_contacts, physics_step, sync_body_transforms};
