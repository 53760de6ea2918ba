//! Match lifecycle - phase, score, clock and the bodies in play
//!
//! `MatchState` is the only writer of score and phase. Inbound events that the
//! current phase does not allow (a goal or timer fire after the final whistle)
//! are dropped and recorded as `GameEvent::Ignored`; they are expected races,
//! not errors.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ball::{Surface, ground_contact, player_contact};
use crate::body::Arena;
use crate::constants::*;
use crate::countdown::{MatchClock, RepeatingTimers, TimerHandle, TimerService};
use crate::events::{EventBus, GameEvent, HostCommand};
use crate::input::PlayerInput;
use crate::player::{AnimationKey, PlayerSlot};
use crate::scoring::{GoalZone, Score, Winner};

/// Where the match is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPhase {
    /// Constructed but not started yet
    #[default]
    Idle,
    Running,
    Ended,
}

impl MatchPhase {
    pub fn name(&self) -> &'static str {
        match self {
            MatchPhase::Idle => "idle",
            MatchPhase::Running => "running",
            MatchPhase::Ended => "ended",
        }
    }
}

/// Owned aggregate of everything a match mutates
#[derive(Resource, Debug, Clone, Default)]
pub struct MatchState {
    phase: MatchPhase,
    score: Score,
    clock: MatchClock,
    arena: Arena,
    animations: [AnimationKey; 2],
    winner: Option<Winner>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    pub fn time_remaining(&self) -> u32 {
        self.clock.time_remaining()
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Bodies for the tick and the host engine to move
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn animation(&self, slot: PlayerSlot) -> AnimationKey {
        self.animations[slot.index()]
    }

    /// Result of the last finished match
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// Begin a match: fresh clock, zero score, everyone at the start spots
    pub fn start(&mut self, timers: &mut impl TimerService, bus: &mut EventBus) {
        self.clock.restart(timers);
        self.score = Score::default();
        self.arena.reset_positions(BALL_START);
        self.winner = None;
        self.phase = MatchPhase::Running;

        info!("Match started ({}s)", self.clock.time_remaining());
        bus.emit(GameEvent::MatchStart {
            duration: self.clock.time_remaining(),
        });
        bus.command(HostCommand::SetScoreText(self.score.text()));
        bus.command(HostCommand::SetTimerText(self.clock.text()));
        bus.command(HostCommand::ShowResultText(String::new()));
        bus.command(HostCommand::ShowRestartAffordance(false));
        for slot in PlayerSlot::ALL {
            self.animations[slot.index()] = AnimationKey::Turn;
            bus.command(HostCommand::PlayAnimation {
                player: slot,
                key: AnimationKey::Turn,
            });
        }
    }

    /// Same as `start`; safe to call in any phase and any number of times
    pub fn restart(&mut self, timers: &mut impl TimerService, bus: &mut EventBus) {
        self.start(timers, bus);
    }

    /// Restart requested from the UI. Only honored once the match has ended.
    pub fn on_restart_requested(&mut self, timers: &mut impl TimerService, bus: &mut EventBus) -> bool {
        if self.phase != MatchPhase::Ended {
            self.ignore("restart", bus);
            return false;
        }
        self.restart(timers, bus);
        true
    }

    /// One countdown period elapsed on `handle`.
    /// Fires from a cancelled handle or outside `Running` are ignored.
    pub fn on_timer_fire(
        &mut self,
        handle: TimerHandle,
        timers: &mut impl TimerService,
        bus: &mut EventBus,
    ) -> bool {
        if self.phase != MatchPhase::Running || self.clock.handle() != Some(handle) {
            self.ignore("timer", bus);
            return false;
        }

        let remaining = self.clock.tick_down();
        bus.emit(GameEvent::ClockTick { remaining });
        bus.command(HostCommand::SetTimerText(self.clock.text()));

        if remaining == 0 {
            self.end(timers, bus);
        }
        true
    }

    /// Fire the clock's live timer, as if one second had elapsed
    pub fn fire_clock(&mut self, timers: &mut impl TimerService, bus: &mut EventBus) -> bool {
        match self.clock.handle() {
            Some(handle) => self.on_timer_fire(handle, timers, bus),
            None => {
                self.ignore("timer", bus);
                false
            }
        }
    }

    /// Ball entered a goal zone. Scores for the zone's opponent and resets
    /// positions for a kickoff; clock and score are kept.
    pub fn on_goal_overlap(&mut self, zone: GoalZone, bus: &mut EventBus) -> bool {
        if self.phase != MatchPhase::Running {
            self.ignore("goal", bus);
            return false;
        }

        let scorer = zone.scorer();
        self.score.award(scorer);
        self.arena.reset_positions(BALL_KICKOFF);

        info!(
            "GOAL {}! Player 1: {} Player 2: {}",
            scorer, self.score.player1, self.score.player2
        );
        bus.emit(GameEvent::Goal {
            player: scorer,
            score_p1: self.score.player1,
            score_p2: self.score.player2,
        });
        bus.command(HostCommand::SetScoreText(self.score.text()));
        true
    }

    /// Ball touched a surface
    pub fn on_ground_contact(&mut self, surface: Surface, default_friction: f32, rng: &mut impl Rng) {
        ground_contact(&mut self.arena.ball, surface, default_friction, rng);
    }

    /// Ball touched a player. Kicks happen in any phase; physics does not stop.
    pub fn on_player_contact(&mut self, slot: PlayerSlot, rng: &mut impl Rng, bus: &mut EventBus) {
        let Arena {
            ball,
            player1,
            player2,
        } = &mut self.arena;
        let player = match slot {
            PlayerSlot::One => &*player1,
            PlayerSlot::Two => &*player2,
        };
        let strength = player_contact(ball, player, rng);
        bus.emit(GameEvent::Kick {
            player: slot,
            strength,
        });
    }

    /// Record the animation for a player, telling the host only on change
    pub fn set_animation(&mut self, slot: PlayerSlot, key: AnimationKey, bus: &mut EventBus) {
        let current = &mut self.animations[slot.index()];
        if *current != key {
            *current = key;
            bus.command(HostCommand::PlayAnimation { player: slot, key });
        }
    }

    fn end(&mut self, timers: &mut impl TimerService, bus: &mut EventBus) {
        self.clock.stop(timers);
        self.phase = MatchPhase::Ended;

        let winner = self.score.winner();
        self.winner = Some(winner);

        info!(
            "Match over: {} (Player 1: {} Player 2: {})",
            winner.text(),
            self.score.player1,
            self.score.player2
        );
        bus.emit(GameEvent::MatchEnd {
            score_p1: self.score.player1,
            score_p2: self.score.player2,
            winner,
        });
        bus.command(HostCommand::ShowResultText(winner.text()));
        bus.command(HostCommand::ShowRestartAffordance(true));
    }

    fn ignore(&self, event: &str, bus: &mut EventBus) {
        debug!("Ignoring {} while match is {}", event, self.phase.name());
        bus.emit(GameEvent::Ignored {
            event: event.to_string(),
        });
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Kick off the first match (Startup, after the field is spawned)
pub fn start_match(
    mut state: ResMut<MatchState>,
    mut timers: ResMut<RepeatingTimers>,
    mut bus: ResMut<EventBus>,
) {
    state.start(&mut *timers, &mut bus);
}

/// Drive the countdown from fixed-step time
pub fn tick_match_clock(
    time: Res<Time>,
    mut timers: ResMut<RepeatingTimers>,
    mut state: ResMut<MatchState>,
    mut bus: ResMut<EventBus>,
) {
    for handle in timers.tick(time.delta()) {
        state.on_timer_fire(handle, &mut *timers, &mut bus);
    }
}

/// Consume a latched restart click
pub fn handle_restart_request(
    mut input: ResMut<PlayerInput>,
    mut state: ResMut<MatchState>,
    mut timers: ResMut<RepeatingTimers>,
    mut bus: ResMut<EventBus>,
) {
    if !input.restart_requested {
        return;
    }
    input.restart_requested = false;
    state.on_restart_requested(&mut *timers, &mut bus);
}
