//! Headless simulation: the windowed game's fixed-step loop without a window
//!
//! Each step runs in the same order as the FixedUpdate chain in the game:
//! restart request, match tick, physics and contacts, then the countdown.
//! Used by the scenario runner and the integration tests.

mod inbound;

pub use inbound::InboundEvent;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ball::Surface;
use crate::constants::*;
use crate::countdown::RepeatingTimers;
use crate::events::{EventBuffer, EventBus, GameEvent, HostCommand};
use crate::input::PlayerInput;
use crate::match_state::MatchState;
use crate::player::Controls;
use crate::tick::{run_tick, tick_event};
use crate::tuning::MatchTuning;
use crate::world::{PhysicsHost, dispatch_contacts};

/// Record a position sample every this many frames (10 per second)
pub const TICK_SAMPLE_FRAMES: u64 = 6;

/// A match plus everything the host would own, stepped by hand
pub struct Simulation {
    pub state: MatchState,
    pub timers: RepeatingTimers,
    pub bus: EventBus,
    pub physics: PhysicsHost,
    pub rng: StdRng,
    pub tuning: MatchTuning,
    pub controls: Controls,
    pub log: EventBuffer,
    commands: Vec<(u64, HostCommand)>,
    frame: u64,
}

impl Simulation {
    /// Idle simulation; nothing runs until `start`
    pub fn new(seed: u64, controls: Controls, tuning: MatchTuning) -> Self {
        let mut log = EventBuffer::new();
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
        log.start_session(&timestamp, seed);
        log.log(0, GameEvent::Config(tuning.clone()));

        Self {
            state: MatchState::new(),
            timers: RepeatingTimers::new(),
            bus: EventBus::new(),
            physics: PhysicsHost::new(),
            rng: StdRng::seed_from_u64(seed),
            tuning,
            controls,
            log,
            commands: Vec::new(),
            frame: 0,
        }
    }

    /// Default tuning, match already kicked off
    pub fn started(seed: u64, controls: Controls) -> Self {
        let mut sim = Self::new(seed, controls, MatchTuning::default());
        sim.start();
        sim
    }

    pub fn start(&mut self) {
        self.state.start(&mut self.timers, &mut self.bus);
        self.flush();
    }

    /// Advance one 1/60 s frame
    pub fn step(&mut self, input: &PlayerInput) {
        self.frame += 1;
        self.bus.update_time(self.frame as f32 * FRAME_DT);

        if input.restart_requested {
            self.state.on_restart_requested(&mut self.timers, &mut self.bus);
        }

        run_tick(&mut self.state, input, &self.controls, &self.tuning, &mut self.bus);

        let contacts = self.physics.step(self.state.arena_mut(), &self.tuning, FRAME_DT);
        dispatch_contacts(&mut self.state, &contacts, &self.tuning, &mut self.rng, &mut self.bus);

        for handle in self.timers.tick(FRAME_DURATION) {
            self.state.on_timer_fire(handle, &mut self.timers, &mut self.bus);
        }

        if self.frame % TICK_SAMPLE_FRAMES == 0 {
            self.bus.emit(tick_event(self.frame, &self.state));
        }
        self.flush();
    }

    /// Step `frames` times with the same input
    pub fn run(&mut self, frames: u64, input: &PlayerInput) {
        for _ in 0..frames {
            self.step(input);
        }
    }

    /// Deliver one inbound event outside the frame loop. Returns whether it was honored.
    pub fn inject(&mut self, event: InboundEvent) -> bool {
        let honored = match event {
            InboundEvent::GroundContact => {
                self.state
                    .on_ground_contact(Surface::GROUND, self.tuning.default_surface_friction, &mut self.rng);
                true
            }
            InboundEvent::PlayerContact(slot) => {
                self.state.on_player_contact(slot, &mut self.rng, &mut self.bus);
                true
            }
            InboundEvent::GoalOverlap(zone) => self.state.on_goal_overlap(zone, &mut self.bus),
            InboundEvent::TimerFire => self.state.fire_clock(&mut self.timers, &mut self.bus),
            InboundEvent::RestartRequested => {
                self.state.on_restart_requested(&mut self.timers, &mut self.bus)
            }
            InboundEvent::Start => {
                self.state.restart(&mut self.timers, &mut self.bus);
                true
            }
        };
        self.flush();
        honored
    }

    /// Every host command issued so far, tagged with its frame
    pub fn commands(&self) -> &[(u64, HostCommand)] {
        &self.commands
    }

    /// Audit events recorded so far
    pub fn events(&self) -> &[(u32, GameEvent)] {
        self.log.events()
    }

    fn flush(&mut self) {
        self.log.import_events(self.bus.export_events());
        let frame = self.frame;
        self.commands
            .extend(self.bus.drain_commands().into_iter().map(|command| (frame, command)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::TimerService;
    use crate::match_state::MatchPhase;

    #[test]
    fn test_clock_ends_match_after_thirty_seconds() {
        let mut sim = Simulation::started(1, Controls::default());
        let idle = PlayerInput::default();

        sim.run(29 * 60, &idle);
        assert_eq!(sim.state.time_remaining(), 1);
        assert_eq!(sim.state.phase(), MatchPhase::Running);

        sim.run(60, &idle);
        assert_eq!(sim.state.time_remaining(), 0);
        assert_eq!(sim.state.phase(), MatchPhase::Ended);
        assert_eq!(sim.timers.live_count(), 0);
    }

    #[test]
    fn test_events_logged_with_session() {
        let mut sim = Simulation::started(3, Controls::default());
        sim.run(TICK_SAMPLE_FRAMES, &PlayerInput::default());

        let names: Vec<_> = sim.events().iter().map(|(_, e)| e.name()).collect();
        assert_eq!(&names[..3], &["SessionStart", "Config", "MatchStart"]);
        assert!(names.contains(&"Tick"));
        assert!(!sim.log.session_id().is_empty());
    }

    #[test]
    fn test_injected_restart_ignored_while_running() {
        let mut sim = Simulation::started(4, Controls::default());
        assert!(!sim.inject(InboundEvent::RestartRequested));
        assert!(sim.inject(InboundEvent::Start));
        assert_eq!(sim.timers.live_count(), 1);
    }
}
