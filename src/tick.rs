//! Per-frame simulation step: player intents, AI, rolling friction

use bevy::prelude::*;

use crate::ai::{Intent, decide};
use crate::ball::apply_rolling_friction;
use crate::events::{EventBus, GameEvent};
use crate::input::PlayerInput;
use crate::match_state::MatchState;
use crate::player::{ControlMode, Controls, PlayerSlot, apply_intent};
use crate::tuning::MatchTuning;

/// Advance one frame before the host engine integrates.
///
/// Human intents only count while the match is running; otherwise players
/// are held still. The AI makes the same call itself from the phase.
pub fn run_tick(
    state: &mut MatchState,
    input: &PlayerInput,
    controls: &Controls,
    tuning: &MatchTuning,
    bus: &mut EventBus,
) {
    let running = state.is_running();
    let human = |intent: Intent| if running { intent } else { Intent::STOP };

    let p1_intent = human(input.player1);
    let p2_intent = match controls.player2 {
        ControlMode::Ai => {
            let arena = state.arena();
            decide(&arena.player2, &arena.ball, state.phase())
        }
        ControlMode::Human => human(input.player2),
    };

    for (slot, intent) in [(PlayerSlot::One, p1_intent), (PlayerSlot::Two, p2_intent)] {
        let key = apply_intent(state.arena_mut().player_mut(slot), intent, tuning);
        state.set_animation(slot, key, bus);
    }

    let ball = &mut state.arena_mut().ball;
    if apply_rolling_friction(ball, tuning) {
        bus.emit(GameEvent::BallRest { x: ball.position.x });
    }
}

/// Sampled positions for the event log
pub fn tick_event(frame: u64, state: &MatchState) -> GameEvent {
    let arena = state.arena();
    let pair = |v: Vec2| (v.x, v.y);
    GameEvent::Tick {
        frame,
        p1_pos: pair(arena.player1.position),
        p2_pos: pair(arena.player2.position),
        ball_pos: pair(arena.ball.position),
        ball_vel: pair(arena.ball.velocity()),
    }
}

/// Fixed-step frame counter for tick samples
#[derive(Resource, Default)]
pub struct FixedFrame(pub u64);

/// Apply intents for this fixed step (FixedUpdate, before physics)
pub fn run_tick_system(
    mut state: ResMut<MatchState>,
    input: Res<PlayerInput>,
    controls: Res<Controls>,
    tuning: Res<MatchTuning>,
    mut frame: ResMut<FixedFrame>,
    mut bus: ResMut<EventBus>,
) {
    frame.0 += 1;
    run_tick(&mut state, &input, &controls, &tuning, &mut bus);
    bus.emit(tick_event(frame.0, &state));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MoveIntent;
    use crate::constants::*;
    use crate::countdown::RepeatingTimers;
    use crate::player::AnimationKey;

    fn running() -> (MatchState, RepeatingTimers, EventBus) {
        let mut state = MatchState::new();
        let mut timers = RepeatingTimers::new();
        let mut bus = EventBus::new();
        state.start(&mut timers, &mut bus);
        (state, timers, bus)
    }

    #[test]
    fn test_human_moves_while_running() {
        let (mut state, _timers, mut bus) = running();
        let input = PlayerInput {
            player1: Intent::moving(MoveIntent::Left),
            ..default_input()
        };

        run_tick(&mut state, &input, &Controls::default(), &MatchTuning::default(), &mut bus);
        assert_eq!(state.arena().player1.velocity().x, -MOVE_SPEED);
        assert_eq!(state.animation(PlayerSlot::One), AnimationKey::Left);
    }

    #[test]
    fn test_players_frozen_after_end() {
        let (mut state, mut timers, mut bus) = running();
        for _ in 0..MATCH_DURATION_SECS {
            state.fire_clock(&mut timers, &mut bus);
        }
        state.arena_mut().player1.set_velocity_x(MOVE_SPEED);
        state.arena_mut().ball.position = Vec2::new(650.0, 524.0);

        let input = PlayerInput {
            player1: Intent::moving(MoveIntent::Right),
            ..default_input()
        };
        run_tick(&mut state, &input, &Controls::default(), &MatchTuning::default(), &mut bus);

        assert_eq!(state.arena().player1.velocity().x, 0.0);
        assert_eq!(state.arena().player2.velocity().x, 0.0);
        assert_eq!(state.animation(PlayerSlot::One), AnimationKey::Turn);
    }

    #[test]
    fn test_ai_chases_ball_on_its_side() {
        let (mut state, _timers, mut bus) = running();
        state.arena_mut().ball.position = Vec2::new(500.0, 524.0);

        run_tick(
            &mut state,
            &default_input(),
            &Controls::default(),
            &MatchTuning::default(),
            &mut bus,
        );
        assert_eq!(state.arena().player2.velocity().x, -MOVE_SPEED);
        assert_eq!(state.animation(PlayerSlot::Two), AnimationKey::Left);
    }

    #[test]
    fn test_two_player_uses_input() {
        let (mut state, _timers, mut bus) = running();
        state.arena_mut().ball.position = Vec2::new(500.0, 524.0);
        let input = PlayerInput {
            player2: Intent::moving(MoveIntent::Right),
            ..default_input()
        };

        run_tick(&mut state, &input, &Controls::two_player(), &MatchTuning::default(), &mut bus);
        assert_eq!(state.arena().player2.velocity().x, MOVE_SPEED);
    }

    #[test]
    fn test_ball_rest_reported_once() {
        let (mut state, _timers, mut bus) = running();
        let ball = &mut state.arena_mut().ball;
        ball.position = Vec2::new(300.0, 524.0);
        ball.grounded = true;
        ball.set_velocity_x(3.0);
        bus.drain();

        let tuning = MatchTuning::default();
        for _ in 0..3 {
            run_tick(&mut state, &default_input(), &Controls::default(), &tuning, &mut bus);
        }

        let rests: Vec<_> = bus
            .drain()
            .into_iter()
            .filter(|e| matches!(e.event, GameEvent::BallRest { .. }))
            .collect();
        assert_eq!(rests.len(), 1);
        assert_eq!(rests[0].event, GameEvent::BallRest { x: 300.0 });
        assert_eq!(state.arena().ball.velocity().x, 0.0);
    }

    fn default_input() -> PlayerInput {
        PlayerInput::default()
    }
}
