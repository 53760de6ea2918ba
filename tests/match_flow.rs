//! Whole-match behavior through the headless simulation

use ballduel::{
    AnimationKey, BALL_KICKOFF, BALL_START, Controls, GameEvent, GoalZone, HostCommand, InboundEvent, Intent,
    MATCH_DURATION_SECS, MAX_VELOCITY, MatchPhase, MoveIntent, PLAYER1_START, PLAYER2_START, PlayerInput,
    PlayerSlot, Simulation, TimerService, Winner, decide,
};
use bevy::math::Vec2;
use proptest::prelude::*;

fn idle() -> PlayerInput {
    PlayerInput::default()
}

fn count_events(sim: &Simulation, name: &str) -> usize {
    sim.events().iter().filter(|(_, e)| e.name() == name).count()
}

#[test]
fn kickoff_state() {
    let sim = Simulation::started(11, Controls::default());

    assert_eq!(sim.state.phase(), MatchPhase::Running);
    assert_eq!(sim.state.score().get(PlayerSlot::One), 0);
    assert_eq!(sim.state.score().get(PlayerSlot::Two), 0);
    assert_eq!(sim.state.time_remaining(), 30);
    assert_eq!(sim.state.arena().ball.position, BALL_START);
    assert_eq!(sim.state.arena().player1.position, PLAYER1_START);
    assert_eq!(sim.state.arena().player2.position, PLAYER2_START);
    assert_eq!(sim.timers.live_count(), 1);
}

#[test]
fn goal_in_player_one_zone_scores_for_player_two() {
    let mut sim = Simulation::started(12, Controls::default());
    sim.run(30, &idle());
    let time_before = sim.state.time_remaining();

    assert!(sim.inject(InboundEvent::GoalOverlap(GoalZone::Player1)));

    assert_eq!(sim.state.score().player1, 0);
    assert_eq!(sim.state.score().player2, 1);
    assert_eq!(sim.state.arena().ball.position, BALL_KICKOFF);
    assert_eq!(sim.state.phase(), MatchPhase::Running);
    assert_eq!(sim.state.time_remaining(), time_before);
}

#[test]
fn thirty_timer_fires_end_the_match_once() {
    let mut sim = Simulation::started(13, Controls::default());

    for fire in 1..=MATCH_DURATION_SECS {
        let before = sim.state.time_remaining();
        assert!(sim.inject(InboundEvent::TimerFire));
        assert_eq!(sim.state.time_remaining(), before - 1);
        let expected = if fire == MATCH_DURATION_SECS {
            MatchPhase::Ended
        } else {
            MatchPhase::Running
        };
        assert_eq!(sim.state.phase(), expected);
    }

    // Late fires are ignored and never go below zero
    assert!(!sim.inject(InboundEvent::TimerFire));
    assert_eq!(sim.state.time_remaining(), 0);

    let shown = sim
        .commands()
        .iter()
        .filter(|(_, c)| *c == HostCommand::ShowRestartAffordance(true))
        .count();
    assert_eq!(shown, 1);
    assert_eq!(count_events(&sim, "MatchEnd"), 1);
    assert_eq!(sim.state.winner(), Some(Winner::Draw));
    assert!(sim
        .commands()
        .iter()
        .any(|(_, c)| *c == HostCommand::ShowResultText("Draw!".to_string())));
}

#[test]
fn goal_after_end_never_changes_score() {
    let mut sim = Simulation::started(14, Controls::default());
    sim.inject(InboundEvent::GoalOverlap(GoalZone::Player2));
    for _ in 0..MATCH_DURATION_SECS {
        sim.inject(InboundEvent::TimerFire);
    }
    let final_score = sim.state.score();

    assert!(!sim.inject(InboundEvent::GoalOverlap(GoalZone::Player1)));
    assert!(!sim.inject(InboundEvent::GoalOverlap(GoalZone::Player2)));
    assert_eq!(sim.state.score(), final_score);
    assert_eq!(sim.state.winner(), Some(Winner::Player(PlayerSlot::One)));
}

#[test]
fn restart_twice_matches_restart_once() {
    let mut sim = Simulation::started(15, Controls::default());
    sim.run(200, &idle());
    sim.inject(InboundEvent::GoalOverlap(GoalZone::Player1));

    sim.inject(InboundEvent::Start);
    let score = sim.state.score();
    let arena = sim.state.arena().clone();
    sim.inject(InboundEvent::Start);

    assert_eq!(sim.state.score(), score);
    assert_eq!(sim.state.arena(), &arena);
    assert_eq!(sim.state.time_remaining(), 30);
    assert_eq!(sim.timers.live_count(), 1);
}

#[test]
fn restart_does_not_double_the_countdown() {
    let mut sim = Simulation::started(16, Controls::default());
    sim.run(90, &idle());
    sim.inject(InboundEvent::Start);
    sim.inject(InboundEvent::Start);

    // One second of frames removes exactly one second
    sim.run(60, &idle());
    assert_eq!(sim.state.time_remaining(), 29);
}

#[test]
fn restart_after_real_time_match() {
    let mut sim = Simulation::started(17, Controls::default());
    sim.run(30 * 60, &idle());
    assert_eq!(sim.state.phase(), MatchPhase::Ended);

    let click = PlayerInput {
        restart_requested: true,
        ..idle()
    };
    sim.step(&click);
    assert_eq!(sim.state.phase(), MatchPhase::Running);
    assert_eq!(sim.state.time_remaining(), 30);
    assert_eq!(sim.timers.live_count(), 1);
    assert!(sim
        .commands()
        .iter()
        .any(|(_, c)| *c == HostCommand::ShowRestartAffordance(false)));
}

#[test]
fn ended_match_freezes_player_one() {
    let mut sim = Simulation::started(18, Controls::default());
    for _ in 0..MATCH_DURATION_SECS {
        sim.inject(InboundEvent::TimerFire);
    }

    let held_right = PlayerInput {
        player1: Intent::moving(MoveIntent::Right),
        ..idle()
    };
    sim.run(30, &held_right);
    assert_eq!(sim.state.arena().player1.velocity().x, 0.0);
    assert_eq!(sim.state.animation(PlayerSlot::One), AnimationKey::Turn);
}

#[test]
fn ai_disengages_when_ended() {
    let mut sim = Simulation::started(19, Controls::default());
    for _ in 0..MATCH_DURATION_SECS {
        sim.inject(InboundEvent::TimerFire);
    }
    let arena = sim.state.arena();
    let mut ball = arena.ball.clone();
    ball.position.x = arena.player2.position.x - 20.0;
    ball.position.y = arena.player2.position.y - 60.0;

    assert_eq!(decide(&arena.player2, &ball, sim.state.phase()), Intent::STOP);
}

#[test]
fn ground_contact_draws_are_seeded() {
    let run = |seed| {
        let mut sim = Simulation::started(seed, Controls::default());
        sim.run(240, &idle());
        sim.state.arena().ball.clone()
    };
    assert_eq!(run(21), run(21));
}

#[test]
fn kicks_are_logged_when_ball_meets_player() {
    let mut sim = Simulation::started(22, Controls::default());
    sim.state.arena_mut().ball.position = PLAYER1_START + Vec2::new(30.0, 0.0);
    let walk_right = PlayerInput {
        player1: Intent::moving(MoveIntent::Right),
        ..idle()
    };
    sim.run(60, &walk_right);

    let kicked = sim
        .events()
        .iter()
        .any(|(_, e)| matches!(e, GameEvent::Kick { player: PlayerSlot::One, .. }));
    assert!(kicked);
}

proptest! {
    #[test]
    fn velocities_stay_clamped(
        seed in 0u64..500,
        script in proptest::collection::vec((0u8..3, any::<bool>(), 0u8..4), 1..40),
    ) {
        let mut sim = Simulation::started(seed, Controls::default());
        for (movement, jump, contact) in script {
            let movement = match movement {
                0 => MoveIntent::Left,
                1 => MoveIntent::Right,
                _ => MoveIntent::Stop,
            };
            match contact {
                0 => { sim.inject(InboundEvent::GroundContact); }
                1 => { sim.inject(InboundEvent::PlayerContact(PlayerSlot::One)); }
                2 => { sim.inject(InboundEvent::PlayerContact(PlayerSlot::Two)); }
                _ => {}
            }
            let input = PlayerInput {
                player1: Intent { movement, jump },
                ..PlayerInput::default()
            };
            sim.run(5, &input);

            for body in [&sim.state.arena().ball, &sim.state.arena().player1, &sim.state.arena().player2] {
                prop_assert!(body.velocity().x.abs() <= MAX_VELOCITY);
                prop_assert!(body.velocity().y.abs() <= MAX_VELOCITY);
            }
        }
    }
}
