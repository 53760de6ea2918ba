//! Test execution engine

use bevy::prelude::*;

use crate::body::BodyId;
use crate::input::PlayerInput;
use crate::player::Controls;
use crate::simulation::{InboundEvent, Simulation};
use crate::tuning::MatchTuning;

use super::assertions::{AssertionError, CapturedEvent, WorldState, check_counts, check_sequence, check_state};
use super::parser::TestDefinition;

/// Frames to run when a test gives no other hint
const DEFAULT_FRAMES: u64 = 60;

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    match try_run(test) {
        Ok(Ok(frames)) => TestResult::Pass { frames },
        Ok(Err(error)) => TestResult::Fail { error },
        Err(message) => TestResult::Error { message },
    }
}

/// Outer error: the test itself is malformed. Inner error: an expectation failed.
fn try_run(test: &TestDefinition) -> Result<Result<u64, AssertionError>, String> {
    // Parse everything up front so a bad event kind fails before anything runs
    let mut injections = Vec::with_capacity(test.inject.len());
    for injection in &test.inject {
        let event: InboundEvent = injection.event.parse()?;
        injections.push((injection.frame, event, injection.repeat));
    }

    let controls = Controls {
        player2: test.setup.player2,
    };
    let mut sim = Simulation::new(test.setup.seed, controls, MatchTuning::default());
    if test.setup.start {
        sim.start();
    }

    for def in &test.setup.bodies {
        let id = BodyId::from_name(&def.body).ok_or_else(|| format!("Unknown body '{}'", def.body))?;
        let body = sim.state.arena_mut().get_mut(id);
        body.position = Vec2::new(def.x, def.y);
        body.set_velocity(Vec2::new(def.velocity_x, def.velocity_y));
    }

    let max_frame = test
        .input
        .iter()
        .map(|i| i.frame)
        .chain(test.inject.iter().map(|i| i.frame))
        .chain(test.expect.state.iter().map(|s| s.after_frame))
        .max()
        .unwrap_or(DEFAULT_FRAMES);

    let mut input = PlayerInput::default();
    let mut captured = Vec::new();
    let mut seen = 0;

    for frame in 0..=max_frame {
        for change in test.input.iter().filter(|i| i.frame.max(1) == frame) {
            if let Some(p1) = change.p1 {
                input.player1 = p1;
            }
            if let Some(p2) = change.p2 {
                input.player2 = p2;
            }
            input.restart_requested |= change.restart;
        }

        if frame > 0 {
            sim.step(&input);
            input.restart_requested = false;
        }

        for (_, event, repeat) in injections.iter().filter(|(f, _, _)| *f == frame) {
            for _ in 0..*repeat {
                sim.inject(*event);
            }
        }

        let events = sim.events();
        captured.extend(
            events[seen..]
                .iter()
                .map(|(_, event)| CapturedEvent::from_game_event(frame, event)),
        );
        seen = events.len();

        let checks = test.expect.state.iter().filter(|s| s.after_frame == frame);
        for assertion in checks {
            if let Err(error) = check_state(assertion, &WorldState::capture(&sim)) {
                return Ok(Err(AssertionError {
                    message: format!("Frame {}: {}", frame, error.message),
                    ..error
                }));
            }
        }
    }

    if let Err(error) = check_sequence(&test.expect.sequence, &captured) {
        return Ok(Err(error));
    }
    if let Err(error) = check_counts(&test.expect.count, &captured) {
        return Ok(Err(error));
    }

    Ok(Ok(max_frame))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> TestDefinition {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_goal_injection_passes() {
        let test = parse(
            r#"
name = "goal"
[[inject]]
frame = 1
event = "goal:p2"
[[expect.state]]
after_frame = 1
checks = ["score.p1 = 1", "ball.x = 400", "ball.y = 200"]
[[expect.sequence]]
event = "Goal"
player = "p1"
"#,
        );
        assert!(matches!(run_test(&test), TestResult::Pass { frames: 1 }));
    }

    #[test]
    fn test_bad_event_kind_is_error() {
        let test = parse(
            r#"
name = "bad"
[[inject]]
frame = 0
event = "wall"
"#,
        );
        assert!(matches!(run_test(&test), TestResult::Error { .. }));
    }

    #[test]
    fn test_failed_check_is_failure() {
        let test = parse(
            r#"
name = "wrong"
[[expect.state]]
after_frame = 0
checks = ["phase = ended"]
"#,
        );
        assert!(matches!(run_test(&test), TestResult::Fail { .. }));
    }
}
