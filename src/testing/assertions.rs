//! Assertion checking for test expectations

use std::collections::HashMap;

use super::parser::{ExpectedCount, ExpectedEvent, StateAssertion};
use crate::body::BodyId;
use crate::countdown::TimerService;
use crate::events::{GameEvent, HostCommand};
use crate::simulation::Simulation;

/// Error when an assertion fails
#[derive(Debug)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
    pub player: Option<String>,
    pub detail: Option<String>,
}

impl CapturedEvent {
    pub fn from_game_event(frame: u64, event: &GameEvent) -> Self {
        let detail = match event {
            GameEvent::Ignored { event } => Some(event.clone()),
            _ => None,
        };
        Self {
            frame,
            event_type: event.name().to_string(),
            player: event.player().map(|p| p.to_string()),
            detail,
        }
    }

    fn matches(&self, event: &str, player: Option<&String>, detail: Option<&String>) -> bool {
        self.event_type == event
            && player.is_none_or(|p| self.player.as_ref().is_some_and(|c| c.eq_ignore_ascii_case(p)))
            && detail.is_none_or(|d| self.detail.as_ref() == Some(d))
    }
}

/// Check if captured events match expected sequence
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        let found = captured[captured_idx..]
            .iter()
            .enumerate()
            .find(|(_, cap)| cap.matches(&exp.event, exp.player.as_ref(), exp.detail.as_ref()));

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min
                    && cap.frame < min
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                        expected: format!("frame >= {}", min),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                if let Some(max) = exp.frame_max
                    && cap.frame > max
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                        expected: format!("frame <= {}", max),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                captured_idx += offset + 1;
            }
            None => {
                let player_str = exp.player.as_ref().map(|p| format!(" (player: {})", p)).unwrap_or_default();
                return Err(AssertionError {
                    message: format!("Event #{} '{}'{} not found", i + 1, exp.event, player_str),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!(
                        "events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..]
                            .iter()
                            .filter(|e| e.event_type != "Tick")
                            .map(|e| &e.event_type)
                            .collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Check exact event counts over the whole run
pub fn check_counts(expected: &[ExpectedCount], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    for exp in expected {
        let actual = captured
            .iter()
            .filter(|cap| cap.matches(&exp.event, exp.player.as_ref(), exp.detail.as_ref()))
            .count();
        if actual != exp.count {
            return Err(AssertionError {
                message: format!("Event '{}' count mismatch", exp.event),
                expected: exp.count.to_string(),
                actual: actual.to_string(),
            });
        }
    }
    Ok(())
}

/// World state for assertions
pub struct WorldState {
    pub phase: String,
    pub score_p1: u32,
    pub score_p2: u32,
    pub time_remaining: u32,
    pub live_timers: usize,
    pub winner: String,
    pub result_text: String,
    pub restart_shown: bool,
    pub bodies: HashMap<String, BodyState>,
}

pub struct BodyState {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub angular_velocity: f32,
    pub grounded: bool,
}

impl WorldState {
    /// Snapshot a simulation; UI fields reflect the last command of each kind
    pub fn capture(sim: &Simulation) -> Self {
        let mut result_text = String::new();
        let mut restart_shown = false;
        for (_, command) in sim.commands() {
            match command {
                HostCommand::ShowResultText(text) => result_text = text.clone(),
                HostCommand::ShowRestartAffordance(shown) => restart_shown = *shown,
                _ => {}
            }
        }

        let bodies = BodyId::ALL
            .into_iter()
            .map(|id| {
                let body = sim.state.arena().get(id);
                let state = BodyState {
                    x: body.position.x,
                    y: body.position.y,
                    velocity_x: body.velocity().x,
                    velocity_y: body.velocity().y,
                    angular_velocity: body.angular_velocity(),
                    grounded: body.grounded,
                };
                (id.name().to_string(), state)
            })
            .collect();

        let score = sim.state.score();
        Self {
            phase: sim.state.phase().name().to_string(),
            score_p1: score.player1,
            score_p2: score.player2,
            time_remaining: sim.state.time_remaining(),
            live_timers: sim.timers.live_count(),
            winner: sim.state.winner().map(|w| w.code().to_string()).unwrap_or_else(|| "none".to_string()),
            result_text,
            restart_shown,
            bodies,
        }
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'path = value' or 'path > value'".to_string(),
            actual: check.clone(),
        })?;
        let expected_value = expected_value.trim_matches('"');

        match path {
            "phase" => check_text(check, &state.phase, expected_value)?,
            "winner" => check_text(check, &state.winner, expected_value)?,
            "result_text" => check_text(check, &state.result_text, expected_value)?,
            "restart_shown" => check_text(check, &state.restart_shown.to_string(), expected_value)?,
            "score.p1" => check_number(path, state.score_p1 as f32, operator, expected_value)?,
            "score.p2" => check_number(path, state.score_p2 as f32, operator, expected_value)?,
            "time" => check_number(path, state.time_remaining as f32, operator, expected_value)?,
            "timers" => check_number(path, state.live_timers as f32, operator, expected_value)?,
            _ => check_body(check, path, operator, expected_value, state)?,
        }
    }

    Ok(())
}

fn check_body(
    check: &str,
    path: &str,
    operator: &str,
    expected_value: &str,
    state: &WorldState,
) -> Result<(), AssertionError> {
    let (body_name, property) = path.split_once('.').ok_or_else(|| AssertionError {
        message: format!("Unknown check path: {}", path),
        expected: "body.property, score.p1, phase, time, timers, winner".to_string(),
        actual: check.to_string(),
    })?;
    let body = state.bodies.get(body_name).ok_or_else(|| AssertionError {
        message: format!("Body '{}' not found", body_name),
        expected: "ball, p1 or p2".to_string(),
        actual: body_name.to_string(),
    })?;

    match property {
        "x" => check_number(path, body.x, operator, expected_value),
        "y" => check_number(path, body.y, operator, expected_value),
        "velocity_x" => check_number(path, body.velocity_x, operator, expected_value),
        "velocity_y" => check_number(path, body.velocity_y, operator, expected_value),
        "angular_velocity" => check_number(path, body.angular_velocity, operator, expected_value),
        "grounded" => check_text(check, &body.grounded.to_string(), expected_value),
        other => Err(AssertionError {
            message: format!("Unknown body property '{}'", other),
            expected: "x, y, velocity_x, velocity_y, angular_velocity, grounded".to_string(),
            actual: check.to_string(),
        }),
    }
}

fn check_text(check: &str, actual: &str, expected: &str) -> Result<(), AssertionError> {
    if actual.eq_ignore_ascii_case(expected) {
        return Ok(());
    }
    Err(AssertionError {
        message: format!("Check failed: {}", check),
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

/// Check float comparison with operator
fn check_number(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < 0.1,
        "!=" => (actual - value).abs() >= 0.1,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.1})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.1}", actual),
        });
    }

    Ok(())
}
