//! Compact text format for game event serialization
//!
//! Format: `T:NNNNN|CODE|data...`
//! - T:NNNNN = timestamp in milliseconds (5 digits, wraps at 99999)
//! - CODE = event type code
//! - data = pipe-separated values specific to event type
//!
//! Examples:
//! ```text
//! T:00000|MS|30
//! T:01000|CT|29
//! T:04210|K|P1|310.0
//! T:05120|BR|512.3
//! T:06400|G|P2|0|1
//! T:30000|ME|0|1|P2
//! ```

use super::types::GameEvent;
use crate::player::PlayerSlot;
use crate::scoring::Winner;
use crate::tuning::MatchTuning;

/// Format a position tuple
fn fmt_pos(pos: (f32, f32)) -> String {
    format!("{:.1},{:.1}", pos.0, pos.1)
}

/// Serialize a GameEvent to compact text format
pub fn serialize_event(time_ms: u32, event: &GameEvent) -> String {
    let ts = format!("T:{:05}", time_ms % 100000);
    let code = event.type_code();

    let data = match event {
        GameEvent::SessionStart {
            session_id,
            timestamp,
            seed,
        } => format!("{}|{}|{}", session_id, timestamp, seed),
        GameEvent::Config(tuning) => {
            // Config is compact JSON for easy parsing
            serde_json::to_string(tuning).unwrap_or_else(|_| "{}".to_string())
        }
        GameEvent::MatchStart { duration } => duration.to_string(),
        GameEvent::ClockTick { remaining } => remaining.to_string(),
        GameEvent::MatchEnd {
            score_p1,
            score_p2,
            winner,
        } => format!("{}|{}|{}", score_p1, score_p2, winner.code()),
        GameEvent::Goal {
            player,
            score_p1,
            score_p2,
        } => format!("{}|{}|{}", player, score_p1, score_p2),
        GameEvent::Kick { player, strength } => format!("{}|{:.1}", player, strength),
        GameEvent::BallRest { x } => format!("{:.1}", x),
        GameEvent::Ignored { event } => event.clone(),
        GameEvent::Tick {
            frame,
            p1_pos,
            p2_pos,
            ball_pos,
            ball_vel,
        } => format!(
            "{}|{}|{}|{}|{}",
            frame,
            fmt_pos(*p1_pos),
            fmt_pos(*p2_pos),
            fmt_pos(*ball_pos),
            fmt_pos(*ball_vel)
        ),
    };

    format!("{}|{}|{}", ts, code, data)
}

/// Parse a line back into timestamp and event
pub fn parse_event(line: &str) -> Option<(u32, GameEvent)> {
    let parts: Vec<&str> = line.trim_end().split('|').collect();
    if parts.len() < 3 {
        return None;
    }

    let ts_str = parts[0].strip_prefix("T:")?;
    let time_ms: u32 = ts_str.parse().ok()?;

    let code = parts[1];
    let data = &parts[2..];

    let event = match code {
        "SE" if data.len() >= 3 => GameEvent::SessionStart {
            session_id: data[0].to_string(),
            timestamp: data[1].to_string(),
            seed: data[2].parse().ok()?,
        },
        "CF" => {
            // Rejoin with | in case the JSON contains one
            let tuning: MatchTuning = serde_json::from_str(&data.join("|")).ok()?;
            GameEvent::Config(tuning)
        }
        "MS" => GameEvent::MatchStart {
            duration: data[0].parse().ok()?,
        },
        "CT" => GameEvent::ClockTick {
            remaining: data[0].parse().ok()?,
        },
        "ME" if data.len() >= 3 => GameEvent::MatchEnd {
            score_p1: data[0].parse().ok()?,
            score_p2: data[1].parse().ok()?,
            winner: Winner::from_code(data[2])?,
        },
        "G" if data.len() >= 3 => GameEvent::Goal {
            player: PlayerSlot::from_code(data[0])?,
            score_p1: data[1].parse().ok()?,
            score_p2: data[2].parse().ok()?,
        },
        "K" if data.len() >= 2 => GameEvent::Kick {
            player: PlayerSlot::from_code(data[0])?,
            strength: data[1].parse().ok()?,
        },
        "BR" => GameEvent::BallRest {
            x: data[0].parse().ok()?,
        },
        "IG" => GameEvent::Ignored {
            event: data[0].to_string(),
        },
        "T" if data.len() >= 5 => GameEvent::Tick {
            frame: data[0].parse().ok()?,
            p1_pos: parse_pos(data[1])?,
            p2_pos: parse_pos(data[2])?,
            ball_pos: parse_pos(data[3])?,
            ball_vel: parse_pos(data[4])?,
        },
        _ => return None,
    };

    Some((time_ms, event))
}

fn parse_pos(s: &str) -> Option<(f32, f32)> {
    let (x, y) = s.split_once(',')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_goal() {
        let line = serialize_event(
            6400,
            &GameEvent::Goal {
                player: PlayerSlot::Two,
                score_p1: 0,
                score_p2: 1,
            },
        );
        assert_eq!(line, "T:06400|G|P2|0|1");
    }

    #[test]
    fn test_parse_match_end() {
        let (ts, event) = parse_event("T:30000|ME|2|2|D").unwrap();
        assert_eq!(ts, 30000);
        assert_eq!(
            event,
            GameEvent::MatchEnd {
                score_p1: 2,
                score_p2: 2,
                winner: Winner::Draw,
            }
        );
    }

    #[test]
    fn test_parse_tick_line() {
        let (_, event) = parse_event("T:00050|T|3|100.0,450.0|700.0,450.0|380.0,201.5|0.0,5.0").unwrap();
        match event {
            GameEvent::Tick { frame, ball_pos, .. } => {
                assert_eq!(frame, 3);
                assert_eq!(ball_pos, (380.0, 201.5));
            }
            other => panic!("Wrong event type: {:?}", other),
        }
    }

    #[test]
    fn test_config_survives_line_format() {
        let tuning = MatchTuning::default();
        let line = serialize_event(0, &GameEvent::Config(tuning.clone()));
        assert_eq!(parse_event(&line).map(|(_, e)| e), Some(GameEvent::Config(tuning)));
    }

    #[test]
    fn test_ball_rest_line() {
        let line = serialize_event(5120, &GameEvent::BallRest { x: 512.3 });
        assert_eq!(line, "T:05120|BR|512.3");
        assert_eq!(
            parse_event(&line).map(|(_, e)| e),
            Some(GameEvent::BallRest { x: 512.3 })
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_event("hello").is_none());
        assert!(parse_event("T:00010|ZZ|1").is_none());
        assert!(parse_event("T:00010|G|P3|0|0").is_none());
    }
}
