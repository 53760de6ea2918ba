//! Textual inbound events, as written in scenario files

use std::str::FromStr;

use crate::ball::ContactKind;
use crate::player::PlayerSlot;
use crate::scoring::GoalZone;

/// One inbound event that can be injected into a running simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundEvent {
    /// `ground`
    GroundContact,
    /// `player:p1` / `player:p2`
    PlayerContact(PlayerSlot),
    /// `goal:p1` is the ball in player 1's goal (scores for player 2)
    GoalOverlap(GoalZone),
    /// `timer` fires the clock's live timer once
    TimerFire,
    /// `restart` is the UI restart request (only honored after the match ends)
    RestartRequested,
    /// `start` (re)starts the match unconditionally
    Start,
}

fn parse_slot(arg: Option<&str>, raw: &str) -> Result<PlayerSlot, String> {
    let arg = arg.ok_or_else(|| format!("Event '{}' needs a player, e.g. '{}:p1'", raw, raw))?;
    PlayerSlot::from_code(arg).ok_or_else(|| format!("Unknown player '{}' in event '{}'", arg, raw))
}

impl FromStr for InboundEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        let (kind, arg) = match raw.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (raw.as_str(), None),
        };

        match kind {
            "goal" => {
                let zone = match parse_slot(arg, kind)? {
                    PlayerSlot::One => GoalZone::Player1,
                    PlayerSlot::Two => GoalZone::Player2,
                };
                Ok(InboundEvent::GoalOverlap(zone))
            }
            "timer" => Ok(InboundEvent::TimerFire),
            "restart" => Ok(InboundEvent::RestartRequested),
            "start" => Ok(InboundEvent::Start),
            contact => match contact.parse::<ContactKind>()? {
                ContactKind::Ground => Ok(InboundEvent::GroundContact),
                ContactKind::Player => Ok(InboundEvent::PlayerContact(parse_slot(arg, kind)?)),
            },
        }
    }
}
