//! Event Bus - hand-off point between the match core and its host
//!
//! The core emits two streams:
//! - `GameEvent`s, timestamped audit records (dropped when the bus is disabled)
//! - `HostCommand`s, UI/animation updates the host must apply (never dropped)

use bevy::prelude::*;

use super::types::{GameEvent, HostCommand};

/// Timestamped event for the event bus
#[derive(Debug, Clone)]
pub struct BusEvent {
    /// Host clock in milliseconds when the event was emitted. In the windowed
    /// game this is time since app launch as of the last `Update`, so it does
    /// not reset on restart and events from `FixedUpdate` carry the previous
    /// frame's time. The headless simulation stamps frame time exactly.
    pub time_ms: u32,
    /// The event data
    pub event: GameEvent,
}

/// Central event bus between the core and the host
#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted since the last drain
    pending: Vec<BusEvent>,

    /// Host commands waiting to be applied
    commands: Vec<HostCommand>,

    /// Current elapsed time in milliseconds (for timestamping)
    elapsed_ms: u32,

    /// Whether audit events are recorded
    enabled: bool,
}

impl EventBus {
    /// Create a new enabled event bus
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a bus that drops audit events (commands still flow)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Update the elapsed time (called each frame)
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: GameEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    /// Queue a command for the host
    pub fn command(&mut self, command: HostCommand) {
        self.commands.push(command);
    }

    /// Get pending events for consumption (does not drain)
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Take all pending events
    pub fn drain(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Get queued commands (does not drain)
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Take all queued commands
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Export pending events as (time_ms, GameEvent) tuples for EventBuffer
    pub fn export_events(&mut self) -> Vec<(u32, GameEvent)> {
        self.drain().into_iter().map(|e| (e.time_ms, e.event)).collect()
    }
}

/// System to update the event bus time each frame
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerSlot;

    #[test]
    fn test_emit_and_drain() {
        let mut bus = EventBus::new();
        bus.update_time(1.5);

        bus.emit(GameEvent::Goal {
            player: PlayerSlot::One,
            score_p1: 1,
            score_p2: 0,
        });

        assert_eq!(bus.peek().len(), 1);

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time_ms, 1500);
        assert!(bus.peek().is_empty());
    }

    #[test]
    fn test_disabled_bus_still_queues_commands() {
        let mut bus = EventBus::disabled();
        bus.emit(GameEvent::ClockTick { remaining: 29 });
        bus.command(HostCommand::SetTimerText("Time: 29".to_string()));

        assert!(bus.peek().is_empty());
        assert_eq!(bus.drain_commands().len(), 1);
        assert!(bus.commands().is_empty());
    }
}
