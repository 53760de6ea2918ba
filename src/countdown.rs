//! Match clock - the 30 second countdown and its repeating timer
//!
//! The clock never owns a timer directly; it holds a handle into a
//! `TimerService`. At most one handle is live at a time: installing a new one
//! cancels the previous one first, so a restart can never leave two countdowns
//! ticking.

use bevy::prelude::*;
use std::time::Duration;

use crate::constants::*;

/// Opaque reference to a scheduled repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Something that can schedule and cancel repeating callbacks
pub trait TimerService {
    /// Schedule a timer firing every `period`
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle;
    /// Cancel a timer. Returns false if the handle was not live.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
    /// Number of timers currently scheduled
    fn live_count(&self) -> usize;
}

/// Repeating timers driven by elapsed time (fixed-step time in the app)
#[derive(Resource, Default)]
pub struct RepeatingTimers {
    next_id: u64,
    timers: Vec<(TimerHandle, Timer)>,
}

impl RepeatingTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all timers and return one handle per elapsed period, in schedule order
    pub fn tick(&mut self, delta: Duration) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        for (handle, timer) in &mut self.timers {
            timer.tick(delta);
            for _ in 0..timer.times_finished_this_tick() {
                fired.push(*handle);
            }
        }
        fired
    }
}

impl TimerService for RepeatingTimers {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.timers
            .push((handle, Timer::new(period, TimerMode::Repeating)));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|(h, _)| *h != handle);
        self.timers.len() != before
    }

    fn live_count(&self) -> usize {
        self.timers.len()
    }
}

/// Seconds left in the match plus the handle of the live countdown timer
#[derive(Debug, Clone, PartialEq)]
pub struct MatchClock {
    time_remaining: u32,
    handle: Option<TimerHandle>,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self {
            time_remaining: MATCH_DURATION_SECS,
            handle: None,
        }
    }
}

impl MatchClock {
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    /// Reset to the full duration and install a fresh 1 second timer,
    /// cancelling any timer installed before.
    pub fn restart(&mut self, timers: &mut impl TimerService) {
        self.stop(timers);
        self.time_remaining = MATCH_DURATION_SECS;
        self.handle = Some(timers.schedule_repeating(Duration::from_secs(CLOCK_PERIOD_SECS)));
    }

    /// Cancel the live timer, if any
    pub fn stop(&mut self, timers: &mut impl TimerService) {
        if let Some(handle) = self.handle.take() {
            timers.cancel(handle);
        }
    }

    /// One second elapsed. Returns the new remaining time (never below zero).
    pub fn tick_down(&mut self) -> u32 {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.time_remaining
    }

    pub fn text(&self) -> String {
        format!("Time: {}", self.time_remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_timer_fires_each_period() {
        let mut timers = RepeatingTimers::new();
        let handle = timers.schedule_repeating(Duration::from_secs(1));

        assert!(timers.tick(Duration::from_millis(600)).is_empty());
        assert_eq!(timers.tick(Duration::from_millis(600)), vec![handle]);
        assert_eq!(timers.tick(Duration::from_secs(2)), vec![handle, handle]);
    }

    #[test]
    fn test_cancelled_timer_stops_firing() {
        let mut timers = RepeatingTimers::new();
        let handle = timers.schedule_repeating(Duration::from_secs(1));
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(timers.tick(Duration::from_secs(3)).is_empty());
        assert_eq!(timers.live_count(), 0);
    }

    #[test]
    fn test_clock_restart_replaces_handle() {
        let mut timers = RepeatingTimers::new();
        let mut clock = MatchClock::default();

        clock.restart(&mut timers);
        let first = clock.handle().unwrap();
        clock.restart(&mut timers);
        let second = clock.handle().unwrap();

        assert_ne!(first, second);
        assert_eq!(timers.live_count(), 1);
        assert_eq!(timers.tick(Duration::from_secs(1)), vec![second]);
    }

    #[test]
    fn test_tick_down_saturates() {
        let mut clock = MatchClock::default();
        for _ in 0..MATCH_DURATION_SECS + 5 {
            clock.tick_down();
        }
        assert_eq!(clock.time_remaining(), 0);
        assert_eq!(clock.text(), "Time: 0");
    }
}
