//! Event logger for match audit trails
//!
//! `EventLogger` writes `.evlog` files for windowed play; `EventBuffer` keeps
//! the same lines in memory for headless runs and scenario tests.

use bevy::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::bus::EventBus;
use super::format::serialize_event;
use super::types::GameEvent;
use crate::tuning::MatchTuning;

/// Configuration for event logging
#[derive(Resource, Clone)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Whether logging is enabled
    pub enabled: bool,
    /// Sample rate for tick events (every N ms, 0 = disabled)
    pub tick_sample_ms: u32,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: true,
            tick_sample_ms: 100,
        }
    }
}

/// Active event logger with file handle
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    path: Option<PathBuf>,
    session_id: String,
    last_tick_ms: Option<u32>,
    config: EventLogConfig,
}

impl EventLogger {
    /// Create a new event logger (but don't open file yet)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            path: None,
            session_id: String::new(),
            last_tick_ms: None,
            config,
        }
    }

    /// Open a new log file and write the session header
    pub fn start_session(&mut self, timestamp: &str, seed: u64, tuning: &MatchTuning) {
        if !self.config.enabled {
            return;
        }

        self.session_id = Uuid::new_v4().to_string();

        if let Err(e) = std::fs::create_dir_all(&self.config.log_dir) {
            warn!("Failed to create log directory: {}", e);
            return;
        }

        let filename = format!("{}_{}.evlog", timestamp, &self.session_id[..8]);
        let path = self.config.log_dir.join(filename);

        match OpenOptions::new().create(true).write(true).truncate(true).open(&path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                self.last_tick_ms = None;
                info!("Event logging started: {} (session: {})", path.display(), &self.session_id[..8]);
                self.path = Some(path);

                self.log(0, &GameEvent::SessionStart {
                    session_id: self.session_id.clone(),
                    timestamp: timestamp.to_string(),
                    seed,
                });
                self.log(0, &GameEvent::Config(tuning.clone()));
            }
            Err(e) => {
                warn!("Failed to open event log: {}", e);
            }
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flush and close the current log
    pub fn end_session(&mut self) {
        let Some(mut writer) = self.writer.take() else {
            return;
        };
        match writer.flush() {
            Ok(()) => {
                if let Some(path) = &self.path {
                    info!("Event log closed: {}", path.display());
                }
            }
            Err(e) => warn!("Failed to flush event log: {}", e),
        }
    }

    /// Log an event. Tick events are thinned to the configured sample rate.
    pub fn log(&mut self, time_ms: u32, event: &GameEvent) {
        if matches!(event, GameEvent::Tick { .. }) && !self.should_log_tick(time_ms) {
            return;
        }
        let Some(writer) = &mut self.writer else {
            return;
        };

        if let Err(e) = writeln!(writer, "{}", serialize_event(time_ms, event)) {
            warn!("Failed to write event: {}", e);
        }
    }

    fn should_log_tick(&mut self, time_ms: u32) -> bool {
        if self.config.tick_sample_ms == 0 {
            return false;
        }
        match self.last_tick_ms {
            Some(last) if time_ms.saturating_sub(last) < self.config.tick_sample_ms => false,
            _ => {
                self.last_tick_ms = Some(time_ms);
                true
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}

/// Drain the bus into the log file every frame
pub fn write_event_log(mut bus: ResMut<EventBus>, mut logger: ResMut<EventLogger>) {
    if bus.peek().is_empty() {
        return;
    }
    for bus_event in bus.drain() {
        logger.log(bus_event.time_ms, &bus_event.event);
    }
}

/// Write whatever is still pending and close the log once the app exits
pub fn close_event_log(
    mut exits: MessageReader<AppExit>,
    mut bus: ResMut<EventBus>,
    mut logger: ResMut<EventLogger>,
) {
    if exits.read().next().is_none() || !logger.is_active() {
        return;
    }
    for bus_event in bus.drain() {
        logger.log(bus_event.time_ms, &bus_event.event);
    }
    logger.end_session();
}

/// Simple in-memory event buffer for headless runs (no file I/O)
#[derive(Default)]
pub struct EventBuffer {
    events: Vec<(u32, GameEvent)>,
    session_id: String,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session with a fresh UUID
    pub fn start_session(&mut self, timestamp: &str, seed: u64) {
        self.clear();
        self.session_id = Uuid::new_v4().to_string();
        self.log(0, GameEvent::SessionStart {
            session_id: self.session_id.clone(),
            timestamp: timestamp.to_string(),
            seed,
        });
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.session_id.clear();
    }

    pub fn log(&mut self, time_ms: u32, event: GameEvent) {
        self.events.push((time_ms, event));
    }

    pub fn events(&self) -> &[(u32, GameEvent)] {
        &self.events
    }

    /// Import events from an external source (like EventBus)
    pub fn import_events(&mut self, events: Vec<(u32, GameEvent)>) {
        self.events.extend(events);
    }
}
