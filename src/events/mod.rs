//! Match events, host commands and the audit log
//!
//! The match core never talks to the engine or UI directly. It pushes
//! `HostCommand`s and `GameEvent`s onto the `EventBus`; the host drains them.

mod bus;
mod format;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use format::{parse_event, serialize_event};
pub use logger::{EventBuffer, EventLogConfig, EventLogger, close_event_log, write_event_log};
pub use types::{GameEvent, HostCommand};
