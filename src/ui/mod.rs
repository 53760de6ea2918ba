//! UI module - HUD text driven by host commands

mod hud;

pub use hud::*;
