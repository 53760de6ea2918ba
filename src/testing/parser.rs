//! TOML test file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::ai::Intent;
use crate::player::ControlMode;

/// Complete test definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub inject: Vec<Injection>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Test setup configuration
#[derive(Debug, Deserialize)]
pub struct TestSetup {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub player2: ControlMode,
    /// Start the match before frame 1 (false leaves it idle)
    #[serde(default = "default_true")]
    pub start: bool,
    #[serde(default)]
    pub bodies: Vec<BodyDef>,
}

impl Default for TestSetup {
    fn default() -> Self {
        Self {
            seed: 0,
            player2: ControlMode::Ai,
            start: true,
            bodies: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Override for one body, applied after the match starts
#[derive(Debug, Clone, Deserialize)]
pub struct BodyDef {
    /// "ball", "p1" or "p2"
    pub body: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub velocity_x: f32,
    #[serde(default)]
    pub velocity_y: f32,
}

/// Input change at a specific frame. Inputs persist until changed.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    pub p1: Option<Intent>,
    pub p2: Option<Intent>,
    #[serde(default)]
    pub restart: bool,
}

/// Inbound event delivered after the given frame has been stepped
#[derive(Debug, Clone, Deserialize)]
pub struct Injection {
    pub frame: u64,
    /// e.g. "goal:p1", "player:p2", "ground", "timer", "restart", "start"
    pub event: String,
    /// Deliver this many times in a row
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_repeat() -> u32 {
    1
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
    /// Exact number of times an event occurs over the whole run
    #[serde(default)]
    pub count: Vec<ExpectedCount>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    pub player: Option<String>,
    /// Matches the payload of `Ignored` events ("goal", "timer", "restart")
    pub detail: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectedCount {
    pub event: String,
    pub player: Option<String>,
    pub detail: Option<String>,
    pub count: usize,
}

/// State assertion after simulation
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}
