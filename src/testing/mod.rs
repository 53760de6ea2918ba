//! Scenario testing system for deterministic match testing
//!
//! Provides infrastructure for running scripted inputs and injected events
//! against the headless simulation to verify match rules.

pub mod assertions;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, check_counts, check_sequence, check_state};
pub use parser::{BodyDef, ExpectedEvent, FrameInput, Injection, StateAssertion, TestDefinition, TestExpectations, TestSetup};
pub use runner::{TestResult, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";
