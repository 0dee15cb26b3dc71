//! # tp_core - Per-Tick Command-Mutation Pipeline
//!
//! This library intercepts the outgoing input command of a real-time
//! multiplayer client once per fixed simulation step and selectively
//! mutates its timing and content: staged duplicate commands with a shifted
//! tick index (double commit), a sustained tick-index offset while an action
//! button is held (shot hiding), and a family of movement-intent rewrites
//! (auto-crouch, directional remap, stop-brake).
//!
//! ## Features
//! - 100% deterministic (same tick script = same result)
//! - single-threaded, synchronous, allocation-free on the hot path
//! - every failure mode is a guard predicate, never an error
//! - JSON scenario API for host integration and tooling

pub mod api;
pub mod engine;
pub mod error;

// Re-export main API functions
pub use api::{run_scenario, run_scenario_json, ScenarioRequest, ScenarioResponse};
pub use error::{PipelineError, Result};

// Re-export engine types
pub use engine::{
    ButtonMask, Command, CommandHistory, CommandPipeline, GuardSnapshot, KeyId, KeyStates,
    PipelineConfig, ProcessOutcome, SchedulerOutputs, TickInputs, TickShiftScheduler,
    WeaponCapabilities, WeaponKind,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
