//! Per-tick command-mutation engine.
//!
//! Dependency flow: `pipeline` → `guard` → (`mutators`, `tick_shift`), with
//! `command`/`weapon`/`keys`/`inputs` as the shared leaf vocabulary.

pub mod command;
pub mod config;
pub mod guard;
pub mod inputs;
pub mod keys;
pub mod mutators;
pub mod pipeline;
pub mod tick_shift;
pub mod timestep;
pub mod weapon;

#[cfg(test)]
mod contract_tests;

pub use command::{ButtonMask, Command, CommandHistory, COMMAND_BACKUP};
pub use config::PipelineConfig;
pub use guard::GuardSnapshot;
pub use inputs::{AntiAimState, LocalPlayerState, ManualSide, PrevTickBackup, TickInputs};
pub use keys::{KeyId, KeyStates, KEY_MAX, KEY_NONE};
pub use pipeline::{CommandPipeline, ProcessOutcome};
pub use tick_shift::{
    DoubleCommitState, SchedulerOutputs, ShotHideState, TickShiftScheduler,
};
pub use weapon::{WeaponCapabilities, WeaponKind};
