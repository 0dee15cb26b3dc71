//! Command pipeline: fixed per-tick mutator order over one in-flight command.
//!
//! Order is load-bearing: the movement mutators establish the button and
//! analog state the timing mutators read. AutoCrouch → DirectionalRemap →
//! StopBrake → ForceCrouch → DoubleCommit → ShotHide, every tick, no
//! silent skips. Each
//! mutator re-checks its own guards against the one `GuardSnapshot` captured
//! at the top of the tick.

use super::command::{Command, CommandHistory};
use super::config::PipelineConfig;
use super::guard::GuardSnapshot;
use super::inputs::TickInputs;
use super::mutators::{directional_remap, force_crouch, AutoCrouch, StopBrake};
use super::tick_shift::{SchedulerOutputs, TickShiftScheduler};

/// Result of one pipeline pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessOutcome {
    /// Sequence of a staged duplicate command, if double commit fired.
    pub staged_sequence: Option<u32>,
    /// Double commit was the active timing technique this tick.
    pub double_commit_active: bool,
    /// Scheduler outputs after the tick, for transmission.
    pub outputs: SchedulerOutputs,
}

/// Owns all mutator state for one session and drives the fixed order.
///
/// Single logical thread: invoked synchronously once per simulation tick,
/// strictly before transmission. Nothing here suspends or blocks.
#[derive(Debug, Default)]
pub struct CommandPipeline {
    config: PipelineConfig,
    auto_crouch: AutoCrouch,
    stop_brake: StopBrake,
    scheduler: TickShiftScheduler,
}

impl CommandPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TickShiftScheduler {
        &self.scheduler
    }

    /// The duck-fake flag as the rest of the client sees it.
    pub fn duck_faking(&self) -> bool {
        self.auto_crouch.engaged
    }

    /// Restore session defaults (disconnect path).
    pub fn reset(&mut self) {
        let config = std::mem::take(&mut self.config);
        *self = Self::new(config);
    }

    /// Run every mutator over this tick's command.
    pub fn process(
        &mut self,
        cmd: &mut Command,
        history: &mut CommandHistory,
        inputs: &TickInputs,
    ) -> ProcessOutcome {
        // One snapshot per tick; mutators may alter the command but never
        // observe a partially updated guard set.
        let guard = GuardSnapshot::capture(inputs, self.auto_crouch.engaged);

        self.auto_crouch
            .update(cmd, inputs, &guard, &self.config.auto_crouch);
        directional_remap::apply(cmd, inputs, &guard, &self.config.directional_remap);
        self.stop_brake
            .update(cmd, inputs, &guard, &self.config.stop_brake);
        force_crouch::apply(cmd, &guard, &self.config.force_crouch);

        self.scheduler.defensive_commit(inputs, &self.config);
        let tick_shift = self.scheduler.run(cmd, history, inputs, &guard, &self.config);

        ProcessOutcome {
            staged_sequence: tick_shift.staged_sequence,
            double_commit_active: tick_shift.double_commit_active,
            outputs: self.scheduler.outputs,
        }
    }
}
