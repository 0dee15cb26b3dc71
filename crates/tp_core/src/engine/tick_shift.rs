//! Tick-shift scheduler: the DoubleCommit and ShotHide state machines.
//!
//! The two machines cooperate around a single logical key-resource and
//! jointly own the shared outputs consumed by transmission:
//!
//! - `ticks_allowed`: how many shifted ticks transmission may spend,
//! - `next_tick_shift`: the shift value staged for the next qualifying send,
//! - `tick_shift`: the shift committed for this send.
//!
//! ## State transitions
//! ```text
//! DoubleCommit: Idle --commit--> Idle(settling) --> Recharging --window--> Idle
//! ShotHide:     Idle <--key hold--> Active
//! ```
//!
//! At most one machine owns the key-resource at a time; DoubleCommit has
//! priority when both keys are held. Every guard failure resolves
//! synchronously within the tick it occurs: outputs zeroed, owning machine
//! back to idle, key-resource released.

use tracing::{debug, trace};

use super::command::{ButtonMask, Command, CommandHistory};
use super::config::PipelineConfig;
use super::guard::GuardSnapshot;
use super::inputs::TickInputs;
use super::keys::KeyId;
use super::timestep::{
    time_to_ticks, DOUBLE_COMMIT_FAST_RECHARGE_S, DOUBLE_COMMIT_SLOW_RECHARGE_S,
    SHOT_HIDE_SHIFT, SHOT_HIDE_SHIFT_MANAGED,
};
use super::weapon::WeaponCapabilities;

/// DoubleCommit machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoubleCommitState {
    #[default]
    Idle,
    Recharging,
}

/// ShotHide machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShotHideState {
    #[default]
    Idle,
    Active,
}

/// Shared outputs consumed by transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerOutputs {
    pub ticks_allowed: u32,
    pub next_tick_shift: u32,
    pub tick_shift: u32,
}

impl SchedulerOutputs {
    /// Guard-failure reset of the per-tick outputs. The committed
    /// `tick_shift` is consumed by transmission and cleared on session reset.
    fn zero(&mut self) {
        self.ticks_allowed = 0;
        self.next_tick_shift = 0;
    }
}

/// What the scheduler did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickShiftOutcome {
    /// Sequence number of a staged duplicate command, if one was written.
    pub staged_sequence: Option<u32>,
    /// DoubleCommit evaluated as active this tick, which makes the ShotHide
    /// pass opportunistic.
    pub double_commit_active: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct DoubleCommit {
    state: DoubleCommitState,
    last_commit_tick: u32,
    /// One-tick settle after a staged commit, before Recharging begins.
    settling: bool,
    armed_key: Option<KeyId>,
}

#[derive(Debug, Clone, Copy, Default)]
struct ShotHide {
    state: ShotHideState,
    armed_key: Option<KeyId>,
}

/// Owns both timing state machines and their shared outputs.
///
/// Session-bound: created at session start, `reset()` on disconnect, never
/// persisted. There is no module-global state behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickShiftScheduler {
    double_commit: DoubleCommit,
    shot_hide: ShotHide,
    pub outputs: SchedulerOutputs,
}

impl TickShiftScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore session defaults (disconnect path).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Key the DoubleCommit machine currently owns, if any.
    pub fn double_commit_armed(&self) -> Option<KeyId> {
        self.double_commit.armed_key
    }

    /// Key the ShotHide machine currently owns, if any.
    pub fn shot_hide_armed(&self) -> Option<KeyId> {
        self.shot_hide.armed_key
    }

    pub fn double_commit_state(&self) -> DoubleCommitState {
        self.double_commit.state
    }

    pub fn shot_hide_state(&self) -> ShotHideState {
        self.shot_hide.state
    }

    /// Run both machines for one tick, in DoubleCommit → ShotHide order.
    pub fn run(
        &mut self,
        cmd: &mut Command,
        history: &mut CommandHistory,
        inputs: &TickInputs,
        guard: &GuardSnapshot,
        config: &PipelineConfig,
    ) -> TickShiftOutcome {
        self.recharge_bookkeeping(cmd, inputs);
        self.arbitrate_key_resource(inputs, config);

        let mut outcome = TickShiftOutcome::default();
        let active = self.double_commit_tick(cmd, history, inputs, guard, config, &mut outcome);
        outcome.double_commit_active = active;
        // Opportunistic when DoubleCommit produced a result this tick: a
        // ShotHide guard failure must not erase it.
        let committed = !active;
        self.shot_hide_tick(cmd, inputs, guard, config, committed);
        outcome
    }

    /// Defensive double-commit variant. The observed behavior is an empty
    /// stub (guard checked, no effect); its semantics are intentionally left
    /// undefined rather than invented. Tracked in DESIGN.md.
    pub fn defensive_commit(&mut self, inputs: &TickInputs, config: &PipelineConfig) {
        if config.double_commit.defensive && inputs.fake_lag_active {
            trace!("defensive double-commit requested; semantics undefined, no effect");
        }
    }

    /// Recharge window bookkeeping, run before arming so that a window that
    /// elapses this tick re-arms the feature this tick.
    fn recharge_bookkeeping(&mut self, cmd: &Command, inputs: &TickInputs) {
        if self.double_commit.state != DoubleCommitState::Recharging {
            return;
        }
        let recharge_s = match &inputs.weapon {
            Some(weapon) if weapon.supports_fast_recharge => DOUBLE_COMMIT_FAST_RECHARGE_S,
            _ => DOUBLE_COMMIT_SLOW_RECHARGE_S,
        };
        let window = time_to_ticks(recharge_s, inputs.tick_interval);
        let elapsed = inputs
            .current_tick
            .saturating_sub(self.double_commit.last_commit_tick);

        if elapsed >= window {
            self.double_commit.state = DoubleCommitState::Idle;
            self.double_commit.last_commit_tick = 0;
            debug!(window, "double commit recharged");
        } else if cmd.buttons.contains(ButtonMask::ATTACK) {
            // Continuous fire keeps pushing the window out.
            self.double_commit.last_commit_tick = inputs.current_tick;
        }
    }

    /// Decide which machine owns the key-resource this tick. Arming one side
    /// always clears the other; DoubleCommit has priority.
    fn arbitrate_key_resource(&mut self, inputs: &TickInputs, config: &PipelineConfig) {
        let dc_wants = config.double_commit.enabled
            && inputs.keys.is_held(config.double_commit.key)
            && self.double_commit.state == DoubleCommitState::Idle
            && !self.double_commit.settling;
        let hs_wants = config.shot_hide.enabled && inputs.keys.is_held(config.shot_hide.key);

        if dc_wants {
            self.double_commit.armed_key = Some(config.double_commit.key);
            self.shot_hide.armed_key = None;
        } else if hs_wants {
            self.shot_hide.armed_key = Some(config.shot_hide.key);
            self.double_commit.armed_key = None;
        } else {
            self.double_commit.armed_key = None;
            self.shot_hide.armed_key = None;
        }
    }

    /// Full DoubleCommit reset: outputs zeroed, state back to Idle,
    /// key-resource released.
    fn double_commit_reset(&mut self) {
        self.double_commit.state = DoubleCommitState::Idle;
        self.double_commit.settling = false;
        self.double_commit.last_commit_tick = 0;
        self.double_commit.armed_key = None;
        self.outputs.zero();
    }

    /// Returns true while the feature is active this tick.
    fn double_commit_tick(
        &mut self,
        cmd: &mut Command,
        history: &mut CommandHistory,
        inputs: &TickInputs,
        guard: &GuardSnapshot,
        config: &PipelineConfig,
        outcome: &mut TickShiftOutcome,
    ) -> bool {
        // Settle tick right after a staged commit.
        if self.double_commit.settling {
            self.double_commit.settling = false;
            self.double_commit.state = DoubleCommitState::Recharging;
            self.outputs.zero();
            return false;
        }

        if !config.double_commit.enabled || !config.double_commit.key.is_bound() {
            self.double_commit_reset();
            return false;
        }

        // Not owning the key-resource is a precondition miss, not a guard
        // failure: Recharging must survive it so the window keeps counting.
        if self.double_commit.armed_key.is_none() {
            self.outputs.zero();
            return false;
        }

        if guard.frozen || guard.managed_server_mode || guard.duck_faking {
            self.double_commit_reset();
            return false;
        }

        // View frozen: stay active, change nothing this tick.
        if guard.view_frozen {
            return true;
        }

        let Some(weapon) = &inputs.weapon else {
            self.outputs.zero();
            return false;
        };

        if !weapon.stages_commits() {
            // Grenade/taser/revolver: bookkeeping path only.
            return true;
        }

        self.outputs.ticks_allowed = weapon.max_tick_shift;
        self.outputs.next_tick_shift = weapon.max_tick_shift;

        let action_fired = cmd.buttons.contains(ButtonMask::ATTACK)
            || (cmd.buttons.contains(ButtonMask::ATTACK2) && weapon.is_knife());

        if action_fired && inputs.send_packet {
            outcome.staged_sequence = Some(self.stage_commit(cmd, history, inputs, weapon));
        } else {
            // Sustained shift while armed but not flushing a shot.
            self.outputs.tick_shift = weapon.max_tick_shift;
        }
        true
    }

    /// Stage the duplicate command into the next sequence slot and disarm.
    fn stage_commit(
        &mut self,
        cmd: &Command,
        history: &mut CommandHistory,
        inputs: &TickInputs,
        weapon: &WeaponCapabilities,
    ) -> u32 {
        let next_sequence = cmd.sequence + 1;
        let mut staged = *cmd;
        staged.sequence = next_sequence;
        staged.tick_base = cmd.tick_base + weapon.max_tick_shift;
        *history.get_mut(next_sequence) = staged;

        self.double_commit.last_commit_tick = inputs.current_tick;
        self.double_commit.settling = true;
        self.double_commit.armed_key = None;
        debug!(
            sequence = next_sequence,
            shift = weapon.max_tick_shift,
            "double commit staged"
        );
        next_sequence
    }

    fn shot_hide_tick(
        &mut self,
        cmd: &Command,
        inputs: &TickInputs,
        guard: &GuardSnapshot,
        config: &PipelineConfig,
        committed: bool,
    ) {
        // Any guard failure: disable for this tick; zero the shared outputs
        // only on a committed pass, never on an opportunistic one.
        let fail = |scheduler: &mut Self| {
            scheduler.shot_hide.state = ShotHideState::Idle;
            scheduler.shot_hide.armed_key = None;
            if committed {
                scheduler.outputs.zero();
            }
        };

        if !config.shot_hide.enabled || !config.shot_hide.key.is_bound() {
            fail(self);
            return;
        }
        if self.shot_hide.armed_key.is_none() {
            fail(self);
            return;
        }
        if guard.frozen || guard.duck_faking {
            fail(self);
            return;
        }

        // View frozen: stay armed, change nothing this tick.
        if guard.view_frozen {
            return;
        }

        let Some(weapon) = &inputs.weapon else {
            fail(self);
            return;
        };

        if self.shot_hide.state != ShotHideState::Active {
            trace!("shot hide active");
        }
        self.shot_hide.state = ShotHideState::Active;
        self.outputs.next_tick_shift = if guard.managed_server_mode {
            SHOT_HIDE_SHIFT_MANAGED
        } else {
            SHOT_HIDE_SHIFT
        };

        let firing = if weapon.is_revolver() {
            cmd.buttons.any_attack() && !inputs.revolver_mid_fire
        } else {
            cmd.buttons.contains(ButtonMask::ATTACK)
                || (cmd.buttons.contains(ButtonMask::ATTACK2) && weapon.is_knife())
        };

        if inputs.send_packet && !weapon.is_grenade() && firing {
            self.outputs.tick_shift = self.outputs.next_tick_shift;
        }
    }
}
