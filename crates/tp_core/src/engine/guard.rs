//! Guard snapshot: one consistent set of guard facts per tick.
//!
//! Captured exactly once, before any mutator runs, and never recomputed
//! mid-tick. Mutators alter the command freely during the tick, but all of
//! them keep seeing the same guard facts.

use super::inputs::TickInputs;

/// Guard-relevant facts for one tick, shared read-only by every mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuardSnapshot {
    pub grounded_now: bool,
    pub grounded_prev_tick: bool,
    /// Auto-crouch was engaged entering this tick.
    pub duck_faking: bool,
    /// Frozen or immune; either disables the timing techniques.
    pub frozen: bool,
    pub managed_server_mode: bool,
    pub desync_active: bool,
    /// Anti-aim freeze check holds the view this tick.
    pub view_frozen: bool,
}

impl GuardSnapshot {
    /// Capture the guard facts for this tick.
    ///
    /// `duck_faking` is the auto-crouch engaged flag as of the start of the
    /// tick; auto-crouch may flip it while the tick runs, but later mutators
    /// still see the captured value.
    pub fn capture(inputs: &TickInputs, duck_faking: bool) -> Self {
        let (grounded_now, frozen) = match &inputs.local {
            Some(local) => (local.on_ground, local.frozen || local.immune),
            None => (false, false),
        };
        Self {
            grounded_now,
            grounded_prev_tick: inputs.prev.on_ground,
            duck_faking,
            frozen,
            managed_server_mode: inputs.managed_server,
            desync_active: inputs.anti_aim.desync_active,
            view_frozen: inputs.anti_aim.freeze_check,
        }
    }

    /// Grounded on both the current and the previous tick.
    pub fn grounded_both(&self) -> bool {
        self.grounded_now && self.grounded_prev_tick
    }
}
