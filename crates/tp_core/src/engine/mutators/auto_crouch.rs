//! Auto-crouch: force DUCK while the choke buffer is held at depth.
//!
//! The mutator engages only on the tick the choke count reaches exactly the
//! target depth; once engaged it keeps DUCK in sync with the choke count
//! every tick. Any guard failure collapses the engaged flag to false, and
//! the whole cycle has to be re-derived from scratch.

use tracing::trace;

use crate::engine::command::{ButtonMask, Command};
use crate::engine::config::AutoCrouchConfig;
use crate::engine::guard::GuardSnapshot;
use crate::engine::inputs::TickInputs;
use crate::engine::timestep::AUTO_CROUCH_CHOKE_TARGET;

/// Auto-crouch state. `engaged` is the duck-fake flag the rest of the
/// pipeline reads (stop-brake nudge scaling, tick-shift guards).
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoCrouch {
    pub engaged: bool,
}

impl AutoCrouch {
    /// Run the mutator for one tick.
    pub fn update(
        &mut self,
        cmd: &mut Command,
        inputs: &TickInputs,
        guard: &GuardSnapshot,
        config: &AutoCrouchConfig,
    ) {
        if !config.enabled {
            self.engaged = false;
            return;
        }

        // A separate duck-fake technique owns the choke buffer.
        if inputs.fake_lag_active {
            self.engaged = false;
            return;
        }

        if !guard.grounded_both() {
            self.engaged = false;
            return;
        }

        if guard.managed_server_mode {
            self.engaged = false;
            return;
        }

        if !inputs.keys.is_held(config.key) {
            self.engaged = false;
            return;
        }

        // Engage only on the tick the buffer reaches full depth.
        if !self.engaged && inputs.choke_count != AUTO_CROUCH_CHOKE_TARGET {
            return;
        }

        if inputs.choke_count >= AUTO_CROUCH_CHOKE_TARGET {
            cmd.buttons |= ButtonMask::DUCK;
        } else {
            cmd.buttons -= ButtonMask::DUCK;
        }

        if !self.engaged {
            trace!(choke = inputs.choke_count, "auto-crouch engaged");
        }
        self.engaged = true;
    }
}
