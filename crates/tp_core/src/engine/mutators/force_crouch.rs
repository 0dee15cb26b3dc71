//! Force-crouch (no-duck): hold the FORCE_CROUCH override bit so the
//! server keeps the player out of a full duck.
//!
//! Stateless; managed servers reject the override, so the bit is only set
//! outside managed-server mode.

use crate::engine::command::{ButtonMask, Command};
use crate::engine::config::ForceCrouchConfig;
use crate::engine::guard::GuardSnapshot;

/// Run the mutator for one tick.
pub fn apply(cmd: &mut Command, guard: &GuardSnapshot, config: &ForceCrouchConfig) {
    if !config.enabled {
        return;
    }
    if guard.managed_server_mode {
        return;
    }
    cmd.buttons |= ButtonMask::FORCE_CROUCH;
}
