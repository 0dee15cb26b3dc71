//! Directional remap ("slide"): rewrite the reported direction buttons.
//!
//! Two mutually exclusive branches, selected by the desync guard:
//! - desync active: swap the reported button pair matching the sign of each
//!   analog axis, leaving the analog values alone;
//! - desync inactive: clear all four direction buttons and re-derive digital
//!   buttons from the analog signs with a fixed tie policy (a zero side axis
//!   resolves to MOVE_RIGHT).
//!
//! Stateless; nothing survives the tick.

use crate::engine::command::{ButtonMask, Command};
use crate::engine::config::DirectionalRemapConfig;
use crate::engine::guard::GuardSnapshot;
use crate::engine::inputs::TickInputs;

/// Run the mutator for one tick.
pub fn apply(
    cmd: &mut Command,
    inputs: &TickInputs,
    guard: &GuardSnapshot,
    config: &DirectionalRemapConfig,
) {
    let Some(local) = &inputs.local else {
        return;
    };
    if !local.alive || local.on_ladder {
        return;
    }
    if !guard.grounded_both() {
        return;
    }

    if guard.desync_active && config.enabled {
        swap_reported_buttons(cmd);
    } else {
        let mut buttons = cmd.buttons - ButtonMask::DIRECTIONS;
        if config.enabled {
            buttons |= digital_from_analog(cmd.forward_move, cmd.side_move);
        }
        cmd.buttons = buttons;
    }
}

/// Desync branch: invert the reported pair per axis, analog values untouched.
/// An axis at exactly zero leaves its buttons alone.
fn swap_reported_buttons(cmd: &mut Command) {
    if cmd.forward_move > 0.0 {
        cmd.buttons |= ButtonMask::BACK;
        cmd.buttons -= ButtonMask::FORWARD;
    } else if cmd.forward_move < 0.0 {
        cmd.buttons |= ButtonMask::FORWARD;
        cmd.buttons -= ButtonMask::BACK;
    }

    if cmd.side_move > 0.0 {
        cmd.buttons |= ButtonMask::MOVE_LEFT;
        cmd.buttons -= ButtonMask::MOVE_RIGHT;
    } else if cmd.side_move < 0.0 {
        cmd.buttons |= ButtonMask::MOVE_RIGHT;
        cmd.buttons -= ButtonMask::MOVE_LEFT;
    }
}

/// Non-desync branch tie policy:
/// forward <= 0 -> BACK, else FORWARD; side > 0 -> MOVE_LEFT,
/// side < 0 -> MOVE_RIGHT, side == 0 -> MOVE_RIGHT.
fn digital_from_analog(forward_move: f32, side_move: f32) -> ButtonMask {
    let mut buttons = if forward_move <= 0.0 {
        ButtonMask::BACK
    } else {
        ButtonMask::FORWARD
    };
    buttons |= if side_move > 0.0 {
        ButtonMask::MOVE_LEFT
    } else {
        ButtonMask::MOVE_RIGHT
    };
    buttons
}
