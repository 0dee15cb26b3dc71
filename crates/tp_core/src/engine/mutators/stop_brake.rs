//! Stop-brake ("fast stop"): counter residual momentum the tick movement
//! input stops.
//!
//! Above the speed threshold the mutator turns current velocity into a
//! movement intent that pushes exactly opposite to it. Below the threshold,
//! and only while the desync-style guard holds, it keeps the player
//! micro-moving with an alternating side nudge so the animation state never
//! settles.

use crate::engine::command::{ButtonMask, Command};
use crate::engine::config::StopBrakeConfig;
use crate::engine::guard::GuardSnapshot;
use crate::engine::inputs::TickInputs;
use crate::engine::timestep::{BRAKE_SPEED_EPSILON, CREEP_DUCK_SCALE, CREEP_NUDGE};

/// Stop-brake state: sign of the next creep nudge.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopBrake {
    nudge_positive: bool,
}

impl StopBrake {
    /// Run the mutator for one tick.
    pub fn update(
        &mut self,
        cmd: &mut Command,
        inputs: &TickInputs,
        guard: &GuardSnapshot,
        config: &StopBrakeConfig,
    ) {
        if !config.enabled {
            return;
        }
        if !guard.grounded_both() {
            return;
        }
        if cmd.buttons.any_movement() {
            return;
        }

        let Some(local) = &inputs.local else {
            return;
        };
        let (vx, vy) = local.velocity;
        let speed = (vx * vx + vy * vy).sqrt();

        // Grenades pass the weapon gate only with on-click gating and no
        // attack button down.
        let weapon_gate = match &inputs.weapon {
            Some(weapon) => {
                !weapon.is_grenade() || (config.on_click_gate && !cmd.buttons.any_attack())
            }
            None => false,
        };
        let desync_guard =
            (guard.desync_active || inputs.anti_aim.override_active) && weapon_gate;

        if speed > BRAKE_SPEED_EPSILON {
            let (forward_move, side_move) =
                brake_intent(local.velocity, local.view_yaw, config);
            cmd.forward_move = forward_move;
            cmd.side_move = side_move;
        } else if desync_guard {
            let mut nudge = CREEP_NUDGE;
            if cmd.buttons.contains(ButtonMask::DUCK) || guard.duck_faking {
                nudge *= CREEP_DUCK_SCALE;
            }
            if self.nudge_positive {
                cmd.side_move += nudge;
            } else {
                cmd.side_move -= nudge;
            }
            self.nudge_positive = !self.nudge_positive;
        }
    }
}

/// Movement intent opposing the current velocity, in view-local space.
fn brake_intent(velocity: (f32, f32), view_yaw: f32, config: &StopBrakeConfig) -> (f32, f32) {
    let velocity_yaw = velocity.1.atan2(velocity.0).to_degrees();
    let relative = (view_yaw - velocity_yaw).to_radians();
    let forward = (relative.cos(), relative.sin());
    (-config.forward_speed * forward.0, -config.side_speed * forward.1)
}
