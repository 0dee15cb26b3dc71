/// timestep.rs
/// Simulation timing constants and tick conversion
///
/// The pipeline never owns a clock; the host hands it the current tick index
/// and the fixed tick interval each step. Everything time-shaped in this
/// crate is expressed in ticks via `time_to_ticks`.

/// Default fixed simulation step (64 tick).
pub const DEFAULT_TICK_INTERVAL: f32 = 1.0 / 64.0;

/// Recharge window after a staged double commit, fast-recharge weapons.
pub const DOUBLE_COMMIT_FAST_RECHARGE_S: f32 = 0.5;

/// Recharge window after a staged double commit, everything else.
pub const DOUBLE_COMMIT_SLOW_RECHARGE_S: f32 = 0.75;

/// Tick-base shift published by shot hiding on managed servers.
pub const SHOT_HIDE_SHIFT_MANAGED: u32 = 6;

/// Tick-base shift published by shot hiding on unmanaged servers.
pub const SHOT_HIDE_SHIFT: u32 = 9;

/// Choke depth at which auto-crouch engages.
pub const AUTO_CROUCH_CHOKE_TARGET: u32 = 7;

/// Horizontal speed (units/tick) below which braking switches to the
/// alternating creep nudge.
pub const BRAKE_SPEED_EPSILON: f32 = 20.0;

/// Magnitude of the alternating side-move creep nudge.
pub const CREEP_NUDGE: f32 = 1.01;

/// Creep nudge multiplier while ducked or duck-faking.
pub const CREEP_DUCK_SCALE: f32 = 2.941_176_47;

/// Convert a duration in seconds to whole ticks, rounding up.
///
/// A non-positive interval falls back to `DEFAULT_TICK_INTERVAL` so a
/// malformed host value can never produce a zero-length recharge window.
pub fn time_to_ticks(seconds: f32, tick_interval: f32) -> u32 {
    let interval = if tick_interval > 0.0 {
        tick_interval
    } else {
        DEFAULT_TICK_INTERVAL
    };
    (seconds / interval).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_ticks_64_tick() {
        assert_eq!(time_to_ticks(0.5, 1.0 / 64.0), 32);
        assert_eq!(time_to_ticks(0.75, 1.0 / 64.0), 48);
    }

    #[test]
    fn test_time_to_ticks_rounds_up() {
        // 0.5s at 128 tick = 64 exactly; 0.51s must round up
        assert_eq!(time_to_ticks(0.51, 1.0 / 128.0), 66);
    }

    #[test]
    fn test_time_to_ticks_bad_interval_falls_back() {
        assert_eq!(time_to_ticks(0.5, 0.0), 32);
        assert_eq!(time_to_ticks(0.5, -1.0), 32);
    }
}
