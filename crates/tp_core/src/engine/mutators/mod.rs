//! Movement mutators: short-lived rewrites of movement intent, gated by the
//! per-tick guard snapshot.

pub mod auto_crouch;
pub mod directional_remap;
pub mod force_crouch;
pub mod stop_brake;

pub use auto_crouch::AutoCrouch;
pub use stop_brake::StopBrake;
