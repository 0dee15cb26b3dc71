//! Per-tick view of the external collaborators.
//!
//! Everything the pipeline reads from the host is captured into one
//! `TickInputs` value before the tick runs. The pipeline never calls back
//! into the host mid-tick, so every mutator observes the same facts.

use serde::{Deserialize, Serialize};

use super::keys::KeyStates;
use super::timestep::DEFAULT_TICK_INTERVAL;
use super::weapon::WeaponCapabilities;

/// Manually forced anti-aim side, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualSide {
    #[default]
    None,
    Back,
    Left,
    Right,
}

/// Read-only anti-aim facts queried from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AntiAimState {
    /// Server-side orientation estimate diverges from the true one.
    #[serde(default)]
    pub desync_active: bool,
    /// Anti-aim is holding the view frozen this tick.
    #[serde(default)]
    pub freeze_check: bool,
    #[serde(default)]
    pub manual_side: ManualSide,
    /// Explicit anti-aim override that forces the braking path.
    #[serde(default)]
    pub override_active: bool,
}

/// Local-player facts for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalPlayerState {
    #[serde(default = "default_true")]
    pub alive: bool,
    #[serde(default)]
    pub on_ground: bool,
    #[serde(default)]
    pub on_ladder: bool,
    /// Host froze the player (round freeze or equivalent).
    #[serde(default)]
    pub frozen: bool,
    /// Spawn protection style immunity.
    #[serde(default)]
    pub immune: bool,
    /// Horizontal velocity, units per tick.
    #[serde(default)]
    pub velocity: (f32, f32),
    /// Current view yaw in degrees.
    #[serde(default)]
    pub view_yaw: f32,
}

fn default_true() -> bool {
    true
}

impl Default for LocalPlayerState {
    fn default() -> Self {
        Self {
            alive: true,
            on_ground: false,
            on_ladder: false,
            frozen: false,
            immune: false,
            velocity: (0.0, 0.0),
            view_yaw: 0.0,
        }
    }
}

/// Backup of the previous tick's prediction-relevant facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrevTickBackup {
    #[serde(default)]
    pub on_ground: bool,
}

/// Everything external the pipeline consumes for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickInputs {
    /// Active weapon; `None` is a guard failure for every technique.
    /// Omitting the field in JSON means "default firearm"; an explicit
    /// `null` means "no weapon".
    #[serde(default = "default_weapon")]
    pub weapon: Option<WeaponCapabilities>,
    #[serde(default)]
    pub keys: KeyStates,
    #[serde(default)]
    pub anti_aim: AntiAimState,
    /// Local player; `None` is a guard failure.
    #[serde(default = "default_local")]
    pub local: Option<LocalPlayerState>,
    #[serde(default)]
    pub prev: PrevTickBackup,
    /// Managed/restricted server mode flag.
    #[serde(default)]
    pub managed_server: bool,
    /// A separate duck-fake technique (fake-lag driven) holds the command
    /// buffer this tick, which blocks auto-crouch from engaging.
    #[serde(default)]
    pub fake_lag_active: bool,
    /// Revolver is mid-fire, which suppresses the shot-hide publish.
    #[serde(default)]
    pub revolver_mid_fire: bool,
    /// Commands buffered client-side but not yet flushed.
    #[serde(default)]
    pub choke_count: u32,
    /// This tick's command flushes to the network.
    #[serde(default = "default_true")]
    pub send_packet: bool,
    /// Current simulation tick index.
    #[serde(default)]
    pub current_tick: u32,
    /// Fixed tick interval in seconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval: f32,
}

fn default_tick_interval() -> f32 {
    DEFAULT_TICK_INTERVAL
}

fn default_weapon() -> Option<WeaponCapabilities> {
    Some(WeaponCapabilities::default())
}

fn default_local() -> Option<LocalPlayerState> {
    Some(LocalPlayerState::default())
}

impl Default for TickInputs {
    fn default() -> Self {
        Self {
            weapon: Some(WeaponCapabilities::default()),
            keys: KeyStates::default(),
            anti_aim: AntiAimState::default(),
            local: Some(LocalPlayerState::default()),
            prev: PrevTickBackup::default(),
            managed_server: false,
            fake_lag_active: false,
            revolver_mid_fire: false,
            choke_count: 0,
            send_packet: true,
            current_tick: 0,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}
