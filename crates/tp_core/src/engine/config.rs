//! # Pipeline Configuration
//!
//! Central tuning surface for every mutator, in one serde-friendly value.
//!
//! ## Usage
//! ```rust
//! use tp_core::engine::config::PipelineConfig;
//!
//! let disabled = PipelineConfig::default();
//! let everything = PipelineConfig::all_enabled();
//! ```

use serde::{Deserialize, Serialize};

use super::keys::KeyId;

/// Auto-crouch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AutoCrouchConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Guard key; unbound id disables the feature.
    #[serde(default)]
    pub key: KeyId,
}

/// Directional remap ("slide") settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectionalRemapConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// Force-crouch (no-duck) settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForceCrouchConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// Stop-brake ("fast stop") settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopBrakeConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Host forward speed limit (cl_forwardspeed equivalent).
    #[serde(default = "default_speed_limit")]
    pub forward_speed: f32,
    /// Host side speed limit (cl_sidespeed equivalent).
    #[serde(default = "default_speed_limit")]
    pub side_speed: f32,
    /// Grenades only pass the weapon gate when on-click gating is on and no
    /// attack button is down.
    #[serde(default)]
    pub on_click_gate: bool,
}

fn default_speed_limit() -> f32 {
    450.0
}

impl Default for StopBrakeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            forward_speed: default_speed_limit(),
            side_speed: default_speed_limit(),
            on_click_gate: false,
        }
    }
}

/// Double-commit settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DoubleCommitConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Arming key; unbound id disables the feature.
    #[serde(default)]
    pub key: KeyId,
    /// Defensive double-commit variant. The behavior of this variant is
    /// intentionally undefined; the guard is evaluated and the request is
    /// logged, nothing else happens. See DESIGN.md.
    #[serde(default)]
    pub defensive: bool,
}

/// Shot-hide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShotHideConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Arming key; unbound id disables the feature.
    #[serde(default)]
    pub key: KeyId,
}

/// Full pipeline configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub auto_crouch: AutoCrouchConfig,
    #[serde(default)]
    pub directional_remap: DirectionalRemapConfig,
    #[serde(default)]
    pub force_crouch: ForceCrouchConfig,
    #[serde(default)]
    pub stop_brake: StopBrakeConfig,
    #[serde(default)]
    pub double_commit: DoubleCommitConfig,
    #[serde(default)]
    pub shot_hide: ShotHideConfig,
}

impl PipelineConfig {
    /// Every feature on, with the conventional key layout. Mostly useful in
    /// tests and scenario files.
    pub fn all_enabled() -> Self {
        let mut cfg = Self::default();
        cfg.auto_crouch.enabled = true;
        cfg.auto_crouch.key = KeyId(20);
        cfg.directional_remap.enabled = true;
        cfg.force_crouch.enabled = true;
        cfg.stop_brake.enabled = true;
        cfg.double_commit.enabled = true;
        cfg.double_commit.key = KeyId(16);
        cfg.shot_hide.enabled = true;
        cfg.shot_hide.key = KeyId(17);
        cfg
    }
}
