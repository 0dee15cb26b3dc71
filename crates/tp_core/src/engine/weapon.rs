//! Read-only view of the active weapon, as queried from the host.

use serde::{Deserialize, Serialize};

/// Coarse weapon class, as far as the timing techniques care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    #[default]
    Firearm,
    Knife,
    Grenade,
    Taser,
    Revolver,
}

/// Capabilities of the active weapon relevant to command mutation.
///
/// Captured once per tick from the host's weapon query; the pipeline never
/// mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponCapabilities {
    #[serde(default)]
    pub kind: WeaponKind,
    /// Weapon does not aim (knife/grenade class in the host's terms).
    #[serde(default)]
    pub is_non_aim: bool,
    /// Weapon recharges a staged double commit on the short window.
    #[serde(default)]
    pub supports_fast_recharge: bool,
    /// Maximum tick-base shift the weapon tolerates when a commit is staged.
    pub max_tick_shift: u32,
}

impl Default for WeaponCapabilities {
    fn default() -> Self {
        Self {
            kind: WeaponKind::Firearm,
            is_non_aim: false,
            supports_fast_recharge: false,
            max_tick_shift: 16,
        }
    }
}

impl WeaponCapabilities {
    pub fn is_grenade(&self) -> bool {
        self.kind == WeaponKind::Grenade
    }

    pub fn is_knife(&self) -> bool {
        self.kind == WeaponKind::Knife
    }

    pub fn is_taser(&self) -> bool {
        self.kind == WeaponKind::Taser
    }

    pub fn is_revolver(&self) -> bool {
        self.kind == WeaponKind::Revolver
    }

    /// Weapons that may stage a duplicate command. Grenades, tasers and
    /// revolvers only ever pass through the bookkeeping path.
    pub fn stages_commits(&self) -> bool {
        !matches!(
            self.kind,
            WeaponKind::Grenade | WeaponKind::Taser | WeaponKind::Revolver
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_commits() {
        let mut weapon = WeaponCapabilities::default();
        assert!(weapon.stages_commits());

        weapon.kind = WeaponKind::Knife;
        assert!(weapon.stages_commits());

        for kind in [WeaponKind::Grenade, WeaponKind::Taser, WeaponKind::Revolver] {
            weapon.kind = kind;
            assert!(!weapon.stages_commits());
        }
    }
}
