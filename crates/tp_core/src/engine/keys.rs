//! Key binding identifiers and per-tick key state.
//!
//! The host exposes key state over a bounded id range; an out-of-range id
//! means "unbound" and every consumer treats it as a guard failure.

use serde::{Deserialize, Serialize};

/// Sentinel for "no key bound".
pub const KEY_NONE: u8 = 0;

/// Exclusive upper bound of the host's key id range.
pub const KEY_MAX: u8 = 128;

/// A host key binding id. `0` and anything `>= KEY_MAX` is unbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(pub u8);

impl KeyId {
    pub const NONE: KeyId = KeyId(KEY_NONE);

    /// True if the id falls inside the host's bound range.
    pub fn is_bound(&self) -> bool {
        self.0 > KEY_NONE && self.0 < KEY_MAX
    }
}

/// Snapshot of held keys for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStates {
    /// Ids of keys currently held.
    #[serde(default)]
    pub held: Vec<u8>,
}

impl KeyStates {
    pub fn holding(ids: &[u8]) -> Self {
        Self { held: ids.to_vec() }
    }

    /// Whether a bound key is held. Unbound ids are never held.
    pub fn is_held(&self, key: KeyId) -> bool {
        key.is_bound() && self.held.contains(&key.0)
    }
}
