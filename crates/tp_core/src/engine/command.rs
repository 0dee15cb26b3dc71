//! Outgoing input commands and the client-side command history ring.
//!
//! One `Command` is sampled per simulation tick, mutated in place by the
//! pipeline, then handed to transport. The history ring mirrors the host's
//! backup buffer: slots are addressed by `sequence % COMMAND_BACKUP`, and the
//! only staging write the pipeline ever performs targets the immediately
//! following sequence slot, which transport has not yet consumed.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Number of slots in the command history ring.
pub const COMMAND_BACKUP: usize = 150;

bitflags! {
    /// Button bits carried by an outgoing command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ButtonMask: u32 {
        const FORWARD = 1 << 0;
        const BACK = 1 << 1;
        const MOVE_LEFT = 1 << 2;
        const MOVE_RIGHT = 1 << 3;
        const DUCK = 1 << 4;
        const ATTACK = 1 << 5;
        const ATTACK2 = 1 << 6;
        const JUMP = 1 << 7;
        const FORCE_CROUCH = 1 << 8;
    }
}

impl ButtonMask {
    /// All four digital movement-direction bits.
    pub const DIRECTIONS: ButtonMask = ButtonMask::FORWARD
        .union(ButtonMask::BACK)
        .union(ButtonMask::MOVE_LEFT)
        .union(ButtonMask::MOVE_RIGHT);

    /// True if any movement or jump button is down.
    pub fn any_movement(&self) -> bool {
        self.intersects(Self::DIRECTIONS.union(Self::JUMP))
    }

    /// True if either attack button is down.
    pub fn any_attack(&self) -> bool {
        self.intersects(Self::ATTACK | Self::ATTACK2)
    }
}

/// One outgoing input command.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Command {
    /// Monotonically increasing command number.
    pub sequence: u32,
    /// Tick index embedded in the command, normally the local simulation tick.
    pub tick_base: u32,
    /// Pressed buttons.
    #[serde(default)]
    pub buttons: ButtonMask,
    /// Forward analog intent (positive = forward).
    #[serde(default)]
    pub forward_move: f32,
    /// Sideways analog intent (positive = right).
    #[serde(default)]
    pub side_move: f32,
}

/// Fixed ring of sampled commands, indexed by sequence number.
///
/// Slot `sequence + 1` is guaranteed unconsumed by transport while the
/// pipeline runs, which is what makes double-commit staging safe.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    slots: Vec<Command>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self {
            slots: vec![Command::default(); COMMAND_BACKUP],
        }
    }
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for a sequence number (read-only).
    pub fn get(&self, sequence: u32) -> &Command {
        &self.slots[sequence as usize % COMMAND_BACKUP]
    }

    /// Slot for a sequence number (mutable).
    pub fn get_mut(&mut self, sequence: u32) -> &mut Command {
        &mut self.slots[sequence as usize % COMMAND_BACKUP]
    }

    /// Record the freshly sampled command into its own slot.
    pub fn store(&mut self, command: Command) {
        *self.get_mut(command.sequence) = command;
    }
}
