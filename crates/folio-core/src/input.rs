//! Input event types consumed by the interaction engine.
//!
//! The engine is fed plain values rather than subscribing to a real event
//! loop, so the whole state machine stays testable without a windowing
//! system. The embedding UI is responsible for click counting and delivers
//! double-clicks as their own event.

use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on Linux/Windows, Cmd on macOS; shortcuts accept either.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn command_only() -> Self {
        Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        }
    }
}

/// Keys the engine reacts to. Everything else stays with the embedding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Enter,
    Tab,
    /// A printable character, lowercased (used for shortcuts like Cmd+D).
    Char(char),
}
