//! Keyboard mapping
//!
//! Arrow keys move one unit in the visual direction of the key, so the
//! meaning of left/right flips for right-to-left sliders and up/down flips for
//! top-to-bottom sliders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownKey;
use crate::geometry::Direction;
use crate::offset::Offset;

/// Keys the slider responds to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Backspace,
    Delete,
}

/// What a key press asks for
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    /// Move the focused handle
    Offset(Offset),
    /// Remove the focused handle (editable ranges only)
    Remove,
}

/// Units moved by PageUp / PageDown
const PAGE_UNITS: f64 = 2.0;

impl KeyCode {
    /// Resolve the key for a slider direction
    pub fn action(&self, direction: Direction) -> KeyAction {
        let forward_horizontal = matches!(direction, Direction::Ltr | Direction::Btt);
        let forward_vertical = direction != Direction::Ttb;

        let units = match self {
            KeyCode::ArrowLeft => -flip(forward_horizontal),
            KeyCode::ArrowRight => flip(forward_horizontal),
            KeyCode::ArrowUp => flip(forward_vertical),
            KeyCode::ArrowDown => -flip(forward_vertical),
            KeyCode::PageUp => PAGE_UNITS,
            KeyCode::PageDown => -PAGE_UNITS,
            KeyCode::Home => return KeyAction::Offset(Offset::Min),
            KeyCode::End => return KeyAction::Offset(Offset::Max),
            KeyCode::Backspace | KeyCode::Delete => return KeyAction::Remove,
        };
        KeyAction::Offset(Offset::By(units))
    }
}

fn flip(forward: bool) -> f64 {
    if forward {
        1.0
    } else {
        -1.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for KeyCode {
    type Err = UnknownKey;

    /// Parse DOM-style key names (`ArrowLeft`, `PageUp`, ...), case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "arrowleft" | "left" => KeyCode::ArrowLeft,
            "arrowright" | "right" => KeyCode::ArrowRight,
            "arrowup" | "up" => KeyCode::ArrowUp,
            "arrowdown" | "down" => KeyCode::ArrowDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            _ => return Err(UnknownKey(s.to_string())),
        };
        Ok(key)
    }
}
