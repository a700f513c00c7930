//! Input abstraction layer.
//!
//! Normalizes host pointer and key events into `InputEvent`s. Pointer
//! coordinates are already in the canvas' logical space by the time they
//! arrive here; [`map_to_logical`] does that mapping for hosts that only
//! have device coordinates.

use gt_core::Point;
use std::collections::HashSet;

/// Modifier keys held during a pointer or key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
}

/// Mouse button, numbered as in DOM `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other(i16),
}

impl From<i16> for PointerButton {
    fn from(button: i16) -> Self {
        match button {
            0 => PointerButton::Primary,
            2 => PointerButton::Secondary,
            n => PointerButton::Other(n),
        }
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at a logical canvas position.
    PointerDown {
        x: f64,
        y: f64,
        button: PointerButton,
        modifiers: Modifiers,
    },

    /// Key pressed. `key` is the `KeyboardEvent.key` value (e.g. `"3"`, `"Enter"`).
    KeyDown { key: String },

    /// Key released.
    KeyUp { key: String },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64, button: PointerButton, modifiers: Modifiers) -> Self {
        Self::PointerDown {
            x,
            y,
            button,
            modifiers,
        }
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown { key: key.into() }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp { key: key.into() }
    }
}

/// Client-rect geometry of the canvas element in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Map a device coordinate into a logical canvas of `logical_w × logical_h`.
/// A degenerate rect maps everything to the origin.
pub fn map_to_logical(
    client_x: f64,
    client_y: f64,
    rect: DeviceRect,
    logical_w: f64,
    logical_h: f64,
) -> Point {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Point::ZERO;
    }
    Point::new(
        (client_x - rect.left) * logical_w / rect.width,
        (client_y - rect.top) * logical_h / rect.height,
    )
}

/// Keys currently held down. Auto-repeat keydowns for a held key are
/// swallowed so holding a key never fires twice.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown. Returns `true` only on the transition into held.
    pub fn press(&mut self, key: &str) -> bool {
        self.held.insert(key.to_string())
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Forget everything, e.g. when focus moves away and keyups will be lost.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}
