#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! The console is driven entirely by these values: the host translates its
//! native keyboard, pointer, wheel, resize, and clipboard notifications into
//! [`Event`] and feeds them to the controller one at a time. Coordinates are
//! surface pixels with the origin at the top-left corner.
//!
//! # Example
//! ```
//! use dterm_core::event::{Event, KeyCode, KeyEvent, Modifiers};
//!
//! let copy = Event::Key(KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL));
//! assert!(matches!(copy, Event::Key(k) if k.ctrl() && k.is_char('c')));
//! ```

use bitflags::bitflags;
use web_time::Instant;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),

    /// Pointer button press, drag motion, or release.
    Pointer(PointerEvent),

    /// Wheel scroll over the surface.
    Wheel(WheelEvent),

    /// The rendering surface changed size (pixels).
    Resize {
        /// New surface width.
        width: f32,
        /// New surface height.
        height: f32,
    },

    /// Clipboard text delivered by the host.
    Paste(String),

    /// Periodic timer tick used for caret blink, autosave, and task polling.
    Tick(Instant),
}

/// A key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the press.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with the given modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key (case-insensitive for ASCII).
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&c))
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Super/Meta/Cmd modifier is held.
    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }

    /// Ctrl or Cmd: the platform "command" chord.
    #[must_use]
    pub const fn command_chord(&self) -> bool {
        self.ctrl() || self.super_key()
    }

    /// The character this key inserts, if it is a plain printable key.
    ///
    /// Characters typed with Ctrl/Cmd/Alt are chords, not text.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !c.is_control()
                    && !self
                        .modifiers
                        .intersects(Modifiers::CTRL | Modifiers::SUPER | Modifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

/// Key codes the console distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key.
    Char(char),
    /// Enter/Return.
    Enter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// Delete (forward).
    Delete,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pointer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Primary button pressed.
    Down,
    /// Pointer moved (with or without a button held).
    Move,
    /// Primary button released.
    Up,
    /// Secondary button pressed (a context-menu request).
    Context,
}

/// A pointer event in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Press, move, or release.
    pub kind: PointerKind,
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl PointerEvent {
    /// Create a pointer event.
    #[must_use]
    pub const fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }
}

/// A wheel event. Positive `delta_y` scrolls toward newer output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// X coordinate of the pointer.
    pub x: f32,
    /// Y coordinate of the pointer.
    pub y: f32,
    /// Vertical delta in pixels.
    pub delta_y: f32,
}
