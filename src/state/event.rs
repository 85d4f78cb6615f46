//! Event Types - The input payload routed by the desktop
//!
//! A tagged union of pointer events (which carry a position) and everything
//! else (keys, text, resize, focus), which does not.
//!
//! # API
//!
//! - `Event::position` - Position of a pointer event, `None` otherwise
//! - `Event::is_positional` - Whether the desktop hit-tests this event
//! - `Event::with_position` - Same event at another position
//! - `Event::mouse_left` - The synthetic move used to clear hover state

use crate::types::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position carried by synthetic "pointer left" moves.
///
/// Far outside any sane allocation, so the receiver drops its hover state.
pub const OUTSIDE_POSITION: Vec2 = Vec2::new(-1337.0, -1337.0);

// =============================================================================
// TYPES
// =============================================================================

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with alt
    pub fn alt() -> Self {
        Self { alt: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Keyboard event payload
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyEvent {
    /// The key (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event without modifiers
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
        }
    }

    /// Create a key event with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// An input event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Event {
    /// Pointer moved to a position.
    MouseMoved(Vec2),
    /// Pointer button went down at a position.
    MouseButtonPressed { button: MouseButton, position: Vec2 },
    /// Pointer button went up at a position.
    MouseButtonReleased { button: MouseButton, position: Vec2 },
    /// Wheel scrolled. Not hit-tested.
    MouseWheelScrolled { delta: f32 },
    KeyPressed(KeyEvent),
    KeyReleased(KeyEvent),
    TextEntered(char),
    Resized { width: u32, height: u32 },
    FocusGained,
    FocusLost,
}

impl Event {
    /// Create a move event
    pub fn mouse_moved(x: f32, y: f32) -> Self {
        Self::MouseMoved(Vec2::new(x, y))
    }

    /// Create a press event
    pub fn mouse_pressed(button: MouseButton, x: f32, y: f32) -> Self {
        Self::MouseButtonPressed {
            button,
            position: Vec2::new(x, y),
        }
    }

    /// Create a release event
    pub fn mouse_released(button: MouseButton, x: f32, y: f32) -> Self {
        Self::MouseButtonReleased {
            button,
            position: Vec2::new(x, y),
        }
    }

    /// The synthetic move sent to a widget the pointer just left.
    pub fn mouse_left() -> Self {
        Self::MouseMoved(OUTSIDE_POSITION)
    }

    /// Position of a pointer event.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            Self::MouseMoved(position)
            | Self::MouseButtonPressed { position, .. }
            | Self::MouseButtonReleased { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Whether the event carries a position and is hit-tested.
    #[inline]
    pub fn is_positional(&self) -> bool {
        self.position().is_some()
    }

    #[inline]
    pub fn is_mouse_move(&self) -> bool {
        matches!(self, Self::MouseMoved(_))
    }

    #[inline]
    pub fn is_button_press(&self) -> bool {
        matches!(self, Self::MouseButtonPressed { .. })
    }

    /// Copy of this event moved to `position`. Non-pointer events are
    /// returned unchanged.
    pub fn with_position(&self, position: Vec2) -> Self {
        match self {
            Self::MouseMoved(_) => Self::MouseMoved(position),
            Self::MouseButtonPressed { button, .. } => Self::MouseButtonPressed {
                button: *button,
                position,
            },
            Self::MouseButtonReleased { button, .. } => Self::MouseButtonReleased {
                button: *button,
                position,
            },
            other => other.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_kinds() {
        assert!(Event::mouse_moved(1.0, 2.0).is_positional());
        assert!(Event::mouse_pressed(MouseButton::Left, 1.0, 2.0).is_positional());
        assert!(Event::mouse_released(MouseButton::Right, 1.0, 2.0).is_positional());

        assert!(!Event::MouseWheelScrolled { delta: 1.0 }.is_positional());
        assert!(!Event::KeyPressed(KeyEvent::new("a")).is_positional());
        assert!(!Event::TextEntered('a').is_positional());
        assert!(!Event::Resized { width: 10, height: 10 }.is_positional());
        assert!(!Event::FocusLost.is_positional());
    }

    #[test]
    fn test_with_position_keeps_button() {
        let event = Event::mouse_pressed(MouseButton::Middle, 5.0, 5.0);
        let moved = event.with_position(Vec2::new(1.0, 2.0));

        assert_eq!(
            moved,
            Event::MouseButtonPressed {
                button: MouseButton::Middle,
                position: Vec2::new(1.0, 2.0),
            }
        );

        let key = Event::KeyPressed(KeyEvent::new("Enter"));
        assert_eq!(key.with_position(Vec2::ZERO), key);
    }

    #[test]
    fn test_mouse_left_sentinel() {
        assert_eq!(Event::mouse_left().position(), Some(OUTSIDE_POSITION));
        assert!(Event::mouse_left().is_mouse_move());
    }

    #[test]
    fn test_modifier_helpers() {
        assert!(Modifiers::ctrl().ctrl);
        assert!(Modifiers::alt().alt);
        assert!(Modifiers::shift().shift);
        assert_eq!(Modifiers::none(), Modifiers::default());
    }
}
