//! Input Module - crossterm event conversion and polling
//!
//! Turns terminal events into desktop [`Event`]s. Terminal cells map to
//! whole-number pointer coordinates.
//!
//! # API
//!
//! - `convert_event` - One crossterm event to at most one desktop event
//! - `convert_events` - Same, plus `TextEntered` for printable key presses
//! - `convert_key_event` - Key code and modifiers to a [`KeyEvent`]
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `enable_mouse` / `disable_mouse` - Control mouse capture
//!
//! # Example
//!
//! ```ignore
//! use spark_desk::state::input::poll_event;
//! use std::time::Duration;
//!
//! loop {
//!     for event in poll_event(Duration::from_millis(16))? {
//!         desktop.handle_event(&event);
//!     }
//! }
//! ```

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
    KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use crossterm::execute;
use std::io::stdout;
use std::time::Duration;

use super::event::{Event, KeyEvent, Modifiers, MouseButton};
use crate::types::Vec2;

// =============================================================================
// EVENT CONVERSION
// =============================================================================

/// Convert one crossterm event. Pastes and unmapped keys yield `None`.
pub fn convert_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Mouse(mouse) => Some(convert_mouse_event(mouse)),
        CrosstermEvent::Key(key) => {
            let converted = convert_key_event(key)?;
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => Some(Event::KeyPressed(converted)),
                KeyEventKind::Release => Some(Event::KeyReleased(converted)),
            }
        }
        CrosstermEvent::Resize(width, height) => Some(Event::Resized {
            width: u32::from(width),
            height: u32::from(height),
        }),
        CrosstermEvent::FocusGained => Some(Event::FocusGained),
        CrosstermEvent::FocusLost => Some(Event::FocusLost),
        _ => None,
    }
}

/// Convert one crossterm event, following a printable key press with the
/// matching `TextEntered`.
pub fn convert_events(event: CrosstermEvent) -> Vec<Event> {
    let text = match &event {
        CrosstermEvent::Key(key) => text_of(key),
        _ => None,
    };

    convert_event(event)
        .into_iter()
        .chain(text.map(Event::TextEntered))
        .collect()
}

fn text_of(key: &CrosstermKeyEvent) -> Option<char> {
    if key.kind == KeyEventKind::Release
        || key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) if !c.is_control() => Some(c),
        _ => None,
    }
}

fn convert_mouse_event(event: CrosstermMouseEvent) -> Event {
    let position = Vec2::new(f32::from(event.column), f32::from(event.row));

    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Event::MouseMoved(position),
        MouseEventKind::Down(button) => Event::MouseButtonPressed {
            button: convert_mouse_button(button),
            position,
        },
        MouseEventKind::Up(button) => Event::MouseButtonReleased {
            button: convert_mouse_button(button),
            position,
        },
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            Event::MouseWheelScrolled { delta: 1.0 }
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            Event::MouseWheelScrolled { delta: -1.0 }
        }
    }
}

fn convert_mouse_button(button: CrosstermMouseButton) -> MouseButton {
    match button {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

/// Key name and modifiers of a crossterm key event, `None` for keys with no
/// name (media keys, lone modifiers, `Null`).
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<KeyEvent> {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Insert => "Insert".to_string(),
        _ => return None,
    };

    let mut modifiers = convert_modifiers(event.modifiers);
    if event.code == KeyCode::BackTab {
        modifiers.shift = true;
    }

    Some(KeyEvent::with_modifiers(key, modifiers))
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.intersects(KeyModifiers::META | KeyModifiers::SUPER),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for input with a timeout. Empty when nothing arrived or the event
/// has no desktop counterpart.
pub fn poll_event(timeout: Duration) -> std::io::Result<Vec<Event>> {
    if poll(timeout)? {
        read_event()
    } else {
        Ok(Vec::new())
    }
}

/// Read the next terminal event (blocking).
pub fn read_event() -> std::io::Result<Vec<Event>> {
    Ok(convert_events(read()?))
}

// =============================================================================
// MOUSE CAPTURE
// =============================================================================

/// Enable mouse capture.
pub fn enable_mouse() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

/// Disable mouse capture.
pub fn disable_mouse() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

// =============================================================================
// TESTS
// =============================================================================
