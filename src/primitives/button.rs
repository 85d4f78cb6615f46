//! Button - A clickable leaf widget.
//!
//! The button wants its content size plus padding on every side and paints
//! one rectangle whose color follows its state:
//!
//! | Pointer                  | State        |
//! |--------------------------|--------------|
//! | outside                  | `Normal`     |
//! | over the button          | `Prelight`   |
//! | pressed inside, held     | `Active`     |
//! | button made insensitive  | `Insensitive`|
//!
//! A click is a press and release of the same mouse button, both inside.

use std::cell::Cell;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::engine::{ConnectionId, Signal, Widget, WidgetCore, WidgetState};
use crate::renderer::RenderTarget;
use crate::state::event::Event;
use crate::types::{Rgba, Vec2};

// =============================================================================
// Style
// =============================================================================

/// Colors per state and padding around the content.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonStyle {
    pub normal: Rgba,
    pub prelight: Rgba,
    pub active: Rgba,
    pub insensitive: Rgba,
    /// Space on each side of the content (left/right, top/bottom).
    pub padding: Vec2,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            normal: Rgba::GRAY,
            prelight: Rgba::LIGHT_GRAY,
            active: Rgba::WHITE,
            insensitive: Rgba::DARK_GRAY,
            padding: Vec2::new(1.0, 0.0),
        }
    }
}

impl ButtonStyle {
    /// Color to paint in `state`.
    pub fn color(&self, state: WidgetState) -> Rgba {
        match state {
            WidgetState::Normal => self.normal,
            WidgetState::Prelight => self.prelight,
            WidgetState::Active => self.active,
            WidgetState::Insensitive => self.insensitive,
        }
    }
}

// =============================================================================
// Button
// =============================================================================

pub struct Button {
    core: WidgetCore,
    content_size: Cell<Vec2>,
    style: Cell<ButtonStyle>,
}

impl Button {
    pub fn new(content_size: Vec2) -> Rc<Self> {
        Self::with_style(content_size, ButtonStyle::default())
    }

    pub fn with_style(content_size: Vec2, style: ButtonStyle) -> Rc<Self> {
        Rc::new(Self {
            core: WidgetCore::new(),
            content_size: Cell::new(content_size),
            style: Cell::new(style),
        })
    }

    /// Connect a click handler. Receives the release position.
    pub fn on_click<F: Fn(&Vec2) + 'static>(&self, handler: F) -> ConnectionId {
        self.core.on_click.connect(handler)
    }

    /// The click signal, for disconnecting.
    pub fn click_signal(&self) -> &Signal<Vec2> {
        &self.core.on_click
    }

    pub fn content_size(&self) -> Vec2 {
        self.content_size.get()
    }

    /// Change the content size and renegotiate layout.
    pub fn set_content_size(&self, size: Vec2) {
        if self.content_size.replace(size) != size {
            self.request_size();
        }
    }

    pub fn style(&self) -> ButtonStyle {
        self.style.get()
    }

    pub fn set_style(&self, style: ButtonStyle) {
        let old = self.style.replace(style);
        if old.padding != style.padding {
            self.request_size();
        } else {
            self.invalidate();
        }
    }

    pub fn state(&self) -> WidgetState {
        self.core.state()
    }

    pub fn is_sensitive(&self) -> bool {
        self.core.state() != WidgetState::Insensitive
    }

    /// Insensitive buttons ignore all input.
    pub fn set_sensitive(&self, sensitive: bool) {
        if sensitive == self.is_sensitive() {
            return;
        }
        if sensitive {
            self.core.set_state(WidgetState::Normal);
            self.sync_state();
        } else {
            self.core.set_state(WidgetState::Insensitive);
        }
    }

    fn sync_state(&self) {
        let state = if self.core.pressed_button().is_some() && self.core.is_mouse_in() {
            WidgetState::Active
        } else if self.core.is_mouse_in() {
            WidgetState::Prelight
        } else {
            WidgetState::Normal
        };

        if state != self.core.state() {
            trace!(?state, "button: state change");
            self.core.set_state(state);
        }
    }
}

impl Widget for Button {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn requisition(&self) -> Vec2 {
        let padding = self.style.get().padding;
        self.content_size.get() + Vec2::new(2.0 * padding.x, 2.0 * padding.y)
    }

    fn handle_event(&self, event: &Event) {
        if !self.is_sensitive() {
            return;
        }
        self.core.handle_event(event);
        self.sync_state();
    }

    fn expose(&self, target: &mut dyn RenderTarget) {
        let color = self.style.get().color(self.core.state());
        target.fill_rect(self.allocation(), color);
        self.core.clear_invalidated();
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("core", &self.core)
            .field("content_size", &self.content_size.get())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameRecorder;
    use crate::state::event::MouseButton;
    use crate::types::{FloatRect, View};

    fn button_at(rect: FloatRect) -> Rc<Button> {
        let button = Button::with_style(
            rect.size(),
            ButtonStyle {
                padding: Vec2::ZERO,
                ..Default::default()
            },
        );
        button.allocate_size(rect);
        button
    }

    fn clicks(button: &Button) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        button.on_click(move |_| count_clone.set(count_clone.get() + 1));
        count
    }

    #[test]
    fn test_requisition_includes_padding() {
        let button = Button::with_style(
            Vec2::new(6.0, 1.0),
            ButtonStyle {
                padding: Vec2::new(2.0, 1.0),
                ..Default::default()
            },
        );
        assert_eq!(button.requisition(), Vec2::new(10.0, 3.0));
    }

    #[test]
    fn test_state_follows_pointer() {
        let button = button_at(FloatRect::new(0.0, 0.0, 10.0, 3.0));
        assert_eq!(button.state(), WidgetState::Normal);

        button.handle_event(&Event::mouse_moved(5.0, 1.0));
        assert_eq!(button.state(), WidgetState::Prelight);

        button.handle_event(&Event::mouse_pressed(MouseButton::Left, 5.0, 1.0));
        assert_eq!(button.state(), WidgetState::Active);

        button.handle_event(&Event::mouse_released(MouseButton::Left, 5.0, 1.0));
        assert_eq!(button.state(), WidgetState::Prelight);

        button.handle_event(&Event::mouse_left());
        assert_eq!(button.state(), WidgetState::Normal);
    }

    #[test]
    fn test_click_requires_press_and_release_inside() {
        let button = button_at(FloatRect::new(0.0, 0.0, 10.0, 3.0));
        let count = clicks(&button);

        button.handle_event(&Event::mouse_pressed(MouseButton::Left, 1.0, 1.0));
        button.handle_event(&Event::mouse_released(MouseButton::Left, 2.0, 1.0));
        assert_eq!(count.get(), 1);

        // Released outside
        button.handle_event(&Event::mouse_pressed(MouseButton::Left, 1.0, 1.0));
        button.handle_event(&Event::mouse_released(MouseButton::Left, 50.0, 1.0));
        assert_eq!(count.get(), 1);

        // Different button
        button.handle_event(&Event::mouse_pressed(MouseButton::Left, 1.0, 1.0));
        button.handle_event(&Event::mouse_released(MouseButton::Right, 1.0, 1.0));
        assert_eq!(count.get(), 1);

        // Release without a press
        button.handle_event(&Event::mouse_released(MouseButton::Left, 1.0, 1.0));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_insensitive_ignores_input() {
        let button = button_at(FloatRect::new(0.0, 0.0, 10.0, 3.0));
        let count = clicks(&button);

        button.set_sensitive(false);
        button.handle_event(&Event::mouse_moved(1.0, 1.0));
        button.handle_event(&Event::mouse_pressed(MouseButton::Left, 1.0, 1.0));
        button.handle_event(&Event::mouse_released(MouseButton::Left, 1.0, 1.0));

        assert_eq!(count.get(), 0);
        assert_eq!(button.state(), WidgetState::Insensitive);

        button.set_sensitive(true);
        assert_eq!(button.state(), WidgetState::Normal);
    }

    #[test]
    fn test_content_size_change_requests_size() {
        let button = button_at(FloatRect::new(0.0, 0.0, 4.0, 1.0));
        let requests = Rc::new(Cell::new(0));
        let requests_clone = requests.clone();
        button
            .core()
            .on_size_request
            .connect(move |_| requests_clone.set(requests_clone.get() + 1));

        button.set_content_size(Vec2::new(4.0, 1.0));
        assert_eq!(requests.get(), 0);

        button.set_content_size(Vec2::new(8.0, 2.0));
        assert_eq!(requests.get(), 1);
        // Parentless: grows itself in place
        assert_eq!(button.allocation(), FloatRect::new(0.0, 0.0, 8.0, 2.0));
    }

    #[test]
    fn test_expose_uses_state_color() {
        let button = button_at(FloatRect::new(0.0, 0.0, 4.0, 1.0));
        let mut target = FrameRecorder::new(View::default());

        button.expose(&mut target);
        button.handle_event(&Event::mouse_moved(1.0, 0.5));
        button.expose(&mut target);

        let style = button.style();
        let colors: Vec<Rgba> = target
            .commands()
            .iter()
            .filter_map(|command| match command {
                crate::renderer::DrawCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![style.normal, style.prelight]);
        assert!(!button.core().is_invalidated());
    }

    #[test]
    fn test_disconnect_click() {
        let button = button_at(FloatRect::new(0.0, 0.0, 4.0, 1.0));
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let id = button.on_click(move |_| count_clone.set(count_clone.get() + 1));

        assert!(button.click_signal().disconnect(id));

        button.handle_event(&Event::mouse_pressed(MouseButton::Left, 1.0, 0.5));
        button.handle_event(&Event::mouse_released(MouseButton::Left, 1.0, 0.5));
        assert_eq!(count.get(), 0);
    }
}
