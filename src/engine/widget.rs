//! Widget - The contract every layout and dispatch algorithm relies on
//!
//! Widgets are shared (`Rc<dyn Widget>`) between their container or the
//! desktop and the application. All methods take `&self`; state lives in
//! `Cell`/`RefCell` fields, mostly inside a [`WidgetCore`].
//!
//! # Size negotiation
//!
//! 1. `requisition()` - how much space the widget wants
//! 2. `request_size()` - the requisition changed: bubble to the root, which
//!    re-allocates itself to at least its requisition
//! 3. `allocate_size(rect)` - the parent decided; containers lay out their
//!    children from here
//!
//! # Events
//!
//! `WidgetCore::handle_event` implements the base pointer state machine:
//! enter/leave detection, press/release and click (press and release inside
//! with the same button).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::signal::Signal;
use crate::renderer::RenderTarget;
use crate::state::event::{Event, KeyEvent, MouseButton};
use crate::types::{FloatRect, Vec2};

/// Shared handle to a widget.
pub type WidgetRef = Rc<dyn Widget>;

/// Non-owning handle to a widget.
pub type WeakWidget = Weak<dyn Widget>;

// =============================================================================
// WIDGET STATE
// =============================================================================

/// Visual/interaction state of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetState {
    #[default]
    Normal,
    /// Pointer is over the widget.
    Prelight,
    /// Widget is being pressed.
    Active,
    /// Widget ignores input.
    Insensitive,
}

// =============================================================================
// WIDGET TRAIT
// =============================================================================

/// A node in the widget tree.
pub trait Widget {
    /// Shared base state.
    fn core(&self) -> &WidgetCore;

    /// Size the widget would like to have.
    fn requisition(&self) -> Vec2;

    /// Assign the widget its final rectangle.
    fn allocate_size(&self, rect: FloatRect) {
        self.core().set_allocation(rect);
    }

    fn allocation(&self) -> FloatRect {
        self.core().allocation()
    }

    /// Handle an input event. Pointer positions are in desktop-local
    /// coordinates.
    fn handle_event(&self, event: &Event) {
        self.core().handle_event(event);
    }

    /// Mark cached visuals as stale.
    fn invalidate(&self) {
        self.core().invalidate();
    }

    /// The requisition changed. Bubbles up to the root, which grows its
    /// allocation to fit.
    fn request_size(&self) {
        let core = self.core();
        core.on_size_request.emit(&());

        if let Some(parent) = core.parent() {
            parent.request_size();
            return;
        }

        let current = self.allocation();
        let size = current.size().max(self.requisition());
        self.allocate_size(FloatRect::from_parts(current.position(), size));
    }

    /// Draw into `target`.
    fn expose(&self, _target: &mut dyn RenderTarget) {
        self.core().clear_invalidated();
    }

    /// Containers return their children; leaves return `None`.
    fn children(&self) -> Option<Vec<WidgetRef>> {
        None
    }
}

/// Identity comparison for widget handles.
#[inline]
pub fn same_widget(a: &WidgetRef, b: &WidgetRef) -> bool {
    Rc::ptr_eq(a, b)
}

// =============================================================================
// WIDGET CORE
// =============================================================================

/// Base state shared by all widgets.
pub struct WidgetCore {
    allocation: Cell<FloatRect>,
    invalidated: Cell<bool>,
    state: Cell<WidgetState>,
    mouse_in: Cell<bool>,
    pressed_button: Cell<Option<MouseButton>>,
    parent: RefCell<Option<WeakWidget>>,

    pub on_size_allocate: Signal<FloatRect>,
    pub on_size_request: Signal<()>,
    pub on_mouse_enter: Signal<Vec2>,
    pub on_mouse_leave: Signal<Vec2>,
    pub on_mouse_move: Signal<Vec2>,
    pub on_mouse_button_press: Signal<(MouseButton, Vec2)>,
    pub on_mouse_button_release: Signal<(MouseButton, Vec2)>,
    pub on_click: Signal<Vec2>,
    pub on_key_press: Signal<KeyEvent>,
    pub on_key_release: Signal<KeyEvent>,
    pub on_text_entered: Signal<char>,
    pub on_state_change: Signal<WidgetState>,
}

impl WidgetCore {
    pub fn new() -> Self {
        Self {
            allocation: Cell::new(FloatRect::default()),
            invalidated: Cell::new(true),
            state: Cell::new(WidgetState::Normal),
            mouse_in: Cell::new(false),
            pressed_button: Cell::new(None),
            parent: RefCell::new(None),
            on_size_allocate: Signal::new(),
            on_size_request: Signal::new(),
            on_mouse_enter: Signal::new(),
            on_mouse_leave: Signal::new(),
            on_mouse_move: Signal::new(),
            on_mouse_button_press: Signal::new(),
            on_mouse_button_release: Signal::new(),
            on_click: Signal::new(),
            on_key_press: Signal::new(),
            on_key_release: Signal::new(),
            on_text_entered: Signal::new(),
            on_state_change: Signal::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn allocation(&self) -> FloatRect {
        self.allocation.get()
    }

    /// Store a new allocation, invalidate and notify listeners.
    pub fn set_allocation(&self, rect: FloatRect) {
        self.allocation.set(rect);
        self.invalidate();
        self.on_size_allocate.emit(&rect);
    }

    // -------------------------------------------------------------------------
    // Invalidation
    // -------------------------------------------------------------------------

    pub fn invalidate(&self) {
        self.invalidated.set(true);
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated.get()
    }

    pub fn clear_invalidated(&self) {
        self.invalidated.set(false);
    }

    // -------------------------------------------------------------------------
    // Tree
    // -------------------------------------------------------------------------

    /// The containing widget, if it is still alive.
    pub fn parent(&self) -> Option<WidgetRef> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub fn set_parent(&self, parent: Option<WeakWidget>) {
        *self.parent.borrow_mut() = parent;
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    pub fn state(&self) -> WidgetState {
        self.state.get()
    }

    /// Change state, emitting `on_state_change` when it differs.
    pub fn set_state(&self, state: WidgetState) {
        if self.state.replace(state) != state {
            self.invalidate();
            self.on_state_change.emit(&state);
        }
    }

    /// Whether the pointer is currently inside the allocation.
    pub fn is_mouse_in(&self) -> bool {
        self.mouse_in.get()
    }

    /// Button held down since a press inside the allocation.
    pub fn pressed_button(&self) -> Option<MouseButton> {
        self.pressed_button.get()
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Base event handling shared by all widgets.
    pub fn handle_event(&self, event: &Event) {
        if self.state() == WidgetState::Insensitive {
            return;
        }

        match event {
            Event::MouseMoved(position) => {
                if self.allocation().contains(*position) {
                    if !self.mouse_in.replace(true) {
                        self.on_mouse_enter.emit(position);
                    }
                    self.on_mouse_move.emit(position);
                } else if self.mouse_in.replace(false) {
                    self.on_mouse_leave.emit(position);
                }
            }
            Event::MouseButtonPressed { button, position } => {
                if self.allocation().contains(*position) {
                    self.pressed_button.set(Some(*button));
                    self.on_mouse_button_press.emit(&(*button, *position));
                }
            }
            Event::MouseButtonReleased { button, position } => {
                let pressed = self.pressed_button.take();
                if self.allocation().contains(*position) {
                    self.on_mouse_button_release.emit(&(*button, *position));
                    if pressed == Some(*button) {
                        self.on_click.emit(position);
                    }
                }
            }
            Event::KeyPressed(key) => self.on_key_press.emit(key),
            Event::KeyReleased(key) => self.on_key_release.emit(key),
            Event::TextEntered(ch) => self.on_text_entered.emit(ch),
            _ => {}
        }
    }
}

impl Default for WidgetCore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WidgetCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetCore")
            .field("allocation", &self.allocation())
            .field("state", &self.state())
            .field("mouse_in", &self.is_mouse_in())
            .field("invalidated", &self.is_invalidated())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
