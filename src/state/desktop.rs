//! Desktop - Z-ordered stack of top-level widgets and event router
//!
//! The front of the stack is the topmost widget: it is exposed last and
//! gets events first.
//!
//! # API
//!
//! - `add(widget)` - Push a widget to the front
//! - `remove(widget)` - Stage a widget for removal (applied lazily)
//! - `handle_event(event)` - Route one input event
//! - `expose(target)` - Draw every widget back-to-front
//! - `refresh_all()` - Invalidate and re-request sizes across all trees
//! - `to_local(position)` - Screen to desktop coordinates
//!
//! # Routing rules
//!
//! - Pointer events go front-to-back to the first widget whose allocation
//!   contains the point, and stop there. The topmost widget sees every
//!   pointer event, inside or not, so drags keep working past its edges.
//! - Other events go to every widget.
//! - A press inside a widget below the top brings it to the front once the
//!   event has been delivered.
//! - When the pointer moves from one widget to another, the previous one
//!   gets a synthetic move far outside (`Event::mouse_left`) to clear its
//!   hover state.
//!
//! Removal requests made while an event is being routed never change that
//! routing pass.
//!
//! # Example
//!
//! ```ignore
//! use spark_desk::state::{Desktop, Event, MouseButton};
//! use spark_desk::types::FloatRect;
//!
//! let desktop = Desktop::new(FloatRect::new(0.0, 0.0, 800.0, 600.0));
//! desktop.add(window);
//! desktop.handle_event(&Event::mouse_pressed(MouseButton::Left, 10.0, 10.0));
//! desktop.expose(&mut target);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace};

use super::event::Event;
use crate::engine::{same_widget, WeakWidget, WidgetRef};
use crate::renderer::RenderTarget;
use crate::types::{FloatRect, Vec2, View};

/// Z-stack of top-level widgets.
pub struct Desktop {
    view: Cell<View>,
    children: RefCell<Vec<WidgetRef>>,
    obsolete_children: RefCell<Vec<WidgetRef>>,
    last_receiver: RefCell<Option<WeakWidget>>,
}

impl Desktop {
    /// Create a desktop covering `viewport` in screen coordinates.
    pub fn new(viewport: FloatRect) -> Self {
        Self {
            view: Cell::new(View::new(viewport)),
            children: RefCell::new(Vec::new()),
            obsolete_children: RefCell::new(Vec::new()),
            last_receiver: RefCell::new(None),
        }
    }

    pub fn viewport(&self) -> FloatRect {
        self.view.get().viewport
    }

    pub fn set_viewport(&self, viewport: FloatRect) {
        self.view.set(View::new(viewport));
    }

    /// Translate a screen position into desktop coordinates.
    pub fn to_local(&self, global: Vec2) -> Vec2 {
        self.view.get().to_local(global)
    }

    // -------------------------------------------------------------------------
    // Stack management
    // -------------------------------------------------------------------------

    /// Add a widget on top of the stack.
    pub fn add(&self, widget: WidgetRef) {
        self.children.borrow_mut().insert(0, widget);
    }

    /// Stage `widget` for removal. It leaves the stack at the start of the
    /// next `handle_event` or `expose`. Unknown widgets are ignored then.
    pub fn remove(&self, widget: WidgetRef) {
        self.obsolete_children.borrow_mut().push(widget);
    }

    /// Snapshot of the stack, topmost first.
    pub fn widgets(&self) -> Vec<WidgetRef> {
        self.children.borrow().clone()
    }

    /// The topmost widget.
    pub fn top(&self) -> Option<WidgetRef> {
        self.children.borrow().first().cloned()
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }

    /// The widget that took the last pointer event inside its allocation,
    /// if it is still alive.
    pub fn last_receiver(&self) -> Option<WidgetRef> {
        self.last_receiver.borrow().as_ref().and_then(|weak| weak.upgrade())
    }

    fn set_last_receiver(&self, widget: Option<&WidgetRef>) {
        *self.last_receiver.borrow_mut() = widget.map(Rc::downgrade);
    }

    /// Apply staged removals.
    fn remove_obsolete_children(&self) {
        let obsolete = std::mem::take(&mut *self.obsolete_children.borrow_mut());
        if obsolete.is_empty() {
            return;
        }

        let last_receiver = self.last_receiver();
        let mut children = self.children.borrow_mut();

        for widget in obsolete {
            let Some(index) = children.iter().position(|child| same_widget(child, &widget)) else {
                trace!("desktop: removal of unknown widget ignored");
                continue;
            };

            if last_receiver.as_ref().is_some_and(|last| same_widget(last, &widget)) {
                *self.last_receiver.borrow_mut() = None;
            }

            children.remove(index);
            debug!(index, remaining = children.len(), "desktop: removed widget");
        }
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    /// Draw all widgets back-to-front in the desktop's view, then restore
    /// the target's previous view.
    pub fn expose(&self, target: &mut dyn RenderTarget) {
        self.remove_obsolete_children();

        let previous = target.view();
        target.set_view(self.view.get());

        for widget in self.widgets().iter().rev() {
            widget.expose(target);
        }

        target.set_view(previous);
    }

    // -------------------------------------------------------------------------
    // Event routing
    // -------------------------------------------------------------------------

    /// Route one event through the stack.
    pub fn handle_event(&self, event: &Event) {
        self.remove_obsolete_children();

        let children = self.widgets();
        let Some(top) = children.first().cloned() else {
            return;
        };

        // Pointer events are delivered in desktop coordinates
        let local_position = event.position().map(|position| self.to_local(position));
        let event = match local_position {
            Some(position) => event.with_position(position),
            None => event.clone(),
        };

        let mut last_receiver = self.last_receiver();
        let mut new_top: Option<WidgetRef> = None;

        for (index, widget) in children.iter().enumerate() {
            let is_top = index == 0;
            let is_inside =
                local_position.is_some_and(|position| widget.allocation().contains(position));

            // Click-to-front candidate
            if new_top.is_none() && event.is_button_press() && !is_top && is_inside {
                new_top = Some(widget.clone());
            }

            if local_position.is_some() && !is_inside && !is_top {
                continue;
            }

            // Hover moved away from the previous receiver
            if event.is_mouse_move() {
                let previous = last_receiver
                    .take_if(|last| !same_widget(last, widget) && !same_widget(last, &top));
                if let Some(previous) = previous {
                    trace!("desktop: sending leave to previous receiver");
                    previous.handle_event(&Event::mouse_left());
                    self.set_last_receiver(Some(widget));
                }
            }

            trace!(index, is_inside, "desktop: delivering event");
            widget.handle_event(&event);

            if local_position.is_some() && is_inside {
                self.set_last_receiver(Some(widget));
                break;
            }
        }

        if let Some(widget) = new_top {
            self.bring_to_front(&widget);
        }
    }

    /// Move `widget` to the front of the stack.
    fn bring_to_front(&self, widget: &WidgetRef) {
        let mut children = self.children.borrow_mut();
        if let Some(index) = children.iter().position(|child| same_widget(child, widget)) {
            let widget = children.remove(index);
            children.insert(0, widget);
            debug!(from = index, "desktop: brought widget to front");
        }
    }

    // -------------------------------------------------------------------------
    // Refresh
    // -------------------------------------------------------------------------

    /// Invalidate every widget and re-request its size, recursing into
    /// containers. Back-to-front.
    pub fn refresh_all(&self) {
        for widget in self.widgets().iter().rev() {
            refresh_widget(widget);
        }
    }
}

fn refresh_widget(widget: &WidgetRef) {
    if let Some(children) = widget.children() {
        for child in &children {
            refresh_widget(child);
        }
    }
    widget.invalidate();
    widget.request_size();
}

impl std::fmt::Debug for Desktop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("viewport", &self.viewport())
            .field("widgets", &self.len())
            .field("pending_removals", &self.obsolete_children.borrow().len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
