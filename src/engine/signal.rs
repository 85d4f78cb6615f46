//! Signal - Callback registry for widget notifications
//!
//! A signal owns a list of callbacks. `connect` registers one and returns
//! an id, `disconnect` removes it, `emit` calls every callback in
//! registration order.
//!
//! # Example
//!
//! ```ignore
//! use spark_desk::engine::Signal;
//!
//! let on_click: Signal<()> = Signal::new();
//! let id = on_click.connect(|_| println!("clicked"));
//! on_click.emit(&());
//! on_click.disconnect(id);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Signal::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(usize);

/// Callback type stored by a signal.
pub type Handler<A> = Rc<dyn Fn(&A)>;

/// A list of callbacks invoked with `&A`.
///
/// Handlers may connect or disconnect on the same signal while it is being
/// emitted; changes apply from the next emit.
pub struct Signal<A> {
    handlers: RefCell<Vec<(ConnectionId, Handler<A>)>>,
    next_id: Cell<usize>,
}

impl<A> Signal<A> {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Register a callback. Returns the id used to disconnect it.
    pub fn connect<F>(&self, handler: F) -> ConnectionId
    where
        F: Fn(&A) + 'static,
    {
        let id = ConnectionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Remove a callback. Returns false if the id was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    /// Remove every callback.
    pub fn disconnect_all(&self) {
        self.handlers.borrow_mut().clear();
    }

    /// Call every connected callback with `args`.
    pub fn emit(&self, args: &A) {
        // Snapshot so callbacks can touch this signal
        let handlers: Vec<Handler<A>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in handlers {
            handler(args);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl<A> Default for Signal<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Signal<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("handlers", &self.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
