//! Test widget that records what it receives.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::widget::{Widget, WidgetCore};
use crate::renderer::RenderTarget;
use crate::state::event::Event;
use crate::types::{Rgba, Vec2};

pub struct TestWidget {
    core: WidgetCore,
    requisition: Cell<Vec2>,
    events: RefCell<Vec<Event>>,
    invalidations: Cell<u32>,
    size_requests: Rc<Cell<u32>>,
    hook: RefCell<Option<Box<dyn Fn(&Event)>>>,
}

impl TestWidget {
    pub fn new(requisition: Vec2) -> Rc<Self> {
        let size_requests = Rc::new(Cell::new(0));
        let widget = Rc::new(Self {
            core: WidgetCore::new(),
            requisition: Cell::new(requisition),
            events: RefCell::new(Vec::new()),
            invalidations: Cell::new(0),
            size_requests: size_requests.clone(),
            hook: RefCell::new(None),
        });
        widget
            .core
            .on_size_request
            .connect(move |_| size_requests.set(size_requests.get() + 1));
        widget
    }

    pub fn set_requisition(&self, requisition: Vec2) {
        self.requisition.set(requisition);
    }

    /// Run `hook` on every event, before base handling.
    pub fn on_event<F: Fn(&Event) + 'static>(&self, hook: F) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn invalidations(&self) -> u32 {
        self.invalidations.get()
    }

    pub fn size_requests(&self) -> u32 {
        self.size_requests.get()
    }
}

impl Widget for TestWidget {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn requisition(&self) -> Vec2 {
        self.requisition.get()
    }

    fn handle_event(&self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
        if let Some(hook) = self.hook.borrow().as_ref() {
            hook(event);
        }
        self.core.handle_event(event);
    }

    fn invalidate(&self) {
        self.invalidations.set(self.invalidations.get() + 1);
        self.core.invalidate();
    }

    fn expose(&self, target: &mut dyn RenderTarget) {
        target.fill_rect(self.allocation(), Rgba::WHITE);
        self.core.clear_invalidated();
    }
}
